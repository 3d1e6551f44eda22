//! Timed command scripts for the headless driver
//!
//! One command per line, prefixed by the tick it fires on:
//!
//! ```text
//! # walk player one onto the struggle plate
//! 0   begin
//! 12  p1-right
//! 14  p1-jump
//! ```

use std::path::Path;

use crate::sim::Command;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Sorted by tick; commands on the same tick keep file order
    entries: Vec<(u64, Command)>,
}

impl Script {
    /// Parse a script, skipping (and logging) lines that don't make sense
    pub fn parse(source: &str) -> Self {
        let mut entries = Vec::new();
        for (line_no, line) in source.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let tick = parts.next().and_then(|t| t.parse::<u64>().ok());
            let command = parts.next().and_then(Command::parse);
            match (tick, command, parts.next()) {
                (Some(tick), Some(command), None) => entries.push((tick, command)),
                _ => log::warn!("Ignoring script line {}: {:?}", line_no + 1, line),
            }
        }
        entries.sort_by_key(|(tick, _)| *tick);
        Self { entries }
    }

    /// Read and parse a script file
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let script = Self::parse(&source);
                log::info!(
                    "Loaded {} commands from {}",
                    script.entries.len(),
                    path.display()
                );
                Some(script)
            }
            Err(e) => {
                log::warn!("Could not read script {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Begin on the first tick and then leave the players alone
    pub fn idle() -> Self {
        Self {
            entries: vec![(0, Command::Begin)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tick of the last scripted command
    pub fn last_tick(&self) -> Option<u64> {
        self.entries.last().map(|(tick, _)| *tick)
    }

    /// Commands scheduled for `tick`, in order
    pub fn commands_at(&self, tick: u64) -> impl Iterator<Item = Command> + '_ {
        let start = self.entries.partition_point(|(t, _)| *t < tick);
        self.entries[start..]
            .iter()
            .take_while(move |(t, _)| *t == tick)
            .map(|(_, command)| *command)
    }
}
