//! Paths We Build entry point
//!
//! Headless driver: runs a session at the fixed tick rate, feeds it scripted
//! commands and writes one JSON snapshot per tick to stdout. A renderer can
//! sit on the other end of the pipe.
//!
//! Usage: `paths-we-build [SCRIPT]`
//! Settings are read from `$PATHS_WE_BUILD_SETTINGS` (default `settings.json`).

use std::io::{self, Write};
use std::time::{Duration, Instant};

use paths_we_build::consts::TICK_MS;
use paths_we_build::script::Script;
use paths_we_build::sim::{Session, SessionEvent, Snapshot, apply_command, tick};
use paths_we_build::{AudioManager, Settings};

const SETTINGS_ENV: &str = "PATHS_WE_BUILD_SETTINGS";
const DEFAULT_SETTINGS_PATH: &str = "settings.json";

fn main() {
    env_logger::init();
    log::info!("Paths We Build (headless) starting...");

    let settings_path =
        std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    let settings = if std::path::Path::new(&settings_path).exists() {
        Settings::load_from(&settings_path)
    } else {
        Settings::default()
    };

    // No native audio back-end is linked; the manager stays silent
    let mut audio = AudioManager::from_settings(&settings, None);
    audio.start_music(&settings.music_track);

    let (script, total_ticks) = match std::env::args().nth(1) {
        Some(path) => match Script::load(&path) {
            Some(script) => {
                let total = script.last_tick().map_or(0, |t| t + 1) + u64::from(settings.idle_ticks);
                (script, total)
            }
            None => return,
        },
        None => (Script::idle(), u64::from(settings.idle_ticks)),
    };

    if let Err(e) = run(&script, total_ticks, &settings) {
        log::error!("Output closed: {}", e);
    }
    audio.stop_music();
}

/// Fixed-cadence loop. A slow tick is never made up for.
fn run(script: &Script, total_ticks: u64, settings: &Settings) -> io::Result<()> {
    let mut session = Session::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let tick_len = Duration::from_millis(TICK_MS);
    let mut next_tick = Instant::now();

    for index in 0..total_ticks {
        for command in script.commands_at(index) {
            apply_command(&mut session, command);
        }
        tick(&mut session);

        for event in session.drain_events() {
            match event {
                SessionEvent::Victory | SessionEvent::Defeat { .. } => {
                    log::info!("tick {}: {:?}", index, event)
                }
                _ => log::debug!("tick {}: {:?}", index, event),
            }
        }

        let mut snapshot = Snapshot::capture(&session);
        if !settings.show_life_labels {
            snapshot.life_labels.clear();
        }
        match serde_json::to_string(&snapshot) {
            Ok(line) => writeln!(out, "{}", line)?,
            Err(e) => log::warn!("Snapshot not serializable: {}", e),
        }

        if settings.realtime {
            next_tick += tick_len;
            match next_tick.checked_duration_since(Instant::now()) {
                Some(wait) => std::thread::sleep(wait),
                None => next_tick = Instant::now(),
            }
        }
    }

    out.flush()?;
    log::info!("Ran {} ticks, final phase {:?}", total_ticks, session.phase);
    Ok(())
}
