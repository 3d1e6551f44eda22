//! Presentation preferences
//!
//! Loaded from a JSON file next to the game. Physics constants are not
//! configurable and never appear here.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background music on/off
    pub music_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Path of the background track
    pub music_track: String,
    /// How many times the track repeats
    pub music_loops: u32,

    // === HUD ===
    /// Show "Life: N" above each player
    pub show_life_labels: bool,

    // === Driver ===
    /// Ticks to run when no command script is given
    pub idle_ticks: u32,
    /// Sleep between ticks to hold the real 50 ms cadence
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            music_enabled: true,
            music_volume: 0.5,
            music_track: "assets/bg-music.mp3".to_string(),
            music_loops: 10,

            // HUD
            show_life_labels: true,

            // Driver
            idle_ticks: 200,
            realtime: true,
        }
    }
}

impl Settings {
    /// Effective music volume (0 when music is disabled)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_enabled {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Invalid settings: {}", e);
                None
            }
        }
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
            }
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}
