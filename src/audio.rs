//! Background music
//!
//! Best-effort only: a missing back-end or a track that fails to play is
//! logged and otherwise ignored. Nothing here feeds back into the simulation.

use std::io;
use std::path::Path;

use crate::settings::Settings;

/// A device that can play a looping music track
pub trait AudioBackend {
    fn play_music(&mut self, track: &Path, volume: f32, loops: u32) -> io::Result<()>;
    fn stop_music(&mut self);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    music_volume: f32,
    loops: u32,
    muted: bool,
    playing: bool,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio back-end available - audio disabled");
        }
        Self {
            backend,
            music_volume: 0.5,
            loops: 10,
            muted: false,
            playing: false,
        }
    }

    pub fn from_settings(settings: &Settings, backend: Option<Box<dyn AudioBackend>>) -> Self {
        let mut audio = Self::new(backend);
        audio.set_music_volume(settings.effective_music_volume());
        audio.loops = settings.music_loops;
        audio
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_music();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start the background track. Failure leaves audio silent.
    pub fn start_music(&mut self, track: impl AsRef<Path>) {
        if self.muted || self.music_volume <= 0.0 || self.playing {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let track = track.as_ref();
        match backend.play_music(track, self.music_volume, self.loops) {
            Ok(()) => {
                self.playing = true;
                log::info!("Playing {}", track.display());
            }
            Err(e) => log::warn!("Music unavailable ({}): {}", track.display(), e),
        }
    }

    pub fn stop_music(&mut self) {
        if !self.playing {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.stop_music();
        }
        self.playing = false;
    }
}
