//! Paths We Build - a two-player cooperative platformer
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (physics, triggers, health, win/loss)
//! - `script`: Timed command scripts for the headless driver
//! - `settings`: Presentation-side preferences
//! - `audio`: Best-effort background music

pub mod audio;
pub mod script;
pub mod settings;
pub mod sim;

pub use audio::AudioManager;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Physics is intentionally not configurable; everything here is fixed.
pub mod consts {
    /// Fixed simulation tick length in milliseconds (20 Hz)
    pub const TICK_MS: u64 = 50;

    /// Downward acceleration added to `dy` every tick
    pub const GRAVITY: f32 = -3.0;
    /// Vertical velocity granted by a jump off a platform
    pub const JUMP_VELOCITY: f32 = 20.0;
    /// Vertical velocity granted by a jump off a teammate's head
    pub const BOOST_JUMP_VELOCITY: f32 = 25.0;
    /// Horizontal distance covered by one left/right command
    pub const MOVE_STEP: f32 = 20.0;

    /// Life bounds and adjustments
    pub const MAX_LIFE: i32 = 100;
    pub const LIFE_LOSS: i32 = 10;
    pub const LIFE_GAIN: i32 = 20;

    /// Block half-width is its span times this factor
    pub const BLOCK_SCALE: f32 = 10.0;
    /// Height of a platform's walkable top above its center
    pub const PLATFORM_CLEARANCE: f32 = 10.0;
    /// Height of a player's head above its center (landing on a teammate)
    pub const HEAD_CLEARANCE: f32 = 20.0;
    /// Horizontal tolerance for standing on a teammate
    pub const HEAD_TOLERANCE: f32 = 20.0;
    /// Vertical tolerance for "standing on" when jumping
    pub const STANDING_TOLERANCE: f32 = 5.0;

    /// Proximity radii
    pub const PLATE_RADIUS: f32 = 20.0;
    pub const PICKUP_RADIUS: f32 = 25.0;
    pub const GOAL_RADIUS: f32 = 25.0;

    /// Catch-up blocks per spawn batch
    pub const CATCHUP_BATCH: usize = 5;
    /// Hard cap on catch-up blocks in one session
    pub const MAX_CATCHUP_BLOCKS: usize = 10;

    /// Delay before returning to the title after a win (4 s)
    pub const VICTORY_RETURN_TICKS: u32 = (4000 / TICK_MS) as u32;
    /// Delay before returning to the title after a loss (3 s)
    pub const DEFEAT_RETURN_TICKS: u32 = (3000 / TICK_MS) as u32;

    /// Life label sits this far above its player
    pub const LIFE_LABEL_OFFSET: f32 = 30.0;
}

/// Strict proximity test used by plates, pickups and the goal
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}
