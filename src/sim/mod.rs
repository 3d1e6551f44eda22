//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module is pure and single-threaded:
//! - Fixed timestep only, no wall-clock reads
//! - One mutator: commands between ticks, systems during a tick
//! - No rendering, input-binding or audio dependencies

pub mod collision;
pub mod health;
pub mod level;
pub mod outcome;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod triggers;

pub use collision::{Surface, landing_height};
pub use physics::JumpOutcome;
pub use snapshot::Snapshot;
pub use state::{
    Block, CatchupBlocks, Color, Feature, Marker, Player, PlayerId, Progress, Session,
    SessionEvent, SessionPhase, Sign, TextStyle, Trigger, TriggerKind, World,
};
pub use tick::{Action, Command, apply_command, tick};
