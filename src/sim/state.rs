//! Session state and core simulation types
//!
//! Everything the frame loop mutates lives in [`Session`]; a fresh session is
//! the only way back to a clean slate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Surface;
use super::level;
use crate::consts::*;

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerId::One => "Player 1",
            PlayerId::Two => "Player 2",
        }
    }
}

/// Packed 0xRRGGBB color (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const CHARCOAL: Color = Color(0x212121);
    pub const GRAY: Color = Color(0x808080);
    pub const GREEN: Color = Color(0x008000);
    pub const YELLOW: Color = Color(0xFFFF00);
    pub const ORANGE: Color = Color(0xFFA500);
    pub const PURPLE: Color = Color(0x800080);
    pub const RED: Color = Color(0xFF0000);
    pub const DARK_RED: Color = Color(0x8B0000);
    pub const OLIVE: Color = Color(0x9BAC00);
    pub const SLATE: Color = Color(0x444444);
    pub const RUST: Color = Color(0x5D1300);

    /// CSS-style hex string, e.g. `#8B0000`
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0)
    }
}

/// A player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Vertical velocity (positive is up)
    pub dy: f32,
    /// Remaining life, kept within [0, MAX_LIFE]
    pub life: i32,
    /// Hidden players are out of play (reached the goal or session ended)
    pub visible: bool,
    pub reached_goal: bool,
}

impl Player {
    pub fn new(id: PlayerId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            dy: 0.0,
            life: MAX_LIFE,
            visible: true,
            reached_goal: false,
        }
    }

    /// The top of this player's head as something a teammate can land on
    pub fn as_surface(&self) -> Surface {
        Surface {
            x: self.pos.x,
            y: self.pos.y,
            half_width: HEAD_TOLERANCE,
            clearance: HEAD_CLEARANCE,
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.life = (self.life - amount).clamp(0, MAX_LIFE);
    }

    pub fn heal(&mut self, amount: i32) {
        self.life = (self.life + amount).clamp(0, MAX_LIFE);
    }

    pub fn is_out_of_life(&self) -> bool {
        self.life <= 0
    }
}

/// A rectangular platform block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub pos: Vec2,
    /// Horizontal stretch factor; half-width is `span * BLOCK_SCALE`
    pub span: f32,
    pub color: Color,
    pub visible: bool,
}

impl Block {
    pub fn new(x: f32, y: f32, span: f32, color: Color) -> Self {
        Self {
            pos: Vec2::new(x, y),
            span,
            color,
            visible: true,
        }
    }

    /// Same block, but starting out hidden
    pub fn hidden(x: f32, y: f32, span: f32, color: Color) -> Self {
        Self {
            visible: false,
            ..Self::new(x, y, span, color)
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.span * BLOCK_SCALE
    }

    pub fn as_surface(&self) -> Surface {
        Surface {
            x: self.pos.x,
            y: self.pos.y,
            half_width: self.half_width(),
            clearance: PLATFORM_CLEARANCE,
        }
    }
}

/// Platforms that start hidden and are revealed by triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    Bridge,
    UpperPlatform,
    SummitPlatform,
    FinalStep,
    SupportPlatform,
}

/// Plate/button identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// Level-sensitive, shows the bridge
    Struggle,
    /// Level-sensitive, shows the upper platform
    Perspective,
    /// Reacts to the player being evaluated, gates the final step
    Unity,
    /// Sticky once pressed, shows the support platform
    Support,
}

/// A pressure plate or button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub kind: TriggerKind,
    pub block: Block,
    /// Color shown while released
    pub idle_color: Color,
    pub active: bool,
}

impl Trigger {
    pub fn new(kind: TriggerKind, block: Block) -> Self {
        Self {
            kind,
            idle_color: block.color,
            block,
            active: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.block.pos
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.block.color = if active {
            Color::DARK_RED
        } else {
            self.idle_color
        };
    }
}

/// A point entity: the goal or the health pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub pos: Vec2,
    pub color: Color,
    pub visible: bool,
}

impl Marker {
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            pos: Vec2::new(x, y),
            color,
            visible: true,
        }
    }
}

/// How a piece of text is emphasized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Text placed in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sign {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
    pub visible: bool,
}

impl Sign {
    pub fn new(text: impl Into<String>, x: f32, y: f32, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            pos: Vec2::new(x, y),
            style,
            visible: true,
        }
    }
}

/// Append-only collection of catch-up blocks
///
/// Blocks are never removed within a session and the total never exceeds
/// `MAX_CATCHUP_BLOCKS`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatchupBlocks {
    blocks: Vec<Block>,
}

impl CatchupBlocks {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Room left before the cap
    pub fn remaining(&self) -> usize {
        MAX_CATCHUP_BLOCKS.saturating_sub(self.blocks.len())
    }

    /// Append a batch, dropping whatever would exceed the cap.
    /// Returns the number of blocks actually added.
    pub fn spawn_batch(&mut self, batch: impl IntoIterator<Item = Block>) -> usize {
        let room = self.remaining();
        let before = self.blocks.len();
        self.blocks.extend(batch.into_iter().take(room));
        self.blocks.len() - before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Hide every block without removing any
    pub fn hide_all(&mut self) {
        for block in &mut self.blocks {
            block.visible = false;
        }
    }
}

/// All non-player entities of the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Platforms present from the start
    pub fixed: Vec<Block>,
    pub bridge: Block,
    pub upper_platform: Block,
    pub summit_platform: Block,
    pub final_step: Block,
    pub support_platform: Block,
    pub catchup: CatchupBlocks,
    pub struggle_plate: Trigger,
    pub perspective_plate: Trigger,
    pub unity_button: Trigger,
    pub support_plate: Trigger,
    pub goal: Marker,
    pub health_pickup: Marker,
    pub signs: Vec<Sign>,
}

impl World {
    pub fn feature(&self, feature: Feature) -> &Block {
        match feature {
            Feature::Bridge => &self.bridge,
            Feature::UpperPlatform => &self.upper_platform,
            Feature::SummitPlatform => &self.summit_platform,
            Feature::FinalStep => &self.final_step,
            Feature::SupportPlatform => &self.support_platform,
        }
    }

    pub fn feature_mut(&mut self, feature: Feature) -> &mut Block {
        match feature {
            Feature::Bridge => &mut self.bridge,
            Feature::UpperPlatform => &mut self.upper_platform,
            Feature::SummitPlatform => &mut self.summit_platform,
            Feature::FinalStep => &mut self.final_step,
            Feature::SupportPlatform => &mut self.support_platform,
        }
    }

    /// Every block that can be stood on, visible or not
    pub fn platforms(&self) -> impl Iterator<Item = &Block> {
        self.fixed
            .iter()
            .chain([
                &self.bridge,
                &self.upper_platform,
                &self.summit_platform,
                &self.final_step,
                &self.support_platform,
            ])
            .chain(self.catchup.iter())
    }

    /// Landing surfaces of the visible platforms
    pub fn surfaces(&self) -> impl Iterator<Item = Surface> + '_ {
        self.platforms()
            .filter(|b| b.visible)
            .map(Block::as_surface)
    }

    pub fn triggers(&self) -> [&Trigger; 4] {
        [
            &self.struggle_plate,
            &self.perspective_plate,
            &self.unity_button,
            &self.support_plate,
        ]
    }

    /// Hide every object in the world (end of session)
    pub fn hide_all(&mut self) {
        for block in &mut self.fixed {
            block.visible = false;
        }
        for block in [
            &mut self.bridge,
            &mut self.upper_platform,
            &mut self.summit_platform,
            &mut self.final_step,
            &mut self.support_platform,
        ] {
            block.visible = false;
        }
        self.catchup.hide_all();
        for trigger in [
            &mut self.struggle_plate,
            &mut self.perspective_plate,
            &mut self.unity_button,
            &mut self.support_plate,
        ] {
            trigger.block.visible = false;
        }
        self.goal.visible = false;
        self.health_pickup.visible = false;
        for sign in &mut self.signs {
            sign.visible = false;
        }
    }
}

/// One-way latches collected during a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    /// The struggle plate has been pressed at least once
    pub support_unlocked: bool,
    /// The support plate has latched
    pub support_used: bool,
    pub perspective_spawned: bool,
    pub unity_spawned: bool,
    pub summit_revealed: bool,
    pub final_step_announced: bool,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title card, waiting for `Begin`
    Title,
    /// Active gameplay
    Playing,
    /// Both players reached the goal; ticks left until the title
    Victory { return_in: u32 },
    /// A player ran out of life; ticks left until the title
    Defeat { loser: PlayerId, return_in: u32 },
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Victory { .. } | SessionPhase::Defeat { .. })
    }
}

/// Things that happened during play, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Began,
    Jumped(PlayerId),
    Boosted {
        jumper: PlayerId,
        teammate: PlayerId,
        teammate_life: i32,
    },
    PickupConsumed {
        by: PlayerId,
        life: i32,
    },
    PlatformShown(Feature),
    PlatformHidden(Feature),
    SupportUnlocked,
    CatchupSpawned {
        count: usize,
    },
    FinalStepRevealed,
    ReachedGoal(PlayerId),
    Victory,
    Defeat {
        loser: PlayerId,
    },
    ReturnedToTitle,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub phase: SessionPhase,
    /// Indexed by `PlayerId::index`
    pub players: [Player; 2],
    pub world: World,
    pub progress: Progress,
    /// Terminal message shown once the session has ended
    pub banner: Option<String>,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    pub(crate) events: Vec<SessionEvent>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session sitting on the title card
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Title,
            players: level::spawn_players(),
            world: level::build_world(),
            progress: Progress::default(),
            banner: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Throw everything away and start over at the title card.
    /// Undrained events survive the reset.
    pub fn reset(&mut self) {
        let events = std::mem::take(&mut self.events);
        *self = Self::new();
        self.events = events;
    }

    /// Title -> Playing. Ignored in any other phase.
    pub fn begin(&mut self) -> bool {
        if self.phase != SessionPhase::Title {
            return false;
        }
        self.phase = SessionPhase::Playing;
        self.push_event(SessionEvent::Began);
        log::info!("Session started");
        true
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn catchup_count(&self) -> usize {
        self.world.catchup.len()
    }

    pub fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Borrow one player mutably and the teammate immutably
pub fn split_pair(players: &mut [Player; 2], id: PlayerId) -> (&mut Player, &Player) {
    let [one, two] = players;
    match id {
        PlayerId::One => (one, &*two),
        PlayerId::Two => (two, &*one),
    }
}

/// Borrow both players mutably, the given one first
pub fn split_pair_mut(players: &mut [Player; 2], id: PlayerId) -> (&mut Player, &mut Player) {
    let [one, two] = players;
    match id {
        PlayerId::One => (one, two),
        PlayerId::Two => (two, one),
    }
}
