//! Per-tick view of the session for the presentation layer
//!
//! Carries the authoritative position, visibility, color and life of every
//! entity. Colors are exported as `#RRGGBB` strings.

use glam::Vec2;
use serde::Serialize;

use super::level::TITLE_CARD;
use super::state::{
    Block, Marker, Player, PlayerId, Session, SessionPhase, TextStyle, Trigger, TriggerKind,
};
use crate::consts::LIFE_LABEL_OFFSET;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub pos: Vec2,
    pub life: i32,
    pub visible: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            pos: player.pos,
            life: player.life,
            visible: player.visible,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    pub pos: Vec2,
    pub half_width: f32,
    pub color: String,
    pub visible: bool,
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        Self {
            pos: block.pos,
            half_width: block.half_width(),
            color: block.color.to_hex(),
            visible: block.visible,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerView {
    pub kind: TriggerKind,
    pub active: bool,
    #[serde(flatten)]
    pub block: BlockView,
}

impl From<&Trigger> for TriggerView {
    fn from(trigger: &Trigger) -> Self {
        Self {
            kind: trigger.kind,
            active: trigger.active,
            block: BlockView::from(&trigger.block),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerView {
    pub pos: Vec2,
    pub color: String,
    pub visible: bool,
}

impl From<&Marker> for MarkerView {
    fn from(marker: &Marker) -> Self {
        Self {
            pos: marker.pos,
            color: marker.color.to_hex(),
            visible: marker.visible,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextView {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: SessionPhase,
    /// Only populated on the title card
    pub title_card: Vec<TextView>,
    pub players: Vec<PlayerView>,
    pub platforms: Vec<BlockView>,
    pub triggers: Vec<TriggerView>,
    pub goal: Option<MarkerView>,
    pub health_pickup: Option<MarkerView>,
    pub signs: Vec<TextView>,
    /// "Life: N" above each visible player
    pub life_labels: Vec<TextView>,
    pub banner: Option<String>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let tick = session.time_ticks;
        let phase = session.phase;

        if phase == SessionPhase::Title {
            return Self {
                tick,
                phase,
                title_card: TITLE_CARD
                    .iter()
                    .map(|(text, y, style)| TextView {
                        text: text.to_string(),
                        pos: Vec2::new(0.0, *y),
                        style: *style,
                    })
                    .collect(),
                players: Vec::new(),
                platforms: Vec::new(),
                triggers: Vec::new(),
                goal: None,
                health_pickup: None,
                signs: Vec::new(),
                life_labels: Vec::new(),
                banner: None,
            };
        }

        let world = &session.world;
        Self {
            tick,
            phase,
            title_card: Vec::new(),
            players: session.players.iter().map(PlayerView::from).collect(),
            platforms: world.platforms().map(BlockView::from).collect(),
            triggers: world.triggers().into_iter().map(TriggerView::from).collect(),
            goal: Some(MarkerView::from(&world.goal)),
            health_pickup: Some(MarkerView::from(&world.health_pickup)),
            signs: world
                .signs
                .iter()
                .filter(|s| s.visible)
                .map(|s| TextView {
                    text: s.text.clone(),
                    pos: s.pos,
                    style: s.style,
                })
                .collect(),
            life_labels: life_labels(&session.players),
            banner: session.banner.clone(),
        }
    }
}

fn life_labels(players: &[Player]) -> Vec<TextView> {
    players
        .iter()
        .filter(|p| p.visible)
        .map(|p| TextView {
            text: format!("Life: {}", p.life),
            pos: p.pos + Vec2::new(0.0, LIFE_LABEL_OFFSET),
            style: TextStyle::Normal,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::{Command, apply_command, tick};

    #[test]
    fn test_title_snapshot() {
        let session = Session::new();
        let snapshot = Snapshot::capture(&session);
        assert_eq!(snapshot.title_card.len(), TITLE_CARD.len());
        assert_eq!(snapshot.title_card[0].text, "Paths We Build");
        assert!(snapshot.players.is_empty());
    }

    #[test]
    fn test_playing_snapshot() {
        let mut session = Session::new();
        apply_command(&mut session, Command::Begin);
        session.player_mut(PlayerId::Two).life = 42;
        tick(&mut session);

        let snapshot = Snapshot::capture(&session);
        assert!(snapshot.title_card.is_empty());
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.triggers.len(), 4);
        // Three fixed platforms plus five hidden conditional ones
        assert_eq!(snapshot.platforms.len(), 8);
        assert_eq!(snapshot.platforms.iter().filter(|b| b.visible).count(), 3);

        let label = &snapshot.life_labels[1];
        assert_eq!(label.text, "Life: 42");
        assert_eq!(label.pos.y, session.player(PlayerId::Two).pos.y + LIFE_LABEL_OFFSET);
    }

    #[test]
    fn test_terminal_snapshot_has_banner_only() {
        let mut session = Session::new();
        apply_command(&mut session, Command::Begin);
        crate::sim::outcome::declare_defeat(&mut session, PlayerId::Two);

        let snapshot = Snapshot::capture(&session);
        assert!(snapshot.life_labels.is_empty());
        assert!(snapshot.signs.is_empty());
        assert!(snapshot.platforms.iter().all(|b| !b.visible));
        assert_eq!(
            snapshot.banner.as_deref(),
            Some("Player 2 ran out of life!\nGame Over")
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = Session::new();
        apply_command(&mut session, Command::Begin);
        let json = serde_json::to_string(&Snapshot::capture(&session)).expect("serialize");
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("#FFFF00"));
    }
}
