//! The single hand-built level
//!
//! Coordinates are world units with the origin at screen center and y up.

use glam::Vec2;

use super::state::{
    Block, CatchupBlocks, Color, Marker, Player, PlayerId, Sign, TextStyle, Trigger, TriggerKind,
    World,
};
use crate::consts::CATCHUP_BATCH;

/// Both players start at this height
pub const SPAWN_Y: f32 = -200.0;

/// Title card text, top to bottom
pub const TITLE_CARD: [(&str, f32, TextStyle); 4] = [
    ("Paths We Build", 80.0, TextStyle::Bold),
    ("Task Performance | Computer Graphics", 60.0, TextStyle::Normal),
    ("Selisana", 40.0, TextStyle::Normal),
    ("Press SPACE to begin", 10.0, TextStyle::Normal),
];

/// Shown once when both players stand at the unity button
pub const UNITY_MESSAGE: &str = "Unity unlocks the final step.";
pub const UNITY_MESSAGE_POS: Vec2 = Vec2::new(0.0, 200.0);

pub fn spawn_players() -> [Player; 2] {
    [
        Player::new(PlayerId::One, Vec2::new(-200.0, SPAWN_Y)),
        Player::new(PlayerId::Two, Vec2::new(200.0, SPAWN_Y)),
    ]
}

pub fn build_world() -> World {
    World {
        fixed: vec![
            Block::new(0.0, -220.0, 30.0, Color::BLACK),
            Block::new(-150.0, -100.0, 10.0, Color::BLACK),
            Block::new(150.0, 0.0, 10.0, Color::BLACK),
        ],
        bridge: Block::hidden(0.0, -40.0, 20.0, Color::BLACK),
        upper_platform: Block::hidden(0.0, 100.0, 10.0, Color::BLACK),
        summit_platform: Block::hidden(0.0, 150.0, 10.0, Color::BLACK),
        final_step: Block::hidden(0.0, 230.0, 5.0, Color::GRAY),
        support_platform: Block::hidden(-320.0, -155.0, 5.0, Color::OLIVE),
        catchup: CatchupBlocks::default(),
        struggle_plate: Trigger::new(
            TriggerKind::Struggle,
            Block::new(-150.0, -80.0, 2.0, Color::YELLOW),
        ),
        perspective_plate: Trigger::new(
            TriggerKind::Perspective,
            Block::new(150.0, 10.0, 2.0, Color::ORANGE),
        ),
        unity_button: Trigger::new(
            TriggerKind::Unity,
            Block::new(0.0, 180.0, 2.0, Color::PURPLE),
        ),
        support_plate: Trigger::new(
            TriggerKind::Support,
            Block::hidden(-250.0, -150.0, 2.0, Color::RED),
        ),
        goal: Marker::new(0.0, 250.0, Color::BLACK),
        health_pickup: Marker::new(-100.0, -180.0, Color::GREEN),
        signs: vec![
            Sign::new("Support lifts others,", -250.0, 30.0, TextStyle::Normal),
            Sign::new("even when unseen.", -270.0, 10.0, TextStyle::Normal),
            Sign::new("Make your way", 300.0, -100.0, TextStyle::Normal),
            Sign::new("to the top.", 285.0, -115.0, TextStyle::Normal),
            Sign::new("Struggles", -150.0, -70.0, TextStyle::Normal),
            Sign::new("Perspective", 150.0, 50.0, TextStyle::Normal),
            Sign::new("Keep going! Malapit ka na.", -160.0, 130.0, TextStyle::Normal),
            Sign::new("You've done it. Proud ako sayo :)", 0.0, 210.0, TextStyle::Normal),
            Sign::new("Meaning and Fulfillment", 0.0, 290.0, TextStyle::Bold),
        ],
    }
}

/// Stairs rising to the right from the floor, spawned by the perspective plate
pub fn perspective_batch() -> impl Iterator<Item = Block> {
    (0..CATCHUP_BATCH).map(|i| {
        let i = i as f32;
        Block::new(-50.0 + i * 20.0, -200.0 + i * 40.0, 4.0, Color::SLATE)
    })
}

/// Stairs rising to the left from the right ledge, spawned by the unity button
pub fn unity_batch() -> impl Iterator<Item = Block> {
    (0..CATCHUP_BATCH).map(|i| {
        let i = i as f32;
        Block::new(150.0 - i * 20.0, 30.0 + i * 40.0, 4.0, Color::RUST)
    })
}
