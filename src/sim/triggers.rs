//! Pressure plates and buttons
//!
//! Evaluated once per visible player per tick, in a fixed order: struggle,
//! perspective, unity, support. Plates pressed "by anyone" look at every
//! visible player; the unity button looks only at the player being evaluated.

use glam::Vec2;

use super::level::{self, UNITY_MESSAGE, UNITY_MESSAGE_POS};
use super::state::{
    Block, Feature, Player, PlayerId, Progress, Session, SessionEvent, Sign, TextStyle, World,
};
use crate::consts::*;
use crate::within;

/// Whether any visible player stands within plate range of `pos`
pub fn pressed_by_any(players: &[Player], pos: Vec2) -> bool {
    players
        .iter()
        .filter(|p| p.visible)
        .any(|p| within(p.pos, pos, PLATE_RADIUS))
}

/// Run every trigger for the given player
pub fn evaluate(session: &mut Session, id: PlayerId) {
    let Session {
        players,
        world,
        progress,
        events,
        ..
    } = session;
    let players = players.as_slice();

    if !players[id.index()].visible {
        return;
    }

    struggle_plate(players, world, progress, events);
    perspective_plate(players, world, progress, events);
    unity_button(players, id, world, progress, events);
    support_plate(players, world, progress, events);
}

/// Level-sensitive: bridge follows presence. First press unlocks support.
fn struggle_plate(
    players: &[Player],
    world: &mut World,
    progress: &mut Progress,
    events: &mut Vec<SessionEvent>,
) {
    let pressed = pressed_by_any(players, world.struggle_plate.pos());
    world.struggle_plate.set_active(pressed);
    set_feature(world, events, Feature::Bridge, pressed);

    if pressed && !progress.support_unlocked {
        progress.support_unlocked = true;
        world.support_plate.block.visible = true;
        events.push(SessionEvent::SupportUnlocked);
        log::info!("Support plate unlocked");
    }
}

/// Level-sensitive: upper platform follows presence. First press spawns stairs.
fn perspective_plate(
    players: &[Player],
    world: &mut World,
    progress: &mut Progress,
    events: &mut Vec<SessionEvent>,
) {
    let pressed = pressed_by_any(players, world.perspective_plate.pos());
    world.perspective_plate.set_active(pressed);
    set_feature(world, events, Feature::UpperPlatform, pressed);

    if pressed && !progress.perspective_spawned {
        progress.perspective_spawned = true;
        spawn_catchup(world, events, level::perspective_batch());
    }
}

fn unity_button(
    players: &[Player],
    id: PlayerId,
    world: &mut World,
    progress: &mut Progress,
    events: &mut Vec<SessionEvent>,
) {
    let button = world.unity_button.pos();
    let near = within(players[id.index()].pos, button, PLATE_RADIUS);
    world.unity_button.set_active(near);
    if !near {
        return;
    }

    if !progress.summit_revealed {
        progress.summit_revealed = true;
        set_feature(world, events, Feature::SummitPlatform, true);
    }

    if !progress.unity_spawned && world.catchup.remaining() >= CATCHUP_BATCH {
        progress.unity_spawned = true;
        spawn_catchup(world, events, level::unity_batch());
    }

    let united = players
        .iter()
        .all(|p| p.visible && within(p.pos, button, PLATE_RADIUS));
    if united && !world.final_step.visible {
        world.final_step.visible = true;
        events.push(SessionEvent::FinalStepRevealed);
        log::info!("Final step revealed");

        if !progress.final_step_announced {
            progress.final_step_announced = true;
            world.signs.push(Sign::new(
                UNITY_MESSAGE,
                UNITY_MESSAGE_POS.x,
                UNITY_MESSAGE_POS.y,
                TextStyle::Italic,
            ));
        }
    }
}

/// Sticky: once pressed after unlock, stays pressed for the session
fn support_plate(
    players: &[Player],
    world: &mut World,
    progress: &mut Progress,
    events: &mut Vec<SessionEvent>,
) {
    if !progress.support_unlocked {
        return;
    }

    if !progress.support_used && pressed_by_any(players, world.support_plate.pos()) {
        progress.support_used = true;
        log::info!("Support plate latched");
    }

    if progress.support_used {
        world.support_plate.set_active(true);
        set_feature(world, events, Feature::SupportPlatform, true);
    }
}

/// Toggle a conditional platform, recording an event only on change
fn set_feature(
    world: &mut World,
    events: &mut Vec<SessionEvent>,
    feature: Feature,
    visible: bool,
) {
    let block = world.feature_mut(feature);
    if block.visible == visible {
        return;
    }
    block.visible = visible;
    events.push(if visible {
        SessionEvent::PlatformShown(feature)
    } else {
        SessionEvent::PlatformHidden(feature)
    });
}

fn spawn_catchup(
    world: &mut World,
    events: &mut Vec<SessionEvent>,
    batch: impl Iterator<Item = Block>,
) {
    let count = world.catchup.spawn_batch(batch);
    if count > 0 {
        events.push(SessionEvent::CatchupSpawned { count });
        log::debug!(
            "Spawned {} catch-up blocks ({} total)",
            count,
            world.catchup.len()
        );
    }
}
