//! Life gain and loss

use super::outcome;
use super::state::{PlayerId, Session, SessionEvent};
use crate::consts::*;
use crate::within;

/// Consume the health pickup if the player touches it.
///
/// First contact wins; the pickup never comes back this session.
pub fn check_pickup(session: &mut Session, id: PlayerId) -> bool {
    let Session {
        players,
        world,
        events,
        ..
    } = session;
    let player = &mut players[id.index()];
    let pickup = &mut world.health_pickup;

    if !player.visible || !pickup.visible || !within(player.pos, pickup.pos, PICKUP_RADIUS) {
        return false;
    }

    player.heal(LIFE_GAIN);
    pickup.visible = false;
    events.push(SessionEvent::PickupConsumed {
        by: id,
        life: player.life,
    });
    log::info!("{} picked up health (life {})", id.label(), player.life);
    true
}

/// Declare defeat right away if the player has run out of life.
/// Returns whether the session ended because of it.
pub fn check_life(session: &mut Session, id: PlayerId) -> bool {
    if !session.player(id).is_out_of_life() {
        return false;
    }
    outcome::declare_defeat(session, id)
}

/// Deal damage and run the death check immediately
pub fn damage(session: &mut Session, id: PlayerId, amount: i32) -> bool {
    session.player_mut(id).take_damage(amount);
    check_life(session, id)
}
