//! Win/loss detection and the return to the title card
//!
//! Victory and defeat are both terminal and share one latch: the session
//! phase. Whichever is declared first wins; the other becomes a no-op.

use super::state::{PlayerId, Session, SessionEvent, SessionPhase};
use crate::consts::*;
use crate::within;

/// Terminal message after both players reach the goal
pub const VICTORY_BANNER: &str = "Game Over";

/// Mark players who reached the goal and declare victory once both have.
///
/// Only active once the final step and the goal are both visible.
pub fn check_goal(session: &mut Session) {
    if !session.is_playing() {
        return;
    }
    let world = &session.world;
    if !(world.final_step.visible && world.goal.visible) {
        return;
    }
    let goal = world.goal.pos;

    for player in session.players.iter_mut() {
        if player.reached_goal || !player.visible || !within(player.pos, goal, GOAL_RADIUS) {
            continue;
        }
        player.visible = false;
        player.reached_goal = true;
        session.events.push(SessionEvent::ReachedGoal(player.id));
        log::info!("{} reached the goal", player.id.label());
    }

    if session.players.iter().all(|p| p.reached_goal) {
        declare_victory(session);
    }
}

/// Returns false if the session had already ended
pub fn declare_victory(session: &mut Session) -> bool {
    if !session.is_playing() {
        return false;
    }
    session.phase = SessionPhase::Victory {
        return_in: VICTORY_RETURN_TICKS,
    };
    conclude(session, VICTORY_BANNER.to_string());
    session.push_event(SessionEvent::Victory);
    log::info!("Victory - both players reached the goal");
    true
}

/// Returns false if the session had already ended
pub fn declare_defeat(session: &mut Session, loser: PlayerId) -> bool {
    if !session.is_playing() {
        return false;
    }
    session.phase = SessionPhase::Defeat {
        loser,
        return_in: DEFEAT_RETURN_TICKS,
    };
    conclude(session, defeat_banner(loser));
    session.push_event(SessionEvent::Defeat { loser });
    log::info!("Defeat - {} ran out of life", loser.label());
    true
}

pub fn defeat_banner(loser: PlayerId) -> String {
    format!("{} ran out of life!\nGame Over", loser.label())
}

/// Count down a terminal phase; a full reset happens when it expires
pub fn advance_return_timer(session: &mut Session) {
    let remaining = match &mut session.phase {
        SessionPhase::Victory { return_in } | SessionPhase::Defeat { return_in, .. } => {
            *return_in = return_in.saturating_sub(1);
            *return_in
        }
        SessionPhase::Title | SessionPhase::Playing => return,
    };

    if remaining == 0 {
        session.reset();
        session.push_event(SessionEvent::ReturnedToTitle);
        log::info!("Returned to title");
    }
}

/// Hide everything and put up the terminal message
fn conclude(session: &mut Session, banner: String) {
    for player in session.players.iter_mut() {
        player.visible = false;
    }
    session.world.hide_all();
    session.banner = Some(banner);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn at_summit() -> Session {
        let mut session = Session::new();
        session.begin();
        session.world.final_step.visible = true;
        session
    }

    #[test]
    fn test_goal_needs_final_step() {
        let mut session = Session::new();
        session.begin();
        session.player_mut(PlayerId::One).pos = Vec2::new(0.0, 250.0);
        check_goal(&mut session);
        assert!(!session.player(PlayerId::One).reached_goal);
        assert!(session.player(PlayerId::One).visible);
    }

    #[test]
    fn test_players_reach_goal_independently() {
        let mut session = at_summit();
        session.player_mut(PlayerId::Two).pos = Vec2::new(10.0, 245.0);

        check_goal(&mut session);
        assert!(session.player(PlayerId::Two).reached_goal);
        assert!(!session.player(PlayerId::Two).visible);
        assert_eq!(session.phase, SessionPhase::Playing);

        session.player_mut(PlayerId::One).pos = Vec2::new(-10.0, 245.0);
        check_goal(&mut session);
        assert_eq!(
            session.phase,
            SessionPhase::Victory {
                return_in: VICTORY_RETURN_TICKS
            }
        );
        assert_eq!(session.banner.as_deref(), Some(VICTORY_BANNER));
    }

    #[test]
    fn test_victory_hides_everything() {
        let mut session = at_summit();
        session.world.catchup.spawn_batch(crate::sim::level::unity_batch());
        assert!(declare_victory(&mut session));

        assert!(session.players.iter().all(|p| !p.visible));
        assert!(session.world.platforms().all(|b| !b.visible));
        assert!(session.world.triggers().iter().all(|t| !t.block.visible));
        assert!(!session.world.goal.visible);
        assert!(!session.world.health_pickup.visible);
        // Hidden, not removed
        assert_eq!(session.catchup_count(), CATCHUP_BATCH);
    }

    #[test]
    fn test_first_terminal_state_wins() {
        let mut session = at_summit();
        assert!(declare_defeat(&mut session, PlayerId::One));
        assert!(!declare_victory(&mut session));
        assert!(!declare_defeat(&mut session, PlayerId::Two));
        assert_eq!(session.banner.as_deref(), Some("Player 1 ran out of life!\nGame Over"));
        assert!(matches!(
            session.phase,
            SessionPhase::Defeat {
                loser: PlayerId::One,
                ..
            }
        ));
    }

    #[test]
    fn test_return_timer_resets_session() {
        let mut session = at_summit();
        declare_defeat(&mut session, PlayerId::Two);

        for _ in 0..DEFEAT_RETURN_TICKS - 1 {
            advance_return_timer(&mut session);
        }
        assert!(session.phase.is_terminal());

        advance_return_timer(&mut session);
        assert_eq!(session.phase, SessionPhase::Title);
        assert!(session.banner.is_none());
        assert!(session.players.iter().all(|p| p.visible));
        assert!(session.drain_events().contains(&SessionEvent::ReturnedToTitle));
    }

    #[test]
    fn test_timer_ignores_active_phases() {
        let mut session = Session::new();
        advance_return_timer(&mut session);
        assert_eq!(session.phase, SessionPhase::Title);
    }
}
