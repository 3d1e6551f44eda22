//! Fixed timestep simulation tick
//!
//! Commands are applied the instant they arrive; gravity, triggers, pickups
//! and the goal check only advance on [`tick`].

use serde::{Deserialize, Serialize};

use super::state::{PlayerId, Session, SessionEvent, SessionPhase, split_pair, split_pair_mut};
use super::{health, outcome, physics, triggers};
use crate::consts::*;

/// Edge-triggered input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Leave the title card
    Begin,
    PlayerOneLeft,
    PlayerOneRight,
    PlayerOneJump,
    PlayerTwoLeft,
    PlayerTwoRight,
    PlayerTwoJump,
}

/// What a player command asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Begin,
        Command::PlayerOneLeft,
        Command::PlayerOneRight,
        Command::PlayerOneJump,
        Command::PlayerTwoLeft,
        Command::PlayerTwoRight,
        Command::PlayerTwoJump,
    ];

    /// The player and action this command targets, `None` for `Begin`
    pub fn target(self) -> Option<(PlayerId, Action)> {
        match self {
            Command::Begin => None,
            Command::PlayerOneLeft => Some((PlayerId::One, Action::Left)),
            Command::PlayerOneRight => Some((PlayerId::One, Action::Right)),
            Command::PlayerOneJump => Some((PlayerId::One, Action::Jump)),
            Command::PlayerTwoLeft => Some((PlayerId::Two, Action::Left)),
            Command::PlayerTwoRight => Some((PlayerId::Two, Action::Right)),
            Command::PlayerTwoJump => Some((PlayerId::Two, Action::Jump)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Begin => "begin",
            Command::PlayerOneLeft => "p1-left",
            Command::PlayerOneRight => "p1-right",
            Command::PlayerOneJump => "p1-jump",
            Command::PlayerTwoLeft => "p2-left",
            Command::PlayerTwoRight => "p2-right",
            Command::PlayerTwoJump => "p2-jump",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Apply one input command immediately.
///
/// Player commands are ignored outside `Playing` and for hidden players.
pub fn apply_command(session: &mut Session, command: Command) {
    let Some((id, action)) = command.target() else {
        session.begin();
        return;
    };

    if !session.is_playing() || !session.player(id).visible {
        return;
    }

    match action {
        Action::Left => physics::step_horizontal(session.player_mut(id), -MOVE_STEP),
        Action::Right => physics::step_horizontal(session.player_mut(id), MOVE_STEP),
        Action::Jump => jump(session, id),
    }
}

fn jump(session: &mut Session, id: PlayerId) {
    let (player, teammate) = split_pair_mut(&mut session.players, id);
    match physics::jump(player, teammate, &session.world) {
        physics::JumpOutcome::Grounded => session.push_event(SessionEvent::Jumped(id)),
        physics::JumpOutcome::Boosted => {
            let teammate = id.other();
            let teammate_life = session.player(teammate).life;
            session.push_event(SessionEvent::Boosted {
                jumper: id,
                teammate,
                teammate_life,
            });
            log::debug!(
                "{} boosted off {} (life {})",
                id.label(),
                teammate.label(),
                teammate_life
            );
            health::check_life(session, teammate);
        }
        physics::JumpOutcome::Airborne => {}
    }
}

/// Advance the session by one fixed tick
pub fn tick(session: &mut Session) {
    session.time_ticks += 1;

    match session.phase {
        SessionPhase::Title => {}
        SessionPhase::Playing => step_playing(session),
        SessionPhase::Victory { .. } | SessionPhase::Defeat { .. } => {
            outcome::advance_return_timer(session)
        }
    }
}

fn step_playing(session: &mut Session) {
    for id in PlayerId::ALL {
        if !session.player(id).visible {
            continue;
        }

        let (player, teammate) = split_pair(&mut session.players, id);
        physics::apply_gravity(player, teammate, &session.world);
        triggers::evaluate(session, id);
        health::check_pickup(session, id);
    }

    outcome::check_goal(session);
}
