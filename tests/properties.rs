//! Session-wide invariants under arbitrary input
//!
//! Random sequences of commands, ticks and teleports are fed to a session;
//! teleports let the run reach plates and the goal far more often than
//! random walking would.

use glam::Vec2;
use paths_we_build::consts::*;
use paths_we_build::sim::{
    Command, PlayerId, Session, SessionEvent, SessionPhase, apply_command, tick,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Tick,
    Input(Command),
    Place(PlayerId, f32, f32),
    Reveal,
}

fn player_id() -> impl Strategy<Value = PlayerId> {
    prop_oneof![Just(PlayerId::One), Just(PlayerId::Two)]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => Just(Step::Tick),
        4 => proptest::sample::select(Command::ALL.to_vec()).prop_map(Step::Input),
        2 => (player_id(), -400.0f32..400.0, -250.0f32..300.0)
            .prop_map(|(id, x, y)| Step::Place(id, x, y)),
        // Snap onto interesting spots: plates, pickup, goal, teammate's head
        2 => (player_id(), proptest::sample::select(vec![
            Vec2::new(-150.0, -80.0),
            Vec2::new(150.0, 10.0),
            Vec2::new(0.0, 180.0),
            Vec2::new(-250.0, -150.0),
            Vec2::new(-100.0, -180.0),
            Vec2::new(0.0, 250.0),
        ])).prop_map(|(id, at)| Step::Place(id, at.x, at.y)),
        1 => Just(Step::Reveal),
    ]
}

/// Apply a step, returning the events it produced
fn run_step(session: &mut Session, step: &Step) -> Vec<SessionEvent> {
    match step {
        Step::Tick => tick(session),
        Step::Input(command) => apply_command(session, *command),
        Step::Place(id, x, y) => {
            if session.is_playing() {
                let player = session.player_mut(*id);
                player.pos = Vec2::new(*x, *y);
                player.dy = 0.0;
            }
        }
        Step::Reveal => {
            if session.is_playing() {
                session.world.final_step.visible = true;
            }
        }
    }
    session.drain_events()
}

fn started() -> Session {
    let mut session = Session::new();
    apply_command(&mut session, Command::Begin);
    session.drain_events();
    session
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn life_stays_in_bounds(steps in prop::collection::vec(step(), 0..400)) {
        let mut session = started();
        for step in &steps {
            run_step(&mut session, step);
            for player in &session.players {
                prop_assert!((0..=MAX_LIFE).contains(&player.life));
            }
        }
    }

    #[test]
    fn catchup_blocks_never_shrink(steps in prop::collection::vec(step(), 0..400)) {
        let mut session = started();
        let mut seen = 0;
        for step in &steps {
            let events = run_step(&mut session, step);
            if events.contains(&SessionEvent::ReturnedToTitle) {
                seen = 0;
            }
            let count = session.catchup_count();
            prop_assert!(count >= seen);
            prop_assert!(count <= MAX_CATCHUP_BLOCKS);
            seen = count;
        }
    }

    #[test]
    fn one_terminal_state_per_session(steps in prop::collection::vec(step(), 0..400)) {
        let mut session = started();
        let mut declared = 0;
        for step in &steps {
            for event in run_step(&mut session, step) {
                match event {
                    SessionEvent::Victory => {
                        declared += 1;
                        prop_assert!(session.players.iter().all(|p| p.reached_goal));
                    }
                    SessionEvent::Defeat { loser } => {
                        declared += 1;
                        prop_assert!(session.player(loser).life <= 0);
                    }
                    SessionEvent::ReturnedToTitle => declared = 0,
                    _ => {}
                }
                prop_assert!(declared <= 1);
            }
        }
    }

    #[test]
    fn support_plate_stays_latched(steps in prop::collection::vec(step(), 0..400)) {
        let mut session = started();
        let mut latched = false;
        for step in &steps {
            let events = run_step(&mut session, step);
            if events.contains(&SessionEvent::ReturnedToTitle) {
                latched = false;
            }
            if latched {
                prop_assert!(session.progress.support_used);
                if session.is_playing() {
                    prop_assert!(session.world.support_platform.visible);
                }
            }
            latched = session.progress.support_used;
        }
    }

    #[test]
    fn hidden_players_do_not_move(steps in prop::collection::vec(step(), 0..400)) {
        let mut session = started();
        for step in &steps {
            let hidden: Vec<(PlayerId, Vec2)> = session
                .players
                .iter()
                .filter(|p| !p.visible)
                .map(|p| (p.id, p.pos))
                .collect();
            let was_playing = session.is_playing();
            let is_place = matches!(step, Step::Place(..));

            run_step(&mut session, step);

            if was_playing && session.is_playing() && !is_place {
                for (id, pos) in hidden {
                    prop_assert_eq!(session.player(id).pos, pos);
                }
            }
        }
    }

    #[test]
    fn terminal_phase_returns_to_title(extra in 0u32..40) {
        let mut session = started();
        session.player_mut(PlayerId::One).life = LIFE_LOSS;
        session.player_mut(PlayerId::One).pos = Vec2::new(0.0, -210.0);
        session.player_mut(PlayerId::Two).pos = Vec2::new(0.0, -190.0);
        apply_command(&mut session, Command::PlayerTwoJump);
        let is_defeat = matches!(session.phase, SessionPhase::Defeat { .. });
        prop_assert!(is_defeat);

        for _ in 0..DEFEAT_RETURN_TICKS {
            tick(&mut session);
        }
        prop_assert_eq!(session.phase, SessionPhase::Title);

        for _ in 0..extra {
            tick(&mut session);
        }
        prop_assert_eq!(session.phase, SessionPhase::Title);
    }
}
