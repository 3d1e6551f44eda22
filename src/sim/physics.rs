//! Gravity integration, jumping and horizontal steps

use super::collision::landing_height;
use super::state::{Player, World};
use crate::consts::*;

/// What a jump attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Jumped off a platform
    Grounded,
    /// Jumped off the teammate's head, hurting them
    Boosted,
    /// Nothing underfoot, no-op
    Airborne,
}

/// Integrate gravity for one tick and resolve landing.
///
/// `teammate` counts as a surface only while visible.
pub fn apply_gravity(player: &mut Player, teammate: &Player, world: &World) {
    player.dy += GRAVITY;
    let candidate = player.pos.y + player.dy;

    let head = teammate.visible.then(|| teammate.as_surface());
    match landing_height(player.pos, candidate, world.surfaces().chain(head)) {
        Some(top) => {
            player.pos.y = top;
            player.dy = 0.0;
        }
        None => player.pos.y = candidate,
    }
}

/// Try to jump. Platforms take priority over the teammate's head.
///
/// A boosted jump deals `LIFE_LOSS` to the teammate; checking whether that
/// ended the session is the caller's job.
pub fn jump(player: &mut Player, teammate: &mut Player, world: &World) -> JumpOutcome {
    if world.surfaces().any(|s| s.supports(player.pos)) {
        player.dy = JUMP_VELOCITY;
        return JumpOutcome::Grounded;
    }

    if teammate.visible && teammate.as_surface().supports(player.pos) {
        player.dy = BOOST_JUMP_VELOCITY;
        teammate.take_damage(LIFE_LOSS);
        return JumpOutcome::Boosted;
    }

    JumpOutcome::Airborne
}

/// Direct horizontal displacement; walls do not exist
pub fn step_horizontal(player: &mut Player, dx: f32) {
    player.pos.x += dx;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::level;
    use crate::sim::state::PlayerId;

    fn pair(a: Vec2, b: Vec2) -> (Player, Player) {
        (Player::new(PlayerId::One, a), Player::new(PlayerId::Two, b))
    }

    #[test]
    fn test_free_fall_one_tick() {
        let world = level::build_world();
        let (mut one, two) = pair(Vec2::new(-200.0, -200.0), Vec2::new(200.0, -200.0));

        apply_gravity(&mut one, &two, &world);
        assert_eq!(one.dy, -3.0);
        assert_eq!(one.pos.y, -203.0);
    }

    #[test]
    fn test_settles_on_floor() {
        let world = level::build_world();
        let (mut one, two) = pair(Vec2::new(-200.0, -200.0), Vec2::new(200.0, -200.0));

        for _ in 0..3 {
            apply_gravity(&mut one, &two, &world);
        }
        assert_eq!(one.pos.y, -210.0);
        assert_eq!(one.dy, 0.0);

        // Resting: gravity re-lands every tick
        apply_gravity(&mut one, &two, &world);
        assert_eq!(one.pos.y, -210.0);
    }

    #[test]
    fn test_lands_on_teammate_head() {
        let world = level::build_world();
        let (mut one, two) = pair(Vec2::new(5.0, -189.0), Vec2::new(0.0, -210.0));

        apply_gravity(&mut one, &two, &world);
        assert_eq!(one.pos.y, -190.0);
        assert_eq!(one.dy, 0.0);
    }

    #[test]
    fn test_hidden_teammate_is_not_a_surface() {
        let world = level::build_world();
        let (mut one, mut two) = pair(Vec2::new(5.0, -189.0), Vec2::new(0.0, -210.0));
        two.visible = false;

        apply_gravity(&mut one, &two, &world);
        assert_eq!(one.pos.y, -192.0);
    }

    #[test]
    fn test_jump_from_platform() {
        let world = level::build_world();
        let (mut one, mut two) = pair(Vec2::new(-200.0, -210.0), Vec2::new(200.0, -210.0));

        assert_eq!(jump(&mut one, &mut two, &world), JumpOutcome::Grounded);
        assert_eq!(one.dy, JUMP_VELOCITY);
        assert_eq!(two.life, MAX_LIFE);
    }

    #[test]
    fn test_boost_jump_hurts_teammate() {
        let world = level::build_world();
        let (mut one, mut two) = pair(Vec2::new(0.0, -190.0), Vec2::new(0.0, -210.0));

        assert_eq!(jump(&mut one, &mut two, &world), JumpOutcome::Boosted);
        assert_eq!(one.dy, BOOST_JUMP_VELOCITY);
        assert_eq!(two.life, MAX_LIFE - LIFE_LOSS);
    }

    #[test]
    fn test_no_double_jump() {
        let world = level::build_world();
        let (mut one, mut two) = pair(Vec2::new(-200.0, -150.0), Vec2::new(200.0, -210.0));
        one.dy = 7.0;

        assert_eq!(jump(&mut one, &mut two, &world), JumpOutcome::Airborne);
        assert_eq!(one.dy, 7.0);
    }

    #[test]
    fn test_step_horizontal_ignores_geometry() {
        let (mut one, _) = pair(Vec2::new(-200.0, -210.0), Vec2::ZERO);
        step_horizontal(&mut one, -MOVE_STEP);
        step_horizontal(&mut one, -MOVE_STEP);
        assert_eq!(one.pos.x, -240.0);
        assert_eq!(one.pos.y, -210.0);
    }
}
