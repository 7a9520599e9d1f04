//! Axis-separated movement and knockback integration shared by the player and enemies.

use super::*;

/// Below this speed a knockback is considered spent.
const KNOCKBACK_REST_SPEED: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Slide {
    pub pos: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Commits the X component if the X-only move is clear, then Y from the updated position.
pub(super) fn slide(world: &World, pos: Vec2, width: f32, height: f32, delta: Vec2) -> Slide {
    let mut next = pos;

    let candidate_x = Vec2::new(pos.x + delta.x, pos.y);
    let blocked_x = world.check_collision(Rect::at(candidate_x, width, height));
    if !blocked_x {
        next.x = candidate_x.x;
    }

    let candidate_y = Vec2::new(next.x, pos.y + delta.y);
    let blocked_y = world.check_collision(Rect::at(candidate_y, width, height));
    if !blocked_y {
        next.y = candidate_y.y;
    }

    Slide { pos: next, blocked_x, blocked_y }
}

/// Advances an active knockback by one tick and returns the new position.
pub(super) fn step_knockback(
    world: &World,
    pos: Vec2,
    width: f32,
    height: f32,
    knockback: &mut Knockback,
    dt_ms: u32,
) -> Vec2 {
    knockback.elapsed_ms = knockback.elapsed_ms.saturating_add(dt_ms);

    let moved = slide(world, pos, width, height, knockback.velocity);
    if moved.blocked_x {
        knockback.velocity.x = 0.0;
    }
    if moved.blocked_y {
        knockback.velocity.y = 0.0;
    }
    knockback.velocity = knockback.velocity.scaled(knockback.friction);

    if knockback.elapsed_ms >= knockback.duration_ms
        || knockback.velocity.length() < KNOCKBACK_REST_SPEED
    {
        knockback.stop();
    }
    moved.pos
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn diagonal_move_into_a_wall_slides_along_it() {
        let game = open_room_game();
        let world = game.active_world().expect("active world");
        // Left wall occupies x < 32.
        let moved = slide(world, Vec2::new(33.0, 100.0), 24.0, 24.0, Vec2::new(-2.0, 2.0));
        assert!(moved.blocked_x);
        assert!(!moved.blocked_y);
        assert_eq!(moved.pos, Vec2::new(33.0, 102.0));
    }

    #[test]
    fn knockback_decays_and_ends_after_its_duration() {
        let game = open_room_game();
        let world = game.active_world().expect("active world");
        let mut knockback = Knockback::idle(300, 0.85);
        knockback.launch(Vec2::new(1.0, 0.0));

        let mut pos = Vec2::new(150.0, 150.0);
        let mut ticks = 0;
        while knockback.active {
            pos = step_knockback(world, pos, 20.0, 20.0, &mut knockback, 16);
            ticks += 1;
        }
        assert_eq!(ticks, 19);
        assert!(pos.x > 150.0 && pos.x < 157.0);
        assert_eq!(knockback.velocity, Vec2::ZERO);
    }

    #[test]
    fn knockback_into_a_wall_zeroes_the_blocked_axis() {
        let game = open_room_game();
        let world = game.active_world().expect("active world");
        let mut knockback = Knockback::idle(300, 0.85);
        knockback.launch(Vec2::new(-4.0, 1.0));
        let pos = step_knockback(world, Vec2::new(33.0, 150.0), 20.0, 20.0, &mut knockback, 16);
        assert_eq!(pos, Vec2::new(33.0, 151.0));
        assert_eq!(knockback.velocity.x, 0.0);
        assert!(knockback.velocity.y > 0.0);
    }
}
