//! Velocity integration: gravity, jump impulses, flight steering
//!
//! Runs between the x and y collision passes each tick. Gravity is clamped to
//! the terminal fall speed in both directions; a non-finite vertical velocity
//! is repaired to the nearest valid bound instead of propagating.

use super::element::CollisionType;
use super::index::TileIndex;
use super::player::Player;
use crate::tile_of;

/// Clamp-integrate gravity into the player's vertical velocity
///
/// `gravity` is the per-tick acceleration already halved by the caller while
/// flying; its direction follows `gravity_reversed`.
pub(crate) fn apply_gravity(player: &mut Player, gravity: f32) {
    let max_fall = player.config.velocity_max_fall;
    let vy = repair_vertical(player.velocity.y, max_fall);
    player.velocity.y = if player.gravity_reversed {
        (vy - gravity).clamp(-max_fall, max_fall)
    } else {
        (vy + gravity).clamp(-max_fall, max_fall)
    };
}

/// Repair a degenerate vertical velocity (NaN or infinite)
pub(crate) fn repair_vertical(vy: f32, max_fall: f32) -> f32 {
    if vy.is_finite() {
        vy
    } else if vy.is_nan() {
        0.0
    } else if vy > 0.0 {
        max_fall
    } else {
        -max_fall
    }
}

/// Consume this tick's jump decision, in priority order:
/// 1. standing on a jump orb overrides everything,
/// 2. grounded (or on-ceiling under reversed gravity) impulse when not flying,
/// 3. bounded upward steering while flying.
pub(crate) fn apply_jump(player: &mut Player, index: &TileIndex) {
    if !player.should_jump {
        return;
    }

    let tile = tile_of(player.rect.pos, player.config.block_size);
    let on_orb = index
        .lookup(tile)
        .is_some_and(|e| e.collision_type == CollisionType::JumpOrb);

    if on_orb {
        let sign = if player.gravity_reversed { 1.0 } else { -1.0 };
        player.velocity.y = player.config.velocity_jump_orb * sign;
        log::debug!("jump orb fired at tile {tile}, vy={}", player.velocity.y);
    } else if !player.flying {
        if player.on_ground && !player.gravity_reversed {
            player.velocity.y = -player.config.velocity_jump;
        } else if player.on_ceiling && player.gravity_reversed {
            player.velocity.y = player.config.velocity_jump;
        }
    } else {
        // Continuous steering instead of a discrete impulse
        let accel = player.config.gravity * 5.0;
        player.velocity.y = if player.gravity_reversed {
            (player.velocity.y + accel).min(accel)
        } else {
            (player.velocity.y - accel).max(-accel)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsConfig;
    use glam::Vec2;

    fn player() -> Player {
        Player::new(PhysicsConfig::default(), Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0))
    }

    fn empty_index() -> TileIndex {
        TileIndex::builder(PhysicsConfig::default()).build()
    }

    #[test]
    fn test_gravity_accumulates_and_clamps() {
        let mut p = player();
        let gravity = p.config.gravity;
        for _ in 0..200 {
            apply_gravity(&mut p, gravity);
        }
        assert_eq!(p.velocity.y, p.config.velocity_max_fall);
    }

    #[test]
    fn test_reversed_gravity_clamps_negative() {
        let mut p = player();
        p.gravity_reversed = true;
        let gravity = p.config.gravity;
        for _ in 0..200 {
            apply_gravity(&mut p, gravity);
        }
        assert_eq!(p.velocity.y, -p.config.velocity_max_fall);
    }

    #[test]
    fn test_repair_non_finite() {
        assert_eq!(repair_vertical(f32::NAN, 100.0), 0.0);
        assert_eq!(repair_vertical(f32::INFINITY, 100.0), 100.0);
        assert_eq!(repair_vertical(f32::NEG_INFINITY, 100.0), -100.0);
        assert_eq!(repair_vertical(3.5, 100.0), 3.5);
    }

    #[test]
    fn test_grounded_jump_requires_ground() {
        let index = empty_index();
        let mut p = player();
        p.should_jump = true;
        apply_jump(&mut p, &index);
        assert_eq!(p.velocity.y, 0.0);

        p.on_ground = true;
        apply_jump(&mut p, &index);
        assert_eq!(p.velocity.y, -p.config.velocity_jump);
    }

    #[test]
    fn test_reversed_jump_gated_on_ceiling() {
        let index = empty_index();
        let mut p = player();
        p.gravity_reversed = true;
        p.should_jump = true;
        p.on_ground = true;
        apply_jump(&mut p, &index);
        assert_eq!(p.velocity.y, 0.0);

        p.on_ceiling = true;
        apply_jump(&mut p, &index);
        assert_eq!(p.velocity.y, p.config.velocity_jump);
    }

    #[test]
    fn test_flight_steering_is_bounded() {
        let index = empty_index();
        let mut p = player();
        p.flying = true;
        p.should_jump = true;
        let bound = p.config.gravity * 5.0;
        for _ in 0..10 {
            apply_jump(&mut p, &index);
            p.should_jump = true;
        }
        assert_eq!(p.velocity.y, -bound);
    }

    #[test]
    fn test_orb_overrides_grounded_jump() {
        use crate::sim::CollisionType;
        use glam::IVec2;
        let config = PhysicsConfig::default();
        let index = TileIndex::builder(config)
            .place(IVec2::new(0, 0), CollisionType::JumpOrb)
            .build();
        let mut p = player();
        p.on_ground = true;
        p.should_jump = true;
        apply_jump(&mut p, &index);
        // Orb impulse, not the stronger ground impulse
        assert_eq!(p.velocity.y, -p.config.velocity_jump_orb);
    }
}
