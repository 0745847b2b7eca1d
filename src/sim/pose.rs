//! Pose derivation: rotation angle and pivot from physical state
//!
//! Runs after integration, before the vertical move. The pose never feeds
//! back into physics beyond one thing: the hitbox is resized to the rotated
//! square's extent (bottom and left edges fixed) so the next tick's collision
//! queries use the rotated footprint.
//!
//! - Grounded: ease toward the nearest multiple of 90° at a fixed step, with
//!   a diagonal pivot so the rotation reads as rolling along the ground.
//! - Flying: tilt proportional to -2 * vy, clamped, pivoting on the leading
//!   edge midpoint.
//! - Airborne: constant spin around the center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::Mask;
use super::player::Player;
use crate::{nearest_right_angle, wrap_angle};

/// Degrees within which an angle counts as aligned to 90°
const ALIGN_EPS: f32 = 1e-3;

/// Renderer-facing rotation state: angle plus the two pivot points
/// (world-space rotation center and the matching point on the sprite)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Rotation in degrees, [0, 360)
    pub angle: f32,
    /// World-space pivot the sprite rotates around
    pub surface_pivot: Vec2,
    /// Pivot in sprite-local coordinates
    pub image_pivot: Vec2,
}

/// Recompute the player's angle, pose, and rotated hitbox extents
pub(crate) fn update(player: &mut Player) {
    let block = player.config.block_size;
    let current = wrap_angle(player.angle);

    let (angle, surface_pivot, image_pivot) = if player.on_ground {
        let flat = nearest_right_angle(current);
        if (current - flat).abs() < ALIGN_EPS {
            // Already aligned: nothing rotates this tick
            return;
        }
        // Diagonal offset from center to the rolling contact corner
        let pivot_rad = (135.0 - ((player.angle - 1.0).rem_euclid(90.0) + 1.0)).to_radians();
        let off = Vec2::new(pivot_rad.cos(), pivot_rad.sin())
            * (block * std::f32::consts::SQRT_2 / 2.0);
        let surface_pivot = player.rect.center() + off;
        if current < flat {
            // Counter-clockwise toward the flat angle
            (
                (current + player.config.ground_turn_step).min(flat),
                surface_pivot,
                Vec2::new(block, block),
            )
        } else {
            (
                (current - player.config.ground_turn_step).max(flat),
                surface_pivot,
                Vec2::new(0.0, block),
            )
        }
    } else if player.flying {
        let tilt_max = player.config.flight_tilt_max;
        (
            (-2.0 * player.velocity.y).clamp(-tilt_max, tilt_max),
            player.rect.midleft(),
            Vec2::new(0.0, block / 2.0),
        )
    } else {
        (
            current - player.config.airborne_spin_step,
            player.rect.center(),
            Vec2::new(block / 2.0, block / 2.0),
        )
    };

    player.angle = wrap_angle(angle);
    player.pose = Pose {
        angle: player.angle,
        surface_pivot,
        image_pivot,
    };

    // Commit the rotated extents, keeping the bottom edge where it was
    player.mask = Mask::rotated_square(block.round() as u32, player.angle);
    let bottom = player.rect.bottom();
    player.rect.size = Vec2::splat(player.mask.width() as f32);
    player.rect.set_bottom(bottom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsConfig;
    use proptest::prelude::*;

    fn player_with_angle(angle: f32) -> Player {
        let mut p = Player::new(
            PhysicsConfig::default(),
            Vec2::new(0.0, 288.0),
            Vec2::new(6.0, 0.0),
        );
        p.angle = angle;
        p
    }

    #[test]
    fn test_grounded_eases_by_fixed_step() {
        let mut p = player_with_angle(30.0);
        p.on_ground = true;
        update(&mut p);
        // Nearest right angle to 30 is 0, so the step goes clockwise
        assert!((p.angle - 22.8).abs() < 1e-3);
    }

    #[test]
    fn test_grounded_never_overshoots() {
        let mut p = player_with_angle(87.0);
        p.on_ground = true;
        update(&mut p);
        assert_eq!(p.angle, 90.0);
        let before = p.angle;
        update(&mut p);
        assert_eq!(p.angle, before, "aligned angle must not move");
    }

    #[test]
    fn test_aligned_ground_pose_untouched() {
        let mut p = player_with_angle(180.0);
        p.on_ground = true;
        let pose_before = p.pose;
        update(&mut p);
        assert_eq!(p.pose, pose_before);
    }

    #[test]
    fn test_flying_tilt_clamped() {
        let mut p = player_with_angle(0.0);
        p.flying = true;
        p.velocity.y = -30.0;
        update(&mut p);
        assert_eq!(p.angle, 20.0);

        p.velocity.y = 30.0;
        update(&mut p);
        assert_eq!(p.angle, wrap_angle(-20.0));
        assert_eq!(p.pose.surface_pivot, p.rect.midleft());
    }

    #[test]
    fn test_airborne_spins_by_step() {
        let mut p = player_with_angle(0.0);
        update(&mut p);
        assert!((p.angle - 352.8).abs() < 1e-3);
        update(&mut p);
        assert!((p.angle - 345.6).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_resizes_hitbox_keeping_bottom() {
        let mut p = player_with_angle(0.0);
        let bottom = p.rect.bottom();
        let left = p.rect.left();
        update(&mut p); // airborne spin to 352.8°
        assert!(p.rect.size.x > 32.0);
        assert_eq!(p.rect.bottom(), bottom);
        assert_eq!(p.rect.left(), left);
        assert_eq!(p.rect.size.x, p.mask.width() as f32);
    }

    proptest! {
        #[test]
        fn prop_grounded_easing_converges(start in 0.0f32..360.0) {
            let mut p = player_with_angle(start);
            p.on_ground = true;
            // 45° worst case at 7.2°/tick: aligned within 8 ticks
            for _ in 0..8 {
                update(&mut p);
            }
            let flat = nearest_right_angle(p.angle);
            prop_assert!((p.angle - flat).abs() < ALIGN_EPS);
        }

        #[test]
        fn prop_grounded_distance_never_grows(start in 0.0f32..360.0) {
            let mut p = player_with_angle(start);
            p.on_ground = true;
            let before = (wrap_angle(p.angle) - nearest_right_angle(wrap_angle(p.angle))).abs();
            update(&mut p);
            let after = (wrap_angle(p.angle) - nearest_right_angle(wrap_angle(p.angle))).abs();
            prop_assert!(after <= before + 1e-3);
        }
    }
}
