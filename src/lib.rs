//! tiledash - deterministic tile-platformer physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile index, collision resolution,
//!   integration, pose)
//! - `config`: Data-driven physics tuning
//!
//! The crate is headless: it consumes a jump decision per player per tick and
//! produces physical state (position, velocity, flags, pose) for whatever
//! renders or scores the run. Level parsing, assets, cameras, and controller
//! training all live outside.

pub mod config;
pub mod sim;

pub use config::PhysicsConfig;
pub use sim::{
    AlwaysJump, CollisionType, ContactEffect, Element, JumpEvery, JumpPolicy, Level, Mask,
    NeverJump, Player, PlayerSnapshot, Pose, RandomJump, Rect, TileIndex, TileIndexBuilder,
};

use glam::{IVec2, Vec2};

/// Default tuning constants
pub mod consts {
    /// Tile edge length in pixels
    pub const BLOCK_SIZE: f32 = 32.0;

    /// Gravity per tick (pixels/tick², halved while flying)
    pub const GRAVITY: f32 = 0.86;
    /// Horizontal scroll speed (pixels/tick), constant per level
    pub const VELOCITY_X: f32 = 6.0;
    /// Terminal fall speed
    pub const VELOCITY_MAX_FALL: f32 = 100.0;
    /// Ground jump impulse
    pub const VELOCITY_JUMP: f32 = 10.0;
    /// Jump pad impulse
    pub const VELOCITY_JUMP_PAD: f32 = 14.0;
    /// Jump orb impulse
    pub const VELOCITY_JUMP_ORB: f32 = 8.0;

    /// How far past a pad's leading edge the player must be before it fires
    pub const PAD_TRIGGER_INSET: f32 = 6.0;

    /// Grounded rotation easing step (degrees/tick toward nearest 90°)
    pub const GROUND_TURN_STEP: f32 = 7.2;
    /// Airborne spin step (degrees/tick)
    pub const AIRBORNE_SPIN_STEP: f32 = 7.2;
    /// Flight tilt limit (degrees)
    pub const FLIGHT_TILT_MAX: f32 = 20.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Nearest multiple of 90° to the given angle
#[inline]
pub fn nearest_right_angle(angle: f32) -> f32 {
    90.0 * (angle / 90.0).round()
}

/// Tile coordinate containing a pixel point
#[inline]
pub fn tile_of(point: Vec2, block_size: f32) -> IVec2 {
    IVec2::new(
        (point.x / block_size).floor() as i32,
        (point.y / block_size).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert_eq!(wrap_angle(360.0), 0.0);
        assert_eq!(wrap_angle(-10.0), 350.0);
        assert_eq!(wrap_angle(725.0), 5.0);
    }

    #[test]
    fn test_nearest_right_angle() {
        assert_eq!(nearest_right_angle(10.0), 0.0);
        assert_eq!(nearest_right_angle(50.0), 90.0);
        assert_eq!(nearest_right_angle(359.0), 360.0);
    }

    #[test]
    fn test_tile_of_floors_negative() {
        assert_eq!(tile_of(Vec2::new(33.0, 0.0), 32.0), IVec2::new(1, 0));
        assert_eq!(tile_of(Vec2::new(-1.0, -33.0), 32.0), IVec2::new(-1, -2));
    }
}
