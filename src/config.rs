//! Physics tuning configuration
//!
//! Every tuning constant the engine reads is carried in an explicit
//! [`PhysicsConfig`] injected at construction time, so tests and concurrent
//! simulations can run with different tunings side by side.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Immutable physics tuning for one simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Tile edge length in pixels
    pub block_size: f32,
    /// Gravity per tick (halved while flying)
    pub gravity: f32,
    /// Terminal vertical speed, both directions
    pub velocity_max_fall: f32,
    /// Ground/ceiling jump impulse
    pub velocity_jump: f32,
    /// Jump pad impulse
    pub velocity_jump_pad: f32,
    /// Jump orb impulse
    pub velocity_jump_orb: f32,
    /// Distance past a pad's leading edge before it fires
    pub pad_trigger_inset: f32,
    /// Grounded easing step toward the nearest 90° (degrees/tick)
    pub ground_turn_step: f32,
    /// Airborne spin step (degrees/tick)
    pub airborne_spin_step: f32,
    /// Flight tilt clamp (degrees)
    pub flight_tilt_max: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            block_size: consts::BLOCK_SIZE,
            gravity: consts::GRAVITY,
            velocity_max_fall: consts::VELOCITY_MAX_FALL,
            velocity_jump: consts::VELOCITY_JUMP,
            velocity_jump_pad: consts::VELOCITY_JUMP_PAD,
            velocity_jump_orb: consts::VELOCITY_JUMP_ORB,
            pad_trigger_inset: consts::PAD_TRIGGER_INSET,
            ground_turn_step: consts::GROUND_TURN_STEP,
            airborne_spin_step: consts::AIRBORNE_SPIN_STEP,
            flight_tilt_max: consts::FLIGHT_TILT_MAX,
        }
    }
}

impl PhysicsConfig {
    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
