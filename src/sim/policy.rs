//! Jump decision policies
//!
//! The engine never decides when to jump; it consumes one boolean per player
//! per tick from a [`JumpPolicy`]. Policies must be deterministic functions
//! of their own state and the inputs they are handed — no reads of shared
//! mutable state — so runs are reproducible and players stay independent.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::index::TileIndex;
use super::player::PlayerSnapshot;

/// Per-tick jump decision source
pub trait JumpPolicy: Send {
    /// Decide whether this player should jump this tick
    fn decide(&mut self, player: &PlayerSnapshot, index: &TileIndex, floor_level: f32) -> bool;
}

/// Never jumps
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverJump;

impl JumpPolicy for NeverJump {
    fn decide(&mut self, _: &PlayerSnapshot, _: &TileIndex, _: f32) -> bool {
        false
    }
}

/// Jumps every tick (useful for flight mode tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysJump;

impl JumpPolicy for AlwaysJump {
    fn decide(&mut self, _: &PlayerSnapshot, _: &TileIndex, _: f32) -> bool {
        true
    }
}

/// Jumps on every `period`-th tick
#[derive(Debug, Clone)]
pub struct JumpEvery {
    period: u32,
    counter: u32,
}

impl JumpEvery {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            counter: 0,
        }
    }
}

impl JumpPolicy for JumpEvery {
    fn decide(&mut self, _: &PlayerSnapshot, _: &TileIndex, _: f32) -> bool {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

/// Seeded coin-flip policy; identical seeds replay identical decisions
#[derive(Debug, Clone)]
pub struct RandomJump {
    rng: Pcg32,
    chance: f64,
}

impl RandomJump {
    pub fn new(seed: u64, chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            chance: chance.clamp(0.0, 1.0),
        }
    }
}

impl JumpPolicy for RandomJump {
    fn decide(&mut self, _: &PlayerSnapshot, _: &TileIndex, _: f32) -> bool {
        self.rng.random_bool(self.chance)
    }
}
