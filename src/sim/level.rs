//! Level runner: shared tile index plus a set of independent players
//!
//! Each tick asks every live player's policy for a jump decision against a
//! snapshot, then updates that player. Players only read the shared index
//! and mutate their own state, so they are mutually independent within a
//! tick. A run ends when every player is dead or has won.

use std::sync::Arc;

use super::index::TileIndex;
use super::player::Player;
use super::policy::JumpPolicy;

struct Runner {
    player: Player,
    policy: Box<dyn JumpPolicy>,
}

/// One level attempt: shared geometry, many competitors
pub struct Level {
    index: Arc<TileIndex>,
    floor_level: f32,
    runners: Vec<Runner>,
    ticks: u64,
}

impl Level {
    pub fn new(index: Arc<TileIndex>, floor_level: f32) -> Self {
        Self {
            index,
            floor_level,
            runners: Vec::new(),
            ticks: 0,
        }
    }

    /// Add a competitor with its decision policy
    pub fn spawn(&mut self, player: Player, policy: Box<dyn JumpPolicy>) {
        self.runners.push(Runner { player, policy });
    }

    pub fn floor_level(&self) -> f32 {
        self.floor_level
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.runners.iter().map(|r| &r.player)
    }

    /// All players are terminal
    pub fn finished(&self) -> bool {
        self.runners.iter().all(|r| r.player.terminal())
    }

    /// Advance every player by one tick
    pub fn tick(&mut self) {
        for runner in &mut self.runners {
            if !runner.player.terminal() {
                let snapshot = runner.player.snapshot();
                runner.player.should_jump =
                    runner
                        .policy
                        .decide(&snapshot, &self.index, self.floor_level);
            }
            runner.player.update(&self.index, self.floor_level);
        }
        self.ticks += 1;
    }

    /// Run until every player finishes, up to `max_ticks`; returns the tick
    /// count consumed
    pub fn run(&mut self, max_ticks: u64) -> u64 {
        let start = self.ticks;
        while !self.finished() && self.ticks - start < max_ticks {
            self.tick();
        }
        self.ticks - start
    }
}
