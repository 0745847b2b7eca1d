//! Player entity and per-tick orchestration
//!
//! A player owns all of its mutable state; the tile index is shared and
//! read-only. One `update` call per tick runs the fixed sequence: move x,
//! resolve x, integrate gravity and the jump decision, derive the pose, move
//! y (rounded), resolve y. Once `dead` or `won` is set the player is
//! terminal: every further update is a no-op.

use glam::Vec2;
use serde::Serialize;

use super::index::TileIndex;
use super::mask::{Mask, Rect};
use super::pose::Pose;
use super::{collision, physics, pose};
use crate::PhysicsConfig;

/// One platformer character
#[derive(Debug, Clone)]
pub struct Player {
    pub config: PhysicsConfig,
    /// Hitbox; extents follow the rotated sprite, bottom edge authoritative
    pub rect: Rect,
    /// x is constant for the level, y is integrated each tick
    pub velocity: Vec2,
    /// Rotation in degrees, kept in [0, 360)
    pub angle: f32,
    /// Rotated collision mask matching `rect`
    pub mask: Mask,
    /// Renderer-facing rotation state
    pub pose: Pose,
    pub on_ground: bool,
    pub on_ceiling: bool,
    pub flying: bool,
    pub gravity_reversed: bool,
    pub dead: bool,
    pub won: bool,
    /// One-shot jump decision for this tick, consumed then cleared
    pub should_jump: bool,
    /// x position at the moment of death (external fitness/ranking input)
    pub score: f32,
}

impl Player {
    /// New player at a pixel position (top-left), block-sized and unrotated
    pub fn new(config: PhysicsConfig, position: Vec2, velocity: Vec2) -> Self {
        let block = config.block_size;
        Self {
            config,
            rect: Rect::new(position.x, position.y, block, block),
            velocity,
            angle: 0.0,
            mask: Mask::solid_square(block.round() as u32),
            pose: Pose::default(),
            on_ground: false,
            on_ceiling: false,
            flying: false,
            gravity_reversed: false,
            dead: false,
            won: false,
            should_jump: false,
            score: 0.0,
        }
    }

    /// Terminal players no longer simulate
    #[inline]
    pub fn terminal(&self) -> bool {
        self.dead || self.won
    }

    /// Immutable view for jump policies and renderers
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.rect.pos,
            velocity: self.velocity,
            angle: self.angle,
            on_ground: self.on_ground,
            on_ceiling: self.on_ceiling,
            flying: self.flying,
            gravity_reversed: self.gravity_reversed,
            dead: self.dead,
            won: self.won,
            score: self.score,
        }
    }

    /// Advance one simulation tick
    pub fn update(&mut self, index: &TileIndex, floor_level: f32) {
        if self.terminal() {
            return;
        }
        self.tick(index, floor_level);
        // Consumed whether or not it produced an impulse
        self.should_jump = false;
    }

    fn tick(&mut self, index: &TileIndex, floor_level: f32) {
        // Horizontal move and full x resolution first: a side-on lethal hit
        // must not be masked by the vertical resolution below
        self.rect.translate(Vec2::new(self.velocity.x, 0.0));
        collision::resolve_x(self, index);
        if self.terminal() {
            return;
        }

        let gravity = if self.flying {
            self.config.gravity / 2.0
        } else {
            self.config.gravity
        };
        physics::apply_gravity(self, gravity);
        physics::apply_jump(self, index);

        pose::update(self);

        // Rounded y commit keeps resting contact exact across ticks
        self.rect.translate(Vec2::new(0.0, self.velocity.y.round()));
        // Contact flags hold for one tick; resolve_y re-sets them on contact
        self.on_ground = false;
        self.on_ceiling = false;
        collision::resolve_y(self, index, floor_level);
    }
}

/// Copyable projection of a player's public state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub on_ground: bool,
    pub on_ceiling: bool,
    pub flying: bool,
    pub gravity_reversed: bool,
    pub dead: bool,
    pub won: bool,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CollisionType;
    use glam::IVec2;

    fn config() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn empty_index() -> TileIndex {
        TileIndex::builder(config()).build()
    }

    #[test]
    fn test_update_is_noop_when_terminal() {
        let index = empty_index();
        let mut p = Player::new(config(), Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0));
        p.dead = true;
        let snap = p.snapshot();
        let rect = p.rect;
        for _ in 0..10 {
            p.update(&index, 320.0);
        }
        assert_eq!(p.snapshot(), snap);
        assert_eq!(p.rect, rect);
    }

    #[test]
    fn test_should_jump_cleared_every_tick() {
        let index = empty_index();
        let mut p = Player::new(config(), Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0));
        p.should_jump = true;
        p.update(&index, 10_000.0);
        assert!(!p.should_jump);
    }

    #[test]
    fn test_x_death_skips_y_pass() {
        // Spike to the right at the player's row; solid far below would land
        // the player if the y pass ran
        let index = TileIndex::builder(config())
            .place(IVec2::new(2, 9), CollisionType::Spike)
            .place(IVec2::new(2, 10), CollisionType::Solid)
            .build();
        let mut p = Player::new(config(), Vec2::new(34.0, 288.0), Vec2::new(30.0, 0.0));
        p.velocity.y = 50.0;
        let y_before = p.rect.top();
        p.update(&index, 10_000.0);
        assert!(p.dead);
        assert_eq!(p.rect.top(), y_before, "y must not move after an x-pass death");
        assert_eq!(p.velocity, Vec2::ZERO);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_falling_player_lands_and_stays() {
        let index = TileIndex::builder(config())
            .place_grid(
                IVec2::new(-2, 10),
                &[&[CollisionType::Solid; 24]],
            )
            .build();
        let mut p = Player::new(config(), Vec2::new(0.0, 250.0), Vec2::new(6.0, 0.0));
        for _ in 0..20 {
            p.update(&index, 10_000.0);
        }
        assert!(p.on_ground);
        assert_eq!(p.rect.bottom(), 320.0);
        assert_eq!(p.velocity.y, 0.0);
        assert!(!p.dead);
    }

    #[test]
    fn test_ceiling_jump_does_not_refire_airborne() {
        // Ceiling row at y 160..192, wide enough to stay overhead
        let index = TileIndex::builder(config())
            .place_grid(IVec2::new(0, 5), &[&[CollisionType::Solid; 16]])
            .build();
        let mut p = Player::new(config(), Vec2::new(32.0, 200.0), Vec2::new(6.0, 0.0));
        p.gravity_reversed = true;
        p.velocity.y = -10.0;
        for _ in 0..5 {
            p.update(&index, 10_000.0);
            if p.on_ceiling {
                break;
            }
        }
        assert!(p.on_ceiling);

        // The ceiling jump fires on the contact tick
        p.should_jump = true;
        p.update(&index, 10_000.0);
        assert_eq!(p.velocity.y, p.config.velocity_jump);
        assert!(!p.on_ceiling, "contact flag must clear once airborne");

        // Holding jump while airborne must not re-fire the impulse
        p.should_jump = true;
        p.update(&index, 10_000.0);
        assert_eq!(p.velocity.y, p.config.velocity_jump - p.config.gravity);
    }

    #[test]
    fn test_won_freezes_player() {
        let index = TileIndex::builder(config())
            .place(IVec2::new(2, 9), CollisionType::End)
            .build();
        let mut p = Player::new(config(), Vec2::new(30.0, 288.0), Vec2::new(6.0, 0.0));
        p.update(&index, 10_000.0);
        assert!(p.won);
        let snap = p.snapshot();
        p.update(&index, 10_000.0);
        assert_eq!(p.snapshot(), snap);
    }
}
