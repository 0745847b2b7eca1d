//! Sparse tile index
//!
//! Immutable per-level mapping from integer tile coordinate to the element
//! occupying it. Built once at level load and only read afterwards, so it can
//! be shared across players (and threads) without locking. An absent lookup
//! is ordinary empty space, never a fault.

use std::collections::HashMap;

use glam::IVec2;

use super::element::{CollisionType, Element};
use crate::PhysicsConfig;

/// Read-only tile coordinate -> element map
#[derive(Debug, Clone, Default)]
pub struct TileIndex {
    map: HashMap<(i32, i32), Element>,
}

impl TileIndex {
    /// Start building an index with the given tuning (block size matters)
    pub fn builder(config: PhysicsConfig) -> TileIndexBuilder {
        TileIndexBuilder {
            config,
            map: HashMap::new(),
        }
    }

    /// O(1) expected lookup; `None` means empty space
    #[inline]
    pub fn lookup(&self, tile: IVec2) -> Option<&Element> {
        self.map.get(&(tile.x, tile.y))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.map.values()
    }
}

/// Builder consuming placements from parsed level data
#[derive(Debug, Clone)]
pub struct TileIndexBuilder {
    config: PhysicsConfig,
    map: HashMap<(i32, i32), Element>,
}

impl TileIndexBuilder {
    /// Place an element at its grid cell. `None` is skipped; portals are
    /// indexed under their trigger tile (placement minus (2, 2)). At most one
    /// element per tile: a later placement replaces an earlier one.
    pub fn place(mut self, placement: IVec2, collision_type: CollisionType) -> Self {
        if collision_type == CollisionType::None {
            return self;
        }
        let element = Element::new(&self.config, placement, collision_type);
        self.map.insert((element.tile.x, element.tile.y), element);
        self
    }

    /// Place a whole grid of collision types, rows top to bottom, starting at
    /// `origin`
    pub fn place_grid(mut self, origin: IVec2, rows: &[&[CollisionType]]) -> Self {
        for (dy, row) in rows.iter().enumerate() {
            for (dx, &collision_type) in row.iter().enumerate() {
                self = self.place(origin + IVec2::new(dx as i32, dy as i32), collision_type);
            }
        }
        self
    }

    pub fn build(self) -> TileIndex {
        TileIndex { map: self.map }
    }
}
