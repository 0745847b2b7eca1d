//! Level geometry elements and the collision-type dispatch table

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::mask::{Mask, Rect};
use crate::PhysicsConfig;

/// Collision behavior tag for a geometry element
///
/// Closed taxonomy; the per-type behavior is looked up through
/// [`CollisionType::contact_effect`] rather than scattered conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionType {
    None,
    Solid,
    SolidTop,
    SolidBottom,
    Spike,
    PortalFlyStart,
    PortalFlyEnd,
    PortalGravityReverse,
    PortalGravityNormal,
    JumpPad,
    JumpOrb,
    End,
}

/// What touching an element does to the player on the x-axis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    /// Nothing on contact (decoration; orbs act through the jump chain)
    Inert,
    /// Kills the player
    Lethal,
    /// Ends the level successfully
    Win,
    /// Launches the player once far enough into the pad
    PadLaunch,
    /// Sets flight mode on or off
    Flight(bool),
    /// Sets gravity reversal on or off
    GravityReversed(bool),
}

impl CollisionType {
    /// Contact handler table, one entry per type
    pub const fn contact_effect(self) -> ContactEffect {
        match self {
            CollisionType::None => ContactEffect::Inert,
            CollisionType::Solid => ContactEffect::Lethal,
            CollisionType::SolidTop => ContactEffect::Lethal,
            CollisionType::SolidBottom => ContactEffect::Lethal,
            CollisionType::Spike => ContactEffect::Lethal,
            CollisionType::PortalFlyStart => ContactEffect::Flight(true),
            CollisionType::PortalFlyEnd => ContactEffect::Flight(false),
            CollisionType::PortalGravityReverse => ContactEffect::GravityReversed(true),
            CollisionType::PortalGravityNormal => ContactEffect::GravityReversed(false),
            CollisionType::JumpPad => ContactEffect::PadLaunch,
            CollisionType::JumpOrb => ContactEffect::Inert,
            CollisionType::End => ContactEffect::Win,
        }
    }

    /// Solids are resolved positionally on the y-axis pass
    pub const fn is_solid(self) -> bool {
        matches!(
            self,
            CollisionType::Solid | CollisionType::SolidTop | CollisionType::SolidBottom
        )
    }

    /// Portals additionally trigger on coarse rectangle overlap
    pub const fn is_portal(self) -> bool {
        matches!(
            self,
            CollisionType::PortalFlyStart
                | CollisionType::PortalFlyEnd
                | CollisionType::PortalGravityReverse
                | CollisionType::PortalGravityNormal
        )
    }

    /// Footprint edge length in tiles (portals span 3x3)
    pub const fn footprint_tiles(self) -> i32 {
        if self.is_portal() { 3 } else { 1 }
    }
}

/// One piece of static level geometry
///
/// Immutable after construction. Ordinary elements occupy a single tile;
/// portals occupy a 3x3 footprint anchored so the trigger tile is the
/// placement tile minus a (2, 2) offset.
#[derive(Debug, Clone)]
pub struct Element {
    pub collision_type: CollisionType,
    /// Trigger tile: the tile the element is indexed under
    pub tile: IVec2,
    /// Pixel-space footprint
    pub rect: Rect,
    mask: Mask,
}

impl Element {
    /// Build an element from its placement tile (grid cell in level data)
    pub fn new(config: &PhysicsConfig, placement: IVec2, collision_type: CollisionType) -> Self {
        let block = config.block_size;
        let span = collision_type.footprint_tiles();
        let tile = if collision_type.is_portal() {
            placement - IVec2::splat(2)
        } else {
            placement
        };
        let rect = Rect::new(
            tile.x as f32 * block,
            tile.y as f32 * block,
            span as f32 * block,
            span as f32 * block,
        );
        let mask = shape_for(collision_type, block.round() as u32);
        Self {
            collision_type,
            tile,
            rect,
            mask,
        }
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}

/// Stand-in collision shape per type (headless replacement for sprite art)
fn shape_for(collision_type: CollisionType, block: u32) -> Mask {
    match collision_type {
        CollisionType::None => Mask::empty(block, block),
        CollisionType::Solid | CollisionType::End => Mask::solid_square(block),
        CollisionType::SolidTop => Mask::slab_top(block, 1.0 / 3.0),
        CollisionType::SolidBottom => Mask::slab_bottom(block, 1.0 / 3.0),
        CollisionType::Spike => Mask::spike_up(block),
        CollisionType::JumpPad => Mask::slab_bottom(block, 0.25),
        CollisionType::JumpOrb => Mask::disc(block, 0.35),
        CollisionType::PortalFlyStart
        | CollisionType::PortalFlyEnd
        | CollisionType::PortalGravityReverse
        | CollisionType::PortalGravityNormal => Mask::ellipse(block * 3, block * 3),
    }
}
