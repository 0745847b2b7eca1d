//! Axis-separated collision resolution
//!
//! The x pass runs to completion (including its lethal early return) before
//! the y pass begins, so a side-on spike hit is never masked by a vertical
//! resolution in the same tick. Both passes scan a 3x3 tile neighborhood
//! around the player's midpoint; the x pass adds a (+1, -2) probe to catch
//! 3x3 portal footprints whose trigger tile sits two rows above center.

use glam::IVec2;

use super::element::{CollisionType, ContactEffect, Element};
use super::index::TileIndex;
use super::player::Player;
use crate::tile_of;

/// Extra probe for portal trigger tiles, checked first
const PORTAL_PROBE: IVec2 = IVec2::new(1, -2);

/// 3x3 neighborhood around the player's center tile
const BOX_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 0),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

fn masks_collide(player: &Player, element: &Element) -> bool {
    let offset = (element.rect.pos - player.rect.pos).round().as_ivec2();
    player.mask.overlaps(element.mask(), offset)
}

fn kill(player: &mut Player) {
    player.dead = true;
    player.score = player.rect.left();
    player.velocity = glam::Vec2::ZERO;
    log::info!("player died at x={}", player.score);
}

fn win(player: &mut Player) {
    player.won = true;
    player.velocity = glam::Vec2::ZERO;
    log::info!("player reached the end at x={}", player.rect.left());
}

/// Resolve collisions after the horizontal move
///
/// Fine mask overlap drives the full dispatch table; portals additionally
/// fire on coarse rectangle overlap since the player can be inside a portal's
/// footprint without touching its decorative pixels.
pub(crate) fn resolve_x(player: &mut Player, index: &TileIndex) {
    let center_tile = tile_of(player.rect.center(), player.config.block_size);

    for offset in std::iter::once(PORTAL_PROBE).chain(BOX_OFFSETS) {
        let Some(element) = index.lookup(center_tile + offset) else {
            continue;
        };

        if masks_collide(player, element) {
            match element.collision_type.contact_effect() {
                ContactEffect::Lethal => {
                    kill(player);
                    return;
                }
                ContactEffect::Win => {
                    win(player);
                    return;
                }
                ContactEffect::PadLaunch => {
                    // Wait until the player is far enough into the pad,
                    // so the pad's leading edge cannot fire it early
                    if player.rect.left() >= element.rect.left() - player.config.pad_trigger_inset
                    {
                        player.velocity.y = -player.config.velocity_jump_pad;
                        log::debug!("jump pad fired at tile {}", element.tile);
                    }
                }
                ContactEffect::Flight(on) => set_flying(player, on),
                ContactEffect::GravityReversed(on) => set_gravity_reversed(player, on),
                ContactEffect::Inert => {}
            }
        } else if element.collision_type.is_portal() && player.rect.intersects(&element.rect) {
            match element.collision_type.contact_effect() {
                ContactEffect::Flight(on) => set_flying(player, on),
                ContactEffect::GravityReversed(on) => set_gravity_reversed(player, on),
                _ => {}
            }
        }
    }
}

fn set_flying(player: &mut Player, on: bool) {
    if player.flying != on {
        log::debug!("flight portal: flying={on}");
    }
    player.flying = on;
}

fn set_gravity_reversed(player: &mut Player, on: bool) {
    if player.gravity_reversed != on {
        log::debug!("gravity portal: reversed={on}");
    }
    player.gravity_reversed = on;
}

/// Resolve collisions after the vertical move
///
/// The absolute floor is checked first: once clamped there, no tile-based y
/// collision can coexist below it. Solids push the player to rest on the side
/// consistent with the velocity sign and gravity direction; landing in the
/// direction gravity pulls sets the ground/ceiling contact flags.
pub(crate) fn resolve_y(player: &mut Player, index: &TileIndex, floor_level: f32) {
    if player.rect.bottom() >= floor_level {
        player.rect.set_bottom(floor_level);
        player.velocity.y = 0.0;
        player.on_ground = true;
        player.on_ceiling = false;
        return;
    }

    let center_tile = tile_of(player.rect.center(), player.config.block_size);

    for offset in BOX_OFFSETS {
        let Some(element) = index.lookup(center_tile + offset) else {
            continue;
        };
        if !masks_collide(player, element) {
            continue;
        }

        if element.collision_type.is_solid() {
            if !player.gravity_reversed {
                if player.velocity.y > 0.0 {
                    // Falling onto the surface: land
                    player.rect.set_bottom(element.rect.top());
                    player.velocity.y = 0.0;
                    player.on_ground = true;
                    player.on_ceiling = false;
                } else if player.velocity.y < 0.0 {
                    // Rising into the underside: stop short
                    player.rect.set_top(element.rect.bottom());
                }
            } else if player.velocity.y < 0.0 {
                // Reversed gravity: "falling" toward the ceiling
                player.rect.set_top(element.rect.bottom());
                player.velocity.y = 0.0;
                player.on_ground = true;
                player.on_ceiling = true;
            } else if player.velocity.y > 0.0 {
                player.rect.set_bottom(element.rect.top());
            }
        } else if element.collision_type == CollisionType::Spike {
            kill(player);
            return;
        }
    }
}
