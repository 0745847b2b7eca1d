//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and
//! deterministic:
//! - Fixed per-tick stepping only
//! - Seeded RNG only (policies)
//! - The tile index is immutable once built
//! - No rendering or platform dependencies
//!
//! A tick runs the same sequence for every player: move x, resolve x
//! collisions, integrate gravity and jumps, derive the pose, move y, resolve
//! y collisions. The x pass always completes before any y mutation.

pub mod collision;
pub mod element;
pub mod index;
pub mod level;
pub mod mask;
pub mod physics;
pub mod player;
pub mod policy;
pub mod pose;

pub use element::{CollisionType, ContactEffect, Element};
pub use index::{TileIndex, TileIndexBuilder};
pub use level::Level;
pub use mask::{Mask, Rect};
pub use player::{Player, PlayerSnapshot};
pub use policy::{AlwaysJump, JumpEvery, JumpPolicy, NeverJump, RandomJump};
pub use pose::Pose;
