//! Coarse and fine overlap primitives
//!
//! Collision runs at two levels: a coarse axis-aligned rectangle test, and a
//! fine bit-per-pixel mask test. Elements get a shape mask standing in for
//! their sprite art; the player's mask is its block-sized square rasterized
//! at the current rotation angle.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left anchored, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner in pixels
    pub pos: Vec2,
    /// Width and height in pixels
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Midpoint of the left edge
    #[inline]
    pub fn midleft(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0)
    }

    /// Move the rect so its bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Move the rect so its top edge sits at `y`
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Strict overlap: rects that merely touch along an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Bit-per-pixel collision mask
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// All-clear mask
    pub fn empty(width: u32, height: u32) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Build a mask from a per-pixel predicate
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.set(x, y);
                }
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set(&mut self, x: u32, y: u32) {
        let idx = y as usize * self.words_per_row + (x / 64) as usize;
        self.bits[idx] |= 1u64 << (x % 64);
    }

    /// Test a pixel; out-of-bounds reads are clear
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        let idx = y as usize * self.words_per_row + (x / 64) as usize;
        self.bits[idx] & (1u64 << (x % 64)) != 0
    }

    /// Number of set pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// Test overlap with another mask whose top-left corner sits at `offset`
    /// pixels relative to this mask's top-left corner
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x_start = offset.x.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_start = offset.y.max(0);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }

    /// Fully set square of the given side
    pub fn solid_square(side: u32) -> Self {
        Self::from_fn(side, side, |_, _| true)
    }

    /// Horizontal slab covering the top `fraction` of the square
    pub fn slab_top(side: u32, fraction: f32) -> Self {
        let rows = ((side as f32 * fraction).ceil() as u32).max(1);
        Self::from_fn(side, side, |_, y| y < rows)
    }

    /// Horizontal slab covering the bottom `fraction` of the square
    pub fn slab_bottom(side: u32, fraction: f32) -> Self {
        let rows = ((side as f32 * fraction).ceil() as u32).max(1);
        Self::from_fn(side, side, |_, y| y >= side - rows)
    }

    /// Upward-pointing triangle: apex at the top center, full-width base
    pub fn spike_up(side: u32) -> Self {
        let mid = side as f32 / 2.0;
        Self::from_fn(side, side, |x, y| {
            let half_width = (y as f32 + 0.5) * 0.5;
            (x as f32 + 0.5 - mid).abs() <= half_width
        })
    }

    /// Downward-pointing triangle: full-width top, apex at the bottom center
    pub fn spike_down(side: u32) -> Self {
        let mid = side as f32 / 2.0;
        Self::from_fn(side, side, |x, y| {
            let half_width = (side as f32 - y as f32 - 0.5) * 0.5;
            (x as f32 + 0.5 - mid).abs() <= half_width
        })
    }

    /// Centered disc with radius `radius_fraction * side`
    pub fn disc(side: u32, radius_fraction: f32) -> Self {
        let mid = side as f32 / 2.0;
        let r = side as f32 * radius_fraction;
        Self::from_fn(side, side, move |x, y| {
            let dx = x as f32 + 0.5 - mid;
            let dy = y as f32 + 0.5 - mid;
            dx * dx + dy * dy <= r * r
        })
    }

    /// Filled ellipse inscribed in a width x height footprint (portals)
    pub fn ellipse(width: u32, height: u32) -> Self {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        Self::from_fn(width, height, move |x, y| {
            let nx = (x as f32 + 0.5 - cx) / cx;
            let ny = (y as f32 + 0.5 - cy) / cy;
            nx * nx + ny * ny <= 1.0
        })
    }

    /// A square of side `side` rotated by `angle_deg`, rasterized into its
    /// axis-aligned extent. Pixel centers inside the rotated square are set.
    pub fn rotated_square(side: u32, angle_deg: f32) -> Self {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let half = side as f32 / 2.0;
        let extent = (side as f32 * (cos.abs() + sin.abs())).round().max(1.0) as u32;
        let center = extent as f32 / 2.0;
        Self::from_fn(extent, extent, move |x, y| {
            let px = x as f32 + 0.5 - center;
            let py = y as f32 + 0.5 - center;
            // Rotate the pixel back into the square's own frame
            let ux = px * cos - py * sin;
            let uy = px * sin + py * cos;
            ux.abs() <= half && uy.abs() <= half
        })
    }
}
