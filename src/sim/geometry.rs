//! Axis-aligned rectangle geometry
//!
//! Screen space: origin at the top-left of the surface, y grows downward.
//! Every entity is an axis-aligned box anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
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
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// True if any part of the rect lies outside `[0, w] x [0, h]` by its origin
    pub fn origin_outside(&self, surface: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > surface.x || self.pos.y < 0.0 || self.pos.y > surface.y
    }
}

/// Largest top-left coordinate that keeps a box of `size` fully on the surface.
///
/// Never negative: a box larger than the surface is pinned to the origin.
#[inline]
pub fn max_origin(surface: Vec2, size: Vec2) -> Vec2 {
    (surface - size).max(Vec2::ZERO)
}

/// Clamp a top-left position so a box of `size` stays on the surface
#[inline]
pub fn clamp_origin(pos: Vec2, size: Vec2, surface: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, max_origin(surface, size))
}

/// Unit vector pointing from `from` to `to`.
///
/// Returns `None` when the points coincide (or the input is not finite), so
/// callers never feed a 0/0 direction into a position.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Unit vector for a facing angle (radians)
#[inline]
pub fn angle_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Anything that occupies a box on the surface
pub trait Body {
    fn bounds(&self) -> Rect;
}

/// Overlap test between two bodies
#[inline]
pub fn touching(a: &impl Body, b: &impl Body) -> bool {
    a.bounds().overlaps(&b.bounds())
}
