//! Axis-aligned collision detection
//!
//! Every entity in the game is a rectangle in logical board space, so a single
//! overlap test covers pipes, power-ups and enemies.

use glam::Vec2;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Collision check used by the game loop.
///
/// Always misses while the shield is up, whatever the geometry.
#[inline]
pub fn detect_collision(a: &Aabb, b: &Aabb, shield_active: bool) -> bool {
    !shield_active && a.overlaps(b)
}

/// True if the vertical span `[top, bottom)` intersects the gap `(gap_top, gap_bottom)`
#[inline]
pub fn overlaps_band(top: f32, bottom: f32, gap_top: f32, gap_bottom: f32) -> bool {
    bottom > gap_top && top < gap_bottom
}
