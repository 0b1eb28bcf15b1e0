// =============================================================================
// GEOMETRY.RS - Axis-aligned boxes and vector helpers
//
// Everything in the world is an axis-aligned rectangle in floating-point
// world units with a y-down origin at the top-left of the map.
// - Overlap tests (contact, pickup, trigger zones)
// - Distance and direction (aggro ranges, aiming)
// - World-bounds clamping
// =============================================================================

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` with its top-left corner at `pos`.
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Rectangle of the given dimensions centered on `center`.
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Half-open containment, `[x, x+w) × [y, y+h)`.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.x + self.w && point.y >= self.y && point.y < self.y + self.h
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.w + amount * 2.0,
            self.h + amount * 2.0,
        )
    }

    pub fn offset(&self, by: Vec2) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.w, self.h)
    }
}

// =============================================================================
// DISTANCE & DIRECTION
// =============================================================================

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector from `from` toward `to`, or zero if the points coincide.
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

// =============================================================================
// BOUNDS
// =============================================================================

/// Clamp a top-left position so a `size`-square stays inside `[0, world]`.
///
/// If the world is smaller than `size` on an axis the position pins to 0.
pub fn clamp_to_world(pos: Vec2, size: f32, world: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.min(world.x - size).max(0.0),
        pos.y.min(world.y - size).max(0.0),
    )
}

/// Convert a per-tick probability (tuned at 60 ticks/s) into the chance of at
/// least one success over a frame of `dt` seconds.
pub fn per_tick_chance(p: f32, dt: f32) -> f32 {
    let ticks = (dt * 60.0).max(0.0);
    1.0 - (1.0 - p.clamp(0.0, 1.0)).powf(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_touching_edges_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contains_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::ZERO));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).inflate(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_centered_round_trips_center() {
        let r = Rect::centered(Vec2::new(50.0, 40.0), 10.0, 20.0);
        assert_eq!(r.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_direction_toward_same_point() {
        assert_eq!(direction_toward(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_to_world() {
        let world = Vec2::new(100.0, 100.0);
        assert_eq!(clamp_to_world(Vec2::new(-5.0, 90.0), 20.0, world), Vec2::new(0.0, 80.0));
    }

    #[test]
    fn test_per_tick_chance_at_sixty_fps() {
        let p = per_tick_chance(0.01, 1.0 / 60.0);
        assert!((p - 0.01).abs() < 1e-5);
        assert_eq!(per_tick_chance(0.3, 0.0), 0.0);
    }
}
