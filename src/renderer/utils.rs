// ── Letterbox viewport math ───────────────────────────────────────────────────
//
// The game draws into a fixed 16:9 layout. When the window has another shape
// the picture is scaled uniformly and centred, and pointer positions are
// mapped back through the same rectangle before the world map sees them.

use glam::Vec2;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Rectangle in physical pixels that holds the scaled layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Map a physical pointer position into layout coordinates. `None` when
    /// the pointer is on the bars or the viewport is empty.
    pub fn to_layout(&self, physical: Vec2, layout: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let u = (physical.x - self.x) / self.width;
        let v = (physical.y - self.y) / self.height;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        Some(Vec2::new(u * layout.x, v * layout.y))
    }
}

// ── letterbox_viewport ────────────────────────────────────────────────────────

/// Largest uniformly scaled copy of `layout` that fits in `physical`, centred.
///
/// ```text
/// scale = min(physical.x / layout.x, physical.y / layout.y)
/// ```
///
/// Returns a zero-sized viewport when either layout dimension is zero.
pub fn letterbox_viewport(physical: Vec2, layout: Vec2) -> Viewport {
    if layout.x <= 0.0 || layout.y <= 0.0 {
        return Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    }
    let scale = (physical.x / layout.x).min(physical.y / layout.y).max(0.0);
    let width  = layout.x * scale;
    let height = layout.y * scale;
    Viewport {
        x: (physical.x - width) / 2.0,
        y: (physical.y - height) / 2.0,
        width,
        height,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn exact_fit_no_offset() {
        let v = letterbox_viewport(LAYOUT, LAYOUT);
        assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 1280.0, height: 720.0 });
    }

    #[test]
    fn pillarbox_in_4x3_window() {
        // scale = min(0.625, 0.833) = 0.625 → 800×450, bars of 75 top and bottom.
        let v = letterbox_viewport(Vec2::new(800.0, 600.0), LAYOUT);
        assert!((v.y - 75.0).abs() < 1e-3, "y={}", v.y);
        assert!((v.height - 450.0).abs() < 1e-3, "h={}", v.height);
    }

    #[test]
    fn zero_layout_gives_empty_viewport() {
        let v = letterbox_viewport(LAYOUT, Vec2::new(0.0, 720.0));
        assert_eq!(v.width, 0.0);
        assert_eq!(v.to_layout(Vec2::new(10.0, 10.0), LAYOUT), None);
    }

    #[test]
    fn pointer_maps_back_to_layout() {
        // 2× window: the centre stays the centre.
        let v = letterbox_viewport(Vec2::new(2560.0, 1440.0), LAYOUT);
        let p = v.to_layout(Vec2::new(1280.0, 720.0), LAYOUT).unwrap();
        assert!((p - Vec2::new(640.0, 360.0)).length() < 1e-3);
    }

    #[test]
    fn pointer_on_bars_is_ignored() {
        let v = letterbox_viewport(Vec2::new(800.0, 600.0), LAYOUT);
        assert_eq!(v.to_layout(Vec2::new(400.0, 20.0), LAYOUT), None);
        assert!(v.to_layout(Vec2::new(400.0, 300.0), LAYOUT).is_some());
    }
}
