// ── Color ──────────────────────────────────────────────────────────────────

/// Linear RGBA color used by the renderer and particle effects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const TRANSPARENT: Self = Self([0.0, 0.0, 0.0, 0.0]);

    /// Build an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    pub fn with_alpha(self, a: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a.clamp(0.0, 1.0)])
    }

    /// Linear blend toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0.0; 4];
        for (i, c) in out.iter_mut().enumerate() {
            *c = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        Self(out)
    }
}

// ── Palette ────────────────────────────────────────────────────────────────

pub const SPIRIT_CYAN: Color = Color::rgb8(120, 240, 255);
pub const GEM_GREEN: Color = Color::rgb8(120, 240, 120);
pub const GEM_BLUE: Color = Color::rgb8(100, 180, 240);
pub const GEM_YELLOW: Color = Color::rgb8(255, 240, 120);
pub const CRYSTAL_DECOR: Color = Color::rgb8(200, 150, 100);
pub const FLARE_WOLF: Color = Color::rgb8(255, 140, 0);
pub const FLARE_BURN: Color = Color::rgb8(255, 100, 0);
pub const GUARDIAN_GREEN: Color = Color::rgb8(100, 255, 100);
pub const DAMAGE_RED: Color = Color::rgb8(255, 80, 80);
pub const BOLT_BLUE: Color = Color::rgb8(100, 200, 255);
pub const MIST_WHITE: Color = Color::rgb8(255, 255, 255);
pub const LIGHT_FLOWER: Color = Color::rgb8(200, 255, 220);
pub const SPIRIT_TREE: Color = Color::rgb8(120, 255, 220);
pub const SHADOW_PURPLE: Color = Color::rgb8(170, 120, 240);
pub const ALTAR_CRYSTAL: Color = Color::rgb8(220, 255, 255);
pub const MENTOR_AURA: Color = Color([1.0, 1.0, 220.0 / 255.0, 120.0 / 255.0]);

pub const MAP_BG: Color = Color::rgb8(20, 25, 40);
pub const LOCATION_INACTIVE: Color = Color::rgb8(120, 120, 120);
pub const SPIRIT_FOREST: Color = Color::rgb8(120, 255, 170);
pub const CRIMSON_MOUNTAIN: Color = Color::rgb8(255, 120, 120);
pub const LIGHTKEEPER_CASTLE: Color = Color::rgb8(255, 255, 120);
pub const BUTTON_DISABLED: Color = Color::rgb8(100, 100, 100);
pub const BUTTON_ENABLED: Color = Color::rgb8(120, 255, 220);
pub const CODEX_BG: Color = Color([30.0 / 255.0, 35.0 / 255.0, 50.0 / 255.0, 240.0 / 255.0]);

pub const FOREST_GROUND: Color = Color::rgb8(34, 58, 40);
pub const MOUNTAIN_GROUND: Color = Color::rgb8(72, 41, 25);
pub const CASTLE_GROUND: Color = Color::rgb8(60, 84, 96);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_maps_full_range() {
        assert_eq!(Color::rgb8(255, 0, 255).0, [1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b);
    }
}
