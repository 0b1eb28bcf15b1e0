use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{direction_toward, Rect};
use crate::palette::{self, Color};
use crate::tuning::{GEM_ARRIVAL_RADIUS, GEM_FLOAT_SPEED, GEM_SIZE};

/// Gem identity. The three spirit gems are unique quest items; crystal decor
/// is set dressing that is never picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GemKind {
    Green,
    Blue,
    Yellow,
    CrystalDecor,
}

impl GemKind {
    pub const SPIRIT: [GemKind; 3] = [GemKind::Green, GemKind::Blue, GemKind::Yellow];

    pub fn is_spirit(self) -> bool {
        !matches!(self, GemKind::CrystalDecor)
    }

    pub fn color(self) -> Color {
        match self {
            GemKind::Green => palette::GEM_GREEN,
            GemKind::Blue => palette::GEM_BLUE,
            GemKind::Yellow => palette::GEM_YELLOW,
            GemKind::CrystalDecor => palette::CRYSTAL_DECOR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GemKind::Green => "green",
            GemKind::Blue => "blue",
            GemKind::Yellow => "yellow",
            GemKind::CrystalDecor => "crystal_decor",
        }
    }
}

/// A gem lying in the world, or floating toward an altar slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Gem {
    pub pos: Vec2,
    pub kind: GemKind,
    collected: bool,
    float_target: Option<Vec2>,
    pulse: f32,
}

impl Gem {
    pub fn new(kind: GemKind, pos: Vec2) -> Self {
        Self { pos, kind, collected: false, float_target: None, pulse: 0.0 }
    }

    /// Cosmetic crystal: starts collected so it never reacts to the player.
    pub fn decor(pos: Vec2) -> Self {
        Self { collected: true, ..Self::new(GemKind::CrystalDecor, pos) }
    }

    /// A detached ritual gem that starts centered on `from` and drifts until
    /// its center reaches `slot`.
    pub fn floating(kind: GemKind, from: Vec2, slot: Vec2) -> Self {
        let mut gem = Self::new(kind, from - Vec2::splat(GEM_SIZE * 0.5));
        gem.collected = true;
        gem.float_target = Some(slot);
        gem
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, GEM_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(GEM_SIZE * 0.5)
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn is_decor(&self) -> bool {
        !self.kind.is_spirit()
    }

    pub fn is_floating(&self) -> bool {
        self.float_target.is_some()
    }

    /// Mark collected and hand back the kind. `None` if already taken or decor.
    pub fn collect(&mut self) -> Option<GemKind> {
        if self.collected || self.is_decor() {
            return None;
        }
        self.collected = true;
        Some(self.kind)
    }

    /// Visual pulse scale around 1.0.
    pub fn pulse_scale(&self) -> f32 {
        let amplitude = if self.is_floating() { 0.3 } else { 0.2 };
        1.0 + self.pulse.sin() * amplitude
    }

    /// Advance the float animation. Returns `true` on the frame the gem lands.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(target) = self.float_target else {
            if !self.collected {
                self.pulse += dt * 2.0;
            }
            return false;
        };
        let center = self.center();
        if center.distance(target) > GEM_ARRIVAL_RADIUS {
            self.pos += direction_toward(center, target) * GEM_FLOAT_SPEED * dt;
            self.pulse += dt * 3.0;
            false
        } else {
            self.float_target = None;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_once() {
        let mut gem = Gem::new(GemKind::Blue, Vec2::ZERO);
        assert_eq!(gem.collect(), Some(GemKind::Blue));
        assert_eq!(gem.collect(), None);
    }

    #[test]
    fn decor_is_never_collected() {
        let mut gem = Gem::decor(Vec2::new(10.0, 10.0));
        assert!(gem.is_collected());
        assert_eq!(gem.collect(), None);
    }

    #[test]
    fn floating_gem_arrives() {
        let mut gem = Gem::floating(GemKind::Green, Vec2::ZERO, Vec2::new(50.0, 0.0));
        let mut landed = false;
        for _ in 0..120 {
            if gem.update(1.0 / 60.0) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(!gem.is_floating());
        assert!(gem.center().distance(Vec2::new(50.0, 0.0)) <= GEM_ARRIVAL_RADIUS);
    }
}
