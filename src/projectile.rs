use glam::Vec2;

use crate::geometry::Rect;
use crate::timer::Countdown;

/// A moving square shot, tracked by its center.
///
/// Projectiles are never clamped to the world; they expire on lifetime or
/// once they have flown further than `max_range` (when one is set).
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub center: Vec2,
    pub vel: Vec2,
    pub size: f32,
    life: Countdown,
    traveled: f32,
    max_range: Option<f32>,
}

impl Projectile {
    pub fn new(center: Vec2, vel: Vec2, size: f32, lifetime: f32) -> Self {
        Self {
            center,
            vel,
            size,
            life: Countdown::running(lifetime),
            traveled: 0.0,
            max_range: None,
        }
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.max_range = Some(range);
        self
    }

    /// Move by `vel * dt`. Returns `false` once the projectile has expired.
    pub fn update(&mut self, dt: f32) -> bool {
        let step = self.vel * dt;
        self.center += step;
        self.traveled += step.length();
        self.life.tick(dt);
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_active() && self.max_range.map_or(true, |r| self.traveled <= r)
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.center, self.size, self.size)
    }

    pub fn traveled(&self) -> f32 {
        self.traveled
    }

    pub fn life_remaining(&self) -> f32 {
        self.life.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_on_lifetime() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0, 1.0);
        assert!(p.update(0.5));
        assert!(!p.update(0.6));
    }

    #[test]
    fn expires_on_range() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(300.0, 0.0), 4.0, 5.0).with_range(400.0);
        assert!(p.update(1.0));
        assert!(!p.update(1.0));
        assert!((p.traveled() - 600.0).abs() < 1e-3);
    }
}
