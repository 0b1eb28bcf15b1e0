use glam::Vec2;

use crate::geometry::{clamp_to_world, Rect};

/// Positioned, square, axis-aligned body shared by every world object.
///
/// `pos` is the top-left corner. Velocity is in units per second and is only
/// applied by [`Body::integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, vel: Vec2::ZERO, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    /// Semi-implicit Euler step: the velocity set this frame moves the body.
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Keep the whole body inside `[0, world - size]`.
    pub fn clamp_to(&mut self, world: Vec2) {
        self.pos = clamp_to_world(self.pos, self.size, world);
    }

    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_then_clamp() {
        let mut b = Body::new(Vec2::new(90.0, 10.0), 20.0);
        b.vel = Vec2::new(100.0, -100.0);
        b.integrate(0.5);
        b.clamp_to(Vec2::new(100.0, 100.0));
        assert_eq!(b.pos, Vec2::new(80.0, 0.0));
    }

    #[test]
    fn center_is_half_size_in() {
        let b = Body::new(Vec2::new(10.0, 20.0), 30.0);
        assert_eq!(b.center(), Vec2::new(25.0, 35.0));
    }
}
