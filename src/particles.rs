//! Fixed-capacity pool of cosmetic particles.
//!
//! Gameplay never reads particles back; it only pushes [`Emit`] requests.
//! Free slots are kept on an index stack so emission is O(1), and a full pool
//! silently drops the overflow.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::palette::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Radial burst that falls under gravity.
    #[default]
    Spark,
    /// Rises, then sinks, with occasional sideways flicker.
    Ember,
    /// Slow drift with a gentle sway.
    Mist,
    /// Floats upward and slows.
    LightFlower,
    /// Small twinkle with a fast wobble.
    Sparkle,
}

/// One emission request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emit {
    pub pos: Vec2,
    pub color: Color,
    pub count: usize,
    /// Upper bound on initial speed for sparks.
    pub spread: f32,
    pub life: f32,
    pub kind: ParticleKind,
}

impl Emit {
    pub fn burst(pos: Vec2, color: Color, count: usize, spread: f32, life: f32) -> Self {
        Self { pos, color, count, spread, life, kind: ParticleKind::Spark }
    }

    pub fn with_kind(mut self, kind: ParticleKind) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life as a fraction, used as the fade alpha.
    pub fn fade(&self) -> f32 {
        if self.max_life > 0.0 { (self.life / self.max_life).clamp(0.0, 1.0) } else { 0.0 }
    }
}

const MIN_SPARK_SPEED: f32 = 20.0;

pub struct ParticlePool {
    slots: Vec<Option<Particle>>,
    free: Vec<usize>,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            // Reversed so the lowest index is handed out first.
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.free = (0..self.slots.len()).rev().collect();
    }

    /// Spawn up to `req.count` particles. Returns how many found a slot.
    pub fn emit<R: Rng + ?Sized>(&mut self, req: &Emit, rng: &mut R) -> usize {
        let mut emitted = 0;
        while emitted < req.count {
            let Some(index) = self.free.pop() else { break };
            self.slots[index] = Some(Self::spawn(req, rng));
            emitted += 1;
        }
        emitted
    }

    fn spawn<R: Rng + ?Sized>(req: &Emit, rng: &mut R) -> Particle {
        let angle = rng.gen_range(0.0..TAU);
        let speed = MIN_SPARK_SPEED + (req.spread - MIN_SPARK_SPEED) * rng.r#gen::<f32>();
        let (vel, spin) = match req.kind {
            ParticleKind::Spark => (
                Vec2::new(angle.cos() * speed, angle.sin() * speed - 40.0),
                rng.gen_range(-2.0..2.0),
            ),
            ParticleKind::Ember => (
                Vec2::new(angle.cos() * speed, rng.gen_range(-70.0..-30.0)),
                rng.gen_range(-2.0..2.0),
            ),
            ParticleKind::Mist => (
                Vec2::new(rng.gen_range(-12.0..12.0), rng.gen_range(-8.0..8.0)),
                rng.gen_range(-0.5..0.5),
            ),
            ParticleKind::LightFlower => (
                Vec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-50.0..-30.0)),
                rng.gen_range(-1.0..1.0),
            ),
            ParticleKind::Sparkle => (
                Vec2::new(rng.gen_range(-15.0..15.0), rng.gen_range(-15.0..15.0)),
                rng.gen_range(-3.0..3.0),
            ),
        };
        Particle {
            pos: req.pos,
            vel,
            life: req.life,
            max_life: req.life,
            color: req.color,
            size: rng.gen_range(2..=5) as f32,
            rotation: rng.gen_range(0.0..TAU),
            spin,
            kind: req.kind,
        }
    }

    /// Integrate every live particle and return expired slots to the free list.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(p) = slot else { continue };
            p.pos += p.vel * dt;
            p.rotation += p.spin * dt;
            match p.kind {
                ParticleKind::Spark => p.vel.y += 60.0 * dt,
                ParticleKind::Ember => {
                    p.vel.y += 45.0 * dt;
                    if rng.gen_bool(0.1) {
                        p.vel.x += rng.gen_range(-12.0..12.0);
                    }
                }
                ParticleKind::Mist => {
                    p.vel.y += 6.0 * dt;
                    p.vel.x += (p.life * 3.0).sin() * 0.8;
                }
                ParticleKind::LightFlower => p.vel.y += 12.0 * dt,
                ParticleKind::Sparkle => {
                    p.vel.y += 30.0 * dt;
                    p.vel.x += (p.life * 5.0).sin() * 2.0;
                }
            }
            p.life -= dt;
            if p.life <= 0.0 {
                *slot = None;
                self.free.push(index);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn overflow_is_dropped() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(10);
        let req = Emit::burst(Vec2::ZERO, palette::SPIRIT_CYAN, 25, 60.0, 1.0);
        assert_eq!(pool.emit(&req, &mut rng), 10);
        assert_eq!(pool.active_count(), 10);
        assert_eq!(pool.emit(&req, &mut rng), 0);
    }

    #[test]
    fn expired_slots_are_reused() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = ParticlePool::new(4);
        let short = Emit::burst(Vec2::ZERO, palette::DAMAGE_RED, 4, 60.0, 0.1);
        pool.emit(&short, &mut rng);
        pool.update(0.2, &mut rng);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.emit(&short, &mut rng), 4);
    }

    #[test]
    fn small_spread_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = ParticlePool::new(8);
        let req = Emit::burst(Vec2::ZERO, palette::LIGHT_FLOWER, 8, 5.0, 1.0);
        assert_eq!(pool.emit(&req, &mut rng), 8);
    }
}
