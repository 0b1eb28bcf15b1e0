//! Hostile creatures.
//!
//! Every enemy shares a [`Body`], a health pool and an alert marker; what it
//! does each frame is decided by its [`Behavior`]. Callers only ever see
//! [`Enemy`], so damage, movement and contact are handled uniformly and the
//! concrete variant matters only for cosmetics and score.

mod caster;
mod chase;
mod dash;
mod patrol;

pub use caster::Caster;
pub use chase::Chase;
pub use dash::Dash;
pub use patrol::Patrol;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::Body;
use crate::geometry::Rect;
use crate::palette::{self, Color};
use crate::projectile::Projectile;
use crate::timer::Countdown;
use crate::tuning::*;

/// What an enemy gets to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    /// Top-left corner; ranges are measured corner to corner.
    pub pos: Vec2,
    pub center: Vec2,
}

impl PlayerView {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, center: pos + Vec2::splat(PLAYER_SIZE * 0.5) }
    }
}

/// Type tag for cosmetic and scoring decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Patroller,
    Chaser,
    DashAttacker,
    RangedCaster,
}

impl EnemyKind {
    /// The mini-boss gates the way out of its level.
    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::RangedCaster)
    }

    pub fn kill_score(self) -> u32 {
        if self.is_boss() { BOSS_KILL_SCORE } else { KILL_SCORE }
    }

    pub fn kill_color(self) -> Color {
        match self {
            EnemyKind::DashAttacker => palette::FLARE_WOLF,
            EnemyKind::RangedCaster => palette::GUARDIAN_GREEN,
            EnemyKind::Patroller | EnemyKind::Chaser => palette::SPIRIT_CYAN,
        }
    }

    pub fn contact_color(self) -> Color {
        match self {
            EnemyKind::DashAttacker => palette::FLARE_BURN,
            _ => palette::DAMAGE_RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Patrol(Patrol),
    Chase(Chase),
    Dash(Dash),
    Caster(Caster),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    health: i32,
    alert: Countdown,
    behavior: Behavior,
}

impl Enemy {
    pub fn patroller(pos: Vec2, waypoints: Vec<Vec2>) -> Self {
        Self::with(pos, ENEMY_SIZE, 1, Behavior::Patrol(Patrol::new(waypoints, ENEMY_PATROL_SPEED)))
    }

    pub fn chaser(pos: Vec2) -> Self {
        Self::with(pos, ENEMY_SIZE, 1, Behavior::Chase(Chase::new(ENEMY_CHASE_SPEED)))
    }

    pub fn dash_attacker(pos: Vec2, waypoints: Vec<Vec2>) -> Self {
        Self::with(pos, ENEMY_SIZE, DASH_HEALTH, Behavior::Dash(Dash::new(waypoints)))
    }

    pub fn ranged_caster(pos: Vec2) -> Self {
        Self::with(pos, MINI_BOSS_SIZE, CASTER_HEALTH, Behavior::Caster(Caster::new()))
    }

    fn with(pos: Vec2, size: f32, health: i32, behavior: Behavior) -> Self {
        Self { body: Body::new(pos, size), health, alert: Countdown::idle(), behavior }
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            Behavior::Patrol(_) => EnemyKind::Patroller,
            Behavior::Chase(_) => EnemyKind::Chaser,
            Behavior::Dash(_) => EnemyKind::DashAttacker,
            Behavior::Caster(_) => EnemyKind::RangedCaster,
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Decide this frame's velocity (and attacks) without moving.
    pub fn take_action<R: Rng + ?Sized>(&mut self, player: &PlayerView, dt: f32, rng: &mut R) {
        match &mut self.behavior {
            Behavior::Patrol(p) => p.take_action(&mut self.body, &mut self.alert, player),
            Behavior::Chase(c) => c.take_action(&mut self.body, &mut self.alert, player),
            Behavior::Dash(d) => d.take_action(&mut self.body, &mut self.alert, player, dt),
            Behavior::Caster(c) => {
                c.take_action(&mut self.body, &mut self.alert, self.health, player, dt, rng)
            }
        }
    }

    /// Integrate velocity, clamp to the world, and run down timers.
    pub fn update(&mut self, dt: f32, world: Vec2) {
        self.body.integrate(dt);
        self.body.clamp_to(world);
        self.alert.tick(dt);
        if let Behavior::Caster(c) = &mut self.behavior {
            c.update(dt);
        }
    }

    /// Apply `amount` damage. Returns `true` when health has reached zero;
    /// removing the enemy is up to the caller.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        match &mut self.behavior {
            Behavior::Dash(d) => d.interrupt(),
            Behavior::Caster(c) => c.on_damage(self.health),
            Behavior::Patrol(_) | Behavior::Chase(_) => {}
        }
        self.health <= 0
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    pub fn is_alert(&self) -> bool {
        self.alert.is_active()
    }

    pub fn is_dashing(&self) -> bool {
        matches!(&self.behavior, Behavior::Dash(d) if d.is_dashing())
    }

    pub fn is_charging(&self) -> bool {
        matches!(&self.behavior, Behavior::Caster(c) if c.is_charging())
    }

    pub fn is_flashing(&self) -> bool {
        matches!(&self.behavior, Behavior::Caster(c) if c.is_flashing())
    }

    /// Bolts in flight; empty for everything but the caster.
    pub fn projectiles(&self) -> &[Projectile] {
        match &self.behavior {
            Behavior::Caster(c) => c.bolts(),
            _ => &[],
        }
    }

    pub fn projectiles_mut(&mut self) -> Option<&mut Vec<Projectile>> {
        match &mut self.behavior {
            Behavior::Caster(c) => Some(c.bolts_mut()),
            _ => None,
        }
    }
}
