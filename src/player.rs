use std::collections::BTreeSet;

use glam::Vec2;

use crate::collectible::GemKind;
use crate::entity::Body;
use crate::palette::{self, Color};
use crate::projectile::Projectile;
use crate::timer::Countdown;
use crate::tuning::*;

/// Directional and attack keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
}

/// The lightkeeper.
///
/// Owns its inventory, lives, score and the spirit bursts it has fired. All
/// timers count down in [`Player::update`] and clamp at zero.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    speed: f32,
    inventory: BTreeSet<GemKind>,
    lives: u32,
    score: u32,

    invincible: Countdown,
    glow: Countdown,
    glow_color: Option<Color>,
    placing: Countdown,

    has_spirit_burst: bool,
    attack_cooldown: Countdown,
    attack_flash: Countdown,
    last_direction: Vec2,
    bursts: Vec<Projectile>,

    idle: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PLAYER_SIZE),
            speed: PLAYER_SPEED,
            inventory: BTreeSet::new(),
            lives: PLAYER_START_LIVES,
            score: 0,
            invincible: Countdown::idle(),
            glow: Countdown::idle(),
            glow_color: None,
            placing: Countdown::idle(),
            has_spirit_burst: false,
            attack_cooldown: Countdown::idle(),
            attack_flash: Countdown::idle(),
            last_direction: Vec2::X,
            bursts: Vec::new(),
            idle: 0.0,
        }
    }

    // ── Movement ────────────────────────────────────────────────────────────

    /// Map held keys to a velocity, move, clamp to the world, and fire if the
    /// attack key is down. Returns `true` when a spirit burst was fired.
    ///
    /// Ignored entirely while the gem-placement ritual is running.
    pub fn handle_input(&mut self, keys: Controls, dt: f32, world: Vec2) -> bool {
        self.body.stop();
        if self.is_placing_gems() {
            return false;
        }

        let mut vel = Vec2::ZERO;
        if keys.up {
            vel.y = -self.speed;
        }
        if keys.down {
            vel.y = self.speed;
        }
        if keys.left {
            vel.x = -self.speed;
        }
        if keys.right {
            vel.x = self.speed;
        }
        if vel.x != 0.0 && vel.y != 0.0 {
            vel *= DIAGONAL_FACTOR;
        }

        self.body.vel = vel;
        self.body.integrate(dt);
        self.body.clamp_to(world);

        if vel != Vec2::ZERO {
            self.idle = 0.0;
            self.last_direction = vel;
        }

        keys.attack && self.attack()
    }

    /// Move the player without touching any other state (level entry).
    pub fn teleport(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.stop();
    }

    // ── Spirit burst ────────────────────────────────────────────────────────

    pub fn unlock_spirit_burst(&mut self) {
        self.has_spirit_burst = true;
        self.glow_color = Some(palette::SPIRIT_CYAN);
        self.glow.start(GLOW_SECS);
    }

    pub fn has_spirit_burst(&self) -> bool {
        self.has_spirit_burst
    }

    pub fn can_attack(&self) -> bool {
        self.has_spirit_burst && !self.attack_cooldown.is_active()
    }

    /// Fire a spirit burst from the center along the last movement direction.
    /// Declines silently (returns `false`) when [`Player::can_attack`] is false.
    pub fn attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.attack_cooldown.start(ATTACK_COOLDOWN_SECS);
        self.attack_flash.start(ATTACK_FLASH_SECS);

        let dir = self.aim();
        let burst = Projectile::new(
            self.body.center(),
            dir * SPIRIT_BURST_SPEED,
            SPIRIT_BURST_SIZE,
            SPIRIT_BURST_LIFETIME,
        )
        .with_range(SPIRIT_BURST_RANGE);
        self.bursts.push(burst);
        true
    }

    /// Unit aim direction; `+x` until the player has moved.
    pub fn aim(&self) -> Vec2 {
        let dir = self.last_direction.normalize_or_zero();
        if dir == Vec2::ZERO { Vec2::X } else { dir }
    }

    pub fn bursts(&self) -> &[Projectile] {
        &self.bursts
    }

    pub fn bursts_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.bursts
    }

    pub fn is_attack_flashing(&self) -> bool {
        self.attack_flash.is_active()
    }

    // ── Damage ──────────────────────────────────────────────────────────────

    /// Lose a life unless invincible. Returns whether damage was applied.
    pub fn take_damage(&mut self) -> bool {
        if self.invincible.is_active() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invincible.start(INVINCIBILITY_SECS);
        true
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible.is_active()
    }

    pub fn invincible_remaining(&self) -> f32 {
        self.invincible.remaining()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    // ── Inventory ───────────────────────────────────────────────────────────

    /// Add `kind` to the inventory, award score, and start the pickup glow.
    ///
    /// The inventory is a set: collecting a held kind again still scores but
    /// does not change the count.
    pub fn collect_gem(&mut self, kind: GemKind, color: Color) {
        self.inventory.insert(kind);
        self.score += GEM_SCORE;
        self.glow_color = Some(color);
        self.glow.start(GLOW_SECS);
    }

    pub fn remove_gem(&mut self, kind: GemKind) -> bool {
        self.inventory.remove(&kind)
    }

    pub fn has_gem(&self, kind: GemKind) -> bool {
        self.inventory.contains(&kind)
    }

    /// Number of distinct spirit gems held.
    pub fn gem_count(&self) -> usize {
        self.inventory.iter().filter(|k| k.is_spirit()).count()
    }

    pub fn inventory(&self) -> impl Iterator<Item = GemKind> + '_ {
        self.inventory.iter().copied()
    }

    pub fn glow_color(&self) -> Option<Color> {
        self.glow_color
    }

    // ── Altar ritual ────────────────────────────────────────────────────────

    /// Begin the timed placement ritual. Needs every spirit gem and declines
    /// if a ritual is already running.
    pub fn start_gem_placement(&mut self) -> bool {
        if self.is_placing_gems() || self.gem_count() < REQUIRED_GEMS {
            return false;
        }
        self.placing.start(GEM_PLACEMENT_SECS);
        self.body.stop();
        true
    }

    pub fn is_placing_gems(&self) -> bool {
        self.placing.is_active()
    }

    // ── Score ───────────────────────────────────────────────────────────────

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    // ── Tick ────────────────────────────────────────────────────────────────

    /// Count down every timer and advance owned bursts.
    ///
    /// Returns `true` on the frame the placement ritual finishes.
    pub fn update(&mut self, dt: f32) -> bool {
        self.invincible.tick(dt);
        if self.glow.tick(dt) {
            self.glow_color = None;
        }
        let placed = self.placing.tick(dt);
        self.attack_cooldown.tick(dt);
        self.attack_flash.tick(dt);
        self.idle += dt;

        self.bursts.retain_mut(|b| b.update(dt));
        placed
    }

    /// Idle bob offset in pixels for the sprite.
    pub fn bob(&self) -> f32 {
        (self.idle * 2.0).sin() * 2.0
    }

    pub fn facing(&self) -> Vec2 {
        self.aim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(1000.0, 1000.0);

    #[test]
    fn diagonal_uses_fixed_factor() {
        let mut p = Player::new(Vec2::new(500.0, 500.0));
        let keys = Controls { up: true, right: true, ..Default::default() };
        p.handle_input(keys, 1.0, WORLD);
        let expected = PLAYER_SPEED * DIAGONAL_FACTOR;
        assert!((p.body.pos.x - (500.0 + expected)).abs() < 1e-3);
        assert!((p.body.pos.y - (500.0 - expected)).abs() < 1e-3);
    }

    #[test]
    fn opposing_keys_down_wins_over_up() {
        let mut p = Player::new(Vec2::new(500.0, 500.0));
        let keys = Controls { up: true, down: true, ..Default::default() };
        p.handle_input(keys, 0.1, WORLD);
        assert!(p.body.pos.y > 500.0);
    }

    #[test]
    fn attack_needs_unlock() {
        let mut p = Player::new(Vec2::ZERO);
        assert!(!p.attack());
        p.unlock_spirit_burst();
        assert!(p.attack());
        assert!(!p.attack());
        assert_eq!(p.bursts().len(), 1);
    }

    #[test]
    fn default_aim_is_right() {
        let p = Player::new(Vec2::ZERO);
        assert_eq!(p.aim(), Vec2::X);
    }

    #[test]
    fn glow_color_clears_on_expiry() {
        let mut p = Player::new(Vec2::ZERO);
        p.collect_gem(GemKind::Green, GemKind::Green.color());
        assert!(p.glow_color().is_some());
        p.update(GLOW_SECS + 0.1);
        assert!(p.glow_color().is_none());
    }
}
