use glam::Vec2;
use rand::Rng;

use crate::entity::Body;
use crate::projectile::Projectile;
use crate::timer::Countdown;
use crate::tuning::*;

use super::PlayerView;

/// The forest guardian: keeps its distance, charges, then throws a bolt at
/// where the player is standing when the charge completes.
///
/// The attack cooldown shortens as it loses health, and after each volley is
/// re-rolled from a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Caster {
    attack_timer: f32,
    cooldown: f32,
    charging: bool,
    charge: Countdown,
    rune_glow: Countdown,
    hit_flash: Countdown,
    bolts: Vec<Projectile>,
}

impl Default for Caster {
    fn default() -> Self {
        Self::new()
    }
}

impl Caster {
    pub fn new() -> Self {
        Self {
            attack_timer: 0.0,
            cooldown: CASTER_COOLDOWN_BY_HEALTH[CASTER_HEALTH as usize - 1],
            charging: false,
            charge: Countdown::idle(),
            rune_glow: Countdown::idle(),
            hit_flash: Countdown::idle(),
            bolts: Vec::new(),
        }
    }

    pub fn take_action<R: Rng + ?Sized>(
        &mut self,
        body: &mut Body,
        alert: &mut Countdown,
        health: i32,
        player: &PlayerView,
        dt: f32,
        rng: &mut R,
    ) {
        let to_player = player.pos - body.pos;
        let dist = to_player.length();

        if dist > CASTER_MIN_RANGE && !self.charging {
            let mut speed = ENEMY_PATROL_SPEED * CASTER_APPROACH_FACTOR;
            if health == 1 {
                speed *= CASTER_ENRAGED_SPEED_FACTOR;
            }
            body.vel = to_player / dist * speed;
        } else {
            body.stop();
        }

        self.attack_timer += dt;
        if !self.charging && self.attack_timer >= self.cooldown && dist < CASTER_ATTACK_RANGE {
            self.charging = true;
            self.charge.start(CASTER_CHARGE_SECS);
            self.attack_timer = 0.0;
        }

        if self.charging {
            self.rune_glow.start(CASTER_RUNE_GLOW_SECS);
            if self.charge.tick(dt) {
                let origin = body.center();
                let aim = (player.center - origin).normalize_or_zero();
                if aim != Vec2::ZERO {
                    self.bolts.push(Projectile::new(
                        origin,
                        aim * CASTER_BOLT_SPEED,
                        CASTER_BOLT_SIZE,
                        CASTER_BOLT_LIFETIME,
                    ));
                }
                self.charging = false;
                let (lo, hi) = CASTER_COOLDOWN_REROLL;
                self.cooldown = rng.gen_range(lo..hi);
            }
        }

        alert.start(CHASE_ALERT_SECS);
    }

    pub fn update(&mut self, dt: f32) {
        self.bolts.retain_mut(|b| b.update(dt));
        self.rune_glow.tick(dt);
        self.hit_flash.tick(dt);
    }

    /// React to a hit that left `health` remaining.
    pub fn on_damage(&mut self, health: i32) {
        self.hit_flash.start(CASTER_HIT_FLASH_SECS);
        if (1..CASTER_HEALTH).contains(&health) {
            self.cooldown = CASTER_COOLDOWN_BY_HEALTH[health as usize - 1];
        }
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn is_glowing(&self) -> bool {
        self.rune_glow.is_active()
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash.is_active()
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn bolts(&self) -> &[Projectile] {
        &self.bolts
    }

    pub fn bolts_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.bolts
    }
}
