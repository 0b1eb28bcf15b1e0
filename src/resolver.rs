//! Per-frame interaction pass for the level being played.
//!
//! Order within a frame:
//! 1. enemies decide and move, then touch the player
//! 2. caster bolts against the player
//! 3. spirit bursts against enemies
//! 4. gem pickups
//! 5. the altar ritual
//! 6. the portal
//!
//! Every collision test uses positions already updated this frame, so the
//! same inputs and seed always replay to the same state.

use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::camera::Camera;
use crate::collectible::{Gem, GemKind};
use crate::companion::{Companion, WisdomEvent};
use crate::enemy::{EnemyKind, PlayerView};
use crate::events::{Cue, GameEvent, Outbox};
use crate::geometry::per_tick_chance;
use crate::level::{LevelId, Level};
use crate::palette;
use crate::particles::{Emit, ParticleKind, ParticlePool};
use crate::player::Player;
use crate::portal::{Portal, PortalKind, PortalOutcome};
use crate::tuning::*;

/// What the frame decided for the run as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Travel(LevelId),
    Win,
    Ending,
    GameOver,
}

/// Everything outside the level that an interaction may touch.
pub struct FrameContext<'a, R: Rng + ?Sized> {
    pub player: &'a mut Player,
    pub companion: &'a mut Companion,
    pub camera: &'a mut Camera,
    pub particles: &'a mut ParticlePool,
    pub outbox: &'a mut Outbox,
    pub rng: &'a mut R,
}

impl<R: Rng + ?Sized> FrameContext<'_, R> {
    fn emit(&mut self, req: Emit) {
        self.particles.emit(&req, self.rng);
    }

    fn hint(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.companion.give_hint(text.clone()) {
            self.outbox.push(GameEvent::Hint(text));
        }
    }

    fn wisdom(&mut self, event: WisdomEvent) {
        if let Some(line) = self.companion.give_wisdom(event, self.rng) {
            let line = line.to_owned();
            let at = self.companion.center();
            self.outbox.push(GameEvent::Hint(line));
            self.particles.emit(
                &Emit::burst(at, palette::MENTOR_AURA, 10, 30.0, 1.0).with_kind(ParticleKind::Sparkle),
                self.rng,
            );
        }
    }

    fn roll(&mut self, p: f32, dt: f32) -> bool {
        self.rng.r#gen::<f32>() < per_tick_chance(p, dt)
    }

    /// Shared reaction to the player losing a life.
    fn player_hurt(&mut self, color: palette::Color, count: usize, spread: f32, life: f32, shake: (f32, f32)) {
        self.outbox.sound(Cue::Damage);
        self.camera.shake(shake.0, shake.1);
        let at = self.player.body.center();
        self.emit(Emit::burst(at, color, count, spread, life));
    }
}

/// Run the interaction pass. `Verdict::Continue` means stay in this level.
pub fn resolve_frame<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>, dt: f32) -> Verdict {
    play_intro(level, ctx);
    emit_ambient(level, ctx, dt);

    if enemies_and_contact(level, ctx, dt) || caster_bolts(level, ctx) {
        info!(level = level.id.number(), "player out of lives");
        return Verdict::GameOver;
    }
    spirit_bursts(level, ctx);
    gem_pickups(level, ctx, dt);
    altar_ritual(level, ctx, dt);
    portal(level, ctx, dt)
}

// ── Level flavour ───────────────────────────────────────────────────────────

fn play_intro<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>) {
    if level.intro_played {
        return;
    }
    level.intro_played = true;
    let Some(intro) = level.intro.clone() else { return };

    ctx.hint(intro.hint);
    if intro.unlock_spirit_burst {
        ctx.player.unlock_spirit_burst();
    }
    let at = ctx.player.body.center();
    ctx.emit(Emit::burst(at, palette::SPIRIT_CYAN, 50, 100.0, 1.5));
    ctx.camera.shake(intro.shake.0, intro.shake.1);
}

fn emit_ambient<R: Rng + ?Sized>(level: &Level, ctx: &mut FrameContext<'_, R>, dt: f32) {
    for ambient in &level.ambient {
        if ctx.roll(ambient.chance, dt) {
            let req = ambient.roll(ctx.rng);
            ctx.emit(req);
        }
    }
}

// ── 1. Enemies ──────────────────────────────────────────────────────────────

/// Returns `true` if the player ran out of lives.
fn enemies_and_contact<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>, dt: f32) -> bool {
    let view = PlayerView::at(ctx.player.body.pos);
    let mut dead = false;

    for i in 0..level.enemies.len() {
        let enemy = &mut level.enemies[i];
        enemy.take_action(&view, dt, ctx.rng);
        enemy.update(dt, level.world);

        let kind = enemy.kind();
        let center = enemy.center();
        let touching = enemy.rect().intersects(&ctx.player.body.rect());
        let dashing = enemy.is_dashing();

        if dashing && ctx.roll(0.5, dt) {
            ctx.emit(Emit::burst(center, palette::FLARE_WOLF, 1, 20.0, 0.6).with_kind(ParticleKind::Ember));
        }

        if touching && ctx.player.take_damage() {
            ctx.player_hurt(kind.contact_color(), 20, 60.0, 0.8, (8.0, 0.3));
            debug!(?kind, lives = ctx.player.lives(), "contact damage");
            dead |= ctx.player.is_dead();
            if ctx.rng.r#gen::<f32>() < WISDOM_DAMAGE_CHANCE {
                ctx.wisdom(WisdomEvent::DamageTaken);
            }
        }
    }

    let near = level
        .enemies
        .iter()
        .any(|e| e.body.pos.distance(ctx.player.body.pos) < WISDOM_ENCOUNTER_RADIUS);
    if near && ctx.roll(WISDOM_ENCOUNTER_CHANCE, dt) {
        ctx.wisdom(WisdomEvent::EnemyEncounter);
    }

    dead
}

// ── 2. Caster bolts ─────────────────────────────────────────────────────────

fn caster_bolts<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>) -> bool {
    let target = ctx.player.body.rect();
    let mut hits = 0;
    for enemy in &mut level.enemies {
        if let Some(bolts) = enemy.projectiles_mut() {
            bolts.retain(|b| {
                let hit = b.rect().intersects(&target);
                hits += usize::from(hit);
                !hit
            });
        }
    }
    for _ in 0..hits {
        if ctx.player.take_damage() {
            ctx.player_hurt(palette::BOLT_BLUE, 15, 40.0, 0.7, (6.0, 0.2));
        }
    }
    ctx.player.is_dead()
}

// ── 3. Spirit bursts ────────────────────────────────────────────────────────

fn spirit_bursts<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>) {
    let mut i = 0;
    while i < ctx.player.bursts().len() {
        let rect = ctx.player.bursts()[i].rect();
        let Some(j) = level.enemies.iter().position(|e| e.rect().intersects(&rect)) else {
            i += 1;
            continue;
        };
        // A burst is spent on the first enemy it touches.
        ctx.player.bursts_mut().remove(i);

        let enemy = &mut level.enemies[j];
        let kind = enemy.kind();
        let center = enemy.center();
        if enemy.take_damage(1) {
            level.enemies.remove(j);
            ctx.player.add_score(kind.kill_score());
            ctx.camera.shake(5.0, 0.2);
            let (count, spread, life) = match kind {
                k if k.is_boss() => (40, 100.0, 1.5),
                EnemyKind::DashAttacker => (25, 70.0, 1.0),
                _ => (20, 60.0, 0.8),
            };
            ctx.emit(Emit::burst(center, kind.kill_color(), count, spread, life));
            info!(?kind, score = ctx.player.score(), "enemy defeated");

            if kind.is_boss() {
                ctx.outbox.sound(Cue::Attack);
                level.boss_defeated = true;
                if level.portal.is_none() {
                    level.portal = level.boss_reward.as_ref().map(|def| def.build());
                }
            }
        } else if kind.is_boss() {
            ctx.camera.shake(3.0, 0.1);
            ctx.emit(Emit::burst(center, palette::SPIRIT_CYAN, 15, 40.0, 0.5));
        }
    }
}

// ── 4. Gems ─────────────────────────────────────────────────────────────────

fn gem_pickups<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>, dt: f32) {
    let player_rect = ctx.player.body.rect();
    for gem in &mut level.gems {
        gem.update(dt);
        if !gem.rect().intersects(&player_rect) {
            continue;
        }
        let Some(kind) = gem.collect() else { continue };
        let color = kind.color();
        let at = gem.center();

        ctx.player.collect_gem(kind, color);
        ctx.outbox.sound(Cue::Collect);
        ctx.camera.shake(5.0, 0.2);
        ctx.emit(Emit::burst(at, color, 30, 80.0, 1.2));

        if ctx.companion.can_give_hint() {
            let remaining = REQUIRED_GEMS.saturating_sub(ctx.player.gem_count());
            if remaining > 0 {
                ctx.hint(format!("{remaining} more to go!"));
            } else {
                ctx.hint("Find the portal!");
            }
        } else {
            ctx.wisdom(WisdomEvent::GemCollected);
        }
    }
    level.gems.retain(|g| g.is_decor() || !g.is_collected());
}

// ── 5. Altar ────────────────────────────────────────────────────────────────

fn altar_ritual<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>, dt: f32) {
    let Some(altar) = level.altar.as_mut() else { return };
    altar.update(dt);

    let ritual_running = ctx.player.is_placing_gems() || !level.floating_gems.is_empty();
    if !altar.is_activated()
        && !ritual_running
        && altar.interaction_rect().intersects(&ctx.player.body.rect())
        && ctx.player.start_gem_placement()
    {
        ctx.companion.set_altar_idle(altar.center());
        level.ritual_pending = true;
        info!("altar ritual started");
    }

    // The placement pose has ended: release the gems toward their slots.
    if level.ritual_pending && !ctx.player.is_placing_gems() {
        level.ritual_pending = false;
        let origin = ctx.player.body.center();
        let held: Vec<GemKind> = ctx.player.inventory().filter(|k| k.is_spirit()).collect();
        for (i, kind) in held.into_iter().take(REQUIRED_GEMS).enumerate() {
            if let Some(slot) = altar.slot(i) {
                level.floating_gems.push(Gem::floating(kind, origin, slot));
                ctx.player.remove_gem(kind);
            }
        }
    }

    let mut landed: Vec<Vec2> = Vec::new();
    level.floating_gems.retain_mut(|gem| {
        if gem.update(dt) {
            landed.push(gem.center());
            false
        } else {
            true
        }
    });
    for at in landed {
        ctx.emit(Emit::burst(at, palette::ALTAR_CRYSTAL, 12, 30.0, 0.8).with_kind(ParticleKind::Sparkle));
        if altar.place_gem() {
            let center = altar.center();
            ctx.camera.shake(15.0, 0.6);
            ctx.emit(Emit::burst(center, palette::SPIRIT_TREE, 100, 150.0, 2.0));
            if level.portal.is_none() {
                level.portal = Some(Portal::new(altar.portal_spot(), PortalKind::FinalVictory, None));
            }
            info!("altar activated");
        }
    }
}

// ── 6. Portal ───────────────────────────────────────────────────────────────

fn portal<R: Rng + ?Sized>(level: &mut Level, ctx: &mut FrameContext<'_, R>, dt: f32) -> Verdict {
    let Some(portal) = level.portal.as_mut() else { return Verdict::Continue };
    portal.update(dt, ctx.player.body.pos);

    if !level.portal_announced && portal.is_near(ctx.player.body.pos) {
        level.portal_announced = true;
        ctx.wisdom(WisdomEvent::PortalApproach);
    }

    if !portal.rect().intersects(&ctx.player.body.rect()) {
        return Verdict::Continue;
    }

    let at = ctx.player.body.center();
    match portal.outcome(ctx.player.gem_count()) {
        PortalOutcome::None => Verdict::Continue,
        PortalOutcome::Travel(target) => {
            ctx.outbox.sound(Cue::Portal);
            ctx.camera.shake(10.0, 0.5);
            ctx.emit(Emit::burst(at, palette::SPIRIT_CYAN, 50, 100.0, 2.0));
            ctx.wisdom(WisdomEvent::LevelComplete);
            Verdict::Travel(target)
        }
        PortalOutcome::Win => {
            ctx.outbox.sound(Cue::Portal);
            ctx.camera.shake(10.0, 0.5);
            ctx.emit(Emit::burst(at, palette::SPIRIT_CYAN, 50, 100.0, 2.0));
            Verdict::Win
        }
        PortalOutcome::Ending => {
            ctx.outbox.sound(Cue::Portal);
            Verdict::Ending
        }
    }
}
