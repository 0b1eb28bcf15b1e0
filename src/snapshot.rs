//! Read-only view of a frame for the renderer.
//!
//! The simulation never draws. Each frame it hands out a [`Frame`] of
//! world-space sprites, particle quads, HUD values and the active screen, and
//! whatever draws it owns every pixel decision.

use glam::Vec2;

use crate::companion::Companion;
use crate::collectible::GemKind;
use crate::enemy::{Enemy, EnemyKind};
use crate::geometry::Rect;
use crate::level::{Level, LevelId};
use crate::palette::{self, Color};
use crate::particles::ParticlePool;
use crate::player::Player;
use crate::portal::PortalKind;
use crate::scene::Mode;
use crate::tuning::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Companion,
    Enemy(EnemyKind),
    Gem(GemKind),
    Portal(PortalKind),
    Altar,
    SpiritTree,
    SpiritBurst,
    CasterBolt,
}

/// Visual state flags a sprite may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visual {
    /// Off-phase of the invincibility blink.
    pub hidden: bool,
    pub alert: bool,
    pub dashing: bool,
    pub charging: bool,
    pub flashing: bool,
    pub glowing: bool,
    pub placing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    pub facing: Vec2,
    pub tint: Color,
    pub visual: Visual,
}

impl Sprite {
    fn new(kind: SpriteKind, rect: Rect, tint: Color) -> Self {
        Self { kind, rect, facing: Vec2::X, tint, visual: Visual::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleQuad {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub level: LevelId,
    pub level_name: String,
    pub lives: u32,
    pub score: u32,
    pub gems: Vec<GemKind>,
    pub elapsed: f32,
    pub hint: Option<String>,
    pub can_attack: bool,
    pub boss_health: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub name: &'static str,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub unlocked: bool,
    pub read: bool,
    pub hovered: bool,
}

/// Full-screen content layered over (or instead of) the world.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu,
    WorldMap { markers: Vec<MapMarker>, can_begin: bool, begin_button: Rect },
    Codex { title: &'static str, lines: &'static [&'static str], close_button: Rect },
    Cutscene { line: Option<&'static str>, alpha: f32 },
    Playing,
    Paused,
    GameOver { score: u32 },
    Win { score: u32, elapsed: f32 },
    Ending { text: &'static str, alpha: f32, beam: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: Mode,
    /// Camera top-left in world units, shake included.
    pub camera: Vec2,
    pub zoom: f32,
    pub viewport: Vec2,
    pub background: Color,
    pub sprites: Vec<Sprite>,
    pub particles: Vec<ParticleQuad>,
    pub hud: Option<Hud>,
    pub screen: Screen,
}

// ── Builders ────────────────────────────────────────────────────────────────

pub fn background(level: Option<LevelId>) -> Color {
    match level {
        Some(LevelId::Forest) => palette::FOREST_GROUND,
        Some(LevelId::Mountain) => palette::MOUNTAIN_GROUND,
        Some(LevelId::Castle) => palette::CASTLE_GROUND,
        None => palette::MAP_BG,
    }
}

/// Every drawable in the level, back to front.
pub fn world_sprites(level: &Level, player: &Player, companion: &Companion) -> Vec<Sprite> {
    let mut out = Vec::new();

    if let Some(altar) = &level.altar {
        let mut sprite = Sprite::new(SpriteKind::Altar, altar.rect(), palette::ALTAR_CRYSTAL);
        sprite.visual.glowing = altar.is_activated();
        out.push(sprite);
        if let Some(height) = altar.tree_height() {
            let c = altar.center();
            let h = 200.0 * height;
            out.push(Sprite::new(SpriteKind::SpiritTree, Rect::new(c.x - 30.0, c.y - h, 60.0, h), palette::SPIRIT_TREE));
        }
    }

    if let Some(portal) = &level.portal {
        let tint = match portal.kind {
            PortalKind::FinalVictory => palette::SPIRIT_TREE,
            _ => palette::SPIRIT_CYAN,
        };
        let side = PORTAL_SIZE * (1.0 + portal.pulse() * 0.1);
        let mut sprite = Sprite::new(SpriteKind::Portal(portal.kind), Rect::centered(portal.center(), side, side), tint);
        sprite.facing = Vec2::from_angle(portal.swirl());
        sprite.visual.glowing = portal.is_near(player.body.pos);
        out.push(sprite);
    }

    for gem in level.gems.iter().chain(&level.floating_gems) {
        if gem.is_collected() && !gem.is_decor() {
            continue;
        }
        let side = GEM_SIZE * gem.pulse_scale();
        let mut sprite = Sprite::new(SpriteKind::Gem(gem.kind), Rect::centered(gem.center(), side, side), gem.kind.color());
        sprite.visual.glowing = gem.is_floating();
        out.push(sprite);
    }

    for enemy in &level.enemies {
        out.push(enemy_sprite(enemy));
        for bolt in enemy.projectiles() {
            out.push(Sprite::new(SpriteKind::CasterBolt, bolt.rect(), palette::BOLT_BLUE));
        }
    }

    let mut comp = Sprite::new(
        SpriteKind::Companion,
        companion.rect().offset(Vec2::new(0.0, companion.bob())),
        if companion.is_mentor() { palette::MENTOR_AURA } else { palette::SPIRIT_CYAN },
    );
    comp.visual.glowing = companion.is_glowing();
    out.push(comp);

    let mut hero = Sprite::new(
        SpriteKind::Player,
        player.body.rect().offset(Vec2::new(0.0, player.bob())),
        player.glow_color().unwrap_or(Color::WHITE),
    );
    hero.facing = player.facing();
    hero.visual = Visual {
        hidden: player.is_invincible() && (player.invincible_remaining() * 10.0) as i32 % 2 == 0,
        flashing: player.is_attack_flashing(),
        glowing: player.glow_color().is_some(),
        placing: player.is_placing_gems(),
        ..Visual::default()
    };
    out.push(hero);

    for burst in player.bursts() {
        out.push(Sprite::new(SpriteKind::SpiritBurst, burst.rect(), palette::SPIRIT_CYAN));
    }
    out
}

fn enemy_sprite(enemy: &Enemy) -> Sprite {
    let kind = enemy.kind();
    let tint = match kind {
        EnemyKind::Patroller => palette::SHADOW_PURPLE,
        EnemyKind::Chaser => palette::SHADOW_PURPLE.lerp(Color::BLACK, 0.3),
        EnemyKind::DashAttacker => palette::FLARE_WOLF,
        EnemyKind::RangedCaster => palette::GUARDIAN_GREEN,
    };
    let mut sprite = Sprite::new(SpriteKind::Enemy(kind), enemy.rect(), tint);
    sprite.facing = enemy.vel().try_normalize().unwrap_or(Vec2::X);
    sprite.visual = Visual {
        alert: enemy.is_alert(),
        dashing: enemy.is_dashing(),
        charging: enemy.is_charging(),
        flashing: enemy.is_flashing(),
        ..Visual::default()
    };
    sprite
}

pub fn particle_quads(pool: &ParticlePool) -> Vec<ParticleQuad> {
    pool.iter()
        .map(|p| ParticleQuad {
            pos: p.pos,
            size: p.size,
            rotation: p.rotation,
            color: p.color.with_alpha(p.fade()),
        })
        .collect()
}

pub fn hud(level: &Level, player: &Player, companion: &Companion, elapsed: f32) -> Hud {
    Hud {
        level: level.id,
        level_name: level.name.clone(),
        lives: player.lives(),
        score: player.score(),
        gems: player.inventory().filter(|k| k.is_spirit()).collect(),
        elapsed,
        hint: companion.hint().map(str::to_owned),
        can_attack: player.can_attack(),
        boss_health: level.enemies.iter().find(|e| e.kind().is_boss()).map(Enemy::health),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelCatalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn forest_frame_lists_everyone() {
        let catalog = LevelCatalog::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let level = Level::spawn(catalog.get(LevelId::Forest).unwrap(), &mut rng);
        let player = Player::new(level.spawn);
        let companion = Companion::new(level.companion_spawn);

        let sprites = world_sprites(&level, &player, &companion);
        let count = |k: fn(&SpriteKind) -> bool| sprites.iter().filter(|s| k(&s.kind)).count();
        assert_eq!(count(|k| matches!(k, SpriteKind::Enemy(_))), 4);
        assert_eq!(count(|k| matches!(k, SpriteKind::Gem(_))), 3);
        assert_eq!(count(|k| matches!(k, SpriteKind::Portal(_))), 1);
        assert_eq!(sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
    }

    #[test]
    fn hud_reports_boss_health() {
        let catalog = LevelCatalog::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let level = Level::spawn(catalog.get(LevelId::Mountain).unwrap(), &mut rng);
        let player = Player::new(level.spawn);
        let companion = Companion::new(level.companion_spawn);
        let hud = hud(&level, &player, &companion, 0.0);
        assert_eq!(hud.boss_health, Some(CASTER_HEALTH));
        assert_eq!(hud.lives, PLAYER_START_LIVES);
    }
}
