//! Level layouts and the live state of the level being played.
//!
//! Layouts are data: `resources/levels.json` is embedded at build time and
//! parsed once into a [`LevelCatalog`]. [`Level::spawn`] turns a definition
//! into fresh enemies, gems, portals and the altar.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::altar::Altar;
use crate::collectible::{Gem, GemKind};
use crate::enemy::Enemy;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::palette::Color;
use crate::particles::{Emit, ParticleKind};
use crate::portal::{Portal, PortalKind};

pub const LEVEL_DATA: &str = include_str!("../resources/levels.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelId {
    Forest,
    Mountain,
    Castle,
}

impl LevelId {
    pub const ALL: [LevelId; 3] = [LevelId::Forest, LevelId::Mountain, LevelId::Castle];

    pub fn number(self) -> u8 {
        match self {
            LevelId::Forest => 1,
            LevelId::Mountain => 2,
            LevelId::Castle => 3,
        }
    }

    pub fn from_number(n: u8) -> Result<Self> {
        LevelId::ALL
            .into_iter()
            .find(|id| id.number() == n)
            .ok_or(Error::UnknownLevel(n))
    }
}

// ── Definitions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnemySpawn {
    Patroller { pos: [f32; 2], waypoints: Vec<[f32; 2]> },
    Chaser { pos: [f32; 2] },
    DashAttacker { pos: [f32; 2], waypoints: Vec<[f32; 2]> },
    RangedCaster { pos: [f32; 2] },
}

impl EnemySpawn {
    pub fn spawn(&self) -> Enemy {
        let route = |w: &[[f32; 2]]| w.iter().copied().map(Vec2::from).collect::<Vec<_>>();
        match self {
            EnemySpawn::Patroller { pos, waypoints } => Enemy::patroller(Vec2::from(*pos), route(waypoints)),
            EnemySpawn::Chaser { pos } => Enemy::chaser(Vec2::from(*pos)),
            EnemySpawn::DashAttacker { pos, waypoints } => {
                Enemy::dash_attacker(Vec2::from(*pos), route(waypoints))
            }
            EnemySpawn::RangedCaster { pos } => Enemy::ranged_caster(Vec2::from(*pos)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GemSpawn {
    pub kind: GemKind,
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortalDef {
    pub pos: [f32; 2],
    pub kind: PortalKind,
    #[serde(default)]
    pub target: Option<LevelId>,
}

impl PortalDef {
    pub fn build(&self) -> Portal {
        Portal::new(Vec2::from(self.pos), self.kind, self.target)
    }
}

/// One-time greeting played on the first frame of a level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntroDef {
    pub hint: String,
    #[serde(default)]
    pub unlock_spirit_burst: bool,
    /// Camera shake as `(intensity, duration)`.
    pub shake: (f32, f32),
}

/// Background particles emitted with a per-tick chance somewhere in `region`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmbientDef {
    pub kind: ParticleKind,
    pub chance: f32,
    pub region: Rect,
    pub count: (usize, usize),
    pub spread: f32,
    pub life: f32,
    pub color: [u8; 3],
}

impl AmbientDef {
    /// Build an emission at a random spot in the region.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Emit {
        let Rect { x, y, w, h } = self.region;
        let pos = Vec2::new(x + rng.r#gen::<f32>() * w, y + rng.r#gen::<f32>() * h);
        let (lo, hi) = self.count;
        let count = rng.gen_range(lo.min(hi)..=hi.max(lo));
        let [r, g, b] = self.color;
        Emit::burst(pos, Color::rgb8(r, g, b), count, self.spread, self.life).with_kind(self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelDef {
    pub id: LevelId,
    pub name: String,
    pub world: [f32; 2],
    pub spawn: [f32; 2],
    pub companion: [f32; 2],
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub gems: Vec<GemSpawn>,
    #[serde(default)]
    pub decor_crystals: usize,
    pub portal: Option<PortalDef>,
    /// Portal that opens when the mini-boss falls.
    pub boss_reward_portal: Option<PortalDef>,
    pub altar: Option<[f32; 2]>,
    pub intro: Option<IntroDef>,
    /// Top the player up to every spirit gem on arrival.
    #[serde(default)]
    pub grant_missing_gems: bool,
    #[serde(default)]
    pub ambient: Vec<AmbientDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

impl LevelCatalog {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The layouts shipped with the game.
    pub fn embedded() -> Result<Self> {
        Self::parse(LEVEL_DATA)
    }

    pub fn get(&self, id: LevelId) -> Result<&LevelDef> {
        self.levels
            .iter()
            .find(|def| def.id == id)
            .ok_or(Error::UnknownLevel(id.number()))
    }

    pub fn first(&self) -> Option<LevelId> {
        self.levels.iter().map(|def| def.id).min()
    }
}

// ── Live level ──────────────────────────────────────────────────────────────

/// Everything that lives inside the current level.
#[derive(Debug, Clone)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub world: Vec2,
    pub spawn: Vec2,
    pub companion_spawn: Vec2,
    pub enemies: Vec<Enemy>,
    pub gems: Vec<Gem>,
    /// Ritual gems drifting toward the altar.
    pub floating_gems: Vec<Gem>,
    pub portal: Option<Portal>,
    pub altar: Option<Altar>,
    pub boss_reward: Option<PortalDef>,
    pub intro: Option<IntroDef>,
    pub intro_played: bool,
    pub boss_defeated: bool,
    /// Gems are being placed; they float off once the pose ends.
    pub ritual_pending: bool,
    pub portal_announced: bool,
    pub grant_missing_gems: bool,
    pub ambient: Vec<AmbientDef>,
}

impl Level {
    pub fn spawn<R: Rng + ?Sized>(def: &LevelDef, rng: &mut R) -> Self {
        let world = Vec2::from(def.world);
        let mut gems: Vec<Gem> = def
            .gems
            .iter()
            .map(|g| Gem::new(g.kind, Vec2::from(g.pos)))
            .collect();
        for _ in 0..def.decor_crystals {
            let x = rng.gen_range(100.0..=(world.x - 100.0).max(100.0));
            let y = rng.gen_range(100.0..=(world.y - 100.0).max(100.0));
            gems.push(Gem::decor(Vec2::new(x, y)));
        }

        info!(level = def.id.number(), name = %def.name, enemies = def.enemies.len(), "level loaded");

        Self {
            id: def.id,
            name: def.name.clone(),
            world,
            spawn: Vec2::from(def.spawn),
            companion_spawn: Vec2::from(def.companion),
            enemies: def.enemies.iter().map(EnemySpawn::spawn).collect(),
            gems,
            floating_gems: Vec::new(),
            portal: def.portal.as_ref().map(PortalDef::build),
            altar: def.altar.map(|p| Altar::new(Vec2::from(p))),
            boss_reward: def.boss_reward_portal.clone(),
            intro: def.intro.clone(),
            intro_played: false,
            boss_defeated: false,
            ritual_pending: false,
            portal_announced: false,
            grant_missing_gems: def.grant_missing_gems,
            ambient: def.ambient.clone(),
        }
    }

    /// Spirit gems still waiting to be picked up.
    pub fn gems_remaining(&self) -> usize {
        self.gems.iter().filter(|g| !g.is_collected()).count()
    }
}
