use elion::camera::Camera;
use elion::collectible::GemKind;
use elion::companion::Companion;
use elion::enemy::{Enemy, EnemyKind};
use elion::events::{Cue, GameEvent, Outbox};
use elion::level::{Level, LevelCatalog, LevelId};
use elion::particles::ParticlePool;
use elion::player::Player;
use elion::portal::PortalKind;
use elion::resolver::{FrameContext, Verdict, resolve_frame};
use elion::tuning::*;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

const DT: f32 = 1.0 / 60.0;

struct Harness {
    level: Level,
    player: Player,
    companion: Companion,
    camera: Camera,
    particles: ParticlePool,
    outbox: Outbox,
    rng: StdRng,
}

impl Harness {
    fn new(id: LevelId) -> Self {
        let catalog = LevelCatalog::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(id.number() as u64);
        let level = Level::spawn(catalog.get(id).unwrap(), &mut rng);
        Self {
            player: Player::new(level.spawn),
            companion: Companion::new(level.companion_spawn),
            camera: Camera::new(Vec2::new(RENDER_WIDTH, RENDER_HEIGHT), level.world),
            particles: ParticlePool::new(PARTICLE_POOL_SIZE),
            outbox: Outbox::new(),
            rng,
            level,
        }
    }

    fn resolve(&mut self, dt: f32) -> Verdict {
        let mut ctx = FrameContext {
            player: &mut self.player,
            companion: &mut self.companion,
            camera: &mut self.camera,
            particles: &mut self.particles,
            outbox: &mut self.outbox,
            rng: &mut self.rng,
        };
        resolve_frame(&mut self.level, &mut ctx, dt)
    }

    fn events(&mut self) -> Vec<GameEvent> {
        self.outbox.drain().collect()
    }
}

#[test]
fn enemy_contact_costs_one_life_and_shakes() {
    let mut h = Harness::new(LevelId::Forest);
    h.level.enemies = vec![Enemy::chaser(h.player.body.pos)];

    assert_eq!(h.resolve(DT), Verdict::Continue);
    assert_eq!(h.player.lives(), 2);
    assert!(h.camera.is_shaking());
    assert!(h.particles.active_count() > 0);

    // Still touching, but invincible.
    h.player.update(DT);
    h.resolve(DT);
    assert_eq!(h.player.lives(), 2);
}

#[test]
fn last_life_lost_ends_the_run() {
    let mut h = Harness::new(LevelId::Forest);
    for _ in 0..2 {
        h.player.take_damage();
        h.player.update(INVINCIBILITY_SECS + 0.1);
    }
    h.level.enemies = vec![Enemy::chaser(h.player.body.pos)];
    assert_eq!(h.resolve(DT), Verdict::GameOver);
    assert!(h.player.is_dead());
}

#[test]
fn picking_up_a_gem_scores_and_hints() {
    let mut h = Harness::new(LevelId::Forest);
    h.level.enemies.clear();
    let gem_pos = h.level.gems.iter().find(|g| g.kind == GemKind::Green).unwrap().pos;
    h.player.teleport(gem_pos);

    h.resolve(DT);
    assert!(h.player.has_gem(GemKind::Green));
    assert_eq!(h.player.score(), GEM_SCORE);
    assert_eq!(h.level.gems_remaining(), 2);

    let events = h.events();
    assert!(events.contains(&GameEvent::Sound(Cue::Collect)));
    assert!(events.contains(&GameEvent::Hint("2 more to go!".into())));
}

#[test]
fn boss_falls_after_three_bursts_and_opens_the_way() {
    let mut h = Harness::new(LevelId::Mountain);
    h.level.enemies.retain(|e| e.kind() == EnemyKind::RangedCaster);
    h.resolve(DT);
    assert!(h.player.has_spirit_burst(), "mountain intro unlocks the burst");
    assert!(h.level.portal.is_none());

    for hit in 1..=CASTER_HEALTH {
        h.player.update(ATTACK_COOLDOWN_SECS);
        assert!(h.player.attack());
        let target = h.level.enemies[0].center();
        h.player.bursts_mut()[0].center = target;
        h.resolve(DT);
        assert!(h.player.bursts().is_empty(), "burst spent on hit {hit}");
    }

    assert!(h.level.enemies.is_empty());
    assert!(h.level.boss_defeated);
    assert_eq!(h.player.score(), BOSS_KILL_SCORE);
    let portal = h.level.portal.as_ref().expect("reward portal");
    assert_eq!(portal.target, Some(LevelId::Castle));
    assert!(h.events().contains(&GameEvent::Sound(Cue::Attack)));
}

#[test]
fn stepping_into_the_forest_portal_travels() {
    let mut h = Harness::new(LevelId::Forest);
    h.level.enemies.clear();
    let at = h.level.portal.as_ref().unwrap().pos;
    h.player.teleport(at);

    assert_eq!(h.resolve(DT), Verdict::Travel(LevelId::Mountain));
    assert!(h.events().contains(&GameEvent::Sound(Cue::Portal)));
}

#[test]
fn altar_ritual_lights_the_altar_and_opens_the_final_portal() {
    let mut h = Harness::new(LevelId::Castle);
    for kind in GemKind::SPIRIT {
        h.player.collect_gem(kind, kind.color());
    }
    let altar_pos = h.level.altar.as_ref().unwrap().pos;
    h.player.teleport(altar_pos - Vec2::splat(10.0));

    h.resolve(0.1);
    assert!(h.player.is_placing_gems());
    assert!(h.companion.is_idle_at_altar());
    assert!(h.level.floating_gems.is_empty(), "gems stay held during the pose");

    let mut released = false;
    for _ in 0..100 {
        h.player.update(0.1);
        h.resolve(0.1);
        released |= !h.level.floating_gems.is_empty();
        if h.level.altar.as_ref().unwrap().is_activated() {
            break;
        }
    }
    assert!(released);
    assert!(h.level.altar.as_ref().unwrap().is_activated());
    assert_eq!(h.player.gem_count(), 0);

    let portal = h.level.portal.as_ref().expect("victory portal");
    assert_eq!(portal.kind, PortalKind::FinalVictory);
    let portal_pos = portal.pos;

    h.player.teleport(portal_pos);
    assert_eq!(h.resolve(0.1), Verdict::Ending);
}
