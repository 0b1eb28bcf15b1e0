use elion::altar::Altar;
use elion::camera::Camera;
use elion::collectible::{Gem, GemKind};
use elion::companion::{Companion, WisdomEvent};
use elion::portal::{Portal, PortalKind, PortalOutcome};
use elion::tuning::*;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

const VIEWPORT: Vec2 = Vec2::new(640.0, 360.0);

// ── Camera ──────────────────────────────────────────────────────────────────

#[test]
fn camera_covers_eight_percent_per_update() {
    let mut cam = Camera::new(VIEWPORT, Vec2::new(5000.0, 5000.0));
    cam.set_target(Vec2::new(100.0, 0.0) + VIEWPORT * 0.5);
    cam.update(1.0 / 60.0);
    assert!((cam.position.x - 8.0).abs() < 1e-3, "x = {}", cam.position.x);

    // Exponential decay: the second step is shorter than the first.
    cam.update(1.0 / 60.0);
    assert!((cam.position.x - 15.36).abs() < 1e-3, "x = {}", cam.position.x);
}

#[test]
fn camera_stays_inside_world() {
    let world = Vec2::new(1000.0, 500.0);
    let mut cam = Camera::new(VIEWPORT, world);
    cam.set_target(Vec2::new(5000.0, 5000.0));
    for _ in 0..500 {
        cam.update(1.0 / 60.0);
    }
    assert!((cam.position - (world - VIEWPORT)).length() < 1e-2);

    cam.set_target(Vec2::new(-5000.0, -5000.0));
    for _ in 0..500 {
        cam.update(1.0 / 60.0);
    }
    assert_eq!(cam.position, Vec2::ZERO);
}

#[test]
fn shake_is_read_time_only() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut cam = Camera::new(VIEWPORT, Vec2::new(5000.0, 5000.0));
    cam.position = Vec2::new(100.0, 100.0);
    cam.set_target(Vec2::new(100.0, 100.0) + VIEWPORT * 0.5);
    cam.shake(10.0, 0.5);

    let jittered = cam.offset(&mut rng);
    assert!(jittered.distance(cam.position) <= 10.0);
    assert_eq!(cam.position, Vec2::new(100.0, 100.0));

    cam.update(0.25);
    assert!((cam.shake_strength() - 5.0).abs() < 1e-3);
    cam.update(0.3);
    assert!(!cam.is_shaking());
    assert_eq!(cam.offset(&mut rng), cam.position);
}

#[test]
fn zoom_eases_toward_target() {
    let mut cam = Camera::new(VIEWPORT, Vec2::new(5000.0, 5000.0));
    cam.set_zoom(ALTAR_ZOOM);
    cam.update(1.0 / 60.0);
    assert!(cam.zoom < 1.0 && cam.zoom > ALTAR_ZOOM);
}

// ── Altar ───────────────────────────────────────────────────────────────────

#[test]
fn third_gem_activates_altar_for_good() {
    let mut altar = Altar::new(Vec2::new(100.0, 100.0));
    assert!(!altar.place_gem());
    assert!(!altar.place_gem());
    assert!(altar.place_gem());
    assert!(altar.is_activated());

    assert!(!altar.place_gem());
    assert!(altar.is_activated());
    assert_eq!(altar.gems_placed(), 3);
}

#[test]
fn spirit_tree_grows_after_delay() {
    let mut altar = Altar::new(Vec2::ZERO);
    for _ in 0..3 {
        altar.place_gem();
    }
    altar.update(0.5);
    assert_eq!(altar.tree_height(), None);
    altar.update(0.6);
    assert_eq!(altar.tree_height(), Some(0.0));
    altar.update(ALTAR_TREE_GROW_SECS * 2.0);
    assert_eq!(altar.tree_height(), Some(1.0));
}

#[test]
fn reach_extends_past_footprint() {
    let altar = Altar::new(Vec2::new(100.0, 100.0));
    let near = Vec2::new(100.0 - ALTAR_REACH + 1.0, 150.0);
    assert!(!altar.rect().contains(near));
    assert!(altar.interaction_rect().contains(near));
}

// ── Gems ────────────────────────────────────────────────────────────────────

#[test]
fn gem_collects_once() {
    let mut gem = Gem::new(GemKind::Blue, Vec2::ZERO);
    assert_eq!(gem.collect(), Some(GemKind::Blue));
    assert_eq!(gem.collect(), None);
}

#[test]
fn decor_crystal_is_never_collectible() {
    let mut gem = Gem::decor(Vec2::ZERO);
    assert!(gem.is_collected());
    assert!(gem.is_decor());
    assert_eq!(gem.collect(), None);
}

#[test]
fn floating_gem_lands_on_its_slot() {
    let slot = Vec2::new(200.0, 0.0);
    let mut gem = Gem::floating(GemKind::Yellow, Vec2::ZERO, slot);
    assert!(gem.is_floating());

    let mut landed = false;
    for _ in 0..300 {
        if gem.update(1.0 / 60.0) {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!(gem.center().distance(slot) <= GEM_ARRIVAL_RADIUS);
    assert!(!gem.is_floating());
}

// ── Portal ──────────────────────────────────────────────────────────────────

#[test]
fn exit_portal_waits_for_every_gem() {
    let exit = Portal::new(Vec2::ZERO, PortalKind::Exit, None);
    assert_eq!(exit.outcome(2), PortalOutcome::None);
    assert_eq!(exit.outcome(3), PortalOutcome::Win);
}

#[test]
fn untargeted_transition_portal_does_nothing() {
    let portal = Portal::new(Vec2::ZERO, PortalKind::LevelTransition, None);
    assert_eq!(portal.outcome(3), PortalOutcome::None);
    assert_eq!(Portal::new(Vec2::ZERO, PortalKind::FinalVictory, None).outcome(0), PortalOutcome::Ending);
}

// ── Companion ───────────────────────────────────────────────────────────────

#[test]
fn companion_trails_behind_player() {
    let mut c = Companion::new(Vec2::ZERO);
    let player = Vec2::new(140.0, 0.0);
    c.follow(player);
    assert!((c.pos.x - (player.x + COMPANION_OFFSET_X) * COMPANION_FOLLOW_FACTOR).abs() < 1e-3);
}

#[test]
fn wisdom_needs_mentor() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut c = Companion::new(Vec2::ZERO);
    assert!(c.give_wisdom(WisdomEvent::DamageTaken, &mut rng).is_none());

    c.activate_mentor();
    assert!(c.is_mentor());
    let line = c.give_wisdom(WisdomEvent::DamageTaken, &mut rng).map(str::to_owned);
    assert!(line.is_some());
    assert_eq!(c.hint().map(str::to_owned), line);
}

#[test]
fn hint_disappears_but_cooldown_outlasts_it() {
    let mut c = Companion::new(Vec2::ZERO);
    assert!(c.give_hint("Find the portal!"));
    c.update(HINT_SECS + 0.1);
    assert!(c.hint().is_none());
    assert!(!c.can_give_hint());
    c.update(HINT_COOLDOWN_SECS);
    assert!(c.can_give_hint());
}
