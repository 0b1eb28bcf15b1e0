use elion::collectible::GemKind;
use elion::player::{Controls, Player};
use elion::tuning::*;
use glam::Vec2;

const WORLD: Vec2 = Vec2::new(800.0, 600.0);

#[test]
fn second_hit_inside_invincibility_is_ignored() {
    let mut player = Player::new(Vec2::ZERO);
    assert_eq!(player.lives(), 3);

    assert!(player.take_damage());
    assert_eq!(player.lives(), 2);

    // 1.9 s of simulated time, still inside the window.
    for _ in 0..19 {
        player.update(0.1);
    }
    assert!(!player.take_damage());
    assert_eq!(player.lives(), 2);
}

#[test]
fn invincibility_ends_after_its_duration() {
    let mut player = Player::new(Vec2::ZERO);
    player.take_damage();
    player.update(INVINCIBILITY_SECS + 0.01);
    assert!(!player.is_invincible());
    assert_eq!(player.invincible_remaining(), 0.0);
    assert!(player.take_damage());
    assert_eq!(player.lives(), 1);
}

#[test]
fn lives_stop_at_zero() {
    let mut player = Player::new(Vec2::ZERO);
    for _ in 0..5 {
        player.take_damage();
        player.update(INVINCIBILITY_SECS + 0.1);
    }
    assert_eq!(player.lives(), 0);
    assert!(player.is_dead());
}

#[test]
fn movement_is_clamped_to_world() {
    let mut player = Player::new(Vec2::new(10.0, 10.0));
    let keys = Controls { up: true, left: true, ..Default::default() };
    player.handle_input(keys, 1.0, WORLD);
    assert_eq!(player.body.pos, Vec2::ZERO);

    let keys = Controls { down: true, right: true, ..Default::default() };
    for _ in 0..100 {
        player.handle_input(keys, 0.5, WORLD);
    }
    assert_eq!(player.body.pos, WORLD - Vec2::splat(PLAYER_SIZE));
}

#[test]
fn duplicate_gem_scores_but_does_not_count_twice() {
    let mut player = Player::new(Vec2::ZERO);
    player.collect_gem(GemKind::Green, GemKind::Green.color());
    player.collect_gem(GemKind::Green, GemKind::Green.color());
    assert_eq!(player.gem_count(), 1);
    assert_eq!(player.score(), 2 * GEM_SCORE);
}

#[test]
fn placement_needs_every_gem() {
    let mut player = Player::new(Vec2::ZERO);
    player.collect_gem(GemKind::Green, GemKind::Green.color());
    player.collect_gem(GemKind::Blue, GemKind::Blue.color());
    assert!(!player.start_gem_placement());

    player.collect_gem(GemKind::Yellow, GemKind::Yellow.color());
    assert!(player.start_gem_placement());
    assert!(player.is_placing_gems());
    assert!(!player.start_gem_placement());
}

#[test]
fn placement_freezes_input_then_finishes() {
    let mut player = Player::new(Vec2::new(100.0, 100.0));
    for kind in GemKind::SPIRIT {
        player.collect_gem(kind, kind.color());
    }
    player.start_gem_placement();

    let keys = Controls { right: true, ..Default::default() };
    player.handle_input(keys, 0.5, WORLD);
    assert_eq!(player.body.pos, Vec2::new(100.0, 100.0));

    assert!(!player.update(1.0));
    assert!(player.update(1.0));
    assert!(!player.is_placing_gems());

    player.handle_input(keys, 0.5, WORLD);
    assert!(player.body.pos.x > 100.0);
}

#[test]
fn burst_follows_last_direction_and_cools_down() {
    let mut player = Player::new(Vec2::new(100.0, 100.0));
    player.unlock_spirit_burst();

    let keys = Controls { up: true, attack: true, ..Default::default() };
    assert!(player.handle_input(keys, 0.01, WORLD));
    assert!(player.bursts()[0].vel.y < 0.0);

    assert!(!player.handle_input(keys, 0.01, WORLD));
    player.update(ATTACK_COOLDOWN_SECS);
    assert!(player.can_attack());
}

#[test]
fn bursts_expire_with_their_lifetime() {
    let mut player = Player::new(Vec2::new(100.0, 100.0));
    player.unlock_spirit_burst();
    player.attack();
    player.update(SPIRIT_BURST_LIFETIME + 0.1);
    assert!(player.bursts().is_empty());
}
