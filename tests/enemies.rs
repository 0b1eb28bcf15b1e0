use elion::enemy::{Behavior, Enemy, EnemyKind, PlayerView};
use elion::tuning::*;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

const WORLD: Vec2 = Vec2::new(2000.0, 2000.0);
const DT: f32 = 1.0 / 60.0;

fn step(enemy: &mut Enemy, player: Vec2, rng: &mut StdRng, dt: f32) {
    enemy.take_action(&PlayerView::at(player), dt, rng);
    enemy.update(dt, WORLD);
}

#[test]
fn patroller_reaches_far_waypoint_then_turns_back() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut enemy = Enemy::patroller(Vec2::ZERO, vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
    let far_player = Vec2::new(1500.0, 1500.0);

    let mut furthest = 0.0_f32;
    let mut turned = false;
    for _ in 0..240 {
        step(&mut enemy, far_player, &mut rng, DT);
        furthest = furthest.max(enemy.body.pos.x);
        if furthest > 90.0 && enemy.vel().x < 0.0 {
            turned = true;
            break;
        }
    }

    assert!(turned, "never started back, furthest x = {furthest}");
    assert!((furthest - 100.0).abs() <= 5.0, "furthest x = {furthest}");
    assert!(enemy.body.pos.y.abs() < 1e-3);
}

#[test]
fn patroller_raises_alert_without_leaving_route() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut enemy = Enemy::patroller(Vec2::new(10.0, 0.0), vec![Vec2::new(100.0, 0.0)]);
    step(&mut enemy, Vec2::new(10.0, 50.0), &mut rng, DT);
    assert!(enemy.is_alert());
    assert!(enemy.vel().x > 0.0);
    assert_eq!(enemy.vel().y, 0.0);
}

#[test]
fn chaser_ignores_player_outside_aggro() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut enemy = Enemy::chaser(Vec2::ZERO);
    enemy.take_action(&PlayerView::at(Vec2::new(CHASE_AGGRO_RADIUS + 1.0, 0.0)), DT, &mut rng);
    assert_eq!(enemy.vel(), Vec2::ZERO);
    assert!(!enemy.is_alert());
}

#[test]
fn chaser_runs_at_chase_speed_inside_aggro() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut enemy = Enemy::chaser(Vec2::ZERO);
    enemy.take_action(&PlayerView::at(Vec2::new(CHASE_AGGRO_RADIUS - 1.0, 0.0)), DT, &mut rng);
    assert!((enemy.vel().length() - ENEMY_CHASE_SPEED).abs() < 1e-3);
    assert!(enemy.is_alert());
}

#[test]
fn dash_locks_direction_and_is_cancelled_by_a_hit() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut enemy = Enemy::dash_attacker(Vec2::ZERO, vec![Vec2::ZERO, Vec2::new(0.0, 300.0)]);
    step(&mut enemy, Vec2::new(150.0, 0.0), &mut rng, DT);
    assert!(enemy.is_dashing());
    let vel = enemy.vel();
    assert!((vel.length() - ENEMY_CHASE_SPEED * DASH_SPEED_FACTOR).abs() < 1e-3);

    // The player sidesteps; the dash keeps its heading.
    step(&mut enemy, Vec2::new(0.0, 150.0), &mut rng, DT);
    assert_eq!(enemy.vel(), vel);

    assert!(!enemy.take_damage(1));
    assert!(!enemy.is_dashing());
    match enemy.behavior() {
        Behavior::Dash(d) => assert!((d.cooldown_remaining() - DASH_INTERRUPT_PENALTY_SECS).abs() < 1e-6),
        other => panic!("unexpected behavior {other:?}"),
    }
}

#[test]
fn dash_ends_after_its_duration() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut enemy = Enemy::dash_attacker(Vec2::ZERO, vec![Vec2::new(0.0, 300.0)]);
    let player = Vec2::new(190.0, 0.0);
    step(&mut enemy, player, &mut rng, 0.1);
    assert!(enemy.is_dashing());
    for _ in 0..3 {
        step(&mut enemy, player, &mut rng, 0.1);
    }
    assert!(!enemy.is_dashing());
}

#[test]
fn caster_charges_then_fires_at_the_player() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut enemy = Enemy::ranged_caster(Vec2::ZERO);
    let player = Vec2::new(250.0, 0.0);

    let mut charged = false;
    for _ in 0..60 {
        step(&mut enemy, player, &mut rng, 0.1);
        charged |= enemy.is_charging();
        if !enemy.projectiles().is_empty() {
            break;
        }
    }
    assert!(charged);
    assert_eq!(enemy.projectiles().len(), 1);
    assert!(enemy.projectiles()[0].vel.x > 0.0);
    assert!((enemy.projectiles()[0].vel.length() - CASTER_BOLT_SPEED).abs() < 1e-3);
}

#[test]
fn caster_holds_position_inside_min_range() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut enemy = Enemy::ranged_caster(Vec2::new(100.0, 100.0));
    step(&mut enemy, Vec2::new(150.0, 100.0), &mut rng, DT);
    assert_eq!(enemy.vel(), Vec2::ZERO);
}

#[test]
fn caster_cooldown_shortens_with_damage() {
    let mut enemy = Enemy::ranged_caster(Vec2::ZERO);
    let cooldown = |e: &Enemy| match e.behavior() {
        Behavior::Caster(c) => c.cooldown(),
        _ => unreachable!(),
    };
    assert_eq!(cooldown(&enemy), 3.0);
    enemy.take_damage(1);
    assert_eq!(cooldown(&enemy), 2.5);
    assert!(enemy.is_flashing());
    enemy.take_damage(1);
    assert_eq!(cooldown(&enemy), 2.0);
    assert!(enemy.take_damage(1));
}

#[test]
fn kill_scores_favour_the_boss() {
    assert_eq!(EnemyKind::Chaser.kill_score(), KILL_SCORE);
    assert_eq!(EnemyKind::RangedCaster.kill_score(), BOSS_KILL_SCORE);
}
