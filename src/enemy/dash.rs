use glam::Vec2;

use crate::entity::Body;
use crate::timer::Countdown;
use crate::tuning::*;

use super::PlayerView;

/// Zigzags along a waypoint loop and periodically commits to a straight dash
/// at the player.
///
/// States: patrolling, dashing. A dash locks its direction when it starts and
/// lasts a fixed time. Being hit mid-dash cancels it and leaves a shorter
/// cooldown before the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dash {
    waypoints: Vec<Vec2>,
    current: usize,
    zigzag: f32,
    speed: f32,
    dashing: bool,
    dash: Countdown,
    cooldown: Countdown,
    direction: Vec2,
}

impl Dash {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            current: 0,
            zigzag: 0.0,
            speed: ENEMY_PATROL_SPEED,
            dashing: false,
            dash: Countdown::idle(),
            cooldown: Countdown::idle(),
            direction: Vec2::ZERO,
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    pub fn take_action(&mut self, body: &mut Body, alert: &mut Countdown, player: &PlayerView, dt: f32) {
        let to_player = player.pos - body.pos;
        let player_dist = to_player.length();

        if !self.dashing && !self.cooldown.is_active() && player_dist < DASH_TRIGGER_RADIUS {
            self.dashing = true;
            self.dash.start(DASH_SECS);
            self.cooldown.start(DASH_COOLDOWN_SECS);
            self.direction = to_player / player_dist.max(0.1);
            self.speed = ENEMY_CHASE_SPEED * DASH_SPEED_FACTOR;
        }

        if self.dashing {
            let finished = self.dash.tick(dt);
            body.vel = self.direction * self.speed;
            if finished {
                self.dashing = false;
                self.speed = ENEMY_PATROL_SPEED;
            }
        } else {
            self.cooldown.tick(dt);
            self.zigzag += dt * DASH_ZIGZAG_RATE;
            let lateral = self.zigzag.sin() * DASH_ZIGZAG_AMPLITUDE;

            if let Some(&target) = self.waypoints.get(self.current) {
                let to_target = target - body.pos + Vec2::new(0.0, lateral);
                let dist = to_target.length();
                if dist < DASH_WAYPOINT_RADIUS {
                    self.current = (self.current + 1) % self.waypoints.len();
                } else {
                    body.vel = to_target / dist * self.speed;
                }
            } else {
                body.stop();
            }
        }

        if player_dist < DASH_ALERT_RADIUS {
            alert.start(PATROL_ALERT_SECS);
        }
    }

    /// Cancel an in-flight dash.
    pub fn interrupt(&mut self) {
        if self.dashing {
            self.dashing = false;
            self.dash.clear();
            self.speed = ENEMY_PATROL_SPEED;
            self.cooldown.start(DASH_INTERRUPT_PENALTY_SECS);
        }
    }
}
