use crate::entity::Body;
use crate::timer::Countdown;
use crate::tuning::{CHASE_AGGRO_RADIUS, CHASE_ALERT_SECS};

use super::PlayerView;

/// Pursues the player in a straight line while inside the aggro radius and
/// stands still otherwise. No line-of-sight test.
#[derive(Debug, Clone, PartialEq)]
pub struct Chase {
    speed: f32,
    aggro_radius: f32,
    chasing: bool,
}

impl Chase {
    pub fn new(speed: f32) -> Self {
        Self { speed, aggro_radius: CHASE_AGGRO_RADIUS, chasing: false }
    }

    pub fn aggro_radius(&self) -> f32 {
        self.aggro_radius
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn take_action(&mut self, body: &mut Body, alert: &mut Countdown, player: &PlayerView) {
        let to_player = player.pos - body.pos;
        let dist = to_player.length();
        self.chasing = dist < self.aggro_radius && dist > 0.0;
        if self.chasing {
            body.vel = to_player / dist * self.speed;
            alert.start(CHASE_ALERT_SECS);
        } else {
            body.stop();
        }
    }
}
