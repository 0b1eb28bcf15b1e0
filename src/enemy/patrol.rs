use glam::Vec2;

use crate::entity::Body;
use crate::timer::Countdown;
use crate::tuning::{PATROL_ALERT_RADIUS, PATROL_ALERT_SECS, PATROL_WAYPOINT_RADIUS};

use super::PlayerView;

/// Walks a closed loop of waypoints. Noticing the player only raises the
/// alert marker; the route never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Patrol {
    waypoints: Vec<Vec2>,
    current: usize,
    speed: f32,
}

impl Patrol {
    pub fn new(waypoints: Vec<Vec2>, speed: f32) -> Self {
        Self { waypoints, current: 0, speed }
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.current).copied()
    }

    pub fn take_action(&mut self, body: &mut Body, alert: &mut Countdown, player: &PlayerView) {
        if let Some(target) = self.current_waypoint() {
            let to_target = target - body.pos;
            let dist = to_target.length();
            if dist < PATROL_WAYPOINT_RADIUS {
                // Velocity is left as-is for this frame; the next frame
                // steers toward the new waypoint.
                self.current = (self.current + 1) % self.waypoints.len();
            } else {
                body.vel = to_target / dist * self.speed;
            }
        } else {
            body.stop();
        }

        if player.pos.distance(body.pos) < PATROL_ALERT_RADIUS {
            alert.start(PATROL_ALERT_SECS);
        }
    }
}
