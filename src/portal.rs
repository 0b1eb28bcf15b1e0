use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::level::LevelId;
use crate::tuning::{PORTAL_NEAR_RADIUS, PORTAL_SIZE, REQUIRED_GEMS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalKind {
    /// Carries the player to its target level.
    LevelTransition,
    /// Ends the run with a win once the player holds every spirit gem.
    Exit,
    /// Opened by the altar; leads to the ending.
    FinalVictory,
    /// Decoration only.
    Cosmetic,
}

/// What touching a portal does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalOutcome {
    None,
    Travel(LevelId),
    Win,
    Ending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub pos: Vec2,
    pub kind: PortalKind,
    pub target: Option<LevelId>,
    pulse: f32,
    swirl: f32,
}

impl Portal {
    pub fn new(pos: Vec2, kind: PortalKind, target: Option<LevelId>) -> Self {
        Self { pos, kind, target, pulse: 0.0, swirl: 0.0 }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, PORTAL_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Resolve a touch. An explicit target always wins; otherwise the kind
    /// decides. A portal that cannot fire yet leaves everything unchanged.
    pub fn outcome(&self, gem_count: usize) -> PortalOutcome {
        if let Some(level) = self.target {
            return PortalOutcome::Travel(level);
        }
        match self.kind {
            PortalKind::Exit if gem_count >= REQUIRED_GEMS => PortalOutcome::Win,
            PortalKind::FinalVictory => PortalOutcome::Ending,
            _ => PortalOutcome::None,
        }
    }

    /// Animate; the swirl speeds up while the player stands close.
    pub fn update(&mut self, dt: f32, player_pos: Vec2) {
        self.pulse += dt * 2.0;
        self.swirl += dt * 3.0;
        if self.is_near(player_pos) {
            self.pulse += dt * 4.0;
        }
    }

    pub fn is_near(&self, player_pos: Vec2) -> bool {
        player_pos.distance(self.pos) < PORTAL_NEAR_RADIUS
    }

    pub fn pulse(&self) -> f32 {
        self.pulse
    }

    pub fn swirl(&self) -> f32 {
        self.swirl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_beats_kind() {
        let p = Portal::new(Vec2::ZERO, PortalKind::FinalVictory, Some(LevelId::Castle));
        assert_eq!(p.outcome(0), PortalOutcome::Travel(LevelId::Castle));
    }

    #[test]
    fn exit_needs_all_gems() {
        let p = Portal::new(Vec2::ZERO, PortalKind::Exit, None);
        assert_eq!(p.outcome(2), PortalOutcome::None);
        assert_eq!(p.outcome(3), PortalOutcome::Win);
    }

    #[test]
    fn cosmetic_does_nothing() {
        let p = Portal::new(Vec2::ZERO, PortalKind::Cosmetic, None);
        assert_eq!(p.outcome(3), PortalOutcome::None);
    }
}
