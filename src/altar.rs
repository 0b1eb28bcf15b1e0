use std::f32::consts::TAU;

use glam::Vec2;

use crate::geometry::Rect;
use crate::tuning::*;

/// The spirit altar of the castle.
///
/// Counts placed gems from 0 to 3. The third placement activates it, once and
/// for good; the spirit tree then appears after a short delay and grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Altar {
    pub pos: Vec2,
    placed: usize,
    activated: bool,
    since_activation: f32,
    tree_growth: Option<f32>,
    slots: [Vec2; REQUIRED_GEMS],
}

impl Altar {
    pub fn new(pos: Vec2) -> Self {
        let center = pos + Vec2::splat(ALTAR_SIZE * 0.5);
        let slots = std::array::from_fn(|i| {
            let angle = i as f32 * TAU / REQUIRED_GEMS as f32;
            center + Vec2::from_angle(angle) * ALTAR_SLOT_RADIUS
        });
        Self {
            pos,
            placed: 0,
            activated: false,
            since_activation: 0.0,
            tree_growth: None,
            slots,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, ALTAR_SIZE)
    }

    /// Footprint grown by the reach margin; standing in it starts the ritual.
    pub fn interaction_rect(&self) -> Rect {
        self.rect().inflate(ALTAR_REACH)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Where the `index`th gem comes to rest.
    pub fn slot(&self, index: usize) -> Option<Vec2> {
        self.slots.get(index).copied()
    }

    /// Seat one gem. Returns `true` only on the call that activates the altar;
    /// calls after the third are ignored.
    pub fn place_gem(&mut self) -> bool {
        if self.placed >= REQUIRED_GEMS {
            return false;
        }
        self.placed += 1;
        if self.placed == REQUIRED_GEMS {
            self.activated = true;
            self.since_activation = 0.0;
            return true;
        }
        false
    }

    pub fn gems_placed(&self) -> usize {
        self.placed
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn update(&mut self, dt: f32) {
        if !self.activated {
            return;
        }
        self.since_activation += dt;
        match &mut self.tree_growth {
            Some(t) => *t += dt,
            None if self.since_activation > ALTAR_TREE_DELAY_SECS => self.tree_growth = Some(0.0),
            None => {}
        }
    }

    /// Spirit tree height in `[0, 1]`; `None` until it has appeared.
    pub fn tree_height(&self) -> Option<f32> {
        self.tree_growth.map(|t| (t / ALTAR_TREE_GROW_SECS).min(1.0))
    }

    /// Where the victory portal opens once the altar is lit.
    pub fn portal_spot(&self) -> Vec2 {
        let c = self.center();
        Vec2::new(c.x - PORTAL_SIZE * 0.5, c.y - ALTAR_PORTAL_RISE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_ring_the_center() {
        let altar = Altar::new(Vec2::new(100.0, 100.0));
        for i in 0..3 {
            let slot = altar.slot(i).unwrap();
            assert!((slot.distance(altar.center()) - ALTAR_SLOT_RADIUS).abs() < 1e-3);
        }
        assert!(altar.slot(3).is_none());
        let first = altar.slot(0).unwrap();
        assert!((first.x - (altar.center().x + ALTAR_SLOT_RADIUS)).abs() < 1e-3);
    }

    #[test]
    fn tree_waits_then_grows() {
        let mut altar = Altar::new(Vec2::ZERO);
        for _ in 0..3 {
            altar.place_gem();
        }
        altar.update(0.5);
        assert!(altar.tree_height().is_none());
        altar.update(0.6);
        assert_eq!(altar.tree_height(), Some(0.0));
        altar.update(10.0);
        assert_eq!(altar.tree_height(), Some(1.0));
    }
}
