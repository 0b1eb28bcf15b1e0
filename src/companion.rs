use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::Rect;
use crate::timer::Countdown;
use crate::tuning::*;

/// Moments the mentor can comment on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WisdomEvent {
    EnemyEncounter,
    DamageTaken,
    GemCollected,
    PortalApproach,
    AttackUsed,
    LevelComplete,
}

impl WisdomEvent {
    fn lines(self) -> &'static [&'static str] {
        match self {
            WisdomEvent::EnemyEncounter => &[
                "They come from the same source, yet act differently.",
                "Different shapes, one heart.",
                "One kind, many forms.",
            ],
            WisdomEvent::DamageTaken => &[
                "Strength must be guarded, not spent carelessly.",
                "What lies within must be protected.",
                "Limited access keeps harm away.",
            ],
            WisdomEvent::GemCollected => &[
                "This light is kept safe, like the strength within you.",
                "Guard what you hold, and it will hold true.",
                "Hide the complexity, keep the light.",
            ],
            WisdomEvent::PortalApproach => &[
                "You have gathered all there is to know.",
                "Three lights, three lessons.",
                "The journey is nearly mastered.",
            ],
            WisdomEvent::AttackUsed => &[
                "One call, many effects.",
                "The same gesture, a different answer.",
                "Every spirit answers in its own way.",
            ],
            WisdomEvent::LevelComplete => &[
                "Step by step, the pattern reveals itself.",
                "From guarding to becoming many.",
                "The road is the lesson.",
            ],
        }
    }
}

/// The spirit that trails the player.
///
/// Follows with per-frame exponential smoothing, shows short hints on a
/// cooldown and, once the mentor capability is unlocked, offers wisdom.
#[derive(Debug, Clone)]
pub struct Companion {
    pub pos: Vec2,
    size: f32,
    altar_anchor: Option<Vec2>,
    hint: Option<String>,
    hint_timer: Countdown,
    hint_cooldown: Countdown,
    glow: Countdown,
    mentor: bool,
    bob: f32,
}

impl Companion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: COMPANION_SIZE,
            altar_anchor: None,
            hint: None,
            hint_timer: Countdown::idle(),
            hint_cooldown: Countdown::idle(),
            glow: Countdown::idle(),
            mentor: false,
            bob: 0.0,
        }
    }

    /// Put the companion back at `pos` for a new level, keeping its mentor flag.
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.altar_anchor = None;
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    /// Move a fixed fraction toward the spot beside the player, or beside the
    /// altar during the ritual.
    pub fn follow(&mut self, player_pos: Vec2) {
        let target = match self.altar_anchor {
            Some(anchor) => anchor + Vec2::new(COMPANION_ALTAR_OFFSET_X, 0.0),
            None => player_pos + Vec2::new(COMPANION_OFFSET_X, 0.0),
        };
        self.pos += (target - self.pos) * COMPANION_FOLLOW_FACTOR;
    }

    pub fn set_altar_idle(&mut self, altar_center: Vec2) {
        self.altar_anchor = Some(altar_center);
    }

    pub fn is_idle_at_altar(&self) -> bool {
        self.altar_anchor.is_some()
    }

    // ── Hints ───────────────────────────────────────────────────────────────

    pub fn can_give_hint(&self) -> bool {
        !self.hint_cooldown.is_active()
    }

    /// Show `text` for a few seconds. Ignored while the cooldown runs.
    pub fn give_hint(&mut self, text: impl Into<String>) -> bool {
        if !self.can_give_hint() {
            return false;
        }
        self.hint = Some(text.into());
        self.hint_timer.start(HINT_SECS);
        self.hint_cooldown.start(HINT_COOLDOWN_SECS);
        self.glow.start(HINT_GLOW_SECS);
        true
    }

    /// Text currently on display, if any.
    pub fn hint(&self) -> Option<&str> {
        if self.hint_timer.is_active() { self.hint.as_deref() } else { None }
    }

    // ── Mentor ──────────────────────────────────────────────────────────────

    pub fn activate_mentor(&mut self) {
        if self.mentor {
            return;
        }
        self.mentor = true;
        self.size = MENTOR_SIZE;
        self.glow.start(MENTOR_GLOW_SECS);
    }

    pub fn is_mentor(&self) -> bool {
        self.mentor
    }

    /// Pick a line for `event` and show it. Needs the mentor capability;
    /// bypasses the hint cooldown. Returns the chosen line.
    pub fn give_wisdom<R: Rng + ?Sized>(&mut self, event: WisdomEvent, rng: &mut R) -> Option<&str> {
        if !self.mentor {
            return None;
        }
        let line = *event.lines().choose(rng)?;
        self.hint = Some(line.to_owned());
        self.hint_timer.start(WISDOM_SECS);
        self.hint.as_deref()
    }

    pub fn is_glowing(&self) -> bool {
        self.glow.is_active()
    }

    pub fn update(&mut self, dt: f32) {
        if self.hint_timer.tick(dt) {
            self.hint = None;
        }
        self.hint_cooldown.tick(dt);
        self.glow.tick(dt);
        self.bob += dt * 3.0;
    }

    pub fn bob(&self) -> f32 {
        self.bob.sin() * 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn hint_respects_cooldown() {
        let mut c = Companion::new(Vec2::ZERO);
        assert!(c.give_hint("first"));
        assert!(!c.give_hint("second"));
        assert_eq!(c.hint(), Some("first"));
        c.update(HINT_SECS + 0.01);
        assert_eq!(c.hint(), None);
        c.update(HINT_COOLDOWN_SECS);
        assert!(c.can_give_hint());
    }

    #[test]
    fn wisdom_needs_mentor() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut c = Companion::new(Vec2::ZERO);
        assert!(c.give_wisdom(WisdomEvent::GemCollected, &mut rng).is_none());
        c.activate_mentor();
        let line = c.give_wisdom(WisdomEvent::GemCollected, &mut rng).map(str::to_owned);
        assert!(line.is_some());
        assert_eq!(c.hint().map(str::to_owned), line);
    }

    #[test]
    fn follows_with_smoothing() {
        let mut c = Companion::new(Vec2::ZERO);
        c.follow(Vec2::new(140.0, 0.0));
        // target is 100 units away; one step covers 8% of it
        assert!((c.pos.x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn idles_beside_altar() {
        let mut c = Companion::new(Vec2::ZERO);
        c.set_altar_idle(Vec2::new(500.0, 500.0));
        for _ in 0..500 {
            c.follow(Vec2::ZERO);
        }
        assert!(c.pos.distance(Vec2::new(560.0, 500.0)) < 1.0);
    }
}
