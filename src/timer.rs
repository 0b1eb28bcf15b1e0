/// A countdown in seconds that never goes below zero.
///
/// `tick` reports the expiry edge exactly once; after that the timer stays at
/// zero until something restarts it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub const fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    pub fn running(secs: f32) -> Self {
        Self { remaining: secs.max(0.0) }
    }

    pub fn start(&mut self, secs: f32) {
        self.remaining = secs.max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Advance by `dt`. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining == 0.0
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Fraction of `total` still remaining, in `[0, 1]`.
    pub fn fraction_of(&self, total: f32) -> f32 {
        if total <= 0.0 {
            0.0
        } else {
            (self.remaining / total).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_once() {
        let mut t = Countdown::running(0.5);
        assert!(!t.tick(0.3));
        assert!(t.tick(0.3));
        assert_eq!(t.remaining(), 0.0);
        assert!(!t.tick(0.3));
        assert!(!t.is_active());
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut t = Countdown::running(1.0);
        t.tick(-5.0);
        assert_eq!(t.remaining(), 1.0);
    }

    #[test]
    fn fraction() {
        let t = Countdown::running(0.25);
        assert!((t.fraction_of(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(t.fraction_of(0.0), 0.0);
    }
}
