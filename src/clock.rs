use std::time::Instant;

/// Converts wall-clock time between frames into a bounded delta in seconds.
///
/// One variable `dt` per frame: every update integrates `value * dt`, so no
/// sub-stepping is needed. The first frame reports the nominal step
/// (`1 / target_ups`) because there is no previous instant to measure from.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    nominal_dt: f32,
    max_dt: f32,
    tick: u64,
}

impl FrameClock {
    pub fn new(target_ups: u32, max_dt: f32) -> Self {
        Self {
            last: None,
            nominal_dt: 1.0 / target_ups.max(1) as f32,
            max_dt: max_dt.max(0.0),
            tick: 0,
        }
    }

    /// Measure the delta since the previous call using the system clock.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Measure the delta since the previous call, as of `now`.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            // `saturating_duration_since` keeps an out-of-order instant at zero.
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => self.nominal_dt,
        };
        self.last = Some(now);
        self.tick += 1;
        dt.min(self.max_dt)
    }

    /// Forget the previous instant, so the next frame reports the nominal step.
    /// Used after the window regains focus to avoid a long stall showing up as dt.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn frames(&self) -> u64 {
        self.tick
    }

    pub fn nominal_dt(&self) -> f32 {
        self.nominal_dt
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_frame_is_nominal() {
        let mut clock = FrameClock::new(60, 0.25);
        let dt = clock.tick_at(Instant::now());
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::new(60, 0.25);
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(dt, 0.25);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn measures_elapsed_time() {
        let mut clock = FrameClock::new(60, 0.25);
        let start = Instant::now();
        clock.tick_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(20));
        assert!((dt - 0.02).abs() < 1e-4);
    }
}
