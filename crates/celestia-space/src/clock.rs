//! Simulated time.

/// Accumulates real time scaled by a speed multiplier.
///
/// Every orbit angle is computed from [`SimClock::elapsed`], so changing the
/// speed mid-run never makes bodies jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimClock {
    elapsed: f64,
    speed_multiplier: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            speed_multiplier: 1.0,
        }
    }
}

impl SimClock {
    pub fn new(speed_multiplier: f64) -> Self {
        Self {
            elapsed: 0.0,
            speed_multiplier,
        }
    }

    /// Add `delta` real seconds; returns the new simulated time.
    ///
    /// Non-finite deltas are ignored.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let step = delta * self.speed_multiplier;
        if step.is_finite() {
            self.elapsed += step;
        }
        self.elapsed
    }

    /// Simulated seconds since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, speed: f64) {
        self.speed_multiplier = speed;
    }

    /// Jump to an absolute simulated time.
    pub fn set_elapsed(&mut self, elapsed: f64) {
        self.elapsed = elapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_by_speed() {
        let mut clock = SimClock::new(10.0);
        clock.advance(0.5);
        assert_eq!(clock.elapsed(), 5.0);
        clock.set_speed_multiplier(0.0);
        clock.advance(100.0);
        assert_eq!(clock.elapsed(), 5.0, "paused clock must not move");
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut clock = SimClock::default();
        clock.advance(1.0);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn test_speed_change_keeps_time_continuous() {
        let mut clock = SimClock::default();
        clock.advance(3.0);
        let before = clock.elapsed();
        clock.set_speed_multiplier(100.0);
        assert_eq!(clock.elapsed(), before);
        clock.advance(0.01);
        assert!((clock.elapsed() - 4.0).abs() < 1e-12);
    }
}
