use crate::error::SimError;

pub const DEFAULT_TICK_HZ: f64 = 30.0;

// Upper bound on firings delivered by a single `advance` call.
const MAX_CATCH_UP_FIRINGS: u32 = 4;

/// Fixed-rate repeating timer driven by elapsed frame time.
///
/// Nothing fires while the timer is cancelled, and `start` discards any time
/// accumulated before the restart, so a cancelled firing can never arrive late.
#[derive(Clone, Debug)]
pub struct PeriodicTimer {
    period_s: f64,
    accumulated_s: f64,
    armed: bool,
}

impl PeriodicTimer {
    pub fn new(rate_hz: f64) -> Result<Self, SimError> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(SimError::InvalidTickRate(rate_hz));
        }
        Ok(Self {
            period_s: 1.0 / rate_hz,
            accumulated_s: 0.0,
            armed: false,
        })
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn start(&mut self) {
        self.accumulated_s = 0.0;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.accumulated_s = 0.0;
        self.armed = false;
    }

    /// Feeds `dt_s` of wall time and returns how many firings are due.
    pub fn advance(&mut self, dt_s: f64) -> u32 {
        if !self.armed || !dt_s.is_finite() || dt_s <= 0.0 {
            return 0;
        }

        self.accumulated_s += dt_s;
        let due = (self.accumulated_s / self.period_s).floor();
        self.accumulated_s -= due * self.period_s;

        if due > f64::from(MAX_CATCH_UP_FIRINGS) {
            self.accumulated_s = 0.0;
            return MAX_CATCH_UP_FIRINGS;
        }
        due as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_rates() {
        assert!(PeriodicTimer::new(0.0).is_err());
        assert!(PeriodicTimer::new(-30.0).is_err());
        assert!(PeriodicTimer::new(f64::NAN).is_err());
    }

    #[test]
    fn idle_until_started() {
        let mut timer = PeriodicTimer::new(30.0).expect("valid rate");
        assert!(!timer.is_armed());
        assert_eq!(timer.advance(1.0), 0);
    }

    #[test]
    fn fires_at_the_nominal_rate() {
        let mut timer = PeriodicTimer::new(10.0).expect("valid rate");
        timer.start();

        assert_eq!(timer.advance(0.05), 0);
        assert_eq!(timer.advance(0.06), 1);
        assert_eq!(timer.advance(0.2), 2);
    }

    #[test]
    fn caps_catch_up_after_a_stall() {
        let mut timer = PeriodicTimer::new(30.0).expect("valid rate");
        timer.start();

        assert_eq!(timer.advance(5.0), MAX_CATCH_UP_FIRINGS);
        assert_eq!(timer.advance(0.001), 0);
    }

    #[test]
    fn cancel_drops_pending_time() {
        let mut timer = PeriodicTimer::new(10.0).expect("valid rate");
        timer.start();
        assert_eq!(timer.advance(0.09), 0);

        timer.cancel();
        assert_eq!(timer.advance(0.5), 0);

        timer.start();
        assert_eq!(timer.advance(0.02), 0);
    }
}
