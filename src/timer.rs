// Fixed-period timer polled from the frame loop

use std::time::{Duration, Instant};

/// Shortest period accepted; keeps `poll` from dividing by zero
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating deadline, the polled equivalent of an interval callback
///
/// Nothing fires on its own: the owner calls `poll(now)` every frame and
/// runs its periodic work once per returned tick.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    /// First tick is due one full period after `now`
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of ticks that came due since the last poll
    ///
    /// A frame loop that stalls for several periods gets all of them at
    /// once, so tick counts stay tied to wall time.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_due {
            return 0;
        }

        let overdue = now.duration_since(self.next_due);
        let extra = overdue.as_nanos() / self.period.as_nanos();
        let ticks = u32::try_from(extra.saturating_add(1)).unwrap_or(u32::MAX);

        self.next_due += self.period * ticks;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_period() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(Duration::from_millis(900), t0);
        assert_eq!(timer.poll(t0), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(899)), 0);
    }

    #[test]
    fn test_ticks_once_per_period() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(Duration::from_millis(900), t0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(900)), 1);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1000)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(1800)), 1);
    }

    #[test]
    fn test_catches_up_after_stall() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(Duration::from_millis(100), t0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(350)), 3);
        assert_eq!(timer.poll(t0 + Duration::from_millis(399)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(400)), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(Duration::ZERO, t0);
        assert_eq!(timer.poll(t0 + MIN_PERIOD), 1);
    }
}
