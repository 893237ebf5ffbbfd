// Blink animation
//
// A blink squeezes both eyes from full height down to a sliver and back,
// eased in and out, keeping each eye's vertical center fixed. Between
// blinks the animator waits a random delay, then blinks again, forever.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::app::config::{
    BLINK_CLOSE_MS, BLINK_DELAY_MIN_MS, BLINK_DELAY_SPAN_MS, BLINK_OPEN_MS, CLOSED_EYE_HEIGHT,
};

const CLOSE: Duration = Duration::from_millis(BLINK_CLOSE_MS);
const OPEN: Duration = Duration::from_millis(BLINK_OPEN_MS);

/// Cubic ease-in-out over normalized progress `t` in `[0, 1]`
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Eye height `elapsed` into a blink
///
/// Closing runs `full_height -> 1` over the close duration, opening runs
/// `1 -> full_height` over the open duration. Past the end the eye is open.
pub fn blink_height(elapsed: Duration, full_height: f64) -> f64 {
    if elapsed < CLOSE {
        let t = elapsed.as_secs_f64() / CLOSE.as_secs_f64();
        full_height + (CLOSED_EYE_HEIGHT - full_height) * ease_in_out_cubic(t)
    } else {
        let t = ((elapsed - CLOSE).as_secs_f64() / OPEN.as_secs_f64()).min(1.0);
        CLOSED_EYE_HEIGHT + (full_height - CLOSED_EYE_HEIGHT) * ease_in_out_cubic(t)
    }
}

/// Length of one full blink
pub fn blink_duration() -> Duration {
    CLOSE + OPEN
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlinkPhase {
    /// Eyes open until the next scheduled blink
    Waiting { until: Instant },
    /// Blink in progress since `started`
    Blinking { started: Instant },
}

/// Frame-driven blink loop for one widget
#[derive(Debug)]
pub struct BlinkAnimator {
    full_height: f64,
    height: f64,
    phase: BlinkPhase,
    rng: StdRng,
}

impl BlinkAnimator {
    /// Eyes start open with the first blink already scheduled
    pub fn new(full_height: f64, rng: StdRng, now: Instant) -> Self {
        let mut animator = Self {
            full_height,
            height: full_height,
            phase: BlinkPhase::Waiting { until: now },
            rng,
        };
        animator.schedule_next(now);
        animator
    }

    /// Current eye height
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Vertical shift that keeps the eye centered while it shrinks
    pub fn y_offset(&self) -> f64 {
        (self.full_height - self.height) / 2.0
    }

    pub fn is_blinking(&self) -> bool {
        matches!(self.phase, BlinkPhase::Blinking { .. })
    }

    /// When the next blink starts, if the eyes are currently open
    #[allow(dead_code)]
    pub fn next_blink_at(&self) -> Option<Instant> {
        match self.phase {
            BlinkPhase::Waiting { until } => Some(until),
            BlinkPhase::Blinking { .. } => None,
        }
    }

    /// Start a blink right away. Ignored while one is running.
    pub fn blink_now(&mut self, now: Instant) {
        if !self.is_blinking() {
            self.phase = BlinkPhase::Blinking { started: now };
        }
    }

    /// Advance to `now` and return the eye height for this frame
    pub fn advance(&mut self, now: Instant) -> f64 {
        if let BlinkPhase::Waiting { until } = self.phase {
            if now >= until {
                self.phase = BlinkPhase::Blinking { started: now };
            }
        }

        match self.phase {
            BlinkPhase::Waiting { .. } => self.height = self.full_height,
            BlinkPhase::Blinking { started } => {
                let elapsed = now.saturating_duration_since(started);
                self.height = blink_height(elapsed, self.full_height);
                if elapsed >= blink_duration() {
                    self.schedule_next(now);
                }
            }
        }

        self.height
    }

    fn schedule_next(&mut self, now: Instant) {
        let jitter_ms = self.rng.gen_range(0.0..BLINK_DELAY_SPAN_MS as f64);
        let delay = Duration::from_millis(BLINK_DELAY_MIN_MS)
            + Duration::from_secs_f64(jitter_ms / 1000.0);
        trace!(delay_ms = delay.as_millis() as u64, "Next blink scheduled");
        self.phase = BlinkPhase::Waiting { until: now + delay };
    }
}
