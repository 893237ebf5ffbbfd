// Color cycling
//
// Every cycle interval the widget moves on to the next accent color of the
// active palette. Idle widgets keep their color, and so does a palette with
// no accent colors.

use std::time::{Duration, Instant};

use super::Mode;
use crate::theme::HexColor;
use crate::timer::IntervalTimer;

#[derive(Debug, Clone)]
pub struct ColorCycler {
    /// Cursor into the active cycle colors. Survives mode and theme changes.
    index: usize,
    timer: IntervalTimer,
}

impl ColorCycler {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            index: 0,
            timer: IntervalTimer::new(period, now),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// One cycler tick. Returns the color to show, if it changes.
    ///
    /// The index wraps with the length of the list it is applied to, so an
    /// index carried over from a longer palette lands back in range.
    pub fn step(&mut self, mode: Mode, colors: &[HexColor]) -> Option<HexColor> {
        if mode == Mode::Idle || colors.is_empty() {
            return None;
        }

        self.index = (self.index + 1) % colors.len();
        Some(colors[self.index])
    }

    /// Run every tick due at `now`; returns the last color emitted
    pub fn poll(&mut self, now: Instant, mode: Mode, colors: &[HexColor]) -> Option<HexColor> {
        let ticks = self.timer.poll(now);
        (0..ticks).fold(None, |last, _| self.step(mode, colors).or(last))
    }
}
