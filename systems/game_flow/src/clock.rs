use std::time::Duration;

use artifact_maze_core::TICKS_PER_SECOND;

/// Most ticks a single frame may trigger before the backlog is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Converts variable frame times into a whole number of fixed ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl FixedStep {
    /// Creates a clock ticking every `step`, capped per frame.
    #[must_use]
    pub const fn new(step: Duration, max_ticks_per_frame: u32) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_ticks_per_frame,
        }
    }

    /// Duration of a single tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Accumulates `frame` and returns how many ticks are now due.
    ///
    /// Time left over after hitting the per-frame cap is discarded so a
    /// stalled frame does not replay seconds of simulation at once.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(frame);
        let mut due = 0;
        while self.accumulator >= self.step {
            if due == self.max_ticks_per_frame {
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(Duration::from_secs(1) / TICKS_PER_SECOND, MAX_CATCH_UP_TICKS)
    }
}
