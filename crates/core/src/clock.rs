//! Fixed-step scheduling for frame-driven hosts.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks_to_run: u32,
    pub dropped_backlog: Duration,
}

/// Converts variable frame times into whole simulation ticks.
#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    step: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl FixedStepScheduler {
    pub fn new(step_ms: u32) -> Self {
        Self {
            step: Duration::from_millis(u64::from(step_ms.max(1))),
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            accumulator: Duration::ZERO,
        }
    }

    pub fn with_max_ticks_per_frame(mut self, max_ticks: u32) -> Self {
        self.max_ticks_per_frame = max_ticks.max(1);
        self
    }

    pub fn step_ms(&self) -> u32 {
        self.step.as_millis() as u32
    }

    /// Adds one frame's elapsed time and returns how many ticks to run. Backlog beyond the
    /// per-frame cap is dropped.
    pub fn plan(&mut self, frame_dt: Duration) -> StepPlan {
        self.accumulator = self.accumulator.saturating_add(frame_dt.min(self.max_frame_delta));

        let mut ticks_to_run = 0_u32;
        while self.accumulator >= self.step && ticks_to_run < self.max_ticks_per_frame {
            self.accumulator = self.accumulator.saturating_sub(self.step);
            ticks_to_run += 1;
        }

        let dropped_backlog = if self.accumulator >= self.step {
            let dropped = self.accumulator;
            self.accumulator = Duration::ZERO;
            dropped
        } else {
            Duration::ZERO
        };
        StepPlan { ticks_to_run, dropped_backlog }
    }
}
