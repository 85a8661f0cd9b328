//! Frame Latency Diagnostics
//!
//! Tracks how long the engine takes to compute a frame. Values are averaged
//! over windows of [`TIMING_WINDOW`] frames and the window averages are
//! averaged again into a long-run figure. Purely informational.

use std::time::Duration;

/// Frames per averaging window
pub const TIMING_WINDOW: u32 = 100;

/// Two-level frame latency average
#[derive(Debug, Clone, Default)]
pub struct FrameTiming {
    window_sum_ms: f64,
    window_runs: u32,
    window_avg_ms: Option<f64>,
    long_sum_ms: f64,
    long_runs: u32,
}

impl FrameTiming {
    /// Create empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latency of one frame
    pub fn record(&mut self, elapsed: Duration) {
        self.window_sum_ms += elapsed.as_secs_f64() * 1000.0;
        self.window_runs += 1;

        if self.window_runs == TIMING_WINDOW {
            let avg = self.window_sum_ms / self.window_runs as f64;
            self.window_avg_ms = Some(avg);
            self.window_sum_ms = 0.0;
            self.window_runs = 0;

            self.long_sum_ms += avg;
            self.long_runs += 1;
        }
    }

    /// Average of the last completed window in milliseconds
    pub fn window_average_ms(&self) -> Option<f64> {
        self.window_avg_ms
    }

    /// Average of all completed windows in milliseconds
    pub fn long_run_average_ms(&self) -> Option<f64> {
        if self.long_runs == 0 {
            None
        } else {
            Some(self.long_sum_ms / self.long_runs as f64)
        }
    }

    /// Completed windows so far
    pub fn windows(&self) -> u32 {
        self.long_runs
    }

    /// Forget all measurements
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
