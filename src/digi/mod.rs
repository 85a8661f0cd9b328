//! Digi-Sample Status Smoothing
//!
//! The engine reports, per frame, whether digi samples (audio produced by
//! writing the SID output registers directly) were detected, at what rate
//! and by which technique. Frame-by-frame the detection toggles far too often
//! to display. [`DigiClassifier`] collects it over tumbling windows of
//! [`DIGI_WINDOW_FRAMES`] frames and emits one [`DigiStatus`] per window,
//! which at 50/60 Hz is roughly two updates per second.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Frames per smoothing window
pub const DIGI_WINDOW_FRAMES: u32 = 20;

/// Label the engine reports when no technique was identified
pub const LABEL_NONE: &str = "NONE";

/// Generic "sample written to $D418" label, superseded by any specific one
pub const LABEL_D418: &str = "D418";

/// Stabilized digi status for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigiStatus {
    /// Average sample rate over the window (0 when no digi output)
    pub rate: u32,
    /// Techniques seen in the window, `&`-joined
    pub label: String,
}

impl DigiStatus {
    /// True when the window contained digi output
    pub fn is_active(&self) -> bool {
        self.rate > 0
    }
}

/// Tumbling-window accumulator for per-frame digi telemetry
#[derive(Debug, Clone, Default)]
pub struct DigiClassifier {
    /// Labels reported in frames with digi output
    labels: BTreeSet<String>,
    /// Sum of reported rates
    rate_sum: f64,
    /// Frames with digi output
    batches: u32,
    /// Frames observed in the current window
    frames: u32,
}

impl DigiClassifier {
    /// Create an empty classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of telemetry
    ///
    /// Returns the window's status when this frame completes a window.
    pub fn observe(&mut self, rate: f64, label: &str) -> Option<DigiStatus> {
        if rate.is_finite() && rate > 0.0 {
            self.batches += 1;
            self.rate_sum += rate;
            self.labels.insert(label.to_string());
        }

        self.frames += 1;
        if self.frames < DIGI_WINDOW_FRAMES {
            return None;
        }

        let status = self.stabilized();
        self.reset();
        Some(status)
    }

    /// Drop the current window
    pub fn reset(&mut self) {
        self.labels.clear();
        self.rate_sum = 0.0;
        self.batches = 0;
        self.frames = 0;
    }

    /// Frames observed in the current window
    pub fn frames_in_window(&self) -> u32 {
        self.frames
    }

    /// Frames with digi output in the current window
    pub fn batches(&self) -> u32 {
        self.batches
    }

    fn stabilized(&self) -> DigiStatus {
        if self.batches == 0 {
            return DigiStatus::default();
        }

        let rate = (self.rate_sum / self.batches as f64).round() as u32;
        DigiStatus {
            rate,
            label: stabilized_label(&self.labels),
        }
    }
}

/// Join the meaningful labels of a window
///
/// "D418" only survives when it is the sole technique in the window: the
/// generic output-register detection overlaps with the specific ones.
fn stabilized_label(labels: &BTreeSet<String>) -> String {
    let qualifying: Vec<&str> = labels
        .iter()
        .map(String::as_str)
        .filter(|label| !label.is_empty() && *label != LABEL_NONE)
        .collect();

    let keep_d418 = qualifying.len() == 1;
    qualifying
        .into_iter()
        .filter(|label| keep_d418 || *label != LABEL_D418)
        .collect::<Vec<_>>()
        .join("&")
}
