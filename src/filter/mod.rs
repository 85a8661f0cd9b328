//! 6581 Filter Curve
//!
//! The 6581's filter cutoff curve varies a lot between physical chips, so
//! the engine exposes the parameters of its curve model. The adapter passes
//! them through unchanged.

use serde::{Deserialize, Serialize};

/// Entries in a cutoff lookup table
pub const CUTOFF_TABLE_LEN: usize = 1024;

/// Parameters of the 6581 filter cutoff curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig6581 {
    /// Cutoff at register value 0
    pub base: f64,
    /// Maximum cutoff
    pub max: f64,
    /// Steepness of the curve
    pub steepness: f64,
    /// Horizontal offset of the curve
    pub x_offset: f64,
    /// Distortion amount
    pub distort: f64,
    /// Distortion offset
    pub distort_offset: f64,
    /// Distortion scale
    pub distort_scale: f64,
    /// Level above which distortion applies
    pub distort_threshold: f64,
    /// Kink of the curve
    pub kink: f64,
}

impl FilterConfig6581 {
    /// Parameters in engine call order
    pub fn to_array(&self) -> [f64; 9] {
        [
            self.base,
            self.max,
            self.steepness,
            self.x_offset,
            self.distort,
            self.distort_offset,
            self.distort_scale,
            self.distort_threshold,
            self.kink,
        ]
    }

    /// Build from parameters in engine call order
    pub fn from_array(values: [f64; 9]) -> Self {
        let [base, max, steepness, x_offset, distort, distort_offset, distort_scale, distort_threshold, kink] =
            values;
        FilterConfig6581 {
            base,
            max,
            steepness,
            x_offset,
            distort,
            distort_offset,
            distort_scale,
            distort_threshold,
            kink,
        }
    }
}
