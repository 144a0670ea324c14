//! Similarity threshold with clamping

use serde::{Deserialize, Serialize};

/// Minimum similarity a match needs to count as a hit
///
/// Always within `[0.0, 1.0]`. Out-of-range input is clamped to the
/// nearest bound and NaN becomes `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MAX);
        }

        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Narrow into a caller range such as the UI slider bounds
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        let (min, max) = (Self::new(min).0, Self::new(max).0);

        if min > max {
            return self;
        }

        Self(self.0.clamp(min, max))
    }

    /// Inclusive comparison: a score equal to the threshold is a hit
    pub fn is_met_by(&self, score: f64) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.70)
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}
