//! Latency ranges used by the simulator

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Half-open millisecond range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRange {
    pub min: u64,
    pub max: u64,
}

impl LatencyRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &str) -> Result<(), DomainError> {
        if self.min >= self.max {
            return Err(DomainError::configuration(format!(
                "Latency range '{}' must satisfy min < max (got {}..{})",
                name, self.min, self.max
            )));
        }

        Ok(())
    }
}

/// Timing profile for simulated requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyProfile {
    /// Request overhead applied before the hit/miss branch
    #[serde(default = "default_dispatch")]
    pub dispatch_ms: LatencyRange,

    /// Reported latency of a cache hit
    #[serde(default = "default_hit")]
    pub hit_ms: LatencyRange,

    /// Latency a hit is credited with saving
    #[serde(default = "default_saved")]
    pub saved_ms: LatencyRange,

    /// Latency of a freshly generated response
    #[serde(default = "default_miss")]
    pub miss_ms: LatencyRange,

    /// Whether to actually sleep for the simulated durations
    #[serde(default = "default_apply_delays")]
    pub apply_delays: bool,

    /// Fixed seed for reproducible latencies and miss openings
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_dispatch() -> LatencyRange {
    LatencyRange::new(50, 150)
}

fn default_hit() -> LatencyRange {
    LatencyRange::new(10, 30)
}

fn default_saved() -> LatencyRange {
    LatencyRange::new(800, 1200)
}

fn default_miss() -> LatencyRange {
    LatencyRange::new(800, 1300)
}

fn default_apply_delays() -> bool {
    true
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            dispatch_ms: default_dispatch(),
            hit_ms: default_hit(),
            saved_ms: default_saved(),
            miss_ms: default_miss(),
            apply_delays: default_apply_delays(),
            seed: None,
        }
    }
}

impl LatencyProfile {
    /// Default ranges without real sleeping
    pub fn instant() -> Self {
        Self::default().with_apply_delays(false)
    }

    pub fn with_apply_delays(mut self, apply: bool) -> Self {
        self.apply_delays = apply;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_dispatch(mut self, range: LatencyRange) -> Self {
        self.dispatch_ms = range;
        self
    }

    pub fn with_hit(mut self, range: LatencyRange) -> Self {
        self.hit_ms = range;
        self
    }

    pub fn with_saved(mut self, range: LatencyRange) -> Self {
        self.saved_ms = range;
        self
    }

    pub fn with_miss(mut self, range: LatencyRange) -> Self {
        self.miss_ms = range;
        self
    }

    /// Check every range is non-empty and hits stay faster than misses
    pub fn validate(&self) -> Result<(), DomainError> {
        self.dispatch_ms.validate("dispatch")?;
        self.hit_ms.validate("hit")?;
        self.saved_ms.validate("saved")?;
        self.miss_ms.validate("miss")?;

        if self.hit_ms.max > self.miss_ms.min {
            return Err(DomainError::configuration(format!(
                "Hit latency ({}..{}) must stay below miss latency ({}..{})",
                self.hit_ms.min, self.hit_ms.max, self.miss_ms.min, self.miss_ms.max
            )));
        }

        Ok(())
    }

    pub(crate) fn delay(&self, ms: u64) -> Option<Duration> {
        self.apply_delays.then(|| Duration::from_millis(ms))
    }
}
