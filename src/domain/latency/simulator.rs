//! Synthetic timings for the hit and miss paths

use std::fmt;
use std::sync::Arc;

use super::{LatencyProfile, LatencyRange, RandomSource, SeededRandomSource, ThreadRandomSource};

/// Timing reported for a cache hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTiming {
    pub latency_ms: u64,
    pub saved_latency_ms: u64,
}

/// Produces simulated latencies from a profile and a random source
#[derive(Clone)]
pub struct LatencySimulator {
    profile: LatencyProfile,
    random: Arc<dyn RandomSource>,
}

impl fmt::Debug for LatencySimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatencySimulator")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::new(LatencyProfile::default())
    }
}

impl LatencySimulator {
    /// Create a simulator seeded from the profile, or drawing from the
    /// thread-local generator when no seed is configured
    pub fn new(profile: LatencyProfile) -> Self {
        let random: Arc<dyn RandomSource> = match profile.seed {
            Some(seed) => Arc::new(SeededRandomSource::new(seed)),
            None => Arc::new(ThreadRandomSource),
        };

        Self::with_random(profile, random)
    }

    /// Create a simulator with an explicit random source
    pub fn with_random(profile: LatencyProfile, random: Arc<dyn RandomSource>) -> Self {
        Self { profile, random }
    }

    pub fn profile(&self) -> &LatencyProfile {
        &self.profile
    }

    fn sample(&self, range: LatencyRange) -> u64 {
        self.random.next_in_range(range.min, range.max)
    }

    /// Request overhead common to both paths
    pub fn dispatch_delay(&self) -> u64 {
        self.sample(self.profile.dispatch_ms)
    }

    pub fn simulate_hit(&self) -> HitTiming {
        HitTiming {
            latency_ms: self.sample(self.profile.hit_ms),
            saved_latency_ms: self.sample(self.profile.saved_ms),
        }
    }

    pub fn simulate_miss(&self) -> u64 {
        self.sample(self.profile.miss_ms)
    }

    /// Pick an index in `[0, len)`
    pub fn pick(&self, len: usize) -> usize {
        self.random.next_in_range(0, len as u64) as usize
    }

    /// Suspend for `ms` milliseconds when the profile applies delays
    pub async fn pause(&self, ms: u64) {
        if let Some(delay) = self.profile.delay(ms) {
            tokio::time::sleep(delay).await;
        }
    }
}
