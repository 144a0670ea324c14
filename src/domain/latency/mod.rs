//! Latency simulation for the hit and miss paths

mod profile;
mod random;
mod simulator;

pub use profile::{LatencyProfile, LatencyRange};
pub use random::{RandomSource, SeededRandomSource, ThreadRandomSource};
pub use simulator::{HitTiming, LatencySimulator};

#[cfg(test)]
pub use random::MockRandomSource;
