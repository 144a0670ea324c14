//! Injectable random source

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
use mockall::automock;

/// Source of uniformly distributed integers
#[cfg_attr(test, automock)]
pub trait RandomSource: Send + Sync {
    /// Draw a value in `[low, high)`. Returns `low` when the range is empty.
    fn next_in_range(&self, low: u64, high: u64) -> u64;
}

/// Random source backed by the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_in_range(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }

        rand::thread_rng().gen_range(low..high)
    }
}

/// Reproducible random source seeded from a fixed value
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_in_range(&self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_source_stays_in_range() {
        let source = ThreadRandomSource;

        for _ in 0..1000 {
            let value = source.next_in_range(10, 30);
            assert!((10..30).contains(&value));
        }
    }

    #[test]
    fn test_empty_range_returns_low() {
        assert_eq!(ThreadRandomSource.next_in_range(5, 5), 5);
        assert_eq!(SeededRandomSource::new(1).next_in_range(9, 3), 9);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);

        let first: Vec<u64> = (0..20).map(|_| a.next_in_range(800, 1300)).collect();
        let second: Vec<u64> = (0..20).map(|_| b.next_in_range(800, 1300)).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|v| (800..1300).contains(v)));
    }
}
