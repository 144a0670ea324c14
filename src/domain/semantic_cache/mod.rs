//! Semantic cache domain models
//!
//! Matches queries against a fixed set of precomputed answers by
//! embedding similarity rather than exact text.

mod engine;
mod entry;
mod lookup;
mod placeholder;
mod store;
mod threshold;

pub use engine::{CacheDecision, CacheLookupEngine};
pub use entry::CacheEntry;
pub use lookup::{LookupResult, ResponseSource};
pub use placeholder::{generate_placeholder, MISS_OPENINGS, MISS_SUFFIX};
pub use store::CacheStore;
pub use threshold::Threshold;
