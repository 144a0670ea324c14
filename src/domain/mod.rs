//! Domain layer - semantic cache core and session statistics

pub mod embedding;
pub mod error;
pub mod latency;
pub mod semantic_cache;
pub mod session;

pub use embedding::{cosine_similarity, Embedder, Embedding, KeywordEmbedder};
pub use error::DomainError;
pub use latency::{LatencyProfile, LatencySimulator};
pub use semantic_cache::{CacheEntry, CacheLookupEngine, CacheStore, LookupResult, Threshold};
pub use session::{QueryOutcome, SessionId, SessionStats, SessionStatsRepository};
