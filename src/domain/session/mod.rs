//! Session statistics domain models
//!
//! Rolling counters and recent-hit history scoped to one chat session.

mod id;
mod repository;
mod snapshot;
mod stats;

pub use id::SessionId;
pub use repository::SessionStatsRepository;
pub use snapshot::{SessionStatsSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use stats::{
    QueryOutcome, RecentHit, SessionStats, MAX_LATENCY_MS, MISS_LATENCY_WINDOW, RECENT_HITS_CAPACITY,
    RECENT_HIT_QUERY_CHARS,
};

#[cfg(test)]
pub use repository::MockSessionStatsRepository;
