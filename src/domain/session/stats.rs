//! Rolling session statistics

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::semantic_cache::{LookupResult, Threshold};

/// Maximum number of recent hits kept, most recent first
pub const RECENT_HITS_CAPACITY: usize = 10;

/// Number of most recent miss latencies kept for the median
pub const MISS_LATENCY_WINDOW: usize = 100;

/// Characters of query text kept in a recent hit
pub const RECENT_HIT_QUERY_CHARS: usize = 50;

/// Upper bound on any single latency accepted from outside the simulator
pub const MAX_LATENCY_MS: u64 = 600_000;

const ELLIPSIS: &str = "...";

/// A completed query-response cycle fed into the statistics
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub query: String,
    /// Threshold in effect when the query was issued
    pub threshold: Threshold,
    pub timestamp: DateTime<Utc>,
    pub result: LookupResult,
}

impl QueryOutcome {
    /// Create an outcome stamped with the current time
    pub fn new(query: impl Into<String>, threshold: Threshold, result: LookupResult) -> Self {
        Self {
            query: query.into(),
            threshold,
            timestamp: Utc::now(),
            result,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A cache hit as remembered by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentHit {
    /// Query text, truncated to 50 characters plus an ellipsis
    pub query: String,
    pub threshold: f64,
    pub score: f64,
    pub saved_latency_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl RecentHit {
    fn from_outcome(outcome: &QueryOutcome) -> Self {
        Self {
            query: truncate_query(&outcome.query),
            threshold: outcome.threshold.value(),
            score: outcome.result.score,
            saved_latency_ms: outcome.result.saved_latency_ms.unwrap_or(0),
            timestamp: outcome.timestamp,
        }
    }
}

fn truncate_query(query: &str) -> String {
    match query.char_indices().nth(RECENT_HIT_QUERY_CHARS) {
        Some((cut, _)) => format!("{}{}", &query[..cut], ELLIPSIS),
        None => query.to_string(),
    }
}

/// Counters and bounded history for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub(super) total_queries: u64,
    pub(super) total_hits: u64,
    pub(super) total_saved_latency_ms: u64,
    pub(super) recent_hits: VecDeque<RecentHit>,
    pub(super) miss_latencies: VecDeque<u64>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed query into the statistics
    pub fn record(&mut self, outcome: &QueryOutcome) {
        self.total_queries = self.total_queries.saturating_add(1);

        if outcome.result.hit {
            self.total_hits = self.total_hits.saturating_add(1);
            self.total_saved_latency_ms = self
                .total_saved_latency_ms
                .saturating_add(outcome.result.saved_latency_ms.unwrap_or(0));

            self.recent_hits.push_front(RecentHit::from_outcome(outcome));
            self.recent_hits.truncate(RECENT_HITS_CAPACITY);
        } else {
            self.miss_latencies.push_back(outcome.result.latency_ms);

            while self.miss_latencies.len() > MISS_LATENCY_WINDOW {
                self.miss_latencies.pop_front();
            }
        }
    }

    /// Return to the empty initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    pub fn total_saved_latency_ms(&self) -> u64 {
        self.total_saved_latency_ms
    }

    /// Recent hits, most recent first
    pub fn recent_hits(&self) -> impl ExactSizeIterator<Item = &RecentHit> {
        self.recent_hits.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.total_queries == 0
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total_queries == 0 {
            return 0.0;
        }

        self.total_hits as f64 / self.total_queries as f64
    }

    pub fn avg_saved_latency_ms(&self) -> f64 {
        if self.total_hits == 0 {
            return 0.0;
        }

        self.total_saved_latency_ms as f64 / self.total_hits as f64
    }

    /// Median over the recent miss window, 0 when no misses were recorded
    pub fn miss_median_latency_ms(&self) -> f64 {
        let mut latencies: Vec<u64> = self.miss_latencies.iter().copied().collect();

        if latencies.is_empty() {
            return 0.0;
        }

        latencies.sort_unstable();
        let mid = latencies.len() / 2;

        if latencies.len() % 2 == 0 {
            (latencies[mid - 1] as f64 + latencies[mid] as f64) / 2.0
        } else {
            latencies[mid] as f64
        }
    }
}
