//! Versioned serializable form of session statistics

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

use super::{RecentHit, SessionStats, MAX_LATENCY_MS, MISS_LATENCY_WINDOW, RECENT_HITS_CAPACITY};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Point-in-time copy of a session's statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatsSnapshot {
    pub schema_version: u32,
    pub total_queries: u64,
    pub total_hits: u64,
    pub total_saved_latency_ms: u64,
    pub recent_hits: Vec<RecentHit>,
    #[serde(default)]
    pub miss_latencies: Vec<u64>,
}

impl SessionStats {
    pub fn snapshot(&self) -> SessionStatsSnapshot {
        SessionStatsSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            total_queries: self.total_queries,
            total_hits: self.total_hits,
            total_saved_latency_ms: self.total_saved_latency_ms,
            recent_hits: self.recent_hits.iter().cloned().collect(),
            miss_latencies: self.miss_latencies.iter().copied().collect(),
        }
    }

    /// Rebuild statistics from a snapshot, rejecting inconsistent data
    pub fn restore(snapshot: SessionStatsSnapshot) -> Result<Self, DomainError> {
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(DomainError::validation(format!(
                "Unsupported snapshot schema version {} (expected {})",
                snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }

        if snapshot.total_hits > snapshot.total_queries {
            return Err(DomainError::validation(format!(
                "Snapshot has more hits ({}) than queries ({})",
                snapshot.total_hits, snapshot.total_queries
            )));
        }

        if snapshot.recent_hits.len() > RECENT_HITS_CAPACITY
            || snapshot.recent_hits.len() as u64 > snapshot.total_hits
        {
            return Err(DomainError::validation(format!(
                "Snapshot has {} recent hits (max {}, total hits {})",
                snapshot.recent_hits.len(),
                RECENT_HITS_CAPACITY,
                snapshot.total_hits
            )));
        }

        if let Some(latency) = snapshot
            .miss_latencies
            .iter()
            .chain(snapshot.recent_hits.iter().map(|h| &h.saved_latency_ms))
            .find(|latency| **latency > MAX_LATENCY_MS)
        {
            return Err(DomainError::validation(format!(
                "Snapshot latency {} ms exceeds the {} ms limit",
                latency, MAX_LATENCY_MS
            )));
        }

        if snapshot.total_saved_latency_ms > snapshot.total_hits.saturating_mul(MAX_LATENCY_MS) {
            return Err(DomainError::validation(format!(
                "Snapshot saved latency {} ms is out of range for {} hits",
                snapshot.total_saved_latency_ms, snapshot.total_hits
            )));
        }

        let mut miss_latencies = snapshot.miss_latencies;
        if miss_latencies.len() > MISS_LATENCY_WINDOW {
            miss_latencies.drain(..miss_latencies.len() - MISS_LATENCY_WINDOW);
        }

        Ok(Self {
            total_queries: snapshot.total_queries,
            total_hits: snapshot.total_hits,
            total_saved_latency_ms: snapshot.total_saved_latency_ms,
            recent_hits: snapshot.recent_hits.into(),
            miss_latencies: miss_latencies.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::semantic_cache::{LookupResult, Threshold};
    use crate::domain::session::QueryOutcome;

    fn populated() -> SessionStats {
        let mut stats = SessionStats::new();
        let threshold = Threshold::new(0.7);

        stats.record(&QueryOutcome::new(
            "semantic cache",
            threshold,
            LookupResult::hit(0.93, "R", "semantic cache", 12, 900),
        ));
        stats.record(&QueryOutcome::new(
            "gardening",
            threshold,
            LookupResult::miss(0.41, "G", 1100),
        ));

        stats
    }

    #[test]
    fn test_snapshot_restores_equal_stats() {
        let stats = populated();

        let json = serde_json::to_string(&stats.snapshot()).unwrap();
        let snapshot: SessionStatsSnapshot = serde_json::from_str(&json).unwrap();
        let restored = SessionStats::restore(snapshot).unwrap();

        assert_eq!(restored, stats);
        assert_eq!(restored.hit_rate(), 0.5);
        assert_eq!(restored.miss_median_latency_ms(), 1100.0);
    }

    #[test]
    fn test_snapshot_uses_camel_case_and_version() {
        let json = serde_json::to_value(populated().snapshot()).unwrap();

        assert_eq!(json["schemaVersion"], 1);
        assert_eq!(json["totalQueries"], 2);
        assert_eq!(json["totalSavedLatencyMs"], 900);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut snapshot = populated().snapshot();
        snapshot.schema_version = 2;

        let err = SessionStats::restore(snapshot).unwrap_err();

        assert!(err.to_string().contains("schema version 2"));
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        let mut snapshot = populated().snapshot();
        snapshot.total_hits = 5;

        assert!(SessionStats::restore(snapshot).is_err());
    }

    #[test]
    fn test_out_of_range_latencies_rejected() {
        let mut snapshot = populated().snapshot();
        snapshot.miss_latencies = vec![u64::MAX, u64::MAX];

        let err = SessionStats::restore(snapshot).unwrap_err();
        assert!(err.to_string().contains("exceeds"));

        let mut snapshot = populated().snapshot();
        snapshot.total_saved_latency_ms = u64::MAX;

        assert!(matches!(
            SessionStats::restore(snapshot),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn test_restored_max_query_count_keeps_recording() {
        let mut snapshot = populated().snapshot();
        snapshot.total_queries = u64::MAX;

        let mut stats = SessionStats::restore(snapshot).unwrap();
        stats.record(&QueryOutcome::new(
            "gardening",
            Threshold::new(0.7),
            LookupResult::miss(0.41, "G", 1000),
        ));

        assert_eq!(stats.total_queries(), u64::MAX);
    }

    #[test]
    fn test_missing_miss_latencies_default_to_empty() {
        let json = r#"{
            "schemaVersion": 1,
            "totalQueries": 3,
            "totalHits": 0,
            "totalSavedLatencyMs": 0,
            "recentHits": []
        }"#;

        let snapshot: SessionStatsSnapshot = serde_json::from_str(json).unwrap();
        let stats = SessionStats::restore(snapshot).unwrap();

        assert_eq!(stats.total_queries(), 3);
        assert_eq!(stats.miss_median_latency_ms(), 0.0);
    }
}
