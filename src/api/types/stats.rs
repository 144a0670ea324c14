//! Session statistics bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::session::{RecentHit, SessionStats};

/// `?sessionId=` selector shared by the stats endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub avg_saved_latency: f64,
    pub hit_rate: f64,
    pub total_queries: u64,
    pub total_hits: u64,
    pub miss_median_latency: f64,
    pub recent_hits: Vec<RecentHitResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentHitResponse {
    pub query: String,
    pub threshold: f64,
    pub score: f64,
    pub saved_latency: u64,
    /// Unix seconds
    pub timestamp: f64,
}

fn unix_seconds(timestamp: DateTime<Utc>) -> f64 {
    timestamp.timestamp_millis() as f64 / 1000.0
}

impl From<&RecentHit> for RecentHitResponse {
    fn from(hit: &RecentHit) -> Self {
        Self {
            query: hit.query.clone(),
            threshold: hit.threshold,
            score: hit.score,
            saved_latency: hit.saved_latency_ms,
            timestamp: unix_seconds(hit.timestamp),
        }
    }
}

impl From<&SessionStats> for StatsResponse {
    fn from(stats: &SessionStats) -> Self {
        Self {
            avg_saved_latency: stats.avg_saved_latency_ms(),
            hit_rate: stats.hit_rate(),
            total_queries: stats.total_queries(),
            total_hits: stats.total_hits(),
            miss_median_latency: stats.miss_median_latency_ms(),
            recent_hits: stats.recent_hits().map(RecentHitResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntriesResponse {
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntryResponse {
    pub key: String,
    pub response: String,
}
