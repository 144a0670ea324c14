//! Lookup result types

use serde::{Deserialize, Serialize};

/// Which path served an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseSource {
    /// Served from the cache store
    #[serde(rename = "cached")]
    Cached,
    /// Freshly generated placeholder
    #[serde(rename = "gpt-5-nano")]
    Generated,
}

impl ResponseSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::Generated => "gpt-5-nano",
        }
    }
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single cache lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub hit: bool,
    /// Best similarity found, reported on misses too
    pub score: f64,
    pub response: String,
    pub latency_ms: u64,
    /// Present only on hits
    pub saved_latency_ms: Option<u64>,
    pub source: ResponseSource,
    /// Key of the entry that served a hit
    pub matched_key: Option<String>,
}

impl LookupResult {
    pub fn hit(
        score: f64,
        response: impl Into<String>,
        matched_key: impl Into<String>,
        latency_ms: u64,
        saved_latency_ms: u64,
    ) -> Self {
        Self {
            hit: true,
            score,
            response: response.into(),
            latency_ms,
            saved_latency_ms: Some(saved_latency_ms),
            source: ResponseSource::Cached,
            matched_key: Some(matched_key.into()),
        }
    }

    pub fn miss(score: f64, response: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            hit: false,
            score,
            response: response.into(),
            latency_ms,
            saved_latency_ms: None,
            source: ResponseSource::Generated,
            matched_key: None,
        }
    }
}
