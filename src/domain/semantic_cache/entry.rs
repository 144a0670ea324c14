//! Cache entry type

use serde::{Deserialize, Serialize};

use crate::domain::embedding::Embedding;

/// A precomputed answer in the cache store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Canonical query text
    key: String,
    /// The cached response text
    response: String,
    /// Precomputed embedding used for similarity search
    embedding: Embedding,
}

impl CacheEntry {
    /// Create a new entry, normalizing the key
    pub fn new(key: impl AsRef<str>, response: impl Into<String>, embedding: Embedding) -> Self {
        Self {
            key: Self::normalize_key(key.as_ref()),
            response: response.into(),
            embedding,
        }
    }

    /// Lowercase and collapse whitespace
    pub fn normalize_key(text: &str) -> String {
        text.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Get the canonical key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the cached response text
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Get the embedding
    pub fn embedding(&self) -> &Embedding {
        &self.embedding
    }
}
