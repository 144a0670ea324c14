//! Read-only ordered cache store

use std::slice::Iter;

use crate::domain::embedding::Embedding;

use super::CacheEntry;

/// Fixed collection of cache entries in insertion order
///
/// Insertion order decides ties during lookup: the earlier entry wins.
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    entries: Vec<CacheEntry>,
}

impl CacheStore {
    pub fn new(entries: Vec<CacheEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The demonstration answer set
    pub fn seeded() -> Self {
        Self::new(vec![
            CacheEntry::new(
                "pwa best practices",
                "PWA best practices include: 1) Serve content over HTTPS for security, \
                 2) Include a Web App Manifest for installability, 3) Implement a Service \
                 Worker for offline functionality, 4) Design responsive layouts that adapt \
                 to all screen sizes, 5) Optimize performance with lazy loading and code \
                 splitting, 6) Use proper caching strategies for assets and API responses.",
                Embedding::new([0.82, 0.45, 0.67, 0.91]),
            ),
            CacheEntry::new(
                "semantic cache",
                "A semantic cache stores not just exact query matches but understands \
                 meaning through embeddings. It uses vector similarity to find related \
                 cached responses even when queries differ in wording. This reduces LLM \
                 API calls, lowers costs, and improves response times by serving \
                 pre-computed answers for semantically similar questions.",
                Embedding::new([0.76, 0.89, 0.54, 0.33]),
            ),
            CacheEntry::new(
                "vector search",
                "Vector search enables finding similar items by comparing high-dimensional \
                 embeddings rather than exact keyword matches. It powers recommendation \
                 systems, semantic search, and similarity detection. Key components include \
                 embedding models, vector databases, and similarity metrics like cosine \
                 distance or dot product.",
                Embedding::new([0.71, 0.88, 0.62, 0.44]),
            ),
            CacheEntry::new(
                "glassmorphism",
                "Glassmorphism is a design trend featuring translucent backgrounds with blur \
                 effects, creating a frosted glass appearance. Key properties include \
                 backdrop-filter blur, semi-transparent backgrounds, subtle borders, and \
                 layered depth. It works best with vibrant backgrounds and requires careful \
                 contrast management for accessibility.",
                Embedding::new([0.65, 0.43, 0.78, 0.55]),
            ),
        ])
    }

    pub fn iter(&self) -> Iter<'_, CacheEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical keys in store order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(CacheEntry::key).collect()
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        let key = CacheEntry::normalize_key(key);
        self.entries.iter().find(|e| e.key() == key)
    }
}
