//! Cache lookup engine

use std::sync::Arc;

use tracing::debug;

use crate::domain::embedding::{cosine_similarity, Embedder, Embedding};
use crate::domain::latency::LatencySimulator;

use super::{generate_placeholder, CacheEntry, CacheStore, LookupResult, Threshold, MISS_OPENINGS};

/// Hit/miss decision before any latency is simulated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheDecision<'a> {
    Hit { entry: &'a CacheEntry, score: f64 },
    Miss { score: f64 },
}

impl CacheDecision<'_> {
    pub fn score(&self) -> f64 {
        match self {
            Self::Hit { score, .. } | Self::Miss { score } => *score,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Finds the best cached answer for a query and decides hit vs. miss
///
/// The store is shared read-only, so one engine serves any number of
/// concurrent lookups.
#[derive(Debug, Clone)]
pub struct CacheLookupEngine {
    store: Arc<CacheStore>,
    embedder: Arc<dyn Embedder>,
    latency: LatencySimulator,
}

impl CacheLookupEngine {
    pub fn new(
        store: Arc<CacheStore>,
        embedder: Arc<dyn Embedder>,
        latency: LatencySimulator,
    ) -> Self {
        Self {
            store,
            embedder,
            latency,
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn latency(&self) -> &LatencySimulator {
        &self.latency
    }

    /// Highest-scoring entry in store order; the first entry wins ties
    pub fn best_match(&self, embedding: &Embedding) -> Option<(&CacheEntry, f64)> {
        let mut best: Option<(&CacheEntry, f64)> = None;

        for entry in self.store.iter() {
            let score = cosine_similarity(embedding, entry.embedding());

            if best.is_none_or(|(_, leader)| score > leader) {
                best = Some((entry, score));
            }
        }

        best
    }

    /// Decide hit or miss without simulating any latency
    pub fn evaluate(&self, query: &str, threshold: Threshold) -> CacheDecision<'_> {
        let embedding = self.embedder.embed(query);

        match self.best_match(&embedding) {
            Some((entry, score)) if threshold.is_met_by(score) => {
                CacheDecision::Hit { entry, score }
            }
            Some((_, score)) => CacheDecision::Miss { score },
            None => CacheDecision::Miss { score: 0.0 },
        }
    }

    /// Look up a query, applying the simulated dispatch and response delays
    ///
    /// Dropping the returned future abandons the lookup with no side effects.
    pub async fn lookup(&self, query: &str, threshold: impl Into<Threshold>) -> LookupResult {
        let threshold = threshold.into();

        let dispatch = self.latency.dispatch_delay();
        self.latency.pause(dispatch).await;

        match self.evaluate(query, threshold) {
            CacheDecision::Hit { entry, score } => {
                let timing = self.latency.simulate_hit();
                debug!(
                    key = entry.key(),
                    score,
                    threshold = threshold.value(),
                    latency_ms = timing.latency_ms,
                    "Semantic cache hit"
                );

                self.latency.pause(timing.latency_ms).await;

                LookupResult::hit(
                    score,
                    entry.response(),
                    entry.key(),
                    timing.latency_ms,
                    timing.saved_latency_ms,
                )
            }
            CacheDecision::Miss { score } => {
                let latency_ms = self.latency.simulate_miss();
                debug!(
                    score,
                    threshold = threshold.value(),
                    latency_ms,
                    "Semantic cache miss"
                );

                let opening = self.latency.pick(MISS_OPENINGS.len());
                self.latency.pause(latency_ms).await;

                LookupResult::miss(score, generate_placeholder(opening, query), latency_ms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::KeywordEmbedder;
    use crate::domain::latency::{LatencyProfile, MockRandomSource};
    use crate::domain::semantic_cache::{ResponseSource, MISS_SUFFIX};

    #[derive(Debug)]
    struct FixedEmbedder(Embedding);

    impl Embedder for FixedEmbedder {
        fn embed(&self, _text: &str) -> Embedding {
            self.0
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn single_entry_store() -> Arc<CacheStore> {
        Arc::new(CacheStore::new(vec![CacheEntry::new(
            "entry one",
            "R1",
            Embedding::new([0.8, 0.8, 0.2, 0.2]),
        )]))
    }

    fn fixed_engine(store: Arc<CacheStore>, query: [f64; 4]) -> CacheLookupEngine {
        CacheLookupEngine::new(
            store,
            Arc::new(FixedEmbedder(Embedding::new(query))),
            LatencySimulator::new(LatencyProfile::instant()),
        )
    }

    fn keyword_engine() -> CacheLookupEngine {
        CacheLookupEngine::new(
            Arc::new(CacheStore::seeded()),
            Arc::new(KeywordEmbedder::new()),
            LatencySimulator::new(LatencyProfile::instant()),
        )
    }

    #[tokio::test]
    async fn test_identical_embedding_hits() {
        let engine = fixed_engine(single_entry_store(), [0.8, 0.8, 0.2, 0.2]);

        let result = engine.lookup("anything", 0.5).await;

        assert!(result.hit);
        assert!((result.score - 1.0).abs() < 1e-9);
        assert_eq!(result.response, "R1");
        assert_eq!(result.source, ResponseSource::Cached);
        assert!(result.saved_latency_ms.is_some());
    }

    #[tokio::test]
    async fn test_near_one_threshold_still_hits() {
        let engine = fixed_engine(single_entry_store(), [0.8, 0.8, 0.2, 0.2]);

        let result = engine.lookup("anything", 0.999999).await;

        assert!(result.hit);
        assert_eq!(result.response, "R1");
    }

    #[tokio::test]
    async fn test_dissimilar_query_misses() {
        let engine = fixed_engine(single_entry_store(), [0.1, 0.1, 0.9, 0.9]);

        let result = engine.lookup("tell me about gardening", 0.7).await;

        assert!(!result.hit);
        assert!(result.score > 0.3 && result.score < 0.5);
        assert_ne!(result.response, "R1");
        assert!(result.response.contains("tell me about gardening"));
        assert!(result.response.ends_with(MISS_SUFFIX));
        assert_eq!(result.source, ResponseSource::Generated);
        assert!(result.saved_latency_ms.is_none());
        assert!(result.matched_key.is_none());
    }

    #[tokio::test]
    async fn test_threshold_equal_to_score_is_hit() {
        let engine = fixed_engine(single_entry_store(), [0.1, 0.1, 0.9, 0.9]);
        let score = engine.evaluate("q", Threshold::new(1.0)).score();

        let result = engine.lookup("q", Threshold::new(score)).await;

        assert!(result.hit);
        assert_eq!(result.score, score);
    }

    #[tokio::test]
    async fn test_empty_store_always_misses() {
        let engine = fixed_engine(Arc::new(CacheStore::empty()), [0.8, 0.8, 0.2, 0.2]);

        for threshold in [0.0, 0.5, 1.0] {
            let result = engine.lookup("anything", threshold).await;
            assert!(!result.hit);
            assert_eq!(result.score, 0.0);
        }
    }

    #[test]
    fn test_first_entry_wins_ties() {
        let embedding = Embedding::new([0.5, 0.5, 0.5, 0.5]);
        let store = Arc::new(CacheStore::new(vec![
            CacheEntry::new("first", "A", embedding),
            CacheEntry::new("second", "B", embedding),
        ]));
        let engine = fixed_engine(store, [0.5, 0.5, 0.5, 0.5]);

        let (entry, _) = engine.best_match(&embedding).unwrap();

        assert_eq!(entry.key(), "first");
    }

    #[test]
    fn test_later_entry_must_exceed_leader() {
        let store = Arc::new(CacheStore::new(vec![
            CacheEntry::new("weak", "A", Embedding::new([0.0, 0.0, 1.0, 0.0])),
            CacheEntry::new("strong", "B", Embedding::new([1.0, 0.0, 0.0, 0.0])),
        ]));
        let engine = fixed_engine(store, [1.0, 0.0, 0.0, 0.0]);

        match engine.evaluate("q", Threshold::new(0.9)) {
            CacheDecision::Hit { entry, score } => {
                assert_eq!(entry.key(), "strong");
                assert!((score - 1.0).abs() < 1e-9);
            }
            other => panic!("expected hit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_keyword_scores_stay_in_unit_range() {
        let engine = keyword_engine();
        let queries = [
            "",
            "pwa best practices",
            "what is a semantic cache",
            "how does vector search work",
            "glass design trends",
            "completely unrelated words",
        ];

        for query in queries {
            let result = engine.lookup(query, 0.0).await;
            assert!((0.0..=1.0 + 1e-9).contains(&result.score), "{}", query);
            assert!(result.hit, "threshold 0 should always hit a non-empty store");
        }
    }

    #[tokio::test]
    async fn test_keyword_semantic_query_hits_at_default_threshold() {
        let engine = keyword_engine();

        let result = engine.lookup("what is a semantic cache", 0.70).await;

        assert!(result.hit);
        assert!(result.score > 0.9);
        assert!(result.matched_key.is_some());
    }

    #[tokio::test]
    async fn test_pinned_latencies_and_opening() {
        let mut random = MockRandomSource::new();
        random
            .expect_next_in_range()
            .returning(|low, high| if high <= 4 { 1 } else { low });
        let engine = CacheLookupEngine::new(
            single_entry_store(),
            Arc::new(FixedEmbedder(Embedding::new([0.1, 0.1, 0.9, 0.9]))),
            LatencySimulator::with_random(LatencyProfile::instant(), Arc::new(random)),
        );

        let miss = engine.lookup("gardening tips", 0.9).await;

        assert_eq!(miss.latency_ms, 800);
        assert!(miss.response.starts_with(MISS_OPENINGS[1]));

        let hit = engine.lookup("gardening tips", 0.1).await;

        assert_eq!(hit.latency_ms, 10);
        assert_eq!(hit.saved_latency_ms, Some(800));
    }

    #[tokio::test]
    async fn test_out_of_range_threshold_is_clamped() {
        let engine = fixed_engine(single_entry_store(), [0.8, 0.8, 0.2, 0.2]);

        let strictest = engine.lookup("q", 7.0).await;
        assert_eq!(strictest.hit, strictest.score >= 1.0);

        let loosest = engine.lookup("q", -3.0).await;
        assert!(loosest.hit);
    }
}
