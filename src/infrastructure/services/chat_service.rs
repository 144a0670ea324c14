//! Chat orchestration: cache lookup followed by session bookkeeping

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::CacheSettings;
use crate::domain::semantic_cache::{CacheEntry, CacheLookupEngine};
use crate::domain::session::{
    QueryOutcome, SessionId, SessionStats, SessionStatsRepository, SessionStatsSnapshot,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_lookup;

/// Serves chat queries through the semantic cache and keeps per-session stats
#[derive(Debug, Clone)]
pub struct ChatService {
    engine: Arc<CacheLookupEngine>,
    sessions: Arc<dyn SessionStatsRepository>,
    settings: CacheSettings,
}

impl ChatService {
    pub fn new(
        engine: Arc<CacheLookupEngine>,
        sessions: Arc<dyn SessionStatsRepository>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            engine,
            sessions,
            settings,
        }
    }

    pub fn engine(&self) -> &CacheLookupEngine {
        &self.engine
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Answer a query and fold the result into the session's statistics
    ///
    /// Stats are only touched once the lookup has completed, so dropping
    /// this future mid-flight leaves the session unchanged.
    pub async fn ask(
        &self,
        session_id: &SessionId,
        query: &str,
        threshold: Option<f64>,
    ) -> Result<QueryOutcome, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("Query must not be empty"));
        }

        let threshold = self.settings.resolve_threshold(threshold);
        let result = self.engine.lookup(query, threshold).await;

        record_lookup(&result);

        let outcome = QueryOutcome::new(query, threshold, result);
        let stats = self.sessions.record(session_id, outcome.clone()).await?;

        debug!(
            session_id = %session_id,
            hit = outcome.result.hit,
            total_queries = stats.total_queries(),
            "Recorded query outcome"
        );

        Ok(outcome)
    }

    pub async fn stats(&self, session_id: &SessionId) -> Result<SessionStats, DomainError> {
        self.sessions.get(session_id).await
    }

    pub async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.sessions.reset(session_id).await?;
        info!(session_id = %session_id, "Session statistics reset");

        Ok(())
    }

    pub async fn snapshot(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionStatsSnapshot, DomainError> {
        Ok(self.sessions.get(session_id).await?.snapshot())
    }

    pub async fn restore(
        &self,
        session_id: &SessionId,
        snapshot: SessionStatsSnapshot,
    ) -> Result<SessionStats, DomainError> {
        let stats = self.sessions.restore(session_id, snapshot).await?;
        info!(
            session_id = %session_id,
            total_queries = stats.total_queries(),
            "Session statistics restored"
        );

        Ok(stats)
    }

    pub async fn sessions(&self) -> Result<Vec<SessionId>, DomainError> {
        self.sessions.list().await
    }

    /// Canonical keys of the cache store, in store order
    pub fn entries(&self) -> Vec<String> {
        self.engine
            .store()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Cached answer stored under `key`, matched after key normalization
    pub fn entry(&self, key: &str) -> Result<CacheEntry, DomainError> {
        self.engine
            .store()
            .get(key)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("No cache entry for '{}'", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::KeywordEmbedder;
    use crate::domain::latency::{LatencyProfile, LatencyRange, LatencySimulator};
    use crate::domain::semantic_cache::CacheStore;
    use crate::domain::session::MockSessionStatsRepository;
    use crate::infrastructure::session::InMemorySessionStatsRepository;
    use std::time::Duration;

    fn engine(profile: LatencyProfile) -> Arc<CacheLookupEngine> {
        Arc::new(CacheLookupEngine::new(
            Arc::new(CacheStore::seeded()),
            Arc::new(KeywordEmbedder::new()),
            LatencySimulator::new(profile),
        ))
    }

    fn service() -> ChatService {
        ChatService::new(
            engine(LatencyProfile::instant()),
            Arc::new(InMemorySessionStatsRepository::default()),
            CacheSettings::default(),
        )
    }

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_ask_records_hit() {
        let service = service();
        let id = session("tab");

        let outcome = service.ask(&id, "semantic cache", None).await.unwrap();

        assert!(outcome.result.hit);
        assert_eq!(outcome.threshold.value(), 0.70);

        let stats = service.stats(&id).await.unwrap();
        assert_eq!(stats.total_queries(), 1);
        assert_eq!(stats.total_hits(), 1);
        assert_eq!(stats.recent_hits().next().unwrap().query, "semantic cache");
    }

    #[tokio::test]
    async fn test_ask_clamps_threshold_to_configured_range() {
        let service = service();

        let high = service
            .ask(&SessionId::default(), "pwa", Some(0.99))
            .await
            .unwrap();
        let low = service
            .ask(&SessionId::default(), "pwa", Some(0.0))
            .await
            .unwrap();

        assert_eq!(high.threshold.value(), 0.90);
        assert_eq!(low.threshold.value(), 0.60);
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_recording() {
        let service = service();
        let id = session("tab");

        let result = service.ask(&id, "   ", None).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(service.stats(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_query_records_nothing() {
        let slow = LatencyProfile::default()
            .with_dispatch(LatencyRange::new(200, 201))
            .with_hit(LatencyRange::new(1, 2))
            .with_miss(LatencyRange::new(3, 4));
        let service = ChatService::new(
            engine(slow),
            Arc::new(InMemorySessionStatsRepository::default()),
            CacheSettings::default(),
        );
        let id = session("tab");

        let result =
            tokio::time::timeout(Duration::from_millis(10), service.ask(&id, "pwa", None)).await;

        assert!(result.is_err());
        assert!(service.stats(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        let mut repo = MockSessionStatsRepository::new();
        repo.expect_record()
            .times(1)
            .returning(|_, _| Err(DomainError::internal("lock poisoned")));

        let service = ChatService::new(
            engine(LatencyProfile::instant()),
            Arc::new(repo),
            CacheSettings::default(),
        );

        let result = service.ask(&SessionId::default(), "vector search", None).await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_snapshot_and_restore_between_sessions() {
        let service = service();
        let source = session("source");
        let target = session("target");

        service.ask(&source, "glassmorphism design", None).await.unwrap();
        let snapshot = service.snapshot(&source).await.unwrap();

        let restored = service.restore(&target, snapshot).await.unwrap();

        assert_eq!(restored.total_queries(), 1);
        assert_eq!(service.sessions().await.unwrap(), vec![source, target]);
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let service = service();
        let id = session("tab");

        service.ask(&id, "pwa", None).await.unwrap();
        service.reset(&id).await.unwrap();

        assert!(service.stats(&id).await.unwrap().is_empty());
    }

    #[test]
    fn test_entries_in_store_order() {
        let service = service();

        assert_eq!(
            service.entries(),
            vec![
                "pwa best practices",
                "semantic cache",
                "vector search",
                "glassmorphism"
            ]
        );
    }

    #[test]
    fn test_entry_by_normalized_key() {
        let service = service();

        let entry = service.entry("  Semantic   CACHE ").unwrap();
        assert_eq!(entry.key(), "semantic cache");

        assert!(matches!(
            service.entry("gardening"),
            Err(DomainError::NotFound { .. })
        ));
    }
}
