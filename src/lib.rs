//! Vector Semantic Cache API
//!
//! Answers chat queries from a small set of precomputed responses when a
//! query is close enough in embedding space, and tracks per-session
//! statistics on how much latency the cache saved.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::embedding::KeywordEmbedder;
use domain::latency::LatencySimulator;
use domain::semantic_cache::{CacheLookupEngine, CacheStore};
use infrastructure::services::ChatService;
use infrastructure::session::InMemorySessionStatsRepository;

/// Wire the seeded store, keyword embedder and in-memory sessions together
pub fn create_chat_service(config: &AppConfig) -> ChatService {
    let engine = CacheLookupEngine::new(
        Arc::new(CacheStore::seeded()),
        Arc::new(KeywordEmbedder::new()),
        LatencySimulator::new(config.latency.clone()),
    );
    let sessions = InMemorySessionStatsRepository::new(config.cache.max_sessions);

    tracing::debug!(
        entries = engine.store().len(),
        max_sessions = config.cache.max_sessions,
        "Semantic cache engine created"
    );

    ChatService::new(Arc::new(engine), Arc::new(sessions), config.cache.clone())
}

pub fn create_app_state(config: Arc<AppConfig>) -> AppState {
    let chat_service = Arc::new(create_chat_service(&config));

    AppState::new(chat_service, config)
}
