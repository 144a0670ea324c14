//! In-memory session statistics repository

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::session::{
    QueryOutcome, SessionId, SessionStats, SessionStatsRepository, SessionStatsSnapshot,
};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct SessionSlot {
    stats: SessionStats,
    last_active: DateTime<Utc>,
}

/// Keeps each session's statistics in process memory
///
/// When `max_sessions` is reached, the least recently active session is
/// dropped to make room for a new one.
#[derive(Debug)]
pub struct InMemorySessionStatsRepository {
    sessions: RwLock<HashMap<SessionId, SessionSlot>>,
    max_sessions: usize,
}

impl InMemorySessionStatsRepository {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    fn evict_if_needed(&self, sessions: &mut HashMap<SessionId, SessionSlot>, incoming: &SessionId) {
        if sessions.contains_key(incoming) || sessions.len() < self.max_sessions {
            return;
        }

        if let Some(oldest) = sessions
            .iter()
            .min_by_key(|(_, slot)| slot.last_active)
            .map(|(id, _)| id.clone())
        {
            tracing::debug!(session_id = %oldest, "Evicting least recently active session");
            sessions.remove(&oldest);
        }
    }

    // A poisoned map is still consistent: every mutation is a single
    // insert, remove or in-place record.
    fn write_lock(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SessionSlot>> {
        self.sessions.write().unwrap_or_else(|e| {
            tracing::warn!("Recovering poisoned session lock");
            e.into_inner()
        })
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, HashMap<SessionId, SessionSlot>> {
        self.sessions.read().unwrap_or_else(|e| {
            tracing::warn!("Recovering poisoned session lock");
            e.into_inner()
        })
    }
}

impl Default for InMemorySessionStatsRepository {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl SessionStatsRepository for InMemorySessionStatsRepository {
    async fn record(
        &self,
        session_id: &SessionId,
        outcome: QueryOutcome,
    ) -> Result<SessionStats, DomainError> {
        let mut sessions = self.write_lock();

        self.evict_if_needed(&mut sessions, session_id);
        let slot = sessions.entry(session_id.clone()).or_default();
        slot.stats.record(&outcome);
        slot.last_active = Utc::now();

        Ok(slot.stats.clone())
    }

    async fn get(&self, session_id: &SessionId) -> Result<SessionStats, DomainError> {
        let sessions = self.read_lock();

        Ok(sessions
            .get(session_id)
            .map(|slot| slot.stats.clone())
            .unwrap_or_default())
    }

    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.write_lock();

        sessions.remove(session_id);

        Ok(())
    }

    async fn restore(
        &self,
        session_id: &SessionId,
        snapshot: SessionStatsSnapshot,
    ) -> Result<SessionStats, DomainError> {
        let stats = SessionStats::restore(snapshot)?;
        let mut sessions = self.write_lock();

        self.evict_if_needed(&mut sessions, session_id);
        sessions.insert(
            session_id.clone(),
            SessionSlot {
                stats: stats.clone(),
                last_active: Utc::now(),
            },
        );

        Ok(stats)
    }

    async fn list(&self) -> Result<Vec<SessionId>, DomainError> {
        let sessions = self.read_lock();

        let mut ids: Vec<SessionId> = sessions.keys().cloned().collect();
        ids.sort();

        Ok(ids)
    }
}
