//! Session statistics repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::{QueryOutcome, SessionId, SessionStats, SessionStatsSnapshot};

#[cfg(test)]
use mockall::automock;

/// Storage for per-session statistics
///
/// Sessions never share state; an unknown session reads as empty.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStatsRepository: Send + Sync + Debug {
    /// Fold an outcome into the session and return the updated stats
    async fn record(
        &self,
        session_id: &SessionId,
        outcome: QueryOutcome,
    ) -> Result<SessionStats, DomainError>;

    /// Current stats of a session
    async fn get(&self, session_id: &SessionId) -> Result<SessionStats, DomainError>;

    /// Reset a session to its empty state
    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError>;

    /// Replace a session's stats with a restored snapshot
    async fn restore(
        &self,
        session_id: &SessionId,
        snapshot: SessionStatsSnapshot,
    ) -> Result<SessionStats, DomainError>;

    /// IDs of sessions that have recorded at least one query
    async fn list(&self) -> Result<Vec<SessionId>, DomainError>;
}
