//! Session statistics endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
};

use super::state::AppState;
use super::types::{ApiError, Json, SessionListResponse, SessionQuery, StatsResponse};
use crate::domain::session::{SessionId, SessionStatsSnapshot};

fn session_id(query: &SessionQuery) -> Result<SessionId, ApiError> {
    SessionId::parse_or_default(query.session_id.as_deref())
        .map_err(|e| ApiError::from(e).with_param("sessionId"))
}

/// GET /stats
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let id = session_id(&query)?;
    let stats = state.chat_service.stats(&id).await?;

    Ok(Json(StatsResponse::from(&stats)))
}

/// DELETE /stats
pub async fn reset_stats(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<StatusCode, ApiError> {
    let id = session_id(&query)?;
    state.chat_service.reset(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /stats/snapshot
pub async fn get_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionStatsSnapshot>, ApiError> {
    let id = session_id(&query)?;

    Ok(Json(state.chat_service.snapshot(&id).await?))
}

/// POST /stats/snapshot
pub async fn restore_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    Json(snapshot): Json<SessionStatsSnapshot>,
) -> Result<Json<StatsResponse>, ApiError> {
    let id = session_id(&query)?;
    let stats = state.chat_service.restore(&id, snapshot).await?;

    Ok(Json(StatsResponse::from(&stats)))
}

/// GET /sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<SessionListResponse>, ApiError> {
    let sessions = state.chat_service.sessions().await?;

    Ok(Json(SessionListResponse {
        sessions: sessions.into_iter().map(String::from).collect(),
    }))
}
