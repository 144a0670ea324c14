//! Cache store inspection

use axum::extract::{Path, State};

use super::state::AppState;
use super::types::{ApiError, CacheEntriesResponse, CacheEntryResponse, Json};

/// GET /cache/entries
pub async fn list_entries(State(state): State<AppState>) -> Json<CacheEntriesResponse> {
    Json(CacheEntriesResponse {
        entries: state.chat_service.entries(),
    })
}

/// GET /cache/entries/{key}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheEntryResponse>, ApiError> {
    let entry = state.chat_service.entry(&key)?;

    Ok(Json(CacheEntryResponse {
        key: entry.key().to_string(),
        response: entry.response().to_string(),
    }))
}
