//! `POST /ask`

use axum::extract::State;
use tracing::debug;

use super::state::AppState;
use super::types::{ApiError, AskRequest, AskResponse, Json};
use crate::domain::session::SessionId;

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let session_id = SessionId::parse_or_default(request.session_id.as_deref())
        .map_err(|e| ApiError::from(e).with_param("sessionId"))?;

    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query must not be empty").with_param("query"));
    }

    debug!(
        session_id = %session_id,
        query_len = request.query.len(),
        threshold = ?request.threshold,
        "Handling ask request"
    );

    let outcome = state
        .chat_service
        .ask(&session_id, &request.query, request.threshold)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AskResponse::from(outcome.result)))
}
