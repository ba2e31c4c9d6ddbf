use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpId;
use crate::inbound::http::router::AppState;

/// Delete a chirp on behalf of its author.
///
/// Credentials are checked before the chirp is looked up: 401, then 404 for a
/// malformed or unknown id, then 403 for a non-author.
pub async fn delete_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.sessions.authenticate_access(&headers)?;

    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    let chirp = state.chirp_service.get_chirp(&chirp_id).await?;
    let author_id = state
        .sessions
        .authorize_mutation(&headers, &chirp.user_id)?;

    state.chirp_service.delete_chirp(&chirp_id, &author_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
