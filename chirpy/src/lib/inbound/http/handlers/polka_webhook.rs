use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// The only payment provider event that changes state.
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider callback, authenticated with the pre-shared API key.
///
/// The key is checked before the body is decoded. Unrecognized events are
/// acknowledged without touching the store.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    state.sessions.authenticate_api_key(&headers)?;

    let request: WebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid webhook payload: {}", e)))?;

    if request.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %request.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    // An id that cannot parse names no user.
    let user_id = UserId::from_string(&request.data.user_id)
        .map_err(|_| UserError::NotFound(request.data.user_id.clone()))?;
    state.user_service.upgrade_user(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    event: String,
    #[serde(default)]
    data: WebhookData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    user_id: String,
}
