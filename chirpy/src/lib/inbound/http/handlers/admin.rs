use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>",
        state.metrics.file_server_hits()
    ))
}

/// Zero the hit counter and delete every user. Only available on the dev
/// platform.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if !state.allow_reset {
        tracing::warn!("Reset refused outside the dev platform");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    state.metrics.reset();
    let deleted_users = state.user_service.reset().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData {
            file_server_hits: state.metrics.file_server_hits(),
            deleted_users,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub file_server_hits: u64,
    pub deleted_users: u64,
}
