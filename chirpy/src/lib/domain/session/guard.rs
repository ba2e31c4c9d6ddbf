use std::sync::Arc;

use auth::Authenticator;
use http::HeaderMap;

use crate::domain::session::errors::AuthError;
use crate::domain::session::manager::RefreshTokenManager;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;

/// Turns request headers into an authenticated principal.
///
/// Each call is terminal: a request either yields a user (or a matching API
/// key) or is rejected, without retries.
pub struct AuthorizationGuard<SR>
where
    SR: SessionRepository,
{
    authenticator: Arc<Authenticator>,
    refresh_tokens: Arc<RefreshTokenManager<SR>>,
    api_key: String,
}

impl<SR> AuthorizationGuard<SR>
where
    SR: SessionRepository,
{
    /// # Arguments
    /// * `authenticator` - Verifies access tokens
    /// * `refresh_tokens` - Resolves refresh tokens against the session store
    /// * `api_key` - Pre-shared key expected from the payment provider
    pub fn new(
        authenticator: Arc<Authenticator>,
        refresh_tokens: Arc<RefreshTokenManager<SR>>,
        api_key: String,
    ) -> Self {
        Self {
            authenticator,
            refresh_tokens,
            api_key,
        }
    }

    /// Extract the raw bearer credential.
    pub fn extract_bearer<'h>(&self, headers: &'h HeaderMap) -> Result<&'h str, AuthError> {
        auth::extract_bearer(headers).map_err(|e| {
            tracing::debug!(error = %e, "Bearer credential rejected");
            AuthError::from(e)
        })
    }

    /// Validate the bearer access token.
    pub fn authenticate_access(&self, headers: &HeaderMap) -> Result<UserId, AuthError> {
        let token = self.extract_bearer(headers)?;

        self.authenticator
            .validate_access_token(token)
            .map(UserId::from)
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token validation failed");
                AuthError::from(e)
            })
    }

    /// Resolve the bearer refresh token against the session store.
    pub async fn authenticate_refresh(&self, headers: &HeaderMap) -> Result<UserId, AuthError> {
        let token = self.extract_bearer(headers)?;

        self.refresh_tokens.resolve(token).await.map_err(|e| {
            tracing::warn!(error = %e, "Refresh token rejected");
            AuthError::from(e)
        })
    }

    /// Require the `ApiKey` credential to equal the configured key.
    pub fn authenticate_api_key(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let key = auth::extract_api_key(headers)?;

        if key != self.api_key {
            tracing::warn!("Webhook called with wrong API key");
            return Err(AuthError::InvalidApiKey);
        }
        Ok(())
    }
}
