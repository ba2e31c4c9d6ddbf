use std::sync::Arc;

use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;

/// Issues, resolves and revokes store-backed refresh tokens.
pub struct RefreshTokenManager<SR>
where
    SR: SessionRepository,
{
    repository: Arc<SR>,
}

impl<SR> RefreshTokenManager<SR>
where
    SR: SessionRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }

    /// Generate a refresh token for `user_id` and persist its session.
    ///
    /// The token is only returned once the session row is stored.
    ///
    /// # Errors
    /// * `RandomSource` - Entropy source failed
    /// * `DatabaseError` - Session could not be persisted
    pub async fn issue(&self, user_id: &UserId) -> Result<String, SessionError> {
        let token = auth::generate_refresh_token()?;
        let session = RefreshToken::new(token, *user_id, Utc::now());

        let session = self.repository.create(session).await?;
        tracing::debug!(user_id = %user_id, expires_at = %session.expires_at, "Refresh token issued");

        Ok(session.token)
    }

    /// Resolve a presented token to its owner.
    ///
    /// Reads the session row once and decides on that snapshot.
    ///
    /// # Errors
    /// * `NotFound` - No session for this token
    /// * `Revoked` - Session was revoked
    /// * `Expired` - Session is past its expiry
    /// * `DatabaseError` - Lookup failed
    pub async fn resolve(&self, token: &str) -> Result<UserId, SessionError> {
        let session = self
            .repository
            .find(token)
            .await?
            .ok_or(SessionError::NotFound)?;

        session.owner_at(Utc::now())
    }

    /// Revoke a token.
    ///
    /// Already revoked tokens count as success.
    ///
    /// # Errors
    /// * `NotFound` - No session for this token
    /// * `DatabaseError` - Update failed
    pub async fn revoke(&self, token: &str) -> Result<(), SessionError> {
        if self.repository.revoke(token, Utc::now()).await? > 0 {
            tracing::info!("Refresh token revoked");
            return Ok(());
        }

        match self.repository.find(token).await? {
            Some(_) => Ok(()),
            None => Err(SessionError::NotFound),
        }
    }
}
