use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use http::HeaderMap;

use crate::domain::session::errors::AuthError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginResult;
use crate::domain::session::models::RefreshToken;
use crate::domain::user::models::UserId;

/// Port for login, token refresh, revocation and request authorization.
///
/// Every mutating endpoint goes through this port to turn request headers
/// into an authenticated principal.
#[async_trait]
pub trait SessionLifecyclePort: Send + Sync + 'static {
    /// Verify email and password, then mint an access token and a persisted
    /// refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Session` / `Internal` - Token minting or persistence failed
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Mint a new access token from the bearer refresh token.
    ///
    /// The refresh token is not rotated.
    ///
    /// # Errors
    /// * `Header` - Missing or malformed `Authorization` header
    /// * `Session` - Refresh token unknown, expired or revoked
    async fn refresh(&self, headers: &HeaderMap) -> Result<String, AuthError>;

    /// Revoke the bearer refresh token. Revoking twice succeeds.
    ///
    /// # Errors
    /// * `Header` - Missing or malformed `Authorization` header
    /// * `Session(NotFound)` - No such refresh token
    async fn revoke(&self, headers: &HeaderMap) -> Result<(), AuthError>;

    /// Validate the bearer access token and return its user.
    ///
    /// # Errors
    /// * `Header` - Missing or malformed `Authorization` header
    /// * `Token` - Token failed verification
    fn authenticate_access(&self, headers: &HeaderMap) -> Result<UserId, AuthError>;

    /// Validate the bearer access token and require it to belong to
    /// `resource_owner`.
    ///
    /// # Errors
    /// * `Header` / `Token` - As for [`SessionLifecyclePort::authenticate_access`]
    /// * `Forbidden` - Authenticated user is not the owner
    fn authorize_mutation(
        &self,
        headers: &HeaderMap,
        resource_owner: &UserId,
    ) -> Result<UserId, AuthError>;

    /// Require the pre-shared third-party API key.
    ///
    /// # Errors
    /// * `Header` - Missing or malformed `Authorization` header
    /// * `InvalidApiKey` - Key does not match
    fn authenticate_api_key(&self, headers: &HeaderMap) -> Result<(), AuthError>;
}

/// Session store: persistence operations for refresh tokens.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a new session. Must be durable when this returns.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, session: RefreshToken) -> Result<RefreshToken, SessionError>;

    /// Look up a session by exact token match.
    ///
    /// # Returns
    /// Optional session (None if not found)
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Set `revoked_at` on the matching session if it is not revoked yet.
    ///
    /// # Returns
    /// Number of rows updated
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<u64, SessionError>;
}
