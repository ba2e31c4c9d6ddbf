use auth::HeaderError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for refresh token (session) operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token is expired")]
    Expired,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Random source failed: {0}")]
    RandomSource(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::RefreshTokenError> for SessionError {
    fn from(err: auth::RefreshTokenError) -> Self {
        match err {
            auth::RefreshTokenError::RandomSource(reason) => SessionError::RandomSource(reason),
        }
    }
}

/// Error for authentication and authorization decisions
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error("Invalid access token: {0}")]
    Token(#[from] TokenError),

    #[error("Invalid refresh token: {0}")]
    Session(#[from] SessionError),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("User {user_id} does not own this resource")]
    Forbidden { user_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether the failure comes from the server rather than the credential.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Internal(_)
                | AuthError::Token(TokenError::EncodingFailed(_))
                | AuthError::Session(SessionError::RandomSource(_))
                | AuthError::Session(SessionError::DatabaseError(_))
        )
    }
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => AuthError::Internal(e.to_string()),
            auth::AuthenticationError::TokenError(e) => AuthError::Token(e),
        }
    }
}
