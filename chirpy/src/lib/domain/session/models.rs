use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persisted refresh token (session) record.
///
/// The token itself is opaque; all validity state lives in this row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Build a fresh, unrevoked session for `user_id` issued at `now`.
    pub fn new(token: String, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(auth::refresh::REFRESH_TOKEN_LIFETIME_DAYS),
            revoked_at: None,
        }
    }

    /// Decide whether this row still authenticates its owner at `now`.
    ///
    /// Revocation and expiry are evaluated together on the same snapshot.
    ///
    /// # Errors
    /// * `Revoked` - `revoked_at` is set
    /// * `Expired` - `now` is at or past `expires_at`
    pub fn owner_at(&self, now: DateTime<Utc>) -> Result<UserId, SessionError> {
        if self.revoked_at.is_some() {
            return Err(SessionError::Revoked);
        }
        if now >= self.expires_at {
            return Err(SessionError::Expired);
        }
        Ok(self.user_id)
    }
}

/// Tokens handed to a client after a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
