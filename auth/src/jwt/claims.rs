use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Issuer tag carried by every access token.
///
/// Tokens signed with the same secret for another purpose carry a different
/// tag and are rejected by [`AccessClaims::validate`].
pub const ACCESS_TOKEN_ISSUER: &str = "access-token-v1";

/// Fixed access token lifetime.
pub const ACCESS_TOKEN_LIFETIME_SECONDS: i64 = 60 * 60;

/// Claim set of a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer tag, always [`ACCESS_TOKEN_ISSUER`] for tokens minted here
    pub iss: String,

    /// Subject: the user identifier
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build the claims for a user at the given instant.
    pub fn for_user(user_id: Uuid, issued_at: DateTime<Utc>) -> Self {
        let expires_at = issued_at + Duration::seconds(ACCESS_TOKEN_LIFETIME_SECONDS);

        Self {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Validate the claim fields one by one and yield the subject.
    ///
    /// Signature and expiry are checked by the signer before this runs.
    ///
    /// # Errors
    /// * `WrongIssuer` - Issuer tag is not [`ACCESS_TOKEN_ISSUER`]
    /// * `MalformedSubject` - Subject is not a UUID
    pub fn validate(&self) -> Result<Uuid, TokenError> {
        if self.iss != ACCESS_TOKEN_ISSUER {
            return Err(TokenError::WrongIssuer(self.iss.clone()));
        }

        Uuid::parse_str(&self.sub).map_err(|_| TokenError::MalformedSubject(self.sub.clone()))
    }
}
