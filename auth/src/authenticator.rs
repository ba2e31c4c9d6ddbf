use uuid::Uuid;

use crate::jwt::TokenError;
use crate::jwt::TokenSigner;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Well-formed Argon2id hash that no password is expected to match.
///
/// Uses the library default cost so verifying against it takes as long as a
/// real verification.
const PLACEHOLDER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$6nyXZSwH816luBp8smb9rw$5TIWyqWAQZ+LLpJGT9UJeAsWvDq8IYtb6SUlDHuj6O0";

/// Authentication coordinator combining password verification and access
/// token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_signer: TokenSigner,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_signer: TokenSigner::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `user_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_signer.issue(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the caller already proved identity
    /// with a refresh token.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.token_signer.issue(user_id)
    }

    /// Validate an access token and return its subject.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.token_signer.verify(token)
    }

    /// Run one full password verification against a fixed hash.
    ///
    /// Called when no account matches a login, so that branch costs the same
    /// as a wrong password. The outcome is always `Ok(false)` unless the
    /// hasher itself fails.
    pub fn verify_placeholder(&self, password: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, PLACEHOLDER_HASH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key_at_least_32_bytes!")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let user_id = Uuid::new_v4();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("my_password", &hash, user_id)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(
            authenticator
                .validate_access_token(&result.access_token)
                .expect("Token validation failed"),
            user_id
        );
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_placeholder_hash_is_readable_and_never_matches() {
        let hasher = PasswordHasher::new();

        assert_eq!(hasher.verify("pw1", PLACEHOLDER_HASH), Ok(false));
        assert_eq!(hasher.verify("", PLACEHOLDER_HASH), Ok(false));

        assert_eq!(authenticator().verify_placeholder("pw1"), Ok(false));
    }
}
