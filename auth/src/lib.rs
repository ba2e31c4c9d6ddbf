//! Authentication utilities library
//!
//! Provides the credential primitives used by the chirpy service:
//! - Password hashing (Argon2id)
//! - Signed, short-lived access tokens (HS256 JWT with a fixed issuer tag)
//! - Opaque refresh token generation
//! - `Authorization` header extraction (`Bearer` and `ApiKey` schemes)
//!
//! Persistence of refresh tokens is left to the service, which owns the
//! session store.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenSigner;
//!
//! let signer = TokenSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = uuid::Uuid::new_v4();
//! let token = signer.issue(user_id).unwrap();
//! assert_eq!(signer.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Refresh Tokens
//! ```
//! let token = auth::generate_refresh_token().unwrap();
//! assert_eq!(token.len(), 64);
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::extract_api_key;
pub use header::extract_bearer;
pub use header::HeaderError;
pub use jwt::AccessClaims;
pub use jwt::TokenError;
pub use jwt::TokenSigner;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
pub use refresh::RefreshTokenError;
