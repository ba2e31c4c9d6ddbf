use rand_core::OsRng;
use rand_core::RngCore;

use super::errors::RefreshTokenError;

/// Bytes of entropy in a refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Refresh tokens are persisted with this lifetime.
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 60;

/// Generate an opaque refresh token.
///
/// Draws [`REFRESH_TOKEN_BYTES`] from the operating system CSPRNG and
/// hex-encodes them, yielding 64 lowercase hex characters.
///
/// # Errors
/// * `RandomSource` - The operating system entropy source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::RandomSource(e.to_string()))?;

    Ok(hex::encode(bytes))
}
