use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::HeaderError;

/// Scheme prefix for user credentials (access or refresh token).
pub const BEARER_SCHEME: &str = "Bearer ";

/// Scheme prefix for the pre-shared third-party webhook key.
pub const API_KEY_SCHEME: &str = "ApiKey ";

/// Extract a bearer token from the `Authorization` header.
///
/// # Errors
/// * `Missing` - No `Authorization` header
/// * `Malformed` - Header is not `Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, BEARER_SCHEME)
}

/// Extract an API key from the `Authorization` header.
///
/// # Errors
/// * `Missing` - No `Authorization` header
/// * `Malformed` - Header is not `ApiKey <key>`
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, API_KEY_SCHEME)
}

// Scheme match is case-sensitive and requires exactly one space.
fn extract_credential<'a>(
    headers: &'a HeaderMap,
    scheme: &'static str,
) -> Result<&'a str, HeaderError> {
    let malformed = HeaderError::Malformed { expected: scheme };

    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::Missing)?
        .to_str()
        .map_err(|_| malformed.clone())?;

    match value.strip_prefix(scheme) {
        Some(credential) if !credential.is_empty() && !credential.contains(' ') => {
            Ok(credential)
        }
        _ => Err(malformed),
    }
}
