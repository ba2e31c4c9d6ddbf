use thiserror::Error;

/// Error type for `Authorization` header extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format. Expected: {expected}<credential>")]
    Malformed { expected: &'static str },
}
