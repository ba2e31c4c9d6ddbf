use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp aggregate entity.
///
/// `user_id` references the author; the author alone may delete the chirp.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub user_id: UserId,
    pub body: ChirpBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object.
///
/// At most 140 characters, with denylisted words masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 140;

    const PROFANE_WORDS: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];
    const MASK: &'static str = "****";

    /// Validate and clean a raw chirp body.
    ///
    /// Words are split on whitespace and rejoined with single spaces, so runs
    /// of whitespace collapse.
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds [`ChirpBody::MAX_LENGTH`] characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(Self::mask_profanity(&body)))
    }

    /// Rehydrate a body that was validated before it was stored.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    fn mask_profanity(body: &str) -> String {
        body.split_whitespace()
            .map(|word| {
                if Self::PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                    Self::MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a chirp on behalf of an authenticated author
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub user_id: UserId,
    pub body: ChirpBody,
}

/// Creation-time ordering for chirp listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter and ordering for listing chirps
#[derive(Debug, Clone, Default)]
pub struct ListChirpsQuery {
    pub author_id: Option<UserId>,
    pub sort: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_body_is_unchanged() {
        let body = ChirpBody::new("I had something interesting for breakfast".to_string());
        assert_eq!(
            body.unwrap().as_str(),
            "I had something interesting for breakfast"
        );
    }

    #[test]
    fn test_profane_words_are_masked() {
        let body = ChirpBody::new(
            "I really need a kerfuffle to go to bed sooner, Fornax !".to_string(),
        )
        .unwrap();
        assert_eq!(
            body.as_str(),
            "I really need a **** to go to bed sooner, **** !"
        );
    }

    #[test]
    fn test_punctuation_attached_word_is_kept() {
        let body = ChirpBody::new("Sharbert! is fine".to_string()).unwrap();
        assert_eq!(body.as_str(), "Sharbert! is fine");
    }

    #[test]
    fn test_body_at_limit_is_accepted() {
        let body = "a".repeat(ChirpBody::MAX_LENGTH);
        assert!(ChirpBody::new(body).is_ok());
    }

    #[test]
    fn test_body_over_limit_is_rejected() {
        let body = "a".repeat(ChirpBody::MAX_LENGTH + 1);
        assert_eq!(
            ChirpBody::new(body),
            Err(ChirpBodyError::TooLong {
                max: 140,
                actual: 141
            })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let body = "é".repeat(ChirpBody::MAX_LENGTH);
        assert!(ChirpBody::new(body).is_ok());
    }
}
