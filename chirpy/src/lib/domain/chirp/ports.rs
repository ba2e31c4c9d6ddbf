use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::domain::chirp::models::ListChirpsQuery;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Publish a new chirp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError>;

    /// Retrieve a chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally for a single author, ordered by creation time.
    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp owned by `author_id`.
    ///
    /// Ownership must already have been authorized; the store only matches
    /// rows with both identifiers.
    ///
    /// # Errors
    /// * `NotFound` - No chirp with this id and author
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: &ChirpId, author_id: &UserId) -> Result<(), ChirpError>;
}

/// Chirp store: persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist a new chirp.
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// Retrieve a chirp by identifier.
    ///
    /// # Returns
    /// Optional chirp (None if not found)
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Retrieve every chirp, oldest first.
    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp matching both id and author.
    ///
    /// # Returns
    /// Number of rows deleted
    async fn delete(&self, id: &ChirpId, author_id: &UserId) -> Result<u64, ChirpError>;
}
