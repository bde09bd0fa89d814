//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Cap applied to fallback scans when no verified subject is available
/// (e.g. logout with a token that no longer verifies). This bounds the
/// worst-case scan cost; it is a scalability tradeoff, not a correctness
/// guarantee.
pub const DEFAULT_SCAN_LIMIT: usize = 500;

/// Repository trait for refresh token record persistence
///
/// Implementations must make each operation atomic at the record level.
/// Records are never deleted through the rotation paths; `delete_expired`
/// exists for external retention jobs only.
///
/// # Security Considerations
/// - Only token hashes are stored, never raw token values
/// - `revoke` and `mark_replaced` are the only mutations; records have no
///   transition out of a terminal state
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g. duplicate token hash)
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use chrono::{Duration, Utc};
    /// # use kg_core::repositories::TokenRepository;
    /// # use kg_core::domain::entities::token::{RefreshTokenRecord, TokenMetadata};
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = RefreshTokenRecord::new(
    ///     Uuid::new_v4(),
    ///     "sha256_hash_of_token".to_string(),
    ///     Utc::now() + Duration::days(7),
    ///     TokenMetadata::empty(),
    /// );
    ///
    /// let saved = repo.save(record).await?;
    /// println!("Record saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a record by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Find all records for a user, regardless of status
    ///
    /// Rotation matching needs revoked and consumed records too, so no
    /// status filter is applied here. Most recent first.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshTokenRecord>, DomainError>;

    /// Fallback lookup across all users, bounded by `limit`
    ///
    /// Used when the caller holds only a raw token and no verified subject.
    /// Most recent first.
    async fn find_all(&self, limit: usize) -> Result<Vec<RefreshTokenRecord>, DomainError>;

    /// Revoke a record by ID, setting its revocation timestamp
    ///
    /// Idempotent: revoking an already-revoked or unknown record is a
    /// no-op, not an error.
    async fn revoke(&self, id: Uuid) -> Result<(), DomainError>;

    /// Revoke every non-revoked record for a user
    ///
    /// This is the reuse-detection countermeasure: it kills the whole
    /// session lineage.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Mark `old_id` as consumed by `new_id`
    ///
    /// Callers must only invoke this after the new record is durably saved;
    /// the reverse order would open a window with zero valid tokens if the
    /// save fails.
    async fn mark_replaced(&self, old_id: Uuid, new_id: Uuid) -> Result<(), DomainError>;

    /// Delete expired records from the store
    ///
    /// Maintenance operation for external retention jobs; the session
    /// manager never calls this.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired records deleted
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
