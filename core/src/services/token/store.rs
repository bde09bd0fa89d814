//! Refresh token store: hashing, persistence, and matching

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, RefreshTokenRecord, TokenMetadata, TokenType,
};
use crate::domain::entities::user::User;
use crate::errors::DomainResult;
use crate::repositories::TokenRepository;

use super::codec::TokenCodec;

/// Durable store of issued refresh tokens
///
/// Composes the codec (signing) with a repository (persistence). Raw token
/// values never reach the repository; only their SHA-256 digests are
/// stored.
pub struct TokenStore<R: TokenRepository> {
    repository: R,
    codec: Arc<TokenCodec>,
}

impl<R: TokenRepository> TokenStore<R> {
    /// Creates a new token store
    pub fn new(repository: R, codec: Arc<TokenCodec>) -> Self {
        Self { repository, codec }
    }

    /// Signs a new raw refresh token for the user (not yet persisted)
    pub fn create(&self, user: &User) -> DomainResult<String> {
        self.codec.sign_refresh(user)
    }

    /// Persists a record for a freshly signed raw token
    ///
    /// The store-side expiry is taken from the token's own `exp` claim so
    /// it can never undercut the signed lifetime; if the claim cannot be
    /// read the configured refresh TTL is used.
    pub async fn save(
        &self,
        user_id: Uuid,
        raw_token: &str,
        metadata: TokenMetadata,
    ) -> DomainResult<RefreshTokenRecord> {
        let expires_at = self
            .codec
            .decode_unverified(raw_token)
            .and_then(|claims| Utc.timestamp_opt(claims.exp, 0).single())
            .unwrap_or_else(|| Utc::now() + Duration::seconds(self.codec.refresh_ttl_seconds()));

        let record = RefreshTokenRecord::new(
            user_id,
            Self::hash_token(raw_token),
            expires_at,
            metadata,
        );
        self.repository.save(record).await
    }

    /// Verifies the cryptographic layer of a raw refresh token
    pub fn verify_signature(&self, raw_token: &str) -> DomainResult<Claims> {
        self.codec.verify(raw_token, TokenType::Refresh)
    }

    /// Finds the record whose stored digest matches the raw token
    ///
    /// Linear scan, first match wins; by invariant at most one active match
    /// exists, so order carries no priority. Consumed records (`replaced_by`
    /// set) never match — a replayed rotated token must fall through to
    /// reuse detection rather than resolve to its old record. Digests are
    /// compared in constant time.
    pub fn find_matched<'a>(
        &self,
        records: &'a [RefreshTokenRecord],
        raw_token: &str,
    ) -> Option<&'a RefreshTokenRecord> {
        let needle = Self::hash_token(raw_token);
        records.iter().find(|record| {
            !record.is_consumed()
                && constant_time_eq(record.token_hash.as_bytes(), needle.as_bytes())
        })
    }

    /// All records for a user, any status
    pub async fn find_by_user_id(&self, user_id: Uuid) -> DomainResult<Vec<RefreshTokenRecord>> {
        self.repository.find_by_user_id(user_id).await
    }

    /// Bounded fallback scan when no verified subject is available
    pub async fn find_all(&self, limit: usize) -> DomainResult<Vec<RefreshTokenRecord>> {
        self.repository.find_all(limit).await
    }

    /// Revokes a single record (idempotent)
    pub async fn revoke(&self, id: Uuid) -> DomainResult<()> {
        self.repository.revoke(id).await
    }

    /// Revokes every record for a user — the reuse-detection kill switch
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> DomainResult<usize> {
        self.repository.revoke_all_for_user(user_id).await
    }

    /// Marks `old_id` as consumed by `new_id`
    ///
    /// Must only be called after the new record is durably saved.
    pub async fn mark_replaced(&self, old_id: Uuid, new_id: Uuid) -> DomainResult<()> {
        self.repository.mark_replaced(old_id, new_id).await
    }

    /// SHA-256 hex digest of a raw token value
    pub fn hash_token(raw_token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
