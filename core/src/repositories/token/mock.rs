//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::trait_::TokenRepository;

/// In-memory token repository for testing
#[derive(Clone)]
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Test helper: force a record's store-side expiry into the past
    pub async fn force_expire(&self, id: Uuid) {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.expires_at = chrono::Utc::now() - chrono::Duration::seconds(1);
        }
    }

    /// Test helper: snapshot of a record
    pub async fn get(&self, id: Uuid) -> Option<RefreshTokenRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Test helper: total number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id)
            || records.values().any(|r| r.token_hash == record.token_hash)
        {
            return Err(DomainError::Validation {
                message: "Token record already exists".to_string(),
            });
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        let mut found: Vec<RefreshTokenRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(found)
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        let mut found: Vec<RefreshTokenRecord> = records.values().cloned().collect();
        found.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        found.truncate(limit);
        Ok(found)
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.revoke();
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked() {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn mark_replaced(&self, old_id: Uuid, new_id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&old_id) {
            Some(record) => {
                record.mark_replaced(new_id);
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("refresh token record {old_id}"),
            }),
        }
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| !record.is_expired());

        Ok(initial_count - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::TokenMetadata;
    use chrono::{Duration, Utc};

    fn record_for(user_id: Uuid, hash: &str) -> RefreshTokenRecord {
        RefreshTokenRecord::new(
            user_id,
            hash.to_string(),
            Utc::now() + Duration::days(7),
            TokenMetadata::empty(),
        )
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_hash() {
        let repo = MockTokenRepository::new();
        let user_id = Uuid::new_v4();

        repo.save(record_for(user_id, "hash-a")).await.unwrap();
        let result = repo.save(record_for(user_id, "hash-a")).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent_and_tolerates_unknown_ids() {
        let repo = MockTokenRepository::new();
        let saved = repo
            .save(record_for(Uuid::new_v4(), "hash-a"))
            .await
            .unwrap();

        repo.revoke(saved.id).await.unwrap();
        let first = repo.get(saved.id).await.unwrap().revoked_at;

        repo.revoke(saved.id).await.unwrap();
        assert_eq!(repo.get(saved.id).await.unwrap().revoked_at, first);

        // unknown id is a no-op, not an error
        repo.revoke(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_revoke_all_for_user_skips_other_users() {
        let repo = MockTokenRepository::new();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        repo.save(record_for(user_a, "a1")).await.unwrap();
        repo.save(record_for(user_a, "a2")).await.unwrap();
        let b = repo.save(record_for(user_b, "b1")).await.unwrap();

        let revoked = repo.revoke_all_for_user(user_a).await.unwrap();

        assert_eq!(revoked, 2);
        assert!(!repo.get(b.id).await.unwrap().is_revoked());
    }

    #[tokio::test]
    async fn test_mark_replaced_requires_existing_record() {
        let repo = MockTokenRepository::new();
        let old = repo
            .save(record_for(Uuid::new_v4(), "old"))
            .await
            .unwrap();
        let new_id = Uuid::new_v4();

        repo.mark_replaced(old.id, new_id).await.unwrap();
        assert_eq!(repo.get(old.id).await.unwrap().replaced_by, Some(new_id));

        let missing = repo.mark_replaced(Uuid::new_v4(), new_id).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_all_is_bounded() {
        let repo = MockTokenRepository::new();
        for i in 0..5 {
            repo.save(record_for(Uuid::new_v4(), &format!("hash-{i}")))
                .await
                .unwrap();
        }

        let found = repo.find_all(3).await.unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_records() {
        let repo = MockTokenRepository::new();
        let live = repo
            .save(record_for(Uuid::new_v4(), "live"))
            .await
            .unwrap();
        let dead = repo
            .save(record_for(Uuid::new_v4(), "dead"))
            .await
            .unwrap();
        repo.force_expire(dead.id).await;

        let deleted = repo.delete_expired().await.unwrap();

        assert_eq!(deleted, 1);
        assert!(repo.get(live.id).await.is_some());
        assert!(repo.get(dead.id).await.is_none());
    }
}
