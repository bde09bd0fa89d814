//! MySQL implementation of the TokenRepository trait.
//!
//! Persists refresh token records with SQLx. Only token digests ever reach
//! this layer; raw token values are hashed before the record is built.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use kg_core::domain::entities::token::{RefreshTokenRecord, TokenMetadata};
use kg_core::errors::DomainError;
use kg_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;

        let replaced_by: Option<String> = row
            .try_get("replaced_by")
            .map_err(|e| DomainError::internal(format!("Failed to get replaced_by: {}", e)))?;
        let replaced_by = replaced_by
            .map(|s| Uuid::parse_str(&s))
            .transpose()
            .map_err(|e| DomainError::internal(format!("Invalid replaced_by UUID: {}", e)))?;

        Ok(RefreshTokenRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid record UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get token_hash: {}", e)))?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| DomainError::internal(format!("Failed to get issued_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| DomainError::internal(format!("Failed to get revoked_at: {}", e)))?,
            replaced_by,
            metadata: TokenMetadata {
                ip_address: row.try_get("ip_address").map_err(|e| {
                    DomainError::internal(format!("Failed to get ip_address: {}", e))
                })?,
                user_agent: row.try_get("user_agent").map_err(|e| {
                    DomainError::internal(format!("Failed to get user_agent: {}", e))
                })?,
            },
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        // token_hash carries a UNIQUE constraint; an insert collision means
        // the same signed value was persisted twice
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, issued_at, expires_at,
                revoked_at, replaced_by, ip_address, user_agent
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.issued_at)
            .bind(record.expires_at)
            .bind(record.revoked_at)
            .bind(record.replaced_by.map(|id| id.to_string()))
            .bind(&record.metadata.ip_address)
            .bind(&record.metadata.user_agent)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: "Refresh token record already exists".to_string(),
                    }
                }
                other => DomainError::internal(format!("Failed to save token record: {}", other)),
            })?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, issued_at, expires_at,
                   revoked_at, replaced_by, ip_address, user_agent
            FROM refresh_tokens
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find record by id: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshTokenRecord>, DomainError> {
        // rotation matching needs revoked and consumed records too, so no
        // status filter here
        let query = r#"
            SELECT id, user_id, token_hash, issued_at, expires_at,
                   revoked_at, replaced_by, ip_address, user_agent
            FROM refresh_tokens
            WHERE user_id = ?
            ORDER BY issued_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user records: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(Self::row_to_record(&row)?);
        }

        Ok(records)
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, issued_at, expires_at,
                   revoked_at, replaced_by, ip_address, user_agent
            FROM refresh_tokens
            ORDER BY issued_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to scan records: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(Self::row_to_record(&row)?);
        }

        Ok(records)
    }

    async fn revoke(&self, id: Uuid) -> Result<(), DomainError> {
        // the revoked_at IS NULL guard keeps the first revocation timestamp
        // and makes the call idempotent; unknown ids are a no-op
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE id = ? AND revoked_at IS NULL
        "#;

        sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to revoke record: {}", e)))?;

        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE user_id = ? AND revoked_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to revoke user records: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn mark_replaced(&self, old_id: Uuid, new_id: Uuid) -> Result<(), DomainError> {
        // the replaced_by IS NULL guard means the first rotation wins when
        // two rotations race on the same record
        let query = r#"
            UPDATE refresh_tokens
            SET replaced_by = ?
            WHERE id = ? AND replaced_by IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(new_id.to_string())
            .bind(old_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to mark record replaced: {}", e)))?;

        if result.rows_affected() == 0 {
            // distinguish an already-consumed record (no-op) from a missing one
            let exists_row = sqlx::query(
                "SELECT EXISTS(SELECT 1 FROM refresh_tokens WHERE id = ?) AS record_exists",
            )
            .bind(old_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to check record: {}", e)))?;

            let exists: i8 = exists_row
                .try_get("record_exists")
                .map_err(|e| DomainError::internal(format!("Failed to read existence: {}", e)))?;

            if exists == 0 {
                return Err(DomainError::NotFound {
                    resource: format!("refresh token record {old_id}"),
                });
            }
        }

        Ok(())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete expired records: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}
