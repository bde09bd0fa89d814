//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use kg_core::domain::entities::user::{normalize_email, User};
use kg_core::errors::{AuthError, DomainError};
use kg_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| DomainError::internal(format!("Failed to get display_name: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| DomainError::internal(format!("Failed to get last_login_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        // emails are stored lowercase; normalizing the argument keeps the
        // lookup case-insensitive without a LOWER() scan
        let query = r#"
            SELECT id, email, display_name, password_hash,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user by email: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, display_name, password_hash,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user by id: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, display_name, password_hash,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                }
                other => DomainError::internal(format!("Failed to create user: {}", other)),
            })?;

        Ok(user)
    }
}
