//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{normalize_email, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// In-memory user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Test helper: replace a stored user wholesale
    pub async fn update(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let needle = normalize_email(email);
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == needle).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let repo = MockUserRepository::new();
        let user = User::new("Alice@Example.com", "hash".to_string(), None);
        repo.create(user.clone()).await.unwrap();

        let found = repo.find_by_email("ALICE@example.COM").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = MockUserRepository::new();
        repo.create(User::new("a@b.c", "h1".to_string(), None))
            .await
            .unwrap();

        let result = repo
            .create(User::new("A@B.C", "h2".to_string(), None))
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::UserAlreadyExists))
        ));
    }
}
