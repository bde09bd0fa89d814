//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// The session core only reads identity data (id, email, display name,
/// password hash) and creates accounts; everything else about users is
/// owned by the surrounding application.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// Lookup is case-insensitive: implementations must normalize the
    /// argument the same way `User::new` normalizes stored emails.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Database error occurred
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
