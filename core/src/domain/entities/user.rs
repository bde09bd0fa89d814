//! User entity representing a registered account in the KeyGate system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// Emails are unique and compared case-insensitively; the constructor
/// normalizes them so every lookup and uniqueness check operates on the
/// lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, stored lowercase
    pub email: String,

    /// Optional display name
    pub display_name: Option<String>,

    /// bcrypt hash of the user's password
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User instance
    ///
    /// The email is normalized (trimmed, lowercased) before storage.
    pub fn new(email: &str, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            display_name,
            password_hash,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Sets the display name
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

/// Normalizes an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
