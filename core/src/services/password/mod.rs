//! Password hashing and verification
//!
//! Thin wrapper around bcrypt. Verification never fails on a mismatch; it
//! returns `Ok(false)` so that a wrong password is an authentication
//! decision, while an actual computation failure (malformed stored hash,
//! for example) surfaces as an infrastructure error.

use kg_shared::config::auth::PasswordConfig;

use crate::errors::{DomainError, DomainResult};

/// Salted, adaptive password hasher (bcrypt)
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with an explicit cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Create a hasher from configuration
    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    /// Hash a plaintext secret
    pub fn hash(&self, plain: &str) -> DomainResult<String> {
        bcrypt::hash(plain, self.cost)
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {e}")))
    }

    /// Check a plaintext secret against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Secret matches
    /// * `Ok(false)` - Secret does not match
    /// * `Err(DomainError)` - Underlying computation failed
    pub fn verify(&self, plain: &str, stored_hash: &str) -> DomainResult<bool> {
        bcrypt::verify(plain, stored_hash)
            .map_err(|e| DomainError::internal(format!("Password verification failed: {e}")))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::from_config(&PasswordConfig::default())
    }
}
