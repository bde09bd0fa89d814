//! # Infrastructure Layer
//!
//! Concrete implementations of the `kg_core` repository traits backed by
//! MySQL through SQLx, plus connection pool management.
//!
//! The core never sees SQLx types: every database failure is wrapped into
//! `DomainError::Internal` at this boundary.

pub mod database;

pub use database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};

use kg_core::errors::DomainError;
use kg_shared::config::DatabaseConfig;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::internal(error.to_string())
    }
}

/// Load database configuration from the environment
///
/// Reads a `.env` file if one is present, then falls back to defaults for
/// any variable that is unset.
pub fn load_database_config() -> DatabaseConfig {
    dotenvy::dotenv().ok();
    DatabaseConfig::from_env()
}
