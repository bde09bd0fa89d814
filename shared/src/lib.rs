//! Shared utilities and common types for the KeyGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Common type definitions

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, DatabaseConfig, JwtConfig, PasswordConfig};
pub use types::response::ErrorResponse;
