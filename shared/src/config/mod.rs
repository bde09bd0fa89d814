//! Configuration types shared across server modules

pub mod auth;
pub mod database;

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::DatabaseConfig;
