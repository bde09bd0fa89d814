//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    Claims, RefreshTokenRecord, TokenMetadata, TokenType,
    JWT_AUDIENCE, JWT_ISSUER,
};
pub use user::User;
