//! Business services containing domain logic and use cases.

pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use password::PasswordHasher;
pub use session::{SessionService, SessionServiceConfig};
pub use token::{TokenCodec, TokenConfig, TokenStore};
