//! Repository interfaces abstracting the durable store.

pub mod token;
pub mod user;

pub use token::{TokenRepository, DEFAULT_SCAN_LIMIT};
pub use user::UserRepository;

#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
