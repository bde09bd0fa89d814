#[path = "trait.rs"]
mod trait_;

pub use trait_::{TokenRepository, DEFAULT_SCAN_LIMIT};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockTokenRepository;
