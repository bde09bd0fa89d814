//! Value objects representing immutable domain concepts.

pub mod issued_tokens;

// Re-export commonly used types
pub use issued_tokens::IssuedTokens;
