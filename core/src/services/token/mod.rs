//! Token module for signing, verification, and refresh token state
//!
//! This module contains:
//! - The token codec: JWT signing and verification (HS256)
//! - The token store: hashing, persistence, and matching of refresh tokens
//! - Token configuration, including duration-string TTL parsing
//!
//! Signature verification and store-based state checks are deliberately
//! layered: a token can be cryptographically valid yet logically revoked
//! or already rotated. The session service is the sole authority on
//! logical validity.

mod codec;
mod config;
mod store;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::{parse_ttl, TokenConfig};
pub use store::TokenStore;
