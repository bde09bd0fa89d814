//! Session service module
//!
//! Orchestrates the refresh-token lifecycle: issuance, single-use
//! rotation, reuse detection, and revocation. This is the sole authority
//! on the logical validity of a refresh token; the codec only answers for
//! the cryptographic layer.

mod config;
mod service;


pub use config::SessionServiceConfig;
pub use service::SessionService;
