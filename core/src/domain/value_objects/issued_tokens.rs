//! Token issuance result value object.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a successful token issuance or rotation
///
/// Returned after login, registration, or refresh and contains:
/// - the signed access and refresh tokens
/// - the id of the refresh token record backing the refresh token
/// - token expiration times
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssuedTokens {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Signed refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Identifier of the persisted refresh token record
    pub refresh_token_id: Uuid,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Refresh token expiration time in seconds
    pub refresh_expires_in: i64,
}

impl IssuedTokens {
    /// Creates a new issuance result
    pub fn new(
        access_token: String,
        refresh_token: String,
        refresh_token_id: Uuid,
        expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            refresh_token_id,
            expires_in,
            refresh_expires_in,
        }
    }
}
