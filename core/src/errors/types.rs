//! Domain-specific error types for authentication and token operations
//!
//! Error messages here are developer-facing; user-facing wording belongs to
//! the presentation layer. The four refresh-specific rejection kinds must
//! stay distinguishable so callers can react to each one (reuse detection
//! in particular carries a mandatory revocation side effect).

use kg_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,
}

/// Token-related errors
///
/// `InvalidRefreshToken`, `ReusedRefreshToken`, `RevokedRefreshToken` and
/// `ExpiredRefreshToken` are the security-specific rejections that propagate
/// unchanged to the session manager's caller. Everything else is an internal
/// failure and gets normalized before it crosses the boundary.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token reuse detected")]
    ReusedRefreshToken,

    #[error("Refresh token revoked")]
    RevokedRefreshToken,

    #[error("Refresh token expired")]
    ExpiredRefreshToken,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Token signing failed")]
    SigningFailed,

    #[error("Invalid token claims")]
    InvalidClaims,
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::ReusedRefreshToken => "REUSED_REFRESH_TOKEN",
            TokenError::RevokedRefreshToken => "REVOKED_REFRESH_TOKEN",
            TokenError::ExpiredRefreshToken => "EXPIRED_REFRESH_TOKEN",
            TokenError::InvalidAccessToken => "INVALID_ACCESS_TOKEN",
            TokenError::SigningFailed => "TOKEN_SIGNING_FAILED",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_conversion() {
        let error = TokenError::ReusedRefreshToken;
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "REUSED_REFRESH_TOKEN");
        assert!(response.message.contains("reuse"));
    }

    #[test]
    fn test_auth_error_conversion() {
        let error = AuthError::UserAlreadyExists;
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "USER_ALREADY_EXISTS");
    }
}
