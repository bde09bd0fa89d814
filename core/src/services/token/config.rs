//! Configuration for token signing and lifetimes

use kg_shared::config::auth::JwtConfig;

use crate::domain::entities::token::{JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, DomainResult};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// JWT signing secret
    pub secret: String,
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
    /// Access token lifetime as a duration string (e.g. "15m")
    pub access_ttl: String,
    /// Refresh token lifetime as a duration string (e.g. "7d")
    pub refresh_ttl: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_ttl: "15m".to_string(),
            refresh_ttl: "7d".to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl: config.access_token_ttl.clone(),
            refresh_ttl: config.refresh_token_ttl.clone(),
        }
    }
}

/// Parse a duration string into seconds
///
/// Accepts a bare number of seconds or a number with an `s`, `m`, `h`
/// or `d` suffix: `"900"`, `"30s"`, `"15m"`, `"12h"`, `"7d"`.
pub fn parse_ttl(ttl: &str) -> DomainResult<i64> {
    let ttl = ttl.trim();
    let invalid = || DomainError::Validation {
        message: format!("Invalid duration string: {ttl:?}"),
    };

    let (number, multiplier) = match ttl.chars().last() {
        Some('s') => (&ttl[..ttl.len() - 1], 1),
        Some('m') => (&ttl[..ttl.len() - 1], 60),
        Some('h') => (&ttl[..ttl.len() - 1], 3600),
        Some('d') => (&ttl[..ttl.len() - 1], 86400),
        Some(c) if c.is_ascii_digit() => (ttl, 1),
        _ => return Err(invalid()),
    };

    let value: i64 = number.parse().map_err(|_| invalid())?;
    if value < 0 {
        return Err(invalid());
    }

    value.checked_mul(multiplier).ok_or_else(invalid)
}
