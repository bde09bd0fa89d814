//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token lifetime as a duration string (e.g. "15m")
    pub access_token_ttl: String,

    /// Refresh token lifetime as a duration string (e.g. "7d")
    pub refresh_token_ttl: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            access_token_ttl: String::from("15m"),
            refresh_token_ttl: String::from("7d"),
            issuer: String::from("keygate"),
            audience: String::from("keygate-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if the default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_ttl: std::env::var("JWT_ACCESS_TOKEN_TTL")
                .unwrap_or(defaults.access_token_ttl),
            refresh_token_ttl: std::env::var("JWT_REFRESH_TOKEN_TTL")
                .unwrap_or(defaults.refresh_token_ttl),
            issuer: defaults.issuer,
            audience: defaults.audience,
        };
        let password = PasswordConfig {
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(PasswordConfig::default().bcrypt_cost),
        };

        Self { jwt, password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_ttl, "15m");
        assert_eq!(config.refresh_token_ttl, "7d");
        assert_eq!(config.issuer, "keygate");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_with_secret() {
        let config = JwtConfig::new("my-secret");
        assert!(!config.is_using_default_secret());
        assert_eq!(config.audience, "keygate-api");
    }

    #[test]
    fn test_password_config_default() {
        let config = PasswordConfig::default();
        assert_eq!(config.bcrypt_cost, 12);
    }
}
