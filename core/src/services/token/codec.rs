//! JWT signing and verification

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::{parse_ttl, TokenConfig};

/// Signs and verifies compact, tamper-evident tokens (HS256)
///
/// Stateless except for the signing secret. Verification collapses every
/// failure mode (bad signature, malformed payload, expired, wrong type)
/// into a single invalid-token error per expected type: distinguishing
/// "expired" from "malformed" is done later against store state, never
/// against signature state, so the codec cannot be used as a validity
/// oracle.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenCodec {
    /// Creates a codec from configuration
    ///
    /// Fails if either TTL string does not parse.
    pub fn new(config: &TokenConfig) -> DomainResult<Self> {
        let access_ttl_seconds = parse_ttl(&config.access_ttl)?;
        let refresh_ttl_seconds = parse_ttl(&config.refresh_ttl)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // fail closed at the expiry boundary
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_seconds,
            refresh_ttl_seconds,
        })
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }

    /// Signs a short-lived access token for the user
    pub fn sign_access(&self, user: &User) -> DomainResult<String> {
        let claims = self.claims_for(user, TokenType::Access, self.access_ttl_seconds);
        self.encode(&claims)
    }

    /// Signs a long-lived refresh token for the user
    pub fn sign_refresh(&self, user: &User) -> DomainResult<String> {
        let claims = self.claims_for(user, TokenType::Refresh, self.refresh_ttl_seconds);
        self.encode(&claims)
    }

    /// Builds claims stamped with the codec's configured issuer and audience
    /// so signed tokens always pass this codec's own validation.
    fn claims_for(&self, user: &User, token_type: TokenType, ttl_seconds: i64) -> Claims {
        let mut claims = Claims::new(
            user.id,
            &user.email,
            user.display_name.clone(),
            token_type,
            ttl_seconds,
        );
        claims.iss = self.issuer.clone();
        claims.aud = self.audience.clone();
        claims
    }

    fn encode(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::SigningFailed))
    }

    /// Validates signature, expiry, issuer/audience, and token type
    ///
    /// Every failure maps to the same error for the expected type; callers
    /// must not be able to tell a forged token from an expired one at this
    /// layer.
    pub fn verify(&self, token: &str, expected: TokenType) -> DomainResult<Claims> {
        let invalid = || match expected {
            TokenType::Access => TokenError::InvalidAccessToken,
            TokenType::Refresh => TokenError::InvalidRefreshToken,
        };

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| DomainError::Token(invalid()))?;

        if data.claims.token_type != expected {
            return Err(DomainError::Token(invalid()));
        }

        Ok(data.claims)
    }

    /// Non-verifying decode for inspecting claims without trusting them
    ///
    /// Used only for defaulting (the store derives its record expiry from
    /// the `exp` claim of a token it just signed). Never make an
    /// authorization decision from these claims.
    pub fn decode_unverified(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }
}
