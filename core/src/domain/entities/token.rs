//! Token entities for JWT-based session management.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "keygate";

/// JWT audience
pub const JWT_AUDIENCE: &str = "keygate-api";

/// Discriminates access tokens from refresh tokens inside signed claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential proving identity for API calls
    Access,
    /// Long-lived, single-use-per-rotation credential
    Refresh,
}

/// Claims structure for the JWT payload
///
/// The `token_type` field is part of the signed payload and is checked at
/// the verification boundary, so an access token can never be replayed as
/// a refresh token or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the subject at issuance time
    pub email: String,

    /// Display name of the subject at issuance time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether this is an access or a refresh token
    pub token_type: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a token of the given type
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's email (already normalized)
    /// * `name` - The user's display name, if any
    /// * `token_type` - Access or Refresh
    /// * `ttl_seconds` - Lifetime of the token in seconds
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        name: Option<String>,
        token_type: TokenType,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            name,
            token_type,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Issuance context recorded alongside a refresh token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// IP address the token was issued to
    pub ip_address: Option<String>,

    /// User agent the token was issued to
    pub user_agent: Option<String>,
}

impl TokenMetadata {
    /// Metadata with no issuance context
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Durable record of an issued refresh token
///
/// A record moves through a small state machine:
/// `Active -> {Replaced, Revoked, Expired}`. The terminal states absorb:
/// no operation transitions a record out of them. Records are never
/// deleted by the core; retention is an external concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the raw token value
    pub token_hash: String,

    /// Timestamp when the token was issued
    pub issued_at: DateTime<Utc>,

    /// Store-side expiry, honored independently of the signed `exp` claim
    pub expires_at: DateTime<Utc>,

    /// Set when the token was explicitly revoked (e.g. logout)
    pub revoked_at: Option<DateTime<Utc>>,

    /// Set when the token was consumed by a successful rotation
    pub replaced_by: Option<Uuid>,

    /// Issuance context (IP, user agent)
    pub metadata: TokenMetadata,
}

impl RefreshTokenRecord {
    /// Creates a new active refresh token record
    pub fn new(
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
        metadata: TokenMetadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            issued_at: Utc::now(),
            expires_at,
            revoked_at: None,
            replaced_by: None,
            metadata,
        }
    }

    /// Checks if the record has expired
    ///
    /// The boundary fails closed: `expires_at == now` counts as expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Checks if the record was explicitly revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Checks if the record was consumed by a rotation
    pub fn is_consumed(&self) -> bool {
        self.replaced_by.is_some()
    }

    /// Checks if the record can still be rotated
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.is_revoked() && !self.is_consumed()
    }

    /// Revokes the record
    ///
    /// Idempotent: the first revocation timestamp is kept.
    pub fn revoke(&mut self) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(Utc::now());
        }
    }

    /// Marks the record as consumed by the given successor record
    ///
    /// Only the first rotation wins; a consumed record stays pointing at
    /// its original successor.
    pub fn mark_replaced(&mut self, new_id: Uuid) {
        if self.replaced_by.is_none() {
            self.replaced_by = Some(new_id);
        }
    }
}
