//! Main session service implementation

use std::sync::Arc;

use crate::domain::entities::token::TokenMetadata;
use crate::domain::entities::user::User;
use crate::domain::value_objects::IssuedTokens;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::{TokenCodec, TokenStore};

use super::config::SessionServiceConfig;

/// Session service managing the complete refresh-token lifecycle
///
/// Every record follows the state machine
/// `Active -> {Replaced, Revoked, Expired}`; no operation here or in the
/// store transitions a record out of a terminal state.
///
/// The four refresh-specific rejections (`InvalidRefreshToken`,
/// `ReusedRefreshToken`, `RevokedRefreshToken`, `ExpiredRefreshToken`)
/// propagate unchanged to the caller; every other internal failure is
/// normalized to `DomainError::Internal` so implementation details never
/// cross the boundary.
pub struct SessionService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User repository for identity lookups
    user_repository: Arc<U>,
    /// Codec for signing access tokens
    codec: Arc<TokenCodec>,
    /// Store of issued refresh tokens
    token_store: Arc<TokenStore<T>>,
    /// Credential verifier
    password_hasher: PasswordHasher,
    /// Service configuration
    config: SessionServiceConfig,
}

impl<U, T> SessionService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user identity data
    /// * `codec` - Token codec shared with the token store
    /// * `token_store` - Store of issued refresh tokens
    /// * `password_hasher` - Credential verifier
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        codec: Arc<TokenCodec>,
        token_store: Arc<TokenStore<T>>,
        password_hasher: PasswordHasher,
        config: SessionServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            codec,
            token_store,
            password_hasher,
            config,
        }
    }

    /// Check a user's credentials
    ///
    /// Returns the identity on success, `None` on unknown email or wrong
    /// password — the two are indistinguishable to the caller so accounts
    /// cannot be enumerated. Only infrastructure failures produce an error.
    pub async fn validate_user(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let user = match self
            .user_repository
            .find_by_email(email)
            .await
            .map_err(as_infrastructure)?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        if self.password_hasher.verify(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Register a new user account
    ///
    /// # Returns
    /// * `Ok(User)` - The created identity
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> DomainResult<User> {
        let password_hash = self.password_hasher.hash(password)?;
        let user = User::new(email, password_hash, display_name);

        let created = self.user_repository.create(user).await?;
        tracing::info!(user_id = %created.id, "registered new user");
        Ok(created)
    }

    /// Issue a fresh access/refresh token pair for an authenticated user
    ///
    /// Any step failing surfaces as a generic infrastructure error; no
    /// partial record id is ever handed to the caller.
    pub async fn issue_tokens(
        &self,
        user: &User,
        metadata: TokenMetadata,
    ) -> DomainResult<IssuedTokens> {
        let access_token = self.codec.sign_access(user).map_err(as_infrastructure)?;
        let refresh_token = self.token_store.create(user).map_err(as_infrastructure)?;
        let record = self
            .token_store
            .save(user.id, &refresh_token, metadata)
            .await
            .map_err(as_infrastructure)?;

        tracing::debug!(
            user_id = %user.id,
            refresh_token_id = %record.id,
            "issued token pair"
        );

        Ok(IssuedTokens::new(
            access_token,
            refresh_token,
            record.id,
            self.codec.access_ttl_seconds(),
            self.codec.refresh_ttl_seconds(),
        ))
    }

    /// Rotate a refresh token — the security-critical path
    ///
    /// 1. Verify the cryptographic layer (signature, expiry, type).
    /// 2. Load every record for the verified subject.
    /// 3. Match the presented value against the stored digests.
    /// 4. No live match: the value was already rotated (replay) or is a
    ///    forged-but-signed token for a real subject. Both are treated as
    ///    compromise — every record for the subject is revoked before the
    ///    rejection is returned.
    /// 5. Match explicitly revoked (e.g. prior logout): rejected without a
    ///    cascade.
    /// 6. Match past its store-side expiry: that single record is revoked,
    ///    then rejected.
    /// 7. Active match: refetch the subject's profile (the display name may
    ///    have changed since issuance), issue a new pair, persist the new
    ///    record, and only then mark the old record as replaced. Reversing
    ///    that order would open a window with zero valid tokens.
    pub async fn refresh(
        &self,
        raw_refresh_token: &str,
        metadata: TokenMetadata,
    ) -> DomainResult<IssuedTokens> {
        let claims = self.token_store.verify_signature(raw_refresh_token)?;
        let subject = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidRefreshToken))?;

        let records = self
            .token_store
            .find_by_user_id(subject)
            .await
            .map_err(as_infrastructure)?;

        let matched = match self.token_store.find_matched(&records, raw_refresh_token) {
            Some(matched) => matched.clone(),
            None => {
                tracing::warn!(
                    user_id = %subject,
                    "refresh token reuse detected, revoking all sessions for subject"
                );
                if let Err(e) = self.token_store.revoke_all_for_user(subject).await {
                    tracing::error!(
                        user_id = %subject,
                        error = %e,
                        "failed to revoke subject sessions after reuse detection"
                    );
                }
                return Err(DomainError::Token(TokenError::ReusedRefreshToken));
            }
        };

        if matched.is_revoked() {
            return Err(DomainError::Token(TokenError::RevokedRefreshToken));
        }

        if matched.is_expired() {
            self.token_store
                .revoke(matched.id)
                .await
                .map_err(as_infrastructure)?;
            return Err(DomainError::Token(TokenError::ExpiredRefreshToken));
        }

        let user = self
            .user_repository
            .find_by_id(subject)
            .await
            .map_err(as_infrastructure)?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        let tokens = self.issue_tokens(&user, metadata).await?;
        self.token_store
            .mark_replaced(matched.id, tokens.refresh_token_id)
            .await
            .map_err(as_infrastructure)?;

        tracing::debug!(
            user_id = %subject,
            old_record = %matched.id,
            new_record = %tokens.refresh_token_id,
            "rotated refresh token"
        );

        Ok(tokens)
    }

    /// Best-effort logout
    ///
    /// Revokes the record backing the presented token if one can be found.
    /// Always succeeds: absence of a match (or a failure while revoking) is
    /// logged, never surfaced, so the endpoint cannot be used to probe
    /// whether a token value is live.
    ///
    /// When the token still verifies, the lookup is scoped to its subject;
    /// otherwise a bounded scan of recent records is the fallback.
    pub async fn logout(&self, raw_refresh_token: &str) -> DomainResult<()> {
        let subject = self
            .token_store
            .verify_signature(raw_refresh_token)
            .ok()
            .and_then(|claims| claims.user_id().ok());

        let records = match subject {
            Some(user_id) => self.token_store.find_by_user_id(user_id).await,
            None => self.token_store.find_all(self.config.logout_scan_limit).await,
        };

        let records = match records {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "logout lookup failed");
                return Ok(());
            }
        };

        if let Some(matched) = self.token_store.find_matched(&records, raw_refresh_token) {
            if let Err(e) = self.token_store.revoke(matched.id).await {
                tracing::error!(
                    record = %matched.id,
                    error = %e,
                    "failed to revoke refresh token on logout"
                );
            }
        }

        Ok(())
    }
}

/// Normalize any non-security error into a generic infrastructure failure
///
/// Internal details stay internal; callers only learn that the operation
/// is safe to retry.
fn as_infrastructure(error: DomainError) -> DomainError {
    match error {
        error @ DomainError::Internal { .. } => error,
        other => DomainError::internal(format!("Session operation failed: {other}")),
    }
}
