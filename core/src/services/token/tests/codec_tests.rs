//! Unit tests for the token codec

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::entities::token::{Claims, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenCodec, TokenConfig};

fn test_user() -> User {
    User::new(
        "user@example.com",
        "$2b$04$notachecksum".to_string(),
        Some("Alex".to_string()),
    )
}

fn codec() -> TokenCodec {
    TokenCodec::new(&TokenConfig::default()).unwrap()
}

#[test]
fn test_access_token_round_trip() {
    let codec = codec();
    let user = test_user();

    let token = codec.sign_access(&user).unwrap();
    let claims = codec.verify(&token, TokenType::Access).unwrap();

    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.name, Some("Alex".to_string()));
    assert_eq!(claims.token_type, TokenType::Access);
}

#[test]
fn test_refresh_token_round_trip() {
    let codec = codec();
    let user = test_user();

    let token = codec.sign_refresh(&user).unwrap();
    let claims = codec.verify(&token, TokenType::Refresh).unwrap();

    assert_eq!(claims.token_type, TokenType::Refresh);
    assert_eq!(claims.exp - claims.iat, codec.refresh_ttl_seconds());
}

#[test]
fn test_type_mismatch_is_rejected() {
    let codec = codec();
    let user = test_user();

    let access = codec.sign_access(&user).unwrap();
    let result = codec.verify(&access, TokenType::Refresh);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[test]
fn test_tampered_token_is_rejected() {
    let codec = codec();
    let user = test_user();

    let mut token = codec.sign_refresh(&user).unwrap();
    // corrupt the signature segment
    token.pop();
    token.push('A');

    let result = codec.verify(&token, TokenType::Refresh);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[test]
fn test_garbage_token_is_rejected() {
    let codec = codec();

    let result = codec.verify("not-a-jwt", TokenType::Refresh);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[test]
fn test_token_signed_with_old_secret_fails_verification() {
    let user = test_user();
    let old = TokenCodec::new(&TokenConfig {
        secret: "old-secret".to_string(),
        ..TokenConfig::default()
    })
    .unwrap();
    let current = TokenCodec::new(&TokenConfig {
        secret: "new-secret".to_string(),
        ..TokenConfig::default()
    })
    .unwrap();

    let token = old.sign_refresh(&user).unwrap();
    let result = current.verify(&token, TokenType::Refresh);

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[test]
fn test_expired_token_is_rejected_same_as_malformed() {
    let config = TokenConfig::default();
    let codec = TokenCodec::new(&config).unwrap();
    let user = test_user();

    // sign claims that expired two minutes ago, with the real secret
    let claims = Claims::new(
        user.id,
        &user.email,
        None,
        TokenType::Refresh,
        -120,
    );
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    let result = codec.verify(&token, TokenType::Refresh);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[test]
fn test_decode_unverified_reads_claims_without_trusting_them() {
    let codec = codec();
    let user = test_user();

    let mut token = codec.sign_refresh(&user).unwrap();
    token.pop();
    token.push('A');

    // signature is broken, but the payload is still inspectable
    let claims = codec.decode_unverified(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);

    assert!(codec.decode_unverified("garbage").is_none());
}

#[test]
fn test_custom_issuer_and_audience_round_trip() {
    let codec = TokenCodec::new(&TokenConfig {
        issuer: "other-issuer".to_string(),
        audience: "other-service".to_string(),
        ..TokenConfig::default()
    })
    .unwrap();

    let token = codec.sign_refresh(&test_user()).unwrap();
    let claims = codec.verify(&token, TokenType::Refresh).unwrap();

    assert_eq!(claims.iss, "other-issuer");
    assert_eq!(claims.aud, "other-service");
}

#[test]
fn test_ttl_configuration_is_honored() {
    let codec = TokenCodec::new(&TokenConfig {
        access_ttl: "5m".to_string(),
        refresh_ttl: "1d".to_string(),
        ..TokenConfig::default()
    })
    .unwrap();

    assert_eq!(codec.access_ttl_seconds(), 300);
    assert_eq!(codec.refresh_ttl_seconds(), 86400);
}

#[test]
fn test_codec_rejects_bad_ttl_config() {
    let result = TokenCodec::new(&TokenConfig {
        refresh_ttl: "next week".to_string(),
        ..TokenConfig::default()
    });

    assert!(result.is_err());
}
