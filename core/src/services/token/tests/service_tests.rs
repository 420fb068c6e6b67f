//! Tests for session token issuance and verification

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{DomainError, TokenError};
use crate::services::token::config::TokenServiceConfig;
use crate::services::token::service::TokenService;

fn sample_user() -> User {
    User::new(
        "Ayesha Rahman".to_string(),
        "+8801712345678".to_string(),
        "Building 1".to_string(),
        "A1".to_string(),
    )
}

fn build_service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret-key".to_string(),
        token_validity_days: 7,
        issuer: "shopnonagar-connect".to_string(),
    })
}

#[test]
fn test_issue_and_verify_round_trip() {
    let service = build_service();
    let user = sample_user();

    let (token, expires_in) = service.issue_for_user(&user).unwrap();
    assert_eq!(expires_in, 7 * 86400);

    let claims = service.verify_token(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.phone, user.phone);
    assert_eq!(claims.role, UserRole::User);
    assert_eq!(claims.iss, "shopnonagar-connect");
    assert!(!claims.is_expired());
}

#[test]
fn test_garbage_token_is_invalid() {
    let service = build_service();
    let result = service.verify_token("not-a-jwt");
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_token_signed_with_other_secret_is_invalid() {
    let service = build_service();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "a-different-secret".to_string(),
        token_validity_days: 7,
        issuer: "shopnonagar-connect".to_string(),
    });

    let (token, _) = other.issue_for_user(&sample_user()).unwrap();
    let result = service.verify_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_token_with_wrong_issuer_is_invalid() {
    let service = build_service();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret-key".to_string(),
        token_validity_days: 7,
        issuer: "someone-else".to_string(),
    });

    let (token, _) = other.issue_for_user(&sample_user()).unwrap();
    let result = service.verify_token(&token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidToken))
    ));
}

#[test]
fn test_admin_role_survives_round_trip() {
    let service = build_service();
    let mut user = sample_user();
    user.role = UserRole::Admin;

    let (token, _) = service.issue_for_user(&user).unwrap();
    let claims = service.verify_token(&token).unwrap();
    assert_eq!(claims.role, UserRole::Admin);
}
