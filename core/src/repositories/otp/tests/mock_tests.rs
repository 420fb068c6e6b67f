//! Tests for the mock OTP repository

use crate::domain::entities::otp::{OtpCode, OtpPurpose};
use crate::errors::{AuthError, DomainError};
use crate::repositories::otp::{MockOtpRepository, OtpRepository};

fn sample_otp(phone: &str, purpose: OtpPurpose) -> OtpCode {
    OtpCode::new(phone.to_string(), purpose)
}

#[tokio::test]
async fn test_insert_and_find_active() {
    let repo = MockOtpRepository::new();
    let otp = sample_otp("+8801712345678", OtpPurpose::Login);

    repo.insert(otp.clone()).await.unwrap();

    let found = repo
        .find_active("+8801712345678", OtpPurpose::Login)
        .await
        .unwrap()
        .expect("record should be active");
    assert_eq!(found.id, otp.id);
}

#[tokio::test]
async fn test_insert_conflict_on_second_active_record() {
    let repo = MockOtpRepository::new();
    repo.insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    let result = repo
        .insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::Conflict { .. }))
    ));
}

#[tokio::test]
async fn test_purposes_are_independent_lanes() {
    let repo = MockOtpRepository::new();
    repo.insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    // Same phone, different purpose: no conflict
    repo.insert(sample_otp("+8801712345678", OtpPurpose::Registration))
        .await
        .unwrap();

    assert!(repo
        .find_active("+8801712345678", OtpPurpose::Login)
        .await
        .unwrap()
        .is_some());
    assert!(repo
        .find_active("+8801712345678", OtpPurpose::Registration)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_mark_used_hides_record_and_allows_reissue() {
    let repo = MockOtpRepository::new();
    let otp = repo
        .insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    repo.mark_used(otp.id).await.unwrap();
    // Idempotent
    repo.mark_used(otp.id).await.unwrap();

    assert!(repo
        .find_active("+8801712345678", OtpPurpose::Login)
        .await
        .unwrap()
        .is_none());

    // Lane is free again
    repo.insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_increment_attempts_returns_updated_count() {
    let repo = MockOtpRepository::new();
    let otp = repo
        .insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    assert_eq!(repo.increment_attempts(otp.id).await.unwrap(), 1);
    assert_eq!(repo.increment_attempts(otp.id).await.unwrap(), 2);
    assert_eq!(repo.increment_attempts(otp.id).await.unwrap(), 3);
}

#[tokio::test]
async fn test_expired_record_is_invisible_even_if_unused() {
    let repo = MockOtpRepository::new();
    repo.insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    repo.expire_active("+8801712345678", OtpPurpose::Login).await;

    assert!(repo
        .find_active("+8801712345678", OtpPurpose::Login)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_insert_retires_expired_record_instead_of_conflicting() {
    let repo = MockOtpRepository::new();
    let old = repo
        .insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    repo.expire_active("+8801712345678", OtpPurpose::Login).await;

    // The expired leftover must not block the lane
    let fresh = repo
        .insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();

    let found = repo
        .find_active("+8801712345678", OtpPurpose::Login)
        .await
        .unwrap()
        .expect("fresh record should be active");
    assert_eq!(found.id, fresh.id);

    // The old row was consumed, not deleted
    let retired = repo.get(old.id).await.unwrap();
    assert!(retired.is_used);
}

#[tokio::test]
async fn test_delete_expired_reaps_only_expired_rows() {
    let repo = MockOtpRepository::new();
    repo.insert(sample_otp("+8801712345678", OtpPurpose::Login))
        .await
        .unwrap();
    repo.insert(sample_otp("+8801812345678", OtpPurpose::Login))
        .await
        .unwrap();

    repo.expire_active("+8801712345678", OtpPurpose::Login).await;

    let deleted = repo.delete_expired().await.unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(repo.len().await, 1);
}
