//! Tests for OTP issuance and verification

use std::sync::Arc;

use crate::domain::entities::otp::OtpPurpose;
use crate::errors::{AuthError, DomainError};
use crate::repositories::otp::MockOtpRepository;
use crate::services::otp::config::OtpServiceConfig;
use crate::services::otp::service::OtpService;

use super::mocks::MockSmsSender;

const PHONE: &str = "+8801712345678";

fn build_service() -> (
    OtpService<MockOtpRepository, MockSmsSender>,
    Arc<MockOtpRepository>,
    Arc<MockSmsSender>,
) {
    let repo = Arc::new(MockOtpRepository::new());
    let sms = Arc::new(MockSmsSender::new());
    let service = OtpService::new(repo.clone(), sms.clone(), OtpServiceConfig::default());
    (service, repo, sms)
}

#[tokio::test]
async fn test_send_code_stores_and_dispatches() {
    let (service, repo, sms) = build_service();

    let result = service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    assert_eq!(result.expires_in_seconds, 600);
    assert_eq!(sms.sent_count().await, 1);

    let code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();
    let (to, message) = sms.last_message().await.unwrap();
    assert_eq!(to, PHONE);
    assert!(message.contains(&code));
    assert!(message.contains("10 minutes"));
    assert!(message.contains("Shopnonagar Connect"));
}

#[tokio::test]
async fn test_resend_inside_cooldown_is_rate_limited() {
    let (service, _repo, sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let result = service.send_code(PHONE, OtpPurpose::Login).await;

    match result {
        Err(DomainError::Auth(AuthError::RateLimited {
            retry_after_seconds,
        })) => {
            assert!(retry_after_seconds > 0 && retry_after_seconds <= 60);
        }
        other => panic!("expected RateLimited, got {:?}", other.map(|r| r.message_id)),
    }
    // Rejected request must not dispatch anything
    assert_eq!(sms.sent_count().await, 1);
}

#[tokio::test]
async fn test_resend_after_cooldown_supersedes_old_code() {
    let (service, repo, sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let old_code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();

    repo.age_active(PHONE, OtpPurpose::Login, 61).await;
    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();

    let new_code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();
    assert_eq!(sms.sent_count().await, 2);

    // The old code must no longer verify; with a fresh code active it is
    // indistinguishable from a wrong guess
    if old_code != new_code {
        let result = service
            .check_code(PHONE, OtpPurpose::Login, &old_code)
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidOtp { .. }))
        ));
    }

    // The new code still verifies
    service
        .check_code(PHONE, OtpPurpose::Login, &new_code)
        .await
        .unwrap();

    // With the lane empty, the superseded code reports invalid-or-expired
    let result = service
        .check_code(PHONE, OtpPurpose::Login, &old_code)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::OtpInvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_send_code_after_expiry_issues_fresh_code() {
    let (service, repo, sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    repo.expire_active(PHONE, OtpPurpose::Login).await;

    // A lapsed code must not block a new request, even before the
    // background reaper has run
    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();

    assert_eq!(sms.sent_count().await, 2);
    assert!(repo.active_code(PHONE, OtpPurpose::Login).await.is_some());
}

#[tokio::test]
async fn test_purposes_do_not_share_cooldown() {
    let (service, _repo, sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    service
        .send_code(PHONE, OtpPurpose::Registration)
        .await
        .unwrap();

    assert_eq!(sms.sent_count().await, 2);
}

#[tokio::test]
async fn test_sms_failure_retires_code_and_frees_lane() {
    let (service, repo, sms) = build_service();
    sms.set_failing(true);

    let result = service.send_code(PHONE, OtpPurpose::Login).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::SmsDispatchFailed))
    ));
    assert!(repo.active_code(PHONE, OtpPurpose::Login).await.is_none());

    // The failed send must not start a cooldown
    sms.set_failing(false);
    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
}

#[tokio::test]
async fn test_check_code_success_consumes_record() {
    let (service, repo, _sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();

    let record = service
        .check_code(PHONE, OtpPurpose::Login, &code)
        .await
        .unwrap();
    assert_eq!(record.phone, PHONE);

    // Replaying the same code finds nothing active
    let replay = service.check_code(PHONE, OtpPurpose::Login, &code).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::OtpInvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_check_code_rejects_malformed_input() {
    let (service, _repo, _sms) = build_service();
    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();

    for bad in ["12345", "1234567", "12a456", "", "      "] {
        let result = service.check_code(PHONE, OtpPurpose::Login, bad).await;
        assert!(
            matches!(result, Err(DomainError::Auth(AuthError::InvalidOtpFormat))),
            "input: {:?}",
            bad
        );
    }
}

#[tokio::test]
async fn test_check_code_without_active_record() {
    let (service, _repo, _sms) = build_service();

    let result = service.check_code(PHONE, OtpPurpose::Login, "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::OtpInvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_check_code_expired_record() {
    let (service, repo, _sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();
    repo.expire_active(PHONE, OtpPurpose::Login).await;

    let result = service.check_code(PHONE, OtpPurpose::Login, &code).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::OtpInvalidOrExpired))
    ));
}

#[tokio::test]
async fn test_wrong_guesses_count_down_then_lock_out() {
    let (service, repo, _sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    // Three recorded failures count down 2, 1, 0
    for expected_left in [2, 1, 0] {
        let result = service.check_code(PHONE, OtpPurpose::Login, wrong).await;
        match result {
            Err(DomainError::Auth(AuthError::InvalidOtp { attempts_left })) => {
                assert_eq!(attempts_left, expected_left);
            }
            other => panic!("expected InvalidOtp, got {:?}", other.map(|r| r.id)),
        }
    }

    // The fourth call locks out without evaluating the guess, even with the
    // correct code
    let result = service.check_code(PHONE, OtpPurpose::Login, &code).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::TooManyAttempts))
    ));

    // Lockout retires the record, so the lane is free for a fresh send
    assert!(repo.active_code(PHONE, OtpPurpose::Login).await.is_none());
    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
}

#[tokio::test]
async fn test_correct_code_after_some_failures_still_verifies() {
    let (service, repo, _sms) = build_service();

    service.send_code(PHONE, OtpPurpose::Login).await.unwrap();
    let code = repo.active_code(PHONE, OtpPurpose::Login).await.unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    service
        .check_code(PHONE, OtpPurpose::Login, wrong)
        .await
        .unwrap_err();
    service
        .check_code(PHONE, OtpPurpose::Login, wrong)
        .await
        .unwrap_err();

    service
        .check_code(PHONE, OtpPurpose::Login, &code)
        .await
        .unwrap();
}
