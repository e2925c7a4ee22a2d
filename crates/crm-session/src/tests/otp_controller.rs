use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;

use super::ScriptedOtp;
use crate::{OtpController, OtpError, OtpPhase};
use crm_client::{ClientError, VerifyOutcome};
use crm_config::OtpConfig;

fn controller(service: Arc<ScriptedOtp>) -> OtpController {
    OtpController::new(service, OtpConfig::default())
}

#[tokio::test]
async fn given_invalid_email_when_generate_then_rejected_locally() {
    let service = ScriptedOtp::new("493817");
    let mut controller = controller(service.clone());

    let err = controller.generate("not-an-email").await.unwrap_err();

    assert!(matches!(err, OtpError::EmailInvalid { .. }));
    assert_eq!(service.generate_calls(), 0);
    assert_eq!(controller.phase(), OtpPhase::Idle);
}

#[tokio::test]
async fn given_valid_email_when_generate_then_challenge_and_countdown_start() {
    let service = ScriptedOtp::new("493817");
    let mut controller = controller(service.clone());

    controller.generate("alex@example.com").await.unwrap();

    assert_eq!(controller.phase(), OtpPhase::AwaitingCode);
    assert_eq!(controller.issued_code(), Some("493817"));
    assert_eq!(
        controller.challenge_email().unwrap().as_str(),
        "alex@example.com"
    );

    let countdown = controller.countdown().unwrap();
    assert_eq!(countdown.borrow().remaining_secs, 600);
    assert!(!countdown.borrow().is_expired);
}

#[tokio::test]
async fn given_wrong_length_code_when_verify_then_no_backend_call() {
    let service = ScriptedOtp::new("493817");
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    let err = controller
        .verify("alex@example.com", "49381")
        .await
        .unwrap_err();

    assert!(matches!(err, OtpError::OtpInvalid { .. }));
    assert_eq!(service.verify_calls(), 0);
    assert!(controller.verify_error().is_some());
    assert_eq!(controller.phase(), OtpPhase::AwaitingCode);
}

#[tokio::test]
async fn given_mismatched_code_when_verify_then_challenge_stays_usable() {
    let service = ScriptedOtp::new("493817");
    service.push_verify(Ok(VerifyOutcome::Invalid));
    service.push_verify(Ok(VerifyOutcome::Success {
        profile_status: None,
    }));
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    let err = controller
        .verify("alex@example.com", "111111")
        .await
        .unwrap_err();
    assert!(matches!(err, OtpError::OtpInvalid { .. }));
    assert_eq!(controller.phase(), OtpPhase::AwaitingCode);
    assert!(controller.issued_code().is_some());

    controller
        .verify("alex@example.com", "493817")
        .await
        .unwrap();
    assert_eq!(controller.phase(), OtpPhase::Verified);
    assert_eq!(service.verify_calls(), 2);
}

#[tokio::test]
async fn given_expired_challenge_when_verify_then_resend_required() {
    let service = ScriptedOtp::new("493817");
    service.push_verify(Ok(VerifyOutcome::Expired));
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    let err = controller
        .verify("alex@example.com", "493817")
        .await
        .unwrap_err();

    assert!(matches!(err, OtpError::OtpExpired { .. }));
    assert_eq!(controller.phase(), OtpPhase::Expired);
    assert!(controller.countdown().is_none());
    assert!(controller.issued_code().is_none());
}

#[tokio::test]
async fn given_correct_code_when_verify_then_profile_status_passes_through() {
    let service = ScriptedOtp::new("493817");
    service.push_verify(Ok(VerifyOutcome::Success {
        profile_status: Some(json!({ "incomplete": true })),
    }));
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    let status = controller
        .verify("alex@example.com", "493817")
        .await
        .unwrap();

    assert_eq!(status, Some(json!({ "incomplete": true })));
    assert_eq!(controller.phase(), OtpPhase::Verified);
    assert!(controller.verify_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn given_resend_then_countdown_resets_and_verify_error_clears() {
    let service = ScriptedOtp::new("493817");
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    // Scripted default verify reply is a mismatch.
    let _ = controller.verify("alex@example.com", "999999").await;
    assert!(controller.verify_error().is_some());

    sleep(Duration::from_millis(30_010)).await;
    let countdown = controller.countdown().unwrap();
    assert_eq!(countdown.borrow().remaining_secs, 570);

    controller.resend("alex@example.com").await.unwrap();

    assert!(controller.verify_error().is_none());
    let countdown = controller.countdown().unwrap();
    assert_eq!(countdown.borrow().remaining_secs, 600);
    assert_eq!(controller.phase(), OtpPhase::AwaitingCode);
}

#[tokio::test(start_paused = true)]
async fn given_countdown_expires_then_phase_reports_expired_until_resend() {
    let service = ScriptedOtp::new("493817");
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    sleep(Duration::from_millis(600_010)).await;

    assert_eq!(controller.phase(), OtpPhase::Expired);
    let countdown = controller.countdown().unwrap();
    assert_eq!(countdown.borrow().remaining_secs, 0);
    assert!(countdown.borrow().is_expired);

    controller.resend("alex@example.com").await.unwrap();

    assert_eq!(controller.phase(), OtpPhase::AwaitingCode);
    assert_eq!(controller.countdown().unwrap().borrow().remaining_secs, 600);
}

#[tokio::test]
async fn given_backend_failure_when_generate_then_state_unchanged() {
    let service = ScriptedOtp::new("493817");
    service.push_generate(Err(ClientError::status(502, "bad gateway")));
    let mut controller = controller(service.clone());

    let err = controller.generate("alex@example.com").await.unwrap_err();

    assert!(matches!(err, OtpError::Backend { .. }));
    assert_eq!(controller.phase(), OtpPhase::Idle);
    assert!(controller.countdown().is_none());
}

#[tokio::test]
async fn given_active_challenge_when_abandoned_then_back_to_idle() {
    let service = ScriptedOtp::new("493817");
    let mut controller = controller(service.clone());
    controller.generate("alex@example.com").await.unwrap();

    controller.abandon();

    assert_eq!(controller.phase(), OtpPhase::Idle);
    assert!(controller.countdown().is_none());
    assert!(controller.issued_code().is_none());
    assert!(controller.verify_error().is_none());
}
