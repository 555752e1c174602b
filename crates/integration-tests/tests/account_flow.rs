//! End-to-end account, profile, and notification flows.

#![allow(clippy::unwrap_used)]

use brewline_engine::profile::UserProfile;
use brewline_engine::{EngineError, ValidationError};
use brewline_integration_tests::TestContext;

// ============================================================================
// Account lifecycle
// ============================================================================

#[tokio::test]
async fn test_register_login_logout_lifecycle() {
    let ctx = TestContext::new();
    let auth = ctx.engine.auth();

    auth.register("ada@example.com", "difference engine")
        .await
        .unwrap();

    // Registration alone does not start a session.
    assert!(auth.current_user().await.unwrap().is_none());

    auth.login("ada@example.com", "difference engine")
        .await
        .unwrap();
    assert_eq!(
        auth.current_user().await.unwrap().unwrap().as_str(),
        "ada@example.com"
    );

    auth.logout().await.unwrap();
    assert!(auth.current_user().await.unwrap().is_none());

    // Logging out twice is harmless.
    auth.logout().await.unwrap();
}

#[tokio::test]
async fn test_two_accounts_do_not_collide() {
    let ctx = TestContext::new();
    let auth = ctx.engine.auth();

    auth.register("ada@example.com", "difference engine")
        .await
        .unwrap();
    auth.register("grace@example.com", "nanoseconds!")
        .await
        .unwrap();

    // Each account only accepts its own password.
    auth.login("grace@example.com", "nanoseconds!").await.unwrap();
    let err = auth
        .login("ada@example.com", "nanoseconds!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::InvalidCredentials)
    ));
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_survives_only_when_valid() {
    let ctx = TestContext::new();
    let profile = ctx.engine.profile();

    let invalid = UserProfile {
        name: "Ada".to_string(),
        email: String::new(),
        phone: "555-0100".to_string(),
        avatar: String::new(),
    };
    assert!(profile.save(&invalid).await.is_err());
    assert!(profile.load().await.unwrap().is_none());

    let valid = UserProfile {
        email: "ada@example.com".to_string(),
        ..invalid
    };
    profile.save(&valid).await.unwrap();
    assert_eq!(profile.load().await.unwrap(), Some(valid));
}

// ============================================================================
// Notifications
// ============================================================================

#[tokio::test]
async fn test_notification_inbox_round_trip() {
    let ctx = TestContext::new();
    let inbox = ctx.engine.notifications();

    let first = inbox.push("Order placed for $12.40").await.unwrap();
    inbox.push("Your order is ready").await.unwrap();
    assert_eq!(inbox.list().await.unwrap().len(), 2);

    inbox.delete(first.id).await.unwrap();
    let remaining = inbox.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].message, "Your order is ready");

    inbox.clear_all().await.unwrap();
    assert!(inbox.list().await.unwrap().is_empty());
}
