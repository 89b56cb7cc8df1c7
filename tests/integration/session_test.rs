//! Session lifecycle integration tests.

use std::sync::Arc;

use chrono::Duration;

use gatehouse_auth::{FileStorage, HistoryNavigator, InitOutcome, SessionManager};
use gatehouse_core::config::{RoutesConfig, SessionConfig};
use gatehouse_core::events::SessionEvent;
use gatehouse_core::traits::{Navigator, SystemClock};

use crate::helpers::{TestApp, token_for};

#[tokio::test]
async fn test_stored_future_session_is_restored() {
    let app = TestApp::new("/dashboard");
    app.seed(&token_for("u-100"), Duration::hours(3));

    assert_eq!(app.manager.initialize().await, InitOutcome::Restored);

    let state = app.manager.snapshot();
    assert!(state.is_authenticated());
    assert!(!state.loading);
    let identity = state.identity().unwrap();
    assert_eq!(identity.user_id, "u-100");
    assert_eq!(identity.email, "u-100@example.com");
    assert_eq!(identity.role_name, "Supervisor");
}

#[tokio::test]
async fn test_stored_past_session_is_cleared() {
    let app = TestApp::new("/dashboard");
    app.seed("X", Duration::hours(-1));

    assert_eq!(app.manager.initialize().await, InitOutcome::Expired);

    assert!(!app.manager.is_authenticated());
    assert!(!app.manager.loading());
    assert!(!app.store_has_session());
}

#[tokio::test]
async fn test_stored_malformed_token_self_heals() {
    let app = TestApp::new("/dashboard");
    let mut events = app.manager.events();
    app.seed("definitely-not-a-jwt", Duration::hours(1));

    assert_eq!(app.manager.initialize().await, InitOutcome::Discarded);

    assert!(!app.manager.is_authenticated());
    assert!(app.manager.identity().is_none());
    assert!(!app.store_has_session());
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Discarded { .. }
    ));
}

#[tokio::test]
async fn test_login_authenticates_with_claims() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;

    app.manager.login(&token_for("u-200"));

    assert!(app.manager.is_authenticated());
    assert_eq!(app.manager.identity().unwrap().user_id, "u-200");
    assert!(app.store_has_session());
}

#[tokio::test]
async fn test_login_with_undecodable_token_still_authenticates() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;

    app.manager.login("opaque-session-handle");

    assert!(app.manager.is_authenticated());
    assert!(app.manager.identity().unwrap().is_empty());
    assert_eq!(
        app.manager.token(),
        Some("opaque-session-handle".to_string())
    );
    assert!(app.store_has_session());
}

#[tokio::test]
async fn test_login_with_empty_token_is_ignored() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;
    let mut states = app.manager.subscribe();
    states.borrow_and_update();

    app.manager.login("");

    assert!(!app.manager.is_authenticated());
    assert_eq!(app.manager.token(), None);
    assert!(!app.store_has_session());
    assert!(!states.has_changed().unwrap());

    let reloaded = app.reload("/login");
    assert_eq!(reloaded.manager.initialize().await, InitOutcome::Empty);
}

#[tokio::test]
async fn test_undecodable_login_is_discarded_on_reload() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;
    app.manager.login("opaque-session-handle");

    let reloaded = app.reload("/dashboard");
    assert_eq!(reloaded.manager.initialize().await, InitOutcome::Discarded);
    assert!(!reloaded.manager.is_authenticated());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new("/dashboard");
    app.manager.initialize().await;
    app.manager.login(&token_for("u-300"));

    app.manager.logout();
    assert!(!app.manager.is_authenticated());
    assert!(!app.store_has_session());
    assert_eq!(app.navigator.current(), "/login");

    app.manager.logout();
    assert!(!app.manager.is_authenticated());
    assert!(!app.store_has_session());
    assert_eq!(app.navigator.current(), "/login");
    assert_eq!(app.navigator.replacements(), 2);
}

#[tokio::test]
async fn test_login_logout_reload_round_trip() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;
    app.manager.login(&token_for("u-400"));
    app.manager.logout();

    let reloaded = app.reload("/login");
    assert_eq!(reloaded.manager.initialize().await, InitOutcome::Empty);
    assert!(!reloaded.manager.is_authenticated());
}

#[tokio::test]
async fn test_logout_while_store_unavailable_clears_once_store_returns() {
    let app = TestApp::new("/dashboard");
    app.manager.initialize().await;
    app.manager.login(&token_for("u-450"));

    app.storage.set_available(false);
    app.manager.logout();
    assert!(!app.manager.is_authenticated());

    app.storage.set_available(true);
    assert_eq!(
        app.manager.initialize().await,
        InitOutcome::AlreadyInitialized
    );
    assert!(!app.store_has_session());

    let reloaded = app.reload("/dashboard");
    assert_eq!(reloaded.manager.initialize().await, InitOutcome::Empty);
    assert!(!reloaded.manager.is_authenticated());
}

#[tokio::test]
async fn test_session_survives_reload_within_window_only() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;
    app.manager.login(&token_for("u-500"));

    app.clock.advance(Duration::hours(7));
    let within = app.reload("/dashboard");
    assert_eq!(within.manager.initialize().await, InitOutcome::Restored);
    assert_eq!(within.manager.identity().unwrap().user_id, "u-500");

    app.clock.advance(Duration::hours(1));
    let after = app.reload("/dashboard");
    assert_eq!(after.manager.initialize().await, InitOutcome::Expired);
    assert!(!after.manager.is_authenticated());
}

#[tokio::test]
async fn test_expiry_is_not_detected_between_reloads() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;
    app.manager.login(&token_for("u-600"));

    app.clock.advance(Duration::hours(12));

    assert!(app.manager.is_authenticated());
    assert_eq!(app.manager.remaining(), Some(Duration::zero()));
}

#[tokio::test]
async fn test_subscribers_see_each_change() {
    let app = TestApp::new("/login");
    let mut first = app.manager.subscribe();
    let mut second = app.manager.subscribe();

    app.manager.initialize().await;
    assert!(first.has_changed().unwrap());
    assert!(!first.borrow_and_update().loading);

    app.manager.login(&token_for("u-700"));
    assert!(first.borrow_and_update().is_authenticated());
    assert!(second.borrow_and_update().is_authenticated());
}

#[tokio::test]
async fn test_file_store_keeps_session_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let open = |navigator: HistoryNavigator| {
        SessionManager::new(
            Arc::new(FileStorage::new(&path)),
            Arc::new(SystemClock),
            Arc::new(navigator),
            SessionConfig::default(),
            &RoutesConfig::default(),
        )
    };

    let first = open(HistoryNavigator::new("/login"));
    first.initialize().await;
    first.login(&token_for("u-800"));

    let second = open(HistoryNavigator::new("/dashboard"));
    assert_eq!(second.initialize().await, InitOutcome::Restored);
    assert_eq!(second.identity().unwrap().user_id, "u-800");
    assert!(second.remaining().unwrap() > Duration::hours(7));

    second.logout();
    let third = open(HistoryNavigator::new("/dashboard"));
    assert_eq!(third.initialize().await, InitOutcome::Empty);
}
