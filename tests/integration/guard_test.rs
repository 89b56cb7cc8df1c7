//! Route guard integration tests.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Duration;

use gatehouse_auth::{Guarded, Rendered, RouteGuard, RouteTable, SessionSnapshot, VisitOutcome};
use gatehouse_core::config::RoutesConfig;
use gatehouse_core::traits::Navigator;

use crate::helpers::{TestApp, token_for};

#[tokio::test]
async fn test_protected_view_hidden_while_loading() {
    let app = TestApp::new("/dashboard");
    let renders = Cell::new(0);
    let mut guarded = Guarded::new(
        RouteGuard::require_authenticated(&RoutesConfig::default()),
        |_: &SessionSnapshot| renders.set(renders.get() + 1),
        Arc::new(app.navigator.clone()),
    );

    assert!(app.manager.loading());
    assert_eq!(guarded.render(&app.manager.snapshot()), Rendered::Placeholder);
    assert_eq!(renders.get(), 0);
    assert_eq!(app.navigator.replacements(), 0);
}

#[tokio::test]
async fn test_anonymous_visitor_redirected_exactly_once() {
    let app = TestApp::new("/dashboard");
    app.manager.initialize().await;

    let renders = Cell::new(0);
    let mut guarded = Guarded::new(
        RouteGuard::require_authenticated(&RoutesConfig::default()),
        |_: &SessionSnapshot| renders.set(renders.get() + 1),
        Arc::new(app.navigator.clone()),
    );

    for _ in 0..3 {
        assert!(guarded.render(&app.manager.snapshot()).is_placeholder());
    }

    assert_eq!(renders.get(), 0);
    assert_eq!(app.navigator.replacements(), 1);
    assert_eq!(app.navigator.current(), "/login");
    assert_eq!(app.navigator.entries(), vec!["/login"]);
}

#[tokio::test]
async fn test_restored_session_renders_protected_view() {
    let app = TestApp::new("/dashboard");
    app.seed(&token_for("u-900"), Duration::hours(2));
    app.manager.initialize().await;

    let mut guarded = Guarded::new(
        RouteGuard::require_authenticated(&RoutesConfig::default()),
        |s: &SessionSnapshot| s.identity().map(|i| i.user_id.clone()),
        Arc::new(app.navigator.clone()),
    );

    assert_eq!(
        guarded.render(&app.manager.snapshot()),
        Rendered::Content(Some("u-900".to_string()))
    );
    assert_eq!(app.navigator.replacements(), 0);
}

#[tokio::test]
async fn test_followed_guard_reacts_to_initialization() {
    let app = TestApp::new("/activities");
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = renders.clone();
    let guarded = Guarded::new(
        RouteGuard::require_authenticated(&RoutesConfig::default()),
        move |_: &SessionSnapshot| counter.fetch_add(1, Ordering::SeqCst),
        Arc::new(app.navigator.clone()),
    );

    let states = app.manager.subscribe();
    let task = tokio::spawn(async move {
        let mut placeholders = 0;
        guarded
            .follow(states, |r| {
                if r.is_placeholder() {
                    placeholders += 1;
                }
            })
            .await;
        placeholders
    });

    tokio::task::yield_now().await;
    app.manager.initialize().await;
    tokio::task::yield_now().await;

    assert_eq!(app.navigator.current(), "/login");
    assert_eq!(app.navigator.replacements(), 1);
    assert_eq!(renders.load(Ordering::SeqCst), 0);

    drop(app);
    assert_eq!(task.await.unwrap(), 2);
}

#[tokio::test]
async fn test_login_moves_visitor_off_login_screen() {
    let app = TestApp::new("/login");
    app.manager.initialize().await;

    let mut login_screen = Guarded::new(
        RouteGuard::require_anonymous(&RoutesConfig::default()),
        |_: &SessionSnapshot| "login form",
        Arc::new(app.navigator.clone()),
    );
    assert_eq!(
        login_screen.render(&app.manager.snapshot()),
        Rendered::Content("login form")
    );

    app.manager.login(&token_for("u-910"));

    assert!(login_screen.render(&app.manager.snapshot()).is_placeholder());
    assert_eq!(app.navigator.current(), "/dashboard");
}

#[tokio::test]
async fn test_opposite_guards_converge() {
    let table = RouteTable::from_config(&RoutesConfig::default());
    assert!(table.converges());

    let app = TestApp::new("/master-data");
    app.manager.initialize().await;
    let navigator: Arc<dyn Navigator> = Arc::new(app.navigator.clone());

    let visit = table.open(&app.manager.snapshot(), &navigator).unwrap();
    assert_eq!(visit.path, "/login");
    assert_eq!(visit.outcome, VisitOutcome::Rendered);

    app.manager.login(&token_for("u-920"));
    let visit = table.open(&app.manager.snapshot(), &navigator).unwrap();
    assert_eq!(visit.path, "/dashboard");
    assert_eq!(visit.redirects, vec!["/dashboard"]);

    app.manager.logout();
    let visit = table.open(&app.manager.snapshot(), &navigator).unwrap();
    assert_eq!(visit.path, "/login");
    assert!(visit.redirects.is_empty());
}
