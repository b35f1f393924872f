//! User directory paging against a scripted backend.

mod common;

use std::sync::Arc;

use common::mocks::{settle, Call, Op, ScriptedBackend};
use screentab::context::ClientContext;
use screentab::navigation::Route;
use screentab::types::AppError;
use screentab::users::UserDirectory;

fn directory(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, UserDirectory<ScriptedBackend>) {
    let backend = Arc::new(backend);
    let users = UserDirectory::new(Arc::clone(&backend), ClientContext::default(), 15);
    (backend, users)
}

#[tokio::test]
async fn loads_requested_page() {
    let (backend, users) = directory(ScriptedBackend::new().with_users(40));

    users.load_from_query("?page=3").await.unwrap();

    let state = users.snapshot();
    assert_eq!(state.page, 3);
    assert_eq!(state.total, 40);
    assert_eq!(state.items.len(), 10);
    assert_eq!(state.items[0].email, "user30@example.com");
    assert_eq!(state.max_page(), 3);
    assert!(state.has_prev());
    assert!(!state.has_next());
    assert!(!state.loading);
    assert_eq!(backend.calls(), vec![Call::Users(3, 15)]);
}

#[tokio::test]
async fn missing_page_defaults_to_first() {
    let (backend, users) = directory(ScriptedBackend::new().with_users(5));

    users.load_from_query("").await.unwrap();
    users.load(0).await.unwrap();

    assert_eq!(backend.calls(), vec![Call::Users(1, 15), Call::Users(1, 15)]);
    let state = users.snapshot();
    assert_eq!(state.max_page(), 1);
    assert_eq!(state.go(2), None);
}

#[tokio::test]
async fn empty_directory_still_has_one_page() {
    let (_backend, users) = directory(ScriptedBackend::new());

    users.load(1).await.unwrap();

    let state = users.snapshot();
    assert!(state.items.is_empty());
    assert_eq!(state.max_page(), 1);
    assert_eq!(state.go(1).as_deref(), Some("/users?page=1"));
}

#[tokio::test]
async fn failure_is_recorded_and_previous_rows_kept() {
    let (backend, users) = directory(ScriptedBackend::new().with_users(20));
    users.load(1).await.unwrap();

    backend.fail(
        Op::Users,
        AppError::Request {
            code: Some("FORBIDDEN".into()),
            message: "Access denied".into(),
        },
    );
    assert!(users.load(2).await.is_err());

    let state = users.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Access denied"));
    assert_eq!(state.items.len(), 15);
    assert_eq!(state.page, 2);
}

#[tokio::test]
async fn unreachable_backend_goes_to_maintenance() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.fail(Op::Users, AppError::Unavailable("HTTP 502".into()));
    let ctx = ClientContext::default();
    let users = UserDirectory::new(Arc::clone(&backend), ctx.clone(), 15);

    assert!(users.load(1).await.is_err());
    assert_eq!(ctx.navigation.take_redirect(), Some(Route::Maintenance));
}

#[tokio::test]
async fn late_page_does_not_overwrite_newer_one() {
    let (backend, users) = directory(ScriptedBackend::new().with_users(40));
    let gate = backend.hold(Op::Users);

    let slow = {
        let users = users.clone();
        tokio::spawn(async move { users.load(2).await })
    };
    settle().await;

    backend.unhold(&Op::Users);
    users.load(3).await.unwrap();
    gate.release();
    slow.await.unwrap().unwrap();

    let state = users.snapshot();
    assert_eq!(state.page, 3);
    assert_eq!(state.items.len(), 10);
    assert_eq!(state.items[0].email, "user30@example.com");
    assert_eq!(backend.calls(), vec![Call::Users(2, 15), Call::Users(3, 15)]);
}
