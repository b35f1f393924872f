//! HttpBackend against a mocked server.
//!
//! These tests use wiremock to stand in for the identity and chat service and check:
//! - request paths, query strings and bodies
//! - both field-name sets the deployed backend uses
//! - failure classification (401, 5xx, coded failures, unreachable host)

#![cfg(feature = "native")]

use std::time::Duration;

use screentab::api::http::HttpBackend;
use screentab::api::Backend;
use screentab::types::{AppError, Credentials, MessageRole, SendRequest, SendTarget, GENERIC_FAILURE};
use screentab::utils::config::ServerConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

fn backend_for(server: &MockServer) -> HttpBackend {
    let config = ServerConfig {
        base_url: format!("{}/", server.uri()),
        request_timeout_secs: 5,
    };
    HttpBackend::new(&config).unwrap()
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "data": data}))
}

fn fail(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_json(json!({"ok": false, "code": code, "message": message}))
}

// ============= Auth =============

#[tokio::test]
async fn check_auth_reads_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/check"))
        .respond_with(ok(json!({"auth": true})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert_eq!(backend.base_url(), server.uri());
    assert!(backend.check_auth().await.unwrap());
}

#[tokio::test]
async fn login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ann@example.com", "password": "secret123"})))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials {
        email: "ann@example.com".into(),
        password: "secret123".into(),
    };
    backend_for(&server).login(&credentials).await.unwrap();
}

#[tokio::test]
async fn unauthorized_status_is_session_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/threads"))
        .respond_with(fail(401, "UNAUTHORIZED", "token expired"))
        .mount(&server)
        .await;

    let err = backend_for(&server).list_threads().await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

// ============= Chat =============

#[tokio::test]
async fn thread_list_accepts_mongo_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/threads"))
        .respond_with(ok(json!({"items": [
            {"_id": "665f1c", "title": "Alien"},
            {"id": 12},
        ]})))
        .mount(&server)
        .await;

    let threads = backend_for(&server).list_threads().await.unwrap();
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].id, "665f1c");
    assert_eq!(threads[0].title.as_deref(), Some("Alien"));
    assert_eq!(threads[1].id, "12");
    assert_eq!(threads[1].title, None);
}

#[tokio::test]
async fn history_is_fetched_by_thread_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/history"))
        .and(query_param("threadId", "t1"))
        .respond_with(ok(json!({
            "threadId": "t1",
            "title": "Alien",
            "messages": [
                {"id": "m1", "role": "user", "text": "Alien", "timestamp": "2024-05-01T10:00:00Z"},
                {"id": "m2", "role": "assistant", "text": "1979", "timestamp": "2024-05-01T10:00:02Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = backend_for(&server).thread_history("t1").await.unwrap();
    assert_eq!(history.title.as_deref(), Some("Alien"));
    assert_eq!(history.messages[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn first_send_carries_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .and(body_json(json!({"title": "Chat 1", "text": "Alien"})))
        .respond_with(ok(json!({
            "threadId": "t9",
            "title": "Chat 1",
            "user": {"id": 1, "text": "Alien", "ts": "2024-05-01T10:00:00Z"},
            "bot": {"id": 2, "text": "Ridley Scott, 1979", "ts": "2024-05-01T10:00:01Z"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = backend_for(&server)
        .send_message(&SendRequest {
            target: SendTarget::Title("Chat 1".into()),
            text: "Alien".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.thread_id.as_deref(), Some("t9"));
    assert_eq!(response.user_message.text, "Alien");
    assert_eq!(response.assistant_message.id, "2");
}

#[tokio::test]
async fn delete_and_wipe_use_their_paths() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/chat/thread/t1"))
        .respond_with(ok(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/chat/wipe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend.delete_thread("t1").await.unwrap();
    backend.wipe_threads().await.unwrap();
}

#[tokio::test]
async fn thread_id_is_sent_as_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/chat/thread/a%2Fb%3Fc"))
        .respond_with(ok(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    backend_for(&server).delete_thread("a/b?c").await.unwrap();
}

#[tokio::test]
async fn coded_failure_maps_to_safe_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/chat/thread/gone"))
        .respond_with(fail(404, "NOT_FOUND", "thread gone not in collection threads"))
        .mount(&server)
        .await;

    let err = backend_for(&server).delete_thread("gone").await.unwrap_err();
    assert_eq!(
        err,
        AppError::Request {
            code: Some("NOT_FOUND".into()),
            message: "Not found".into(),
        }
    );
}

#[tokio::test]
async fn failure_inside_success_status_is_still_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .respond_with(fail(200, "RATE_LIMIT", "slow down"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .send_message(&SendRequest {
            target: SendTarget::Thread("t1".into()),
            text: "Heat".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Too many requests");
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/chat/wipe"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = backend_for(&server).wipe_threads().await.unwrap_err();
    assert!(matches!(err, AppError::Unavailable(_)));
    assert_eq!(err.user_message(), GENERIC_FAILURE);
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).list_threads().await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_unavailable() {
    // Nothing listens on port 1.
    let config = ServerConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 5,
    };

    let err = HttpBackend::new(&config)
        .unwrap()
        .check_auth()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unavailable(_)));
}

#[tokio::test]
async fn slow_response_is_a_request_failure_not_an_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/threads"))
        .respond_with(ok(json!({"items": []})).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let config = ServerConfig {
        base_url: server.uri(),
        request_timeout_secs: 1,
    };

    let err = HttpBackend::new(&config)
        .unwrap()
        .list_threads()
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::Request {
            code: None,
            message: GENERIC_FAILURE.into(),
        }
    );
}

// ============= Users =============

#[tokio::test]
async fn users_page_passes_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "15"))
        .respond_with(ok(json!({
            "items": [{"email": "ann@example.com", "createdAt": "2024-05-01T10:00:00Z"}],
            "total": 16
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = backend_for(&server).list_users(2, 15).await.unwrap();
    assert_eq!(page.total, 16);
    assert_eq!(page.items[0].email, "ann@example.com");
}
