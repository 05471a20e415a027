//! Shared helpers for the HTTP integration tests.
//!
//! The app runs on the in-memory store and a fake signer, so no database or
//! AWS credentials are needed.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_api::auth::jwt::{issue_token, JwtConfig};
use todo_api::config::ServerConfig;
use todo_api::router::build_app_router;
use todo_api::service::TodoService;
use todo_api::state::AppState;
use todo_core::types::TodoId;
use todo_db::memory::MemoryTodoStore;
use todo_storage::signer::{SignerError, UploadUrlSigner};

pub const ALICE: &str = "auth0|alice";
pub const BOB: &str = "auth0|bob";
pub const BUCKET: &str = "todo-attachments-test";

/// Signer that returns a different URL on every call for the same object.
#[derive(Default)]
pub struct FakeSigner {
    calls: AtomicU64,
}

#[async_trait]
impl UploadUrlSigner for FakeSigner {
    async fn create_upload_url(&self, todo_id: TodoId) -> Result<String, SignerError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://{BUCKET}.s3.amazonaws.com/{todo_id}?X-Amz-Signature=sig{n}"))
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router plus handles on its collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryTodoStore>,
}

/// Build the full application router, with every middleware layer
/// production uses, over a fresh in-memory store.
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryTodoStore::new());
    let service = TodoService::new(store.clone(), Arc::new(FakeSigner::default()), BUCKET);

    let state = AppState {
        config: Arc::new(config.clone()),
        todos: Arc::new(service),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

/// A valid bearer token for `user_id`.
pub fn token_for(user_id: &str) -> String {
    issue_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Send one request through the router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("authorization", format!("Bearer {}", token_for(user_id)));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, user_id: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(user_id), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    user_id: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    user_id: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(user_id), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, user_id: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user_id), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a to-do through the API and return its JSON representation.
pub async fn create_todo(app: &Router, user_id: &str, name: &str, due_date: Option<&str>) -> serde_json::Value {
    let response = post_json(
        app,
        "/todos",
        user_id,
        serde_json::json!({ "name": name, "dueDate": due_date }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["item"].clone()
}
