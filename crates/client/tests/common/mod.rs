//! Spawns the API on a local port, backed by the in-memory store, next to a
//! tiny upload sink standing in for object storage.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::put;
use axum::Router;

use todo_api::auth::jwt::{issue_token, JwtConfig};
use todo_api::config::ServerConfig;
use todo_api::router::build_app_router;
use todo_api::service::TodoService;
use todo_api::state::AppState;
use todo_client::TodoClient;
use todo_core::types::TodoId;
use todo_db::memory::MemoryTodoStore;
use todo_storage::signer::{SignerError, UploadUrlSigner};

pub const BUCKET: &str = "todo-attachments-test";

/// Uploaded bodies keyed by object key.
pub type Uploads = Arc<Mutex<HashMap<String, Vec<u8>>>>;

/// Signs URLs that point at the local upload sink.
struct SinkSigner {
    sink: SocketAddr,
    calls: AtomicU64,
}

#[async_trait]
impl UploadUrlSigner for SinkSigner {
    async fn create_upload_url(&self, todo_id: TodoId) -> Result<String, SignerError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("http://{}/uploads/{todo_id}?sig={n}", self.sink))
    }
}

async fn store_upload(
    State(uploads): State<Uploads>,
    Path(key): Path<String>,
    body: Bytes,
) -> StatusCode {
    uploads.lock().unwrap().insert(key, body.to_vec());
    StatusCode::OK
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub struct TestServer {
    pub base_url: String,
    pub uploads: Uploads,
    jwt: JwtConfig,
}

impl TestServer {
    pub async fn start() -> Self {
        let uploads: Uploads = Arc::default();
        let sink = serve(
            Router::new()
                .route("/uploads/{key}", put(store_upload))
                .with_state(uploads.clone()),
        )
        .await;

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
            request_timeout_secs: 30,
            jwt: JwtConfig {
                secret: "client-test-secret".to_string(),
                access_token_expiry_mins: 15,
            },
        };
        let signer = SinkSigner {
            sink,
            calls: AtomicU64::new(0),
        };
        let state = AppState {
            config: Arc::new(config.clone()),
            todos: Arc::new(TodoService::new(
                Arc::new(MemoryTodoStore::new()),
                Arc::new(signer),
                BUCKET,
            )),
        };
        let api = serve(build_app_router(state, &config)).await;

        Self {
            base_url: format!("http://{api}"),
            uploads,
            jwt: config.jwt,
        }
    }

    /// A client authenticated as `user_id`.
    pub fn client_for(&self, user_id: &str) -> TodoClient {
        let token = issue_token(user_id, &self.jwt).unwrap();
        TodoClient::new(&self.base_url, token)
    }
}
