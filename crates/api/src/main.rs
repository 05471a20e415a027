use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::config::{ServerConfig, StoreBackend};
use todo_api::router::build_app_router;
use todo_api::service::TodoService;
use todo_api::state::AppState;
use todo_db::memory::MemoryTodoStore;
use todo_db::repositories::PgTodoStore;
use todo_db::store::TodoStore;
use todo_storage::config::StorageConfig;
use todo_storage::signer::S3UploadSigner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let storage = StorageConfig::from_env();
    tracing::info!(
        addr = %config.bind_addr(),
        bucket = %storage.bucket,
        url_expiry_secs = storage.signed_url_expiry_secs,
        "Loaded configuration"
    );

    let store = open_store(StoreBackend::from_env()).await;
    let signer = Arc::new(S3UploadSigner::from_config(&storage).await);

    let state = AppState {
        config: Arc::new(config.clone()),
        todos: Arc::new(TodoService::new(store, signer, storage.bucket)),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("Failed to bind listener");
    tracing::info!(addr = %config.bind_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todo_api=debug,todo_db=debug,todo_storage=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect the configured store. PostgreSQL is health-checked and migrated
/// before the server accepts traffic.
async fn open_store(backend: StoreBackend) -> Arc<dyn TodoStore> {
    match backend {
        StoreBackend::Postgres { database_url } => {
            let pool = todo_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to PostgreSQL");
            todo_db::health_check(&pool)
                .await
                .expect("PostgreSQL health check failed");
            todo_db::run_migrations(&pool)
                .await
                .expect("Failed to apply migrations");
            tracing::info!("PostgreSQL store ready");
            Arc::new(PgTodoStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; items are lost on restart");
            Arc::new(MemoryTodoStore::new())
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.expect("Failed to listen for Ctrl-C");
                tracing::info!("Ctrl-C received, shutting down");
            }
            _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl-C");
        tracing::info!("Ctrl-C received, shutting down");
    }
}
