use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::TodoService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// To-do use cases, wired to a store and an upload signer at startup.
    pub todos: Arc<TodoService>,
}
