pub mod health;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /todos                          list, create
/// /todos/{todo_id}                get, update (full replace), delete
/// /todos/{todo_id}/attachment     request upload URL (POST), complete upload (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/todos", todos::router())
}
