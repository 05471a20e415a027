//! Route definitions for the `/todos` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attachments, todos};
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /                          -> list_todos
/// POST   /                          -> create_todo
/// GET    /{todo_id}                 -> get_todo
/// PATCH  /{todo_id}                 -> update_todo
/// DELETE /{todo_id}                 -> delete_todo
/// POST   /{todo_id}/attachment      -> request_upload_url
/// PUT    /{todo_id}/attachment      -> complete_upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/{todo_id}",
            get(todos::get_todo)
                .patch(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route(
            "/{todo_id}/attachment",
            post(attachments::request_upload_url).put(attachments::complete_upload),
        )
}
