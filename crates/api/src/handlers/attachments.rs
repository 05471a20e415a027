//! Handlers for `/todos/{todo_id}/attachment`.
//!
//! Uploading is a two-step client flow: `POST` for a presigned URL, upload
//! the file straight to storage, then `PUT` to record the attachment.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todo_core::error::CoreError;
use todo_core::types::TodoId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{AttachmentResponse, UploadUrlResponse};
use crate::state::AppState;

/// POST /todos/{todo_id}/attachment
///
/// Mint a presigned upload URL. The signer does not check ownership, so the
/// handler does: callers only get URLs for their own items.
pub async fn request_upload_url(
    auth: AuthUser,
    State(state): State<AppState>,
    todo_id: Result<Path<TodoId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(todo_id) = todo_id?;

    if !state.todos.exists(&auth.user_id, todo_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Todo",
            id: todo_id.to_string(),
        }));
    }

    let upload_url = state.todos.request_upload_url(todo_id).await?;
    Ok((StatusCode::ACCEPTED, Json(UploadUrlResponse { upload_url })))
}

/// PUT /todos/{todo_id}/attachment
///
/// Record the attachment URL on the item once the client has uploaded.
pub async fn complete_upload(
    auth: AuthUser,
    State(state): State<AppState>,
    todo_id: Result<Path<TodoId>, PathRejection>,
) -> AppResult<Json<AttachmentResponse>> {
    let Path(todo_id) = todo_id?;
    let attachment_url = state.todos.complete_upload(&auth.user_id, todo_id).await?;
    Ok(Json(AttachmentResponse { attachment_url }))
}
