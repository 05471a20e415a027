//! Handlers for the `/todos` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and operate only on
//! the caller's own items.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todo_core::error::CoreError;
use todo_core::types::TodoId;
use todo_db::models::todo::{CreateTodo, TodoItem, UpdateTodo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListTodosQuery;
use crate::response::{ItemResponse, ListResponse};
use crate::state::AppState;

/// POST /todos
///
/// Create an item for the caller. Returns 201 with the stored item.
pub async fn create_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let item = state.todos.create(&auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

/// GET /todos?limit=&nextKey=&orderBy=
///
/// One page of the caller's items. `nextKey` in the response is `null` once
/// the listing is exhausted.
pub async fn list_todos(
    auth: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ListTodosQuery>, QueryRejection>,
) -> AppResult<Json<ListResponse>> {
    let Query(params) = params?;
    let page_size = params.page_size()?;
    let sort = params.sort()?;

    let page = state
        .todos
        .list(&auth.user_id, params.cursor(), Some(page_size), Some(sort))
        .await?;

    Ok(Json(ListResponse {
        items: page.items,
        next_key: page.next_cursor,
    }))
}

/// GET /todos/{todo_id}
pub async fn get_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    todo_id: Result<Path<TodoId>, PathRejection>,
) -> AppResult<Json<ItemResponse<TodoItem>>> {
    let Path(todo_id) = todo_id?;
    let item = state
        .todos
        .get(&auth.user_id, todo_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Todo",
                id: todo_id.to_string(),
            })
        })?;
    Ok(Json(ItemResponse { item }))
}

/// PATCH /todos/{todo_id}
///
/// Replace name, due date and done flag. Fields left out of the body are
/// cleared, not kept. Updating a missing item succeeds with `item: null`.
pub async fn update_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    todo_id: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> AppResult<Json<ItemResponse<Option<TodoItem>>>> {
    let Path(todo_id) = todo_id?;
    let Json(fields) = payload?;
    let item = state.todos.update(&auth.user_id, todo_id, fields).await?;
    Ok(Json(ItemResponse { item }))
}

/// DELETE /todos/{todo_id}
///
/// Idempotent: deleting a missing item also returns 200.
pub async fn delete_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    todo_id: Result<Path<TodoId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(todo_id) = todo_id?;
    state.todos.delete(&auth.user_id, todo_id).await?;
    Ok(StatusCode::OK)
}
