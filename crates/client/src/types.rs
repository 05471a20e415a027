//! Wire types exchanged with the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: String,
    pub todo_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub done: bool,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Replacement values for an item. Every field is written; a `None` due
/// date clears it on the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub done: bool,
}

impl From<&Todo> for UpdateTodoRequest {
    fn from(todo: &Todo) -> Self {
        Self {
            name: todo.name.clone(),
            due_date: todo.due_date,
            done: todo.done,
        }
    }
}

/// Listing order accepted by `GET /todos`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "dueDate")]
    DueDate,
}

/// Query string for `GET /todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<SortOrder>,
}

/// One page of items plus the key for the page after it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub next_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope<T> {
    pub item: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadUrlEnvelope {
    pub upload_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttachmentEnvelope {
    pub attachment_url: String,
}
