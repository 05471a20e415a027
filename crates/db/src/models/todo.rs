//! To-do entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DueDate, Timestamp, TodoId, UserId};

/// A row from the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: UserId,
    pub todo_id: TodoId,
    pub name: String,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

/// DTO for creating a to-do item. The server fills in everything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<DueDate>,
}

/// DTO for updating a to-do item.
///
/// This is a full replace of the mutable fields: a missing `dueDate` clears
/// the due date and a missing `done` resets the item to not done.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub name: String,
    #[serde(default)]
    pub due_date: Option<DueDate>,
    #[serde(default)]
    pub done: bool,
}
