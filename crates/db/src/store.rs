//! The store seam between the service layer and persistence.

use async_trait::async_trait;
use todo_core::todo::SortField;
use todo_core::types::TodoId;

use crate::cursor::PageCursor;
use crate::models::todo::{TodoItem, UpdateTodo};

/// Errors raised by a [`TodoStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database call failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller handed back a `nextKey` this store cannot resume from.
    #[error("Invalid page cursor: {0}")]
    InvalidCursor(String),
}

/// One page request against a user's collection.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Encoded cursor from a previous page, `None` for the first page.
    pub cursor: Option<String>,
    pub limit: u32,
    pub sort: SortField,
}

/// One page of a user's collection.
#[derive(Debug, Clone)]
pub struct TodoPage {
    pub items: Vec<TodoItem>,
    /// Encoded cursor for the following page, `None` once the listing is exhausted.
    pub next_cursor: Option<String>,
}

impl TodoPage {
    /// Build a page from a query that fetched up to `limit + 1` rows.
    ///
    /// The extra row only signals that another page exists; it is dropped.
    pub fn from_overfetch(mut rows: Vec<TodoItem>, limit: u32, sort: SortField) -> Self {
        let limit = limit as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let next_cursor = if has_more {
            rows.last().map(|last| PageCursor::after(last, sort).encode())
        } else {
            None
        };

        Self {
            items: rows,
            next_cursor,
        }
    }
}

/// Persistence operations for to-do items. Every operation is scoped by the
/// owning user's id.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every item owned by `user_id`, newest first. Not paginated.
    async fn list_all(&self, user_id: &str) -> Result<Vec<TodoItem>, StoreError>;

    /// One page of `user_id`'s items in descending order of `request.sort`.
    async fn list_page(&self, user_id: &str, request: &PageRequest)
        -> Result<TodoPage, StoreError>;

    async fn get(&self, user_id: &str, todo_id: TodoId)
        -> Result<Option<TodoItem>, StoreError>;

    async fn create(&self, item: TodoItem) -> Result<TodoItem, StoreError>;

    /// Replace name, due date and done flag. Returns `None` when there is no
    /// such item, which is not an error.
    async fn update(
        &self,
        user_id: &str,
        todo_id: TodoId,
        fields: &UpdateTodo,
    ) -> Result<Option<TodoItem>, StoreError>;

    /// Remove an item. Removing a missing item succeeds.
    async fn delete(&self, user_id: &str, todo_id: TodoId) -> Result<(), StoreError>;

    /// Record the final attachment URL on an item.
    async fn attach_upload(
        &self,
        user_id: &str,
        todo_id: TodoId,
        url: &str,
    ) -> Result<(), StoreError>;

    async fn exists(&self, user_id: &str, todo_id: TodoId) -> Result<bool, StoreError>;
}
