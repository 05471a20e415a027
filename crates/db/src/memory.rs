//! In-process [`TodoStore`].
//!
//! Keeps items in a map keyed by `(user_id, todo_id)` and reproduces the
//! ordering and paging rules of the PostgreSQL store, so tests and local runs
//! can swap it in without a database.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::todo::SortField;
use todo_core::types::{TodoId, UserId};

use crate::cursor::{CursorPosition, PageCursor};
use crate::models::todo::{TodoItem, UpdateTodo};
use crate::store::{PageRequest, StoreError, TodoPage, TodoStore};

#[derive(Default)]
pub struct MemoryTodoStore {
    items: RwLock<HashMap<(UserId, TodoId), TodoItem>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items across all users.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

/// Descending order used by listings: sort key first, then `todo_id`.
///
/// `Option<NaiveDate>` orders `None` lowest, so a descending comparison puts
/// undated items last, matching `DESC NULLS LAST`.
fn compare_desc(a: &TodoItem, b: &TodoItem, sort: SortField) -> Ordering {
    let by_key = match sort {
        SortField::CreatedAt => b.created_at.cmp(&a.created_at),
        SortField::DueDate => b.due_date.cmp(&a.due_date),
    };
    by_key.then_with(|| b.todo_id.cmp(&a.todo_id))
}

/// `true` if `item` sorts strictly after the cursor position.
fn is_after(item: &TodoItem, cursor: &PageCursor) -> bool {
    let by_key = match cursor.position {
        CursorPosition::CreatedAt(created_at) => created_at.cmp(&item.created_at),
        CursorPosition::DueDate(due_date) => due_date.cmp(&item.due_date),
    };
    by_key.then_with(|| cursor.todo_id.cmp(&item.todo_id)) == Ordering::Greater
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self, user_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        let items = self.items.read().await;
        let mut owned: Vec<TodoItem> = items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| compare_desc(a, b, SortField::CreatedAt));
        Ok(owned)
    }

    async fn list_page(
        &self,
        user_id: &str,
        request: &PageRequest,
    ) -> Result<TodoPage, StoreError> {
        let after = request
            .cursor
            .as_deref()
            .map(|token| PageCursor::decode_for(token, user_id, request.sort))
            .transpose()?;

        let items = self.items.read().await;
        let mut owned: Vec<TodoItem> = items
            .values()
            .filter(|item| item.user_id == user_id)
            .filter(|item| after.as_ref().map_or(true, |cursor| is_after(item, cursor)))
            .cloned()
            .collect();
        owned.sort_by(|a, b| compare_desc(a, b, request.sort));
        owned.truncate(request.limit as usize + 1);

        Ok(TodoPage::from_overfetch(owned, request.limit, request.sort))
    }

    async fn get(&self, user_id: &str, todo_id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.get(&(user_id.to_string(), todo_id)).cloned())
    }

    async fn create(&self, item: TodoItem) -> Result<TodoItem, StoreError> {
        let mut items = self.items.write().await;
        items.insert((item.user_id.clone(), item.todo_id), item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        user_id: &str,
        todo_id: TodoId,
        fields: &UpdateTodo,
    ) -> Result<Option<TodoItem>, StoreError> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&(user_id.to_string(), todo_id)).map(|item| {
            item.name = fields.name.clone();
            item.due_date = fields.due_date;
            item.done = fields.done;
            item.clone()
        }))
    }

    async fn delete(&self, user_id: &str, todo_id: TodoId) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .remove(&(user_id.to_string(), todo_id));
        Ok(())
    }

    async fn attach_upload(
        &self,
        user_id: &str,
        todo_id: TodoId,
        url: &str,
    ) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        if let Some(item) = items.get_mut(&(user_id.to_string(), todo_id)) {
            item.attachment_url = Some(url.to_string());
        }
        Ok(())
    }

    async fn exists(&self, user_id: &str, todo_id: TodoId) -> Result<bool, StoreError> {
        let items = self.items.read().await;
        Ok(items.contains_key(&(user_id.to_string(), todo_id)))
    }
}
