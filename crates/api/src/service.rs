//! To-do use cases.
//!
//! Each method is one store or signer call plus a little value derivation.
//! The service holds its collaborators as trait objects so tests and local
//! runs can swap in the in-memory store and a fake signer.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use todo_core::todo::{validate_name, SortField, DEFAULT_PAGE_SIZE};
use todo_core::types::TodoId;
use todo_db::models::todo::{CreateTodo, TodoItem, UpdateTodo};
use todo_db::store::{PageRequest, TodoPage, TodoStore};
use todo_storage::attachment_url;
use todo_storage::signer::UploadUrlSigner;
use uuid::Uuid;

use crate::error::AppResult;

pub struct TodoService {
    store: Arc<dyn TodoStore>,
    signer: Arc<dyn UploadUrlSigner>,
    bucket: String,
}

impl TodoService {
    pub fn new(
        store: Arc<dyn TodoStore>,
        signer: Arc<dyn UploadUrlSigner>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            signer,
            bucket: bucket.into(),
        }
    }

    /// Create an item with a fresh id, the current time and `done = false`.
    pub async fn create(&self, user_id: &str, input: CreateTodo) -> AppResult<TodoItem> {
        validate_name(&input.name)?;

        // Stored timestamps have microsecond precision; truncate up front so
        // the returned item equals what a later read sees.
        let item = TodoItem {
            user_id: user_id.to_string(),
            todo_id: Uuid::new_v4(),
            name: input.name,
            created_at: Utc::now().trunc_subsecs(6),
            due_date: input.due_date,
            done: false,
            attachment_url: None,
        };

        let created = self.store.create(item).await?;
        tracing::info!(%user_id, todo_id = %created.todo_id, "Created todo");
        Ok(created)
    }

    /// One page of the caller's items.
    ///
    /// `page_size` defaults to [`DEFAULT_PAGE_SIZE`] and `sort` to creation order.
    pub async fn list(
        &self,
        user_id: &str,
        cursor: Option<String>,
        page_size: Option<u32>,
        sort: Option<SortField>,
    ) -> AppResult<TodoPage> {
        let request = PageRequest {
            cursor,
            limit: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort: sort.unwrap_or_default(),
        };
        let page = self.store.list_page(user_id, &request).await?;
        tracing::debug!(
            %user_id,
            count = page.items.len(),
            has_more = page.next_cursor.is_some(),
            sort = request.sort.as_str(),
            "Listed todos"
        );
        Ok(page)
    }

    /// Every item the caller owns, unpaginated.
    pub async fn list_all(&self, user_id: &str) -> AppResult<Vec<TodoItem>> {
        Ok(self.store.list_all(user_id).await?)
    }

    pub async fn get(&self, user_id: &str, todo_id: TodoId) -> AppResult<Option<TodoItem>> {
        Ok(self.store.get(user_id, todo_id).await?)
    }

    pub async fn exists(&self, user_id: &str, todo_id: TodoId) -> AppResult<bool> {
        Ok(self.store.exists(user_id, todo_id).await?)
    }

    /// Replace name, due date and done flag. `None` if the item does not exist.
    pub async fn update(
        &self,
        user_id: &str,
        todo_id: TodoId,
        fields: UpdateTodo,
    ) -> AppResult<Option<TodoItem>> {
        validate_name(&fields.name)?;
        let updated = self.store.update(user_id, todo_id, &fields).await?;
        tracing::info!(%user_id, %todo_id, found = updated.is_some(), "Updated todo");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, todo_id: TodoId) -> AppResult<()> {
        self.store.delete(user_id, todo_id).await?;
        tracing::info!(%user_id, %todo_id, "Deleted todo");
        Ok(())
    }

    /// Presigned URL the client can `PUT` the attachment to.
    pub async fn request_upload_url(&self, todo_id: TodoId) -> AppResult<String> {
        Ok(self.signer.create_upload_url(todo_id).await?)
    }

    /// Record the attachment URL on the item and return it.
    pub async fn complete_upload(&self, user_id: &str, todo_id: TodoId) -> AppResult<String> {
        let url = attachment_url(&self.bucket, todo_id);
        self.store.attach_upload(user_id, todo_id, &url).await?;
        tracing::info!(%user_id, %todo_id, "Recorded attachment");
        Ok(url)
    }
}
