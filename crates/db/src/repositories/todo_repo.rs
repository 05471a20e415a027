//! Repository for the `todos` table.

use async_trait::async_trait;
use sqlx::PgPool;
use todo_core::todo::SortField;
use todo_core::types::TodoId;

use crate::cursor::{CursorPosition, PageCursor};
use crate::models::todo::{TodoItem, UpdateTodo};
use crate::store::{PageRequest, StoreError, TodoPage, TodoStore};

/// Column list for `todos` queries.
const COLUMNS: &str = "user_id, todo_id, name, created_at, due_date, done, attachment_url";

/// Provides CRUD operations for to-do items.
pub struct TodoRepo;

impl TodoRepo {
    /// List every item owned by a user, newest first.
    pub async fn list_all(pool: &PgPool, user_id: &str) -> Result<Vec<TodoItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM todos \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, todo_id DESC"
        );
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch up to `limit` items strictly after `after` in the given order.
    ///
    /// Ties on the sort key are broken by `todo_id`, both descending. In the
    /// due-date order, undated items come after every dated one.
    pub async fn list_after(
        pool: &PgPool,
        user_id: &str,
        sort: SortField,
        after: Option<&PageCursor>,
        limit: i64,
    ) -> Result<Vec<TodoItem>, sqlx::Error> {
        let order = match sort {
            SortField::CreatedAt => "created_at DESC, todo_id DESC",
            SortField::DueDate => "due_date DESC NULLS LAST, todo_id DESC",
        };
        let filter = match after.map(|c| c.position) {
            None => "",
            Some(CursorPosition::CreatedAt(_)) => "AND (created_at, todo_id) < ($3, $4)",
            Some(CursorPosition::DueDate(Some(_))) => {
                "AND (due_date < $3 \
                      OR (due_date = $3 AND todo_id < $4) \
                      OR due_date IS NULL)"
            }
            Some(CursorPosition::DueDate(None)) => "AND due_date IS NULL AND todo_id < $3",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM todos \
             WHERE user_id = $1 {filter} \
             ORDER BY {order} \
             LIMIT $2"
        );

        let mut q = sqlx::query_as::<_, TodoItem>(&query)
            .bind(user_id)
            .bind(limit);
        if let Some(cursor) = after {
            q = match cursor.position {
                CursorPosition::CreatedAt(created_at) => q.bind(created_at).bind(cursor.todo_id),
                CursorPosition::DueDate(Some(due_date)) => q.bind(due_date).bind(cursor.todo_id),
                CursorPosition::DueDate(None) => q.bind(cursor.todo_id),
            };
        }
        q.fetch_all(pool).await
    }

    /// Find a single item by owner and id.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        todo_id: TodoId,
    ) -> Result<Option<TodoItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE user_id = $1 AND todo_id = $2");
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(user_id)
            .bind(todo_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new item, returning the stored row.
    pub async fn create(pool: &PgPool, item: &TodoItem) -> Result<TodoItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (user_id, todo_id, name, created_at, due_date, done, attachment_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(&item.user_id)
            .bind(item.todo_id)
            .bind(&item.name)
            .bind(item.created_at)
            .bind(item.due_date)
            .bind(item.done)
            .bind(&item.attachment_url)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the mutable fields of an item.
    ///
    /// Returns `None` if no row matched; nothing is written in that case.
    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        todo_id: TodoId,
        fields: &UpdateTodo,
    ) -> Result<Option<TodoItem>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET name = $3, due_date = $4, done = $5 \
             WHERE user_id = $1 AND todo_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TodoItem>(&query)
            .bind(user_id)
            .bind(todo_id)
            .bind(&fields.name)
            .bind(fields.due_date)
            .bind(fields.done)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: &str, todo_id: TodoId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE user_id = $1 AND todo_id = $2")
            .bind(user_id)
            .bind(todo_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the attachment URL. Returns `true` if a row was updated.
    pub async fn set_attachment_url(
        pool: &PgPool,
        user_id: &str,
        todo_id: TodoId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET attachment_url = $3 \
             WHERE user_id = $1 AND todo_id = $2",
        )
        .bind(user_id)
        .bind(todo_id)
        .bind(url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, user_id: &str, todo_id: TodoId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM todos WHERE user_id = $1 AND todo_id = $2)",
        )
        .bind(user_id)
        .bind(todo_id)
        .fetch_one(pool)
        .await
    }
}

/// [`TodoStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list_all(&self, user_id: &str) -> Result<Vec<TodoItem>, StoreError> {
        Ok(TodoRepo::list_all(&self.pool, user_id).await?)
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

        let rows = TodoRepo::list_after(
            &self.pool,
            user_id,
            request.sort,
            after.as_ref(),
            i64::from(request.limit) + 1,
        )
        .await?;

        Ok(TodoPage::from_overfetch(rows, request.limit, request.sort))
    }

    async fn get(&self, user_id: &str, todo_id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        Ok(TodoRepo::find(&self.pool, user_id, todo_id).await?)
    }

    async fn create(&self, item: TodoItem) -> Result<TodoItem, StoreError> {
        tracing::debug!(user_id = %item.user_id, todo_id = %item.todo_id, "Inserting todo");
        Ok(TodoRepo::create(&self.pool, &item).await?)
    }

    async fn update(
        &self,
        user_id: &str,
        todo_id: TodoId,
        fields: &UpdateTodo,
    ) -> Result<Option<TodoItem>, StoreError> {
        let updated = TodoRepo::update(&self.pool, user_id, todo_id, fields).await?;
        if updated.is_none() {
            tracing::debug!(%user_id, %todo_id, "Update matched no todo");
        }
        Ok(updated)
    }

    async fn delete(&self, user_id: &str, todo_id: TodoId) -> Result<(), StoreError> {
        let removed = TodoRepo::delete(&self.pool, user_id, todo_id).await?;
        tracing::debug!(%user_id, %todo_id, removed, "Deleted todo");
        Ok(())
    }

    async fn attach_upload(
        &self,
        user_id: &str,
        todo_id: TodoId,
        url: &str,
    ) -> Result<(), StoreError> {
        let updated = TodoRepo::set_attachment_url(&self.pool, user_id, todo_id, url).await?;
        if !updated {
            tracing::debug!(%user_id, %todo_id, "Attachment URL matched no todo");
        }
        Ok(())
    }

    async fn exists(&self, user_id: &str, todo_id: TodoId) -> Result<bool, StoreError> {
        Ok(TodoRepo::exists(&self.pool, user_id, todo_id).await?)
    }
}
