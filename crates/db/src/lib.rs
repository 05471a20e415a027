//! Document store adapter for to-do items.
//!
//! - [`store::TodoStore`] -- the store seam the service layer talks to.
//! - [`repositories::PgTodoStore`] -- PostgreSQL implementation.
//! - [`memory::MemoryTodoStore`] -- in-process implementation for tests and
//!   local runs without a database.
//! - [`cursor::PageCursor`] -- the opaque `nextKey` token.

use sqlx::postgres::PgPoolOptions;

pub mod cursor;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to make sure the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
