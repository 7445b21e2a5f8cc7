//! Database layer - connection pools and the task store
//!
//! # Design Principles
//!
//! - One store trait, one implementation per provider
//! - Provider chosen once at startup by [`connect`]
//! - Single-statement operations, no check-then-write inside the store
//! - Last write wins; the engine owns locking

pub mod pool;
pub mod postgres;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{DatabaseProvider, DatabaseSettings};
use crate::models::{NewTodo, Todo};

pub use pool::{create_pg_pool, create_sqlite_pool};
pub use postgres::PostgresTodoStore;
pub use sqlite::SqliteTodoStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence capabilities needed by the request handlers.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Create the `todos` table if it does not exist yet.
    async fn migrate(&self) -> Result<(), DbError>;

    /// Round-trip a trivial query to check the connection.
    async fn ping(&self) -> Result<(), DbError>;

    /// All tasks in ascending id order.
    async fn find_all(&self) -> Result<Vec<Todo>, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DbError>;

    /// Insert a task with `done = false`, returning it with its new id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, DbError>;

    /// Persist the mutable state of `todo` (its `done` flag).
    ///
    /// Returns `None` when the row no longer exists.
    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, DbError>;

    /// Delete a task. Returns `false` when there was nothing to delete.
    async fn remove(&self, id: i64) -> Result<bool, DbError>;
}

/// Open the configured backend, run its migration and hand back the store.
pub async fn connect(settings: &DatabaseSettings) -> Result<Arc<dyn TodoStore>, DbError> {
    tracing::info!(provider = %settings.provider, "Connecting to database");

    let store: Arc<dyn TodoStore> = match settings.provider {
        DatabaseProvider::Sqlite => {
            let pool = create_sqlite_pool(&settings.url, settings.max_connections).await?;
            Arc::new(SqliteTodoStore::new(pool))
        }
        DatabaseProvider::Postgres => {
            let pool = create_pg_pool(&settings.url, settings.max_connections).await?;
            Arc::new(PostgresTodoStore::new(pool))
        }
    };

    store.migrate().await?;
    Ok(store)
}
