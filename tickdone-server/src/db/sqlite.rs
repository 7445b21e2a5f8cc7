//! SQLite task store (embedded, file based)

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{DbError, TodoStore};
use crate::models::{NewTodo, Todo};

/// Task store backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn migrate(&self) -> Result<(), DbError> {
        tracing::info!("Running sqlite migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_name TEXT NOT NULL,
                deadline DATETIME,
                done BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, task_name, deadline, done FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DbError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, task_name, deadline, done FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, DbError> {
        let created = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (task_name, deadline, done)
            VALUES (?, ?, FALSE)
            RETURNING id, task_name, deadline, done
            "#,
        )
        .bind(todo.task_name.as_str())
        .bind(todo.deadline)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn save(&self, todo: &Todo) -> Result<Option<Todo>, DbError> {
        let saved = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos SET done = ?
            WHERE id = ?
            RETURNING id, task_name, deadline, done
            "#,
        )
        .bind(todo.done)
        .bind(todo.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn remove(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
