//! PostgreSQL task store (client-server)

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, TodoStore};
use crate::models::{NewTodo, Todo};

/// Task store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PostgresTodoStore {
    async fn migrate(&self) -> Result<(), DbError> {
        tracing::info!("Running postgres migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id BIGSERIAL PRIMARY KEY,
                task_name TEXT NOT NULL,
                deadline TIMESTAMP,
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
        let todos: Vec<Todo> = sqlx::query_as(
            "SELECT id, task_name, deadline, done FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, DbError> {
        let todo: Option<Todo> = sqlx::query_as(
            "SELECT id, task_name, deadline, done FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo, DbError> {
        let created: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (task_name, deadline, done)
            VALUES ($1, $2, FALSE)
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
        let saved: Option<Todo> = sqlx::query_as(
            r#"
            UPDATE todos SET done = $1
            WHERE id = $2
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
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pg_pool;
    use crate::models::TaskName;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p tickdone-server -- --ignored

    async fn store() -> PostgresTodoStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pg_pool(&url, 2).await.expect("pool creation failed");
        let store = PostgresTodoStore::new(pool);
        store.migrate().await.expect("migration failed");
        store
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_update_delete_roundtrip() {
        let store = store().await;
        let created = store
            .insert(NewTodo::new(TaskName::new("Postgres roundtrip task").unwrap(), None))
            .await
            .unwrap();
        assert!(!created.done);

        let mut edited = created.clone();
        edited.done = true;
        let saved = store.save(&edited).await.unwrap().expect("row exists");
        assert!(saved.done);
        assert_eq!(saved.task_name, created.task_name);

        assert!(store.remove(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn remove_missing_is_false() {
        let store = store().await;
        assert!(!store.remove(i64::MAX).await.unwrap());
    }
}
