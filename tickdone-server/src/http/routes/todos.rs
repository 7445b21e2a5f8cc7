//! Task endpoints
//!
//! GET/POST /todos, GET/PUT/DELETE /todos/{id}

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::TodoId;
use crate::http::server::AppState;
use crate::models::{NewTodo, TaskName, Todo};

/// Create task request.
///
/// Field names are accepted in camelCase or PascalCase. A missing or null
/// name is treated as empty and fails the length check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[serde(default, alias = "TaskName")]
    pub task_name: Option<String>,
    #[serde(default, alias = "Deadline", with = "crate::models::deadline")]
    pub deadline: Option<NaiveDateTime>,
}

/// Update task request.
///
/// Clients may send a whole task; only `done` is read, and it defaults to
/// false when absent.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, alias = "Done")]
    pub done: bool,
}

/// GET /todos - list all tasks
async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.find_all().await?;
    Ok(Json(todos))
}

/// GET /todos/{id} - get a single task
async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    let todo = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "todo", id })?;

    Ok(Json(todo))
}

/// POST /todos - create a task
#[instrument(skip_all)]
async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Todo>), ApiError> {
    let task_name = TaskName::new(&req.task_name.unwrap_or_default())?;
    let todo = state.store.insert(NewTodo::new(task_name, req.deadline)).await?;

    tracing::info!(id = todo.id, "todo created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/todos/{}", todo.id))],
        Json(todo),
    ))
}

/// PUT /todos/{id} - set the completion flag
#[instrument(skip_all, fields(id = id))]
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let mut todo = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "todo", id })?;

    todo.done = req.done;

    // The row can disappear between the read and the write
    let saved = state
        .store
        .save(&todo)
        .await?
        .ok_or(ApiError::NotFound { resource: "todo", id })?;

    Ok(Json(saved))
}

/// DELETE /todos/{id} - delete a task
#[instrument(skip_all, fields(id = id))]
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    if !state.store.remove(id).await? {
        return Err(ApiError::NotFound { resource: "todo", id });
    }

    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Task routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
