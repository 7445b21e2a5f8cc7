//! The task record and its creation input

use chrono::NaiveDateTime;
use serde::Serialize;

use super::TaskName;

/// A stored task.
///
/// Wire shape: `{ "id", "taskName", "deadline", "done" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub task_name: String,
    #[serde(serialize_with = "super::deadline::serialize")]
    pub deadline: Option<NaiveDateTime>,
    pub done: bool,
}

/// A validated task waiting for the store to assign its id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub task_name: TaskName,
    pub deadline: Option<NaiveDateTime>,
}

impl NewTodo {
    pub fn new(task_name: TaskName, deadline: Option<NaiveDateTime>) -> Self {
        Self {
            task_name,
            deadline,
        }
    }
}
