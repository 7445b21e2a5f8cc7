//! tickdone-server: task tracking over HTTP
//!
//! Stores tasks (name, optional deadline, completion flag) in SQLite or
//! PostgreSQL and exposes create/read/update/delete under `/todos`.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError, DatabaseProvider, DatabaseSettings};
pub use db::{connect, DbError, TodoStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::{NewTodo, TaskName, Todo};
