//! Health check endpoint
//!
//! Reports the build version and whether the store answers a trivial query.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health - 200 when the store is reachable, 503 otherwise
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_sqlite_pool, SqliteTodoStore};

    #[tokio::test]
    async fn reachable_store_is_ok() {
        let pool = create_sqlite_pool("sqlite::memory:", 1).await.unwrap();
        let state = Arc::new(AppState::new(Arc::new(SqliteTodoStore::new(pool))));

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.database, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn closed_pool_is_unavailable() {
        let pool = create_sqlite_pool("sqlite::memory:", 1).await.unwrap();
        pool.close().await;
        let state = Arc::new(AppState::new(Arc::new(SqliteTodoStore::new(pool))));

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
    }
}
