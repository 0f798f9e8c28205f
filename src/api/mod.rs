//! REST surface of the task board.
//!
//! Handlers only translate: they parse the request, hand the typed input to a
//! service on the blocking pool and map the outcome to a status code.
//!
//! ```rust,no_run
//! use tasklane::api::{router, AppState};
//! use tasklane::db::db::Db;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let app = router(AppState::new(Db::in_memory()?));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod dto;
pub mod error;
pub mod tags;
pub mod tasks;

use crate::db::db::Db;
use crate::libs::data_storage::APP_VERSION;
use crate::libs::error::AppResult;
use crate::services::{categories::CategoryService, tags::TagService, tasks::TaskService};
use axum::routing::{get, post};
use axum::{Json, Router};
use error::ApiErrorResponse;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
    pub categories: CategoryService,
    pub tags: TagService,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self {
            tasks: TaskService::new(db.clone()),
            categories: CategoryService::new(db.clone()),
            tags: TagService::new(db),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task).put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/tasks/{id}/toggle", post(tasks::toggle_task))
        .route("/categories", get(categories::list_categories).post(categories::create_category))
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/tags/{id}", get(tags::get_tag).put(tags::update_tag).delete(tags::delete_tag))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: APP_VERSION.to_string(),
    })
}

/// Runs a service call on the blocking pool; SQLite access is synchronous.
pub(crate) async fn blocking<T, F>(call: F) -> Result<T, ApiErrorResponse>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(call).await {
        Ok(result) => result.map_err(ApiErrorResponse::from),
        Err(error) => {
            tracing::error!(%error, "service task failed");
            Err(ApiErrorResponse::internal_error())
        }
    }
}
