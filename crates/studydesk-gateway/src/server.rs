//! HTTP server implementation using Axum.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use studydesk_core::{MonotonicMillis, Result, StudyDeskConfig, StudyDeskError};
use studydesk_tracker::{Collection, StudyService, TaskService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for the gateway server.
pub struct AppState {
    pub config: StudyDeskConfig,
    pub start_time: std::time::Instant,
    pub tasks: TaskService,
    pub study: StudyService,
}

impl AppState {
    pub fn new(config: StudyDeskConfig, tasks: TaskService, study: StudyService) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
            tasks,
            study,
        }
    }

    /// State backed by the collection files named in `config.storage`.
    pub fn from_config(config: StudyDeskConfig) -> Self {
        let storage = &config.storage;
        let tasks = TaskService::new(
            Collection::open(&storage.tasks_path(), storage.serialize_writes),
            Arc::new(MonotonicMillis::new()),
        );
        let study = StudyService::new(Collection::open(
            &storage.study_path(),
            storage.serialize_writes,
        ));
        Self::new(config, tasks, study)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(super::routes::health_check))
        .route(
            "/tasks",
            get(super::routes::list_tasks).post(super::routes::create_task),
        )
        .route(
            "/tasks/{id}",
            put(super::routes::update_task).delete(super::routes::delete_task),
        )
        .route(
            "/study-time",
            get(super::routes::list_study_time).post(super::routes::add_study_time),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1_048_576))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server.
pub async fn start(config: StudyDeskConfig) -> Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let port = config.gateway.port;

    tracing::info!(
        "📂 Collections: tasks={}, study-time={} (serialize_writes={})",
        config.storage.tasks_path().display(),
        config.storage.study_path().display(),
        config.storage.serialize_writes
    );
    let app = build_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StudyDeskError::Gateway(format!("Bind error on {addr}: {e}")))?;
    tracing::info!("🚀 Server is running on http://localhost:{port}");

    axum::serve(listener, app)
        .await
        .map_err(|e| StudyDeskError::Gateway(format!("Server error: {e}")))?;
    Ok(())
}
