pub mod common;
pub mod maintenance_jobs;
pub mod technicians;

use crate::{
    db::DbPool,
    services::{maintenance_jobs::MaintenanceJobService, technicians::TechnicianService},
};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub technicians: Arc<TechnicianService>,
    pub maintenance_jobs: Arc<MaintenanceJobService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            technicians: Arc::new(TechnicianService::new(db.clone())),
            maintenance_jobs: Arc::new(MaintenanceJobService::new(db)),
        }
    }
}

/// Assembles the full API router. State is attached by the caller.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest(
            "/maintenancejobs",
            maintenance_jobs::maintenance_job_routes(),
        )
        .nest("/technicians", technicians::technician_routes())
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
}

/// Liveness probe with a database reachability check.
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = if state.db.ping().await.is_ok() {
        "up"
    } else {
        "down"
    };

    Json(json!({
        "status": "up",
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Raw OpenAPI document for the API surface.
async fn openapi_json() -> impl IntoResponse {
    Json(crate::openapi::ApiDoc::openapi())
}
