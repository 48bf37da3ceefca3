#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use mro_api::{
    config::AppConfig,
    db::{self, DbConfig, DbPool},
    entities::maintenance_job,
    handlers,
    migrator::Migrator,
    AppState,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test harness running the real router against an in-memory SQLite
/// database. A single pooled connection keeps the in-memory database alive
/// and shared for the lifetime of the harness.
pub struct TestApp {
    router: Router,
    pub db: Arc<DbPool>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::establish_connection(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .expect("failed to open in-memory database");

        Migrator::up(&pool, None).await.expect("migrations failed");

        let db = Arc::new(pool);
        let config = AppConfig::new("sqlite::memory:", "test");
        let state = Arc::new(AppState::new(db.clone(), config));
        let router = handlers::api_router().with_state(state);

        Self { router, db }
    }

    /// Sends a request through the router and returns the raw response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error")
    }

    /// Sends a request and decodes the response body as JSON. Empty bodies
    /// (204 responses) decode to `Value::Null`.
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse response body")
        };
        (status, value)
    }

    pub async fn create_technician(&self, name: &str) -> i64 {
        let (status, body) = self
            .request_json(Method::POST, "/technicians", Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create technician: {body}");
        body["id"].as_i64().expect("technician id")
    }

    pub async fn create_job(&self, payload: Value) -> Value {
        let (status, body) = self
            .request_json(Method::POST, "/maintenancejobs", Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create job: {body}");
        body
    }

    /// Pins a job's timestamps so ordering fixtures are deterministic.
    pub async fn set_job_timestamps(&self, id: i32, at: DateTime<Utc>) {
        let job = maintenance_job::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .expect("query job")
            .expect("job exists");

        let mut active: maintenance_job::ActiveModel = job.into();
        active.created_at = Set(at);
        active.updated_at = Set(at);
        active.update(&*self.db).await.expect("update timestamps");
    }
}

/// Convenience payload for a valid job creation request.
pub fn job_payload(equipment: &str, company: &str, plane: &str, status: &str) -> Value {
    json!({
        "equipment": equipment,
        "company": company,
        "plane": plane,
        "technicianIds": [],
        "status": status,
        "notes": null,
        "anomaly": false
    })
}
