use super::common::{
    created_response, no_content_response, success_response, validate_input, ApiJson,
};
use crate::{
    errors::ServiceError,
    models::{JobListParams, JobListQuery, JobStatus},
    services::maintenance_jobs::JobInput,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or fully replacing a maintenance job.
/// `technicianIds` carries raw ids; the response expands them to
/// `{id, name}` pairs.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    #[validate(length(min = 1, max = 100))]
    pub equipment: String,
    #[validate(length(min = 1, max = 100))]
    pub company: String,
    #[validate(length(min = 1, max = 100))]
    pub plane: String,
    #[serde(default)]
    pub technician_ids: Vec<i32>,
    /// Status label; defaults to Pendiente when absent.
    pub status: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    #[serde(default)]
    pub anomaly: bool,
}

impl JobPayload {
    fn into_input(self) -> Result<JobInput, ServiceError> {
        let status = match self.status.as_deref() {
            Some(raw) => JobStatus::parse(raw)?,
            None => JobStatus::Pending,
        };

        Ok(JobInput {
            equipment: self.equipment,
            company: self.company,
            plane: self.plane,
            technician_ids: self.technician_ids,
            status,
            notes: self.notes,
            anomaly: self.anomaly,
        })
    }
}

/// Request body for the status-only update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: Option<String>,
}

/// List maintenance jobs with pagination, filtering and sorting.
#[utoipa::path(
    get,
    path = "/maintenancejobs",
    params(JobListParams),
    responses(
        (status = 200, description = "Paged job listing", body = crate::services::maintenance_jobs::PagedJobs),
        (status = 400, description = "Invalid parameters", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<JobListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let query = JobListQuery::from_params(params)?;
    Ok(success_response(
        state.services.maintenance_jobs.list(query).await?,
    ))
}

/// Fetch a maintenance job by id.
#[utoipa::path(
    get,
    path = "/maintenancejobs/{id}",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job found", body = crate::services::maintenance_jobs::JobResponse),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let job = state
        .services
        .maintenance_jobs
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Maintenance job {id} not found")))?;

    Ok(success_response(job))
}

/// List maintenance jobs in exactly the given status.
#[utoipa::path(
    get,
    path = "/maintenancejobs/status/{status}",
    params(("status" = String, Path, description = "Status label: Pendiente, EnProceso or Completado")),
    responses(
        (status = 200, description = "Jobs in the given status", body = [crate::services::maintenance_jobs::JobResponse]),
        (status = 400, description = "Invalid status label", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn list_jobs_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = JobStatus::parse(&status)?;
    Ok(success_response(
        state.services.maintenance_jobs.by_status(status).await?,
    ))
}

/// Create a maintenance job.
#[utoipa::path(
    post,
    path = "/maintenancejobs",
    request_body = JobPayload,
    responses(
        (status = 201, description = "Job created", body = crate::services::maintenance_jobs::JobResponse),
        (status = 400, description = "Invalid data or unknown technicians", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<JobPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let input = payload.into_input()?;
    let job = state.services.maintenance_jobs.create(input).await?;
    Ok(created_response(format!("/maintenancejobs/{}", job.id), job))
}

/// Fully replace a maintenance job, including its technician set.
#[utoipa::path(
    put,
    path = "/maintenancejobs/{id}",
    params(("id" = i32, Path, description = "Job id")),
    request_body = JobPayload,
    responses(
        (status = 204, description = "Job updated"),
        (status = 400, description = "Invalid data or unknown technicians", body = crate::errors::ErrorResponse),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn update_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<JobPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let input = payload.into_input()?;
    state.services.maintenance_jobs.update(id, input).await?;
    Ok(no_content_response())
}

/// Update only a job's status. The completion rule runs against the job's
/// stored notes.
#[utoipa::path(
    patch,
    path = "/maintenancejobs/{id}/status",
    params(("id" = i32, Path, description = "Job id")),
    request_body = UpdateStatusPayload,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Invalid status or completion rule violated", body = crate::errors::ErrorResponse),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn update_job_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let raw = payload
        .status
        .ok_or_else(|| ServiceError::Validation("The status field is required.".to_string()))?;
    let status = JobStatus::parse(&raw)?;

    state
        .services
        .maintenance_jobs
        .update_status(id, status)
        .await?;
    Ok(no_content_response())
}

/// Delete a maintenance job and its technician links.
#[utoipa::path(
    delete,
    path = "/maintenancejobs/{id}",
    params(("id" = i32, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance-jobs"
)]
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.maintenance_jobs.delete(id).await?;
    Ok(no_content_response())
}

/// Creates the router for maintenance job endpoints.
pub fn maintenance_job_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/status/:status", get(list_jobs_by_status))
        .route("/:id", get(get_job).put(update_job).delete(delete_job))
        .route("/:id/status", patch(update_job_status))
}
