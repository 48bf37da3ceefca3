use utoipa::OpenApi;

/// Aggregated OpenAPI documentation for the maintenance API, served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MRO API",
        description = "Aircraft maintenance job tracking and technician assignment"
    ),
    paths(
        crate::handlers::maintenance_jobs::list_jobs,
        crate::handlers::maintenance_jobs::get_job,
        crate::handlers::maintenance_jobs::list_jobs_by_status,
        crate::handlers::maintenance_jobs::create_job,
        crate::handlers::maintenance_jobs::update_job,
        crate::handlers::maintenance_jobs::update_job_status,
        crate::handlers::maintenance_jobs::delete_job,
        crate::handlers::technicians::list_technicians,
        crate::handlers::technicians::get_technician,
        crate::handlers::technicians::create_technician,
        crate::handlers::technicians::update_technician,
        crate::handlers::technicians::delete_technician,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::models::JobStatus,
        crate::handlers::maintenance_jobs::JobPayload,
        crate::handlers::maintenance_jobs::UpdateStatusPayload,
        crate::handlers::technicians::TechnicianPayload,
        crate::services::maintenance_jobs::JobResponse,
        crate::services::maintenance_jobs::PagedJobs,
        crate::services::technicians::TechnicianResponse,
    )),
    tags(
        (name = "maintenance-jobs", description = "Maintenance job registry"),
        (name = "technicians", description = "Technician directory")
    )
)]
pub struct ApiDoc;
