use super::common::{
    created_response, no_content_response, success_response, validate_input, ApiJson,
};
use crate::{errors::ServiceError, AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or renaming a technician.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TechnicianPayload {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

/// List all technicians.
#[utoipa::path(
    get,
    path = "/technicians",
    responses(
        (status = 200, description = "All technicians", body = [crate::services::technicians::TechnicianResponse])
    ),
    tag = "technicians"
)]
pub async fn list_technicians(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServiceError> {
    Ok(success_response(state.services.technicians.list().await?))
}

/// Fetch a technician by id.
#[utoipa::path(
    get,
    path = "/technicians/{id}",
    params(("id" = i32, Path, description = "Technician id")),
    responses(
        (status = 200, description = "Technician found", body = crate::services::technicians::TechnicianResponse),
        (status = 404, description = "Technician not found", body = crate::errors::ErrorResponse)
    ),
    tag = "technicians"
)]
pub async fn get_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let technician = state
        .services
        .technicians
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Technician {id} not found")))?;

    Ok(success_response(technician))
}

/// Create a technician.
#[utoipa::path(
    post,
    path = "/technicians",
    request_body = TechnicianPayload,
    responses(
        (status = 201, description = "Technician created", body = crate::services::technicians::TechnicianResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "technicians"
)]
pub async fn create_technician(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<TechnicianPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let technician = state.services.technicians.create(payload.name).await?;
    Ok(created_response(
        format!("/technicians/{}", technician.id),
        technician,
    ))
}

/// Rename a technician.
#[utoipa::path(
    put,
    path = "/technicians/{id}",
    params(("id" = i32, Path, description = "Technician id")),
    request_body = TechnicianPayload,
    responses(
        (status = 204, description = "Technician updated"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Technician not found", body = crate::errors::ErrorResponse)
    ),
    tag = "technicians"
)]
pub async fn update_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<TechnicianPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    state.services.technicians.update(id, payload.name).await?;
    Ok(no_content_response())
}

/// Delete a technician, unlinking it from every job.
#[utoipa::path(
    delete,
    path = "/technicians/{id}",
    params(("id" = i32, Path, description = "Technician id")),
    responses(
        (status = 204, description = "Technician deleted"),
        (status = 404, description = "Technician not found", body = crate::errors::ErrorResponse)
    ),
    tag = "technicians"
)]
pub async fn delete_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.technicians.delete(id).await?;
    Ok(no_content_response())
}

/// Creates the router for technician endpoints.
pub fn technician_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_technicians).post(create_technician))
        .route(
            "/:id",
            get(get_technician)
                .put(update_technician)
                .delete(delete_technician),
        )
}
