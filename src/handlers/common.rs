use crate::errors::ServiceError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::Validate;

/// Standard success response.
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response with a Location header for the new resource.
pub fn created_response<T: Serialize>(location: String, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(data),
    )
        .into_response()
}

/// Standard no content response.
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Validate request input.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|e| ServiceError::Validation(format!("Validation failed: {e}")))
}

/// Json extractor that reports malformed or mistyped bodies as 400
/// validation errors instead of axum's default 422.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ServiceError::Validation(rejection.body_text())),
        }
    }
}
