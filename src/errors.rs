use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "message": "Invalid sortBy 'foo'.",
    "details": { "allowed": ["id", "equipment", "company", "plane", "status", "createdAt", "updatedAt"] },
    "timestamp": "2024-01-01T12:00:00Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Bad Request", "Not Found").
    pub error: String,
    /// Human-readable error description.
    pub message: String,
    /// Machine-checkable error context: allowed sets, offending ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// ISO 8601 timestamp when the error occurred.
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// Rejected request parameter; `details` names the allowed set or range.
    #[error("{message}")]
    InvalidParameter {
        message: String,
        details: serde_json::Value,
    },

    #[error("Some technicians were not found.")]
    MissingTechnicians(Vec<i32>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidParameter { .. } | Self::MissingTechnicians(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Message suitable for HTTP responses. Internal failures return a
    /// generic message so implementation details do not leak.
    pub fn response_message(&self) -> String {
        match self {
            Self::Database(_) => "Database error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidParameter { details, .. } => Some(details.clone()),
            Self::MissingTechnicians(ids) => Some(json!({ "missingIds": ids })),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: self.details(),
            timestamp: Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::MissingTechnicians(vec![7]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak() {
        let err = ServiceError::Internal("stored status 'Broken' unparsable".into());
        assert_eq!(err.response_message(), "Internal server error");
    }

    #[test]
    fn missing_technicians_carry_ids() {
        let details = ServiceError::MissingTechnicians(vec![3, 9])
            .details()
            .unwrap();
        assert_eq!(details["missingIds"], json!([3, 9]));
    }
}
