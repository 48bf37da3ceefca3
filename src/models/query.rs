//! Filter specification for the job listing pipeline.
//!
//! The raw query string is deserialized into [`JobListParams`] and promoted
//! to a validated [`JobListQuery`] before any storage call. Validation order
//! is fixed: pagination bounds, sort direction, sort field, then the status
//! filter label — each failure names the offending parameter and the allowed
//! set so callers can fix the request without guessing.

use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::{errors::ServiceError, models::status::JobStatus};

pub const MAX_PAGE_SIZE: u64 = 100;
const DEFAULT_PAGE: u64 = 1;
const DEFAULT_PAGE_SIZE: u64 = 20;

/// Raw query parameters accepted by `GET /maintenancejobs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct JobListParams {
    /// Page number (>= 1).
    pub page: Option<u64>,
    /// Items per page (1-100).
    pub page_size: Option<u64>,
    /// Sort field: id, equipment, company, plane, status, createdAt, updatedAt.
    pub sort_by: Option<String>,
    /// Sort direction: asc or desc.
    pub sort_dir: Option<String>,
    /// Exact status filter.
    pub status: Option<String>,
    /// Company substring filter (case-insensitive).
    pub company: Option<String>,
    /// Plane substring filter (case-insensitive).
    pub plane: Option<String>,
    /// Equipment substring filter (case-insensitive).
    pub equipment: Option<String>,
    /// Exact anomaly-flag filter.
    pub anomaly: Option<bool>,
    /// Free-text search over equipment, company, plane and notes.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Equipment,
    Company,
    Plane,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALLOWED: [&'static str; 7] = [
        "id",
        "equipment",
        "company",
        "plane",
        "status",
        "createdAt",
        "updatedAt",
    ];

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "equipment" => Some(Self::Equipment),
            "company" => Some(Self::Company),
            "plane" => Some(Self::Plane),
            "status" => Some(Self::Status),
            "createdat" => Some(Self::CreatedAt),
            "updatedat" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Composed optional predicates applied before sorting and pagination.
/// All present predicates AND-compose; `search` is additive to the
/// field-specific filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub company: Option<String>,
    pub plane: Option<String>,
    pub equipment: Option<String>,
    pub anomaly: Option<bool>,
    pub search: Option<String>,
}

/// Fully validated listing request, independent of the storage technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListQuery {
    pub page: u64,
    pub page_size: u64,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
    pub filter: JobFilter,
}

impl JobListQuery {
    pub fn from_params(params: JobListParams) -> Result<Self, ServiceError> {
        let page = params.page.unwrap_or(DEFAULT_PAGE);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 || page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(ServiceError::InvalidParameter {
                message: "Invalid pagination parameters.".to_string(),
                details: json!({ "page": ">= 1", "pageSize": "1-100" }),
            });
        }

        let sort_dir = match normalized(params.sort_dir.as_deref()) {
            None => SortDir::Desc,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "asc" => SortDir::Asc,
                "desc" => SortDir::Desc,
                _ => {
                    return Err(ServiceError::InvalidParameter {
                        message: format!("Invalid sortDir '{raw}'."),
                        details: json!({ "allowed": ["asc", "desc"] }),
                    })
                }
            },
        };

        let sort_field = match normalized(params.sort_by.as_deref()) {
            None => SortField::CreatedAt,
            Some(raw) => {
                SortField::parse(raw).ok_or_else(|| ServiceError::InvalidParameter {
                    message: format!("Invalid sortBy '{raw}'."),
                    details: json!({ "allowed": SortField::ALLOWED }),
                })?
            }
        };

        let status = match normalized(params.status.as_deref()) {
            None => None,
            Some(raw) => Some(JobStatus::parse(raw)?),
        };

        Ok(Self {
            page,
            page_size,
            sort_field,
            sort_dir,
            filter: JobFilter {
                status,
                company: non_blank(params.company),
                plane: non_blank(params.plane),
                equipment: non_blank(params.equipment),
                anomaly: params.anomaly,
                search: non_blank(params.search),
            },
        })
    }

    /// Zero-based row offset of the requested page window.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }
}

fn normalized(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
