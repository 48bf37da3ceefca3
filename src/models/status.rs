use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::errors::ServiceError;

/// Lifecycle state of a maintenance job.
///
/// The wire and storage representation uses the Spanish labels the fleet
/// operators work with; the variants are the closed set of states. Labels
/// are matched case-insensitively on input and always emitted in canonical
/// form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum JobStatus {
    #[serde(rename = "Pendiente")]
    #[strum(serialize = "Pendiente")]
    Pending,
    #[serde(rename = "EnProceso")]
    #[strum(serialize = "EnProceso")]
    InProgress,
    #[serde(rename = "Completado")]
    #[strum(serialize = "Completado")]
    Completed,
}

impl JobStatus {
    pub const ALLOWED: [&'static str; 3] = ["Pendiente", "EnProceso", "Completado"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "EnProceso",
            Self::Completed => "Completado",
        }
    }

    /// Parses a label arriving at the API boundary.
    pub fn parse(value: &str) -> Result<Self, ServiceError> {
        value
            .trim()
            .parse()
            .map_err(|_| ServiceError::InvalidParameter {
                message: format!("Invalid status '{}'.", value.trim()),
                details: json!({ "allowed": Self::ALLOWED }),
            })
    }

    /// Parses a label read back from storage. A failure here means the
    /// stored row is corrupt and is surfaced as an internal error, never
    /// silently defaulted.
    pub fn from_stored(value: &str) -> Result<Self, ServiceError> {
        value.parse().map_err(|_| {
            ServiceError::Internal(format!(
                "stored job status '{value}' is not a recognized label"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_canonical_labels() {
        assert_eq!(JobStatus::parse("Pendiente").unwrap(), JobStatus::Pending);
        assert_eq!(
            JobStatus::parse("EnProceso").unwrap(),
            JobStatus::InProgress
        );
        assert_eq!(
            JobStatus::parse("Completado").unwrap(),
            JobStatus::Completed
        );
    }

    #[test]
    fn parsing_is_case_insensitive_and_trims() {
        assert_eq!(JobStatus::parse("pendiente").unwrap(), JobStatus::Pending);
        assert_eq!(
            JobStatus::parse("  COMPLETADO ").unwrap(),
            JobStatus::Completed
        );
    }

    #[test]
    fn rejects_unknown_labels_with_allowed_set() {
        let err = JobStatus::parse("Done").unwrap_err();
        assert_matches!(err, ServiceError::InvalidParameter { details, .. } => {
            assert_eq!(details["allowed"], json!(JobStatus::ALLOWED));
        });
    }

    #[test]
    fn stored_labels_never_default() {
        assert_matches!(
            JobStatus::from_stored("Broken"),
            Err(ServiceError::Internal(_))
        );
    }

    #[test]
    fn serializes_to_canonical_label() {
        assert_eq!(
            serde_json::to_string(&JobStatus::InProgress).unwrap(),
            "\"EnProceso\""
        );
    }
}
