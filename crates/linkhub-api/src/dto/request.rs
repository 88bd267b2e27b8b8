//! Request DTOs with validation.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use linkhub_core::events::{ActorKind, JobState, NewJobEvent};

/// Mint request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Object path inside the pull zone.
    #[validate(length(min = 1, max = 1024, message = "path required"))]
    pub path: String,
    /// Requested lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl CreateLinkRequest {
    /// Requested TTL as the issuer expects it. Negative values ask for the
    /// shortest lifetime; zero means "not given".
    pub fn ttl(&self) -> Option<u64> {
        self.expires_in.map(|secs| u64::try_from(secs).unwrap_or(1))
    }
}

/// Job event ingestion body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reporter"))]
pub struct IngestEventRequest {
    pub actor: Option<ActorKind>,
    #[validate(length(min = 1, max = 128))]
    pub user_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub node_id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub job_id: Option<String>,
    #[validate(length(max = 64))]
    pub stage: Option<String>,
    pub status: Option<JobState>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress: Option<f32>,
    #[serde(default)]
    pub bytes: u64,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

fn validate_reporter(req: &IngestEventRequest) -> Result<(), ValidationError> {
    if req.user_id.is_none() && req.node_id.is_none() && req.job_id.is_none() {
        return Err(ValidationError::new("reporter")
            .with_message("one of userId, nodeId or jobId is required".into()));
    }
    Ok(())
}

impl From<IngestEventRequest> for NewJobEvent {
    fn from(req: IngestEventRequest) -> Self {
        Self {
            actor: req.actor,
            user_id: req.user_id,
            node_id: req.node_id,
            job_id: req.job_id,
            stage: req.stage,
            status: req.status,
            progress: req.progress,
            bytes: req.bytes,
            note: req.note,
        }
    }
}

/// `GET /api/events` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub actor: Option<ActorKind>,
    pub job_id: Option<String>,
    pub limit: Option<usize>,
}

/// Flatten validator output into one readable line.
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let detail = err
                .message
                .as_deref()
                .map(str::to_string)
                .unwrap_or_else(|| err.code.to_string());
            if field == "__all__" {
                parts.push(detail);
            } else {
                parts.push(format!("{field}: {detail}"));
            }
        }
    }
    if parts.is_empty() {
        "Invalid request".to_string()
    } else {
        parts.sort();
        parts.join("; ")
    }
}
