//! Public job status endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Html;

use linkhub_core::error::AppError;
use linkhub_service::JobStatus;

use crate::error::ApiError;
use crate::state::AppState;

const STATUS_PAGE: &str = include_str!("../../assets/status.html");

/// GET /api/jobs/{job_id}
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobStatus>, ApiError> {
    state
        .events
        .job_status(&job_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("Job not found").into())
}

/// GET /status/{job_id}
///
/// A static page; the script reads the job id from its own URL and polls
/// the job status endpoint.
pub async fn status_page(Path(_job_id): Path<String>) -> Html<&'static str> {
    Html(STATUS_PAGE)
}
