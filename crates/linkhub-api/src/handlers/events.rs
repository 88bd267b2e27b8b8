//! Job event ingestion, listing and summary handlers (admin).

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use validator::Validate;

use linkhub_core::error::AppError;
use linkhub_core::events::{JobEvent, NewJobEvent};
use linkhub_service::{EventFilter, EventSummary};

use crate::dto::request::{EventsQuery, IngestEventRequest, describe_validation};
use crate::error::{ApiError, INVALID_BODY, INVALID_QUERY};
use crate::extractors::AdminAuth;
use crate::state::AppState;

/// Listing response.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<JobEvent>,
}

/// POST /api/events
pub async fn ingest_event(
    State(state): State<AppState>,
    _admin: AdminAuth,
    body: Result<Json<IngestEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JobEvent>), ApiError> {
    let Json(req) = body.map_err(|rejection| ApiError::unparsable(INVALID_BODY, rejection))?;
    req.validate()
        .map_err(|errors| AppError::validation(describe_validation(&errors)))?;

    let event = state.events.ingest(NewJobEvent::from(req)).await;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    _admin: AdminAuth,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::unparsable(INVALID_QUERY, rejection))?;

    let filter = EventFilter {
        actor: query.actor,
        job_id: query.job_id.filter(|id| !id.is_empty()),
        limit: query.limit,
    };
    let events = state.events.list(&filter).await;

    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

/// GET /api/summary
pub async fn summary(State(state): State<AppState>, _admin: AdminAuth) -> Json<EventSummary> {
    Json(state.events.summary().await)
}
