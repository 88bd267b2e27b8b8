//! Link minting handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::info;
use validator::Validate;

use linkhub_core::error::AppError;

use crate::dto::request::{CreateLinkRequest, describe_validation};
use crate::dto::response::LinkResponse;
use crate::error::{ApiError, INVALID_BODY};
use crate::extractors::AdminAuth;
use crate::state::AppState;

/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    admin: AdminAuth,
    body: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, ApiError> {
    let Json(req) = body.map_err(|rejection| ApiError::unparsable(INVALID_BODY, rejection))?;
    req.validate()
        .map_err(|errors| AppError::validation(describe_validation(&errors)))?;

    let link = state.issuer.mint(&req.path, req.ttl())?;
    info!(caller = %admin.caller, exp = link.exp, "Issued link via API");

    Ok(Json(link.into()))
}
