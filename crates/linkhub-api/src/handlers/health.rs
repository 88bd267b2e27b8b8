//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{HealthEnv, HealthResponse};
use crate::state::AppState;

/// Version of the HTTP contract.
pub const API_VERSION: &str = "1";

/// GET /health
///
/// 200 when links can be minted and resolved, 500 otherwise. Reports which
/// settings are present without revealing them.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let links = &state.config.links;
    let ok = links.signing_set() && links.pull_base_set();
    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(HealthResponse {
            ok,
            version: API_VERSION.to_string(),
            env: HealthEnv {
                port: state.config.server.port,
                public_base: links.public_base.clone(),
                pull_base_set: links.pull_base_set(),
                signing_set: links.signing_set(),
                admin_set: state.gate.is_configured(),
            },
        }),
    )
}
