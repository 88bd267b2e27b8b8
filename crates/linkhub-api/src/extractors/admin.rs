//! `AdminAuth` extractor: runs the admin gate before an admin handler.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use linkhub_auth::bearer_token;

use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::state::AppState;

/// Proof that the request passed the admin gate. Carries the caller
/// identity for logging.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub caller: String,
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(ClientIp(caller)) = ClientIp::from_request_parts(parts, state).await;

        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);

        state.gate.authorize(&caller, presented)?;
        Ok(Self { caller })
    }
}
