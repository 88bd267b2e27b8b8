//! Public redirect handler.

use std::fmt::Write as _;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, LOCATION};
use axum::response::{IntoResponse, Response};
use tracing::error;

use linkhub_auth::LinkError;

use crate::error::status_for;
use crate::state::AppState;

/// GET /l/{token}
///
/// Success is a `302 Found`. Failures are short plaintext bodies.
pub async fn follow_link(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    match state.resolver.resolve(&token) {
        Ok(link) => (
            StatusCode::FOUND,
            [
                (LOCATION, location_value(&link.target)),
                (CACHE_CONTROL, "no-store".to_string()),
            ],
        )
            .into_response(),
        Err(err) => rejection(err),
    }
}

fn rejection(err: LinkError) -> Response {
    let status = status_for(err.kind());
    let body = match &err {
        LinkError::Configuration(message) => {
            error!(reason = %message, "Redirect refused: server misconfigured");
            "Server misconfigured".to_string()
        }
        other => other.to_string(),
    };
    (status, body).into_response()
}

/// Percent-encode anything a `Location` header cannot carry verbatim.
/// Existing escapes and URL delimiters are kept.
fn location_value(target: &str) -> String {
    let mut out = String::with_capacity(target.len());
    for &byte in target.as_bytes() {
        if byte.is_ascii_graphic() {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_non_ascii_and_spaces() {
        assert_eq!(
            location_value("https://cdn.x/a b/ü.mp4?x=1"),
            "https://cdn.x/a%20b/%C3%BC.mp4?x=1"
        );
        assert_eq!(location_value("https://cdn.x/a%20b"), "https://cdn.x/a%20b");
    }

    #[test]
    fn rejection_statuses() {
        let cases = [
            (LinkError::MalformedToken, 400),
            (LinkError::InvalidSignature, 401),
            (LinkError::MalformedPayload, 400),
            (LinkError::Expired, 410),
            (LinkError::Configuration("secret".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(rejection(err).status().as_u16(), status);
        }
    }
}
