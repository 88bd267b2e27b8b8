//! Route definitions for the LinkHub HTTP API.
//!
//! Admin and JSON routes are mounted under `/api`, behind CORS and the
//! request rate limiter. The redirect, health and status page routes are
//! public and sit at the root.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and route-scoped middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(link_routes())
        .merge(event_routes())
        .merge(job_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors));

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes())
        .with_state(state)
}

/// Link minting (admin)
fn link_routes() -> Router<AppState> {
    Router::new().route("/links", post(handlers::links::create_link))
}

/// Event ingestion, listing and summary (admin)
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            post(handlers::events::ingest_event).get(handlers::events::list_events),
        )
        .route("/summary", get(handlers::events::summary))
}

/// Job status polling (public)
fn job_routes() -> Router<AppState> {
    Router::new().route("/jobs/{job_id}", get(handlers::jobs::job_status))
}

/// Redirect, health and status page
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/l/{token}", get(handlers::redirect::follow_link))
        .route("/health", get(handlers::health::health))
        .route("/status/{job_id}", get(handlers::jobs::status_page))
}
