//! # linkhub-api
//!
//! HTTP API layer for LinkHub built on Axum.
//!
//! Provides the admin endpoints (link minting, event ingestion and
//! listing, summary), the public redirect, job status and health routes,
//! middleware (CORS, request logging, rate limiting), extractors, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, spawn_maintenance};
pub use error::ApiError;
pub use state::AppState;
