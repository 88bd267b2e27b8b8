//! Custom Axum extractors.

pub mod admin;
pub mod client_ip;

pub use admin::AdminAuth;
pub use client_ip::ClientIp;
