//! # linkhub-auth
//!
//! Everything that decides whether a token or a credential is genuine.
//!
//! ## Modules
//!
//! - `token`: link payload codec, token shape parsing, HMAC-SHA256 signer
//! - `gate`: admin bearer-token gate with per-caller failure throttling
//! - `compare`: constant-time byte comparison shared by both

pub mod compare;
pub mod error;
pub mod gate;
pub mod token;

pub use compare::constant_time_eq;
pub use error::LinkError;
pub use gate::{AdminGate, FailureLimiter, bearer_token};
pub use token::{LinkPayload, SignedToken, Signer};
