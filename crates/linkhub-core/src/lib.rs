//! # linkhub-core
//!
//! Core crate for LinkHub. Contains configuration schemas, the clock and
//! object-storage traits, job event domain types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other LinkHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
