//! Route handlers organized by domain.

pub mod events;
pub mod health;
pub mod jobs;
pub mod links;
pub mod redirect;
