//! # linkhub-storage
//!
//! Object storage collaborators for LinkHub: a pull-zone locator that turns
//! object paths into fetchable URLs, and an HTTP uploader for the storage
//! zone behind it.

pub mod paths;
pub mod providers;

pub use paths::{join_url, normalize_object_path, upload_key};
pub use providers::{BunnyStorageProvider, PullZone};
