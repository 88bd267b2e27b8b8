//! Storage collaborator implementations.

pub mod bunny;
pub mod pull_zone;

pub use bunny::BunnyStorageProvider;
pub use pull_zone::PullZone;
