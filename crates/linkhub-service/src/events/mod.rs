//! Volatile job event store, job status tracking and admin summary.

pub mod store;
pub mod summary;

pub use store::{EventFilter, EventStore, JobStatus, JobStep, MAX_LIST_LIMIT};
pub use summary::{EventSummary, JobCounts};
