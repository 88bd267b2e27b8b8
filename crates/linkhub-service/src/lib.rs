//! # linkhub-service
//!
//! Use cases behind the HTTP layer. The link services are pure functions of
//! their input, the clock and immutable configuration. The event store is the
//! only component here holding mutable state.
//!
//! Dependencies are injected at construction time via `Arc` references.

pub mod events;
pub mod link;

pub use events::{EventFilter, EventStore, EventSummary, JobCounts, JobStatus, JobStep};
pub use link::{LinkIssuer, LinkResolver, MintedLink, ResolvedLink};
