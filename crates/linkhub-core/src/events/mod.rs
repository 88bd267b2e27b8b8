//! Job progress events reported by users and workers.
//!
//! Events are advisory observability data: they feed the admin summary and
//! the public status tracker, and are never used for link decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who reported an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// An end user submitting or watching a job.
    User,
    /// A processing node working on a job.
    Worker,
}

/// Reported job state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Accepted and waiting for a worker.
    Queued,
    /// Being processed.
    Running,
    /// Finished successfully.
    Done,
    /// Finished with an error.
    Error,
    /// Any status string this service does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Whether no further progress is expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// A stored job event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event was recorded.
    pub at: DateTime<Utc>,
    /// Reporter kind.
    pub actor: ActorKind,
    /// Reporting user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Reporting node, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Job the event belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Free-form pipeline stage (e.g. "upload", "transcode").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Reported job state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobState>,
    /// Progress percentage, 0 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Bytes transferred by the step this event describes.
    #[serde(default)]
    pub bytes: u64,
    /// Free-form note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Event fields supplied by a reporter. ID and timestamp are assigned on
/// ingestion.
#[derive(Debug, Clone, Default)]
pub struct NewJobEvent {
    /// Reporter kind.
    pub actor: Option<ActorKind>,
    /// Reporting user.
    pub user_id: Option<String>,
    /// Reporting node.
    pub node_id: Option<String>,
    /// Job the event belongs to.
    pub job_id: Option<String>,
    /// Pipeline stage.
    pub stage: Option<String>,
    /// Reported state.
    pub status: Option<JobState>,
    /// Progress percentage.
    pub progress: Option<f32>,
    /// Bytes transferred.
    pub bytes: u64,
    /// Free-form note.
    pub note: Option<String>,
}

impl NewJobEvent {
    /// Stamp the event with an ID and time. A missing actor is inferred from
    /// which reporter ID is present (node ⇒ worker, otherwise user).
    pub fn into_event(self, at: DateTime<Utc>) -> JobEvent {
        let actor = self.actor.unwrap_or(if self.node_id.is_some() {
            ActorKind::Worker
        } else {
            ActorKind::User
        });

        JobEvent {
            id: Uuid::new_v4(),
            at,
            actor,
            user_id: self.user_id,
            node_id: self.node_id,
            job_id: self.job_id,
            stage: self.stage,
            status: self.status,
            progress: self.progress,
            bytes: self.bytes,
            note: self.note,
        }
    }
}
