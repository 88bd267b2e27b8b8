//! In-memory job event store.
//!
//! Two views over the same events: a bounded recent-event log for the admin
//! listing and summary, and per-job entries for the public status tracker.
//! Nothing survives a restart.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use linkhub_core::config::EventsConfig;
use linkhub_core::events::{ActorKind, JobEvent, JobState, NewJobEvent};
use linkhub_core::traits::Clock;

use super::summary::{EventSummary, JobCounts, estimate_cost};

/// Largest number of events a single listing returns.
pub const MAX_LIST_LIMIT: usize = 1_000;
/// Listing size when none is requested.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Listing filter. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub actor: Option<ActorKind>,
    pub job_id: Option<String>,
    /// Clamped to `1..=MAX_LIST_LIMIT`; defaults to [`DEFAULT_LIST_LIMIT`].
    pub limit: Option<usize>,
}

impl EventFilter {
    fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }

    fn matches(&self, event: &JobEvent) -> bool {
        self.actor.is_none_or(|actor| event.actor == actor)
            && self
                .job_id
                .as_deref()
                .is_none_or(|job| event.job_id.as_deref() == Some(job))
    }
}

/// Latest known state of one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub job_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub status: JobState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Sum of bytes over every event seen for the job.
    pub bytes: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub event_count: u64,
    /// True once the job reached `done` or `error`.
    pub finished: bool,
    /// Most recent steps, newest first.
    pub events: Vec<JobStep>,
}

/// Public view of one event. Reporter identities and notes stay in the
/// admin listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStep {
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    pub bytes: u64,
}

impl From<&JobEvent> for JobStep {
    fn from(event: &JobEvent) -> Self {
        Self {
            at: event.at,
            stage: event.stage.clone(),
            status: event.status,
            progress: event.progress,
            bytes: event.bytes,
        }
    }
}

#[derive(Debug)]
struct JobEntry {
    stage: Option<String>,
    status: JobState,
    progress: Option<f32>,
    bytes: u64,
    first_seen: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    event_count: u64,
    events: VecDeque<JobEvent>,
}

impl JobEntry {
    fn new(at: DateTime<Utc>) -> Self {
        Self {
            stage: None,
            status: JobState::Unknown,
            progress: None,
            bytes: 0,
            first_seen: at,
            last_seen: at,
            event_count: 0,
            events: VecDeque::new(),
        }
    }

    /// Fold `event` in. Fields the event leaves unset keep their last value.
    fn apply(&mut self, event: &JobEvent, keep: usize) {
        if let Some(stage) = &event.stage {
            self.stage = Some(stage.clone());
        }
        if let Some(status) = event.status {
            self.status = status;
            if status == JobState::Done && event.progress.is_none() {
                self.progress = Some(100.0);
            }
        }
        if let Some(progress) = event.progress {
            self.progress = Some(progress.clamp(0.0, 100.0));
        }
        self.bytes = self.bytes.saturating_add(event.bytes);
        self.last_seen = self.last_seen.max(event.at);
        self.event_count += 1;

        self.events.push_front(event.clone());
        self.events.truncate(keep);
    }

    fn to_status(&self, job_id: &str) -> JobStatus {
        JobStatus {
            job_id: job_id.to_string(),
            stage: self.stage.clone(),
            status: self.status,
            progress: self.progress,
            bytes: self.bytes,
            first_seen: self.first_seen,
            last_seen: self.last_seen,
            event_count: self.event_count,
            finished: self.status.is_terminal(),
            events: self.events.iter().map(JobStep::from).collect(),
        }
    }
}

/// Bounded, volatile store of job events.
#[derive(Debug)]
pub struct EventStore {
    /// Newest first.
    recent: RwLock<VecDeque<JobEvent>>,
    jobs: DashMap<String, JobEntry>,
    config: EventsConfig,
    clock: Arc<dyn Clock>,
}

impl EventStore {
    pub fn new(config: EventsConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            recent: RwLock::new(VecDeque::new()),
            jobs: DashMap::new(),
            config,
            clock,
        }
    }

    fn capacity(&self) -> usize {
        self.config.capacity.max(1)
    }

    /// Stamp and record one event.
    pub async fn ingest(&self, new: NewJobEvent) -> JobEvent {
        let event = new.into_event(self.clock.now());

        if let Some(job_id) = &event.job_id {
            self.jobs
                .entry(job_id.clone())
                .or_insert_with(|| JobEntry::new(event.at))
                .apply(&event, self.config.per_job_capacity.max(1));
            self.evict_jobs();
        }

        {
            let mut recent = self.recent.write().await;
            recent.push_front(event.clone());
            recent.truncate(self.capacity());
        }

        debug!(
            event_id = %event.id,
            job_id = event.job_id.as_deref().unwrap_or(""),
            actor = ?event.actor,
            "Recorded job event"
        );
        event
    }

    /// Drop the least recently seen jobs until the job count fits.
    fn evict_jobs(&self) {
        while self.jobs.len() > self.capacity() {
            let oldest = self
                .jobs
                .iter()
                .min_by_key(|entry| entry.last_seen)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(job_id) => {
                    self.jobs.remove(&job_id);
                }
                None => break,
            }
        }
    }

    /// Recent events matching `filter`, newest first.
    pub async fn list(&self, filter: &EventFilter) -> Vec<JobEvent> {
        let recent = self.recent.read().await;
        recent
            .iter()
            .filter(|event| filter.matches(event))
            .take(filter.effective_limit())
            .cloned()
            .collect()
    }

    /// Current state of `job_id`, if any event mentioned it.
    pub fn job_status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.get(job_id).map(|entry| entry.to_status(job_id))
    }

    /// Aggregate the last 24 hours.
    pub async fn summary(&self) -> EventSummary {
        let now = self.clock.now();
        let day_ago = now - Duration::hours(24);
        let online_since = now - Duration::seconds(self.config.online_window_seconds.max(0));

        let mut events_24h = 0u64;
        let mut bandwidth_bytes = 0u64;
        let mut workers = HashSet::new();
        let mut users = HashSet::new();
        {
            let recent = self.recent.read().await;
            for event in recent.iter().take_while(|event| event.at >= day_ago) {
                events_24h += 1;
                bandwidth_bytes = bandwidth_bytes.saturating_add(event.bytes);
                if let Some(user) = &event.user_id {
                    users.insert(user.clone());
                }
                if let Some(node) = event.node_id.as_ref().filter(|_| event.at >= online_since) {
                    workers.insert(node.clone());
                }
            }
        }

        let mut jobs = JobCounts::default();
        for entry in self.jobs.iter().filter(|entry| entry.last_seen >= day_ago) {
            match entry.status {
                JobState::Queued => jobs.queued += 1,
                JobState::Running => jobs.running += 1,
                JobState::Done => jobs.done += 1,
                JobState::Error => jobs.error += 1,
                JobState::Unknown => {}
            }
        }

        EventSummary {
            generated_at: now,
            events_24h,
            jobs,
            workers_online: workers.len() as u64,
            users_active: users.len() as u64,
            bandwidth_bytes,
            estimated_cost: estimate_cost(bandwidth_bytes, self.config.price_per_gb),
        }
    }

    /// Events held in the recent log.
    pub async fn len(&self) -> usize {
        self.recent.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Jobs currently tracked.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
