//! # Submission Store Module
//!
//! Keyed collection of in-progress submissions, one per submitter. Every
//! read and write goes through a single async mutex, so the event path and
//! the expiry sweep never touch the map concurrently.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::submission::Submission;

/// Thread-safe store of in-progress submissions keyed by submitter id
///
/// Cloning is cheap and yields a handle to the same underlying map.
#[derive(Clone, Default)]
pub struct SubmissionStore {
    submissions: Arc<Mutex<HashMap<u64, Submission>>>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the submitter's current submission
    pub async fn get(&self, id: u64) -> Option<Submission> {
        self.submissions.lock().await.get(&id).cloned()
    }

    /// Store a submission, replacing any existing one for the submitter
    ///
    /// Returns the replaced submission, if there was one.
    pub async fn set(&self, id: u64, submission: Submission) -> Option<Submission> {
        self.submissions.lock().await.insert(id, submission)
    }

    /// Remove the submitter's submission; no-op if absent
    pub async fn delete(&self, id: u64) {
        self.submissions.lock().await.remove(&id);
    }

    /// Remove and return the submitter's submission in one step
    pub async fn take(&self, id: u64) -> Option<Submission> {
        self.submissions.lock().await.remove(&id)
    }

    /// Mutate the submitter's submission in place while holding the lock
    ///
    /// Returns `None` without calling `f` when the submitter has no submission.
    pub async fn update<R>(&self, id: u64, f: impl FnOnce(&mut Submission) -> R) -> Option<R> {
        self.submissions.lock().await.get_mut(&id).map(f)
    }

    /// Remove every submission older than `max_age` at `now`
    ///
    /// Returns the number of removed submissions.
    pub async fn sweep_expired(&self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let mut submissions = self.submissions.lock().await;
        let before = submissions.len();

        submissions.retain(|id, submission| {
            let expired = submission.is_expired(now, max_age);
            if expired {
                debug!(user_id = %id, created_at = %submission.created_at, "Dropping expired submission");
            }
            !expired
        });

        before - submissions.len()
    }

    pub async fn len(&self) -> usize {
        self.submissions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submissions.lock().await.is_empty()
    }
}
