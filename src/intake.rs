//! # Intake Module
//!
//! State machine that collects a submission over several messages (category,
//! text, photos) and hands the finished report to a [`Dispatcher`] when the
//! user signals completion.
//!
//! Rejections and events for users without an active submission are not
//! errors: they are reported back as an [`Outcome`] and leave the store as is.

use chrono::Utc;
use tracing::{debug, info};

use crate::store::SubmissionStore;
use crate::submission::{
    Category, PhotoRef, Report, Submission, SubmissionConfig, SubmissionState, Submitter,
    MAX_PHOTOS,
};

/// Receives finished reports for delivery
///
/// Handoff is fire-and-forget: the submission is already gone from the store
/// when `dispatch` is called, and delivery failures never reach the intake.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, report: Report);
}

/// Inbound user event
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Select(Category),
    Text(String),
    Photo(PhotoRef),
    Complete,
}

/// Why a user input was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A photo arrived before any text
    TextRequired,
    /// The submission already holds the maximum number of photos
    PhotoLimitReached,
}

/// Result of applying an event
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Started(Category),
    TextAccepted { first: bool },
    PhotoAccepted { count: usize },
    Rejected(Rejection),
    Completed,
    /// No active submission, or nothing to do
    Ignored,
}

/// Submission intake over a shared store
pub struct Intake<D> {
    store: SubmissionStore,
    dispatcher: D,
    config: SubmissionConfig,
}

impl<D: Dispatcher> Intake<D> {
    pub fn new(store: SubmissionStore, dispatcher: D, config: SubmissionConfig) -> Self {
        Self {
            store,
            dispatcher,
            config,
        }
    }

    pub fn store(&self) -> &SubmissionStore {
        &self.store
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    /// Current state of the submitter's submission
    pub async fn state(&self, submitter_id: u64) -> SubmissionState {
        self.store.get(submitter_id).await.into()
    }

    /// Apply one event from `submitter`
    pub async fn handle(&self, submitter: &Submitter, event: Event) -> Outcome {
        match event {
            Event::Select(category) => self.select(submitter, category).await,
            Event::Text(text) => self.text(submitter, text).await,
            Event::Photo(photo) => self.photo(submitter, photo).await,
            Event::Complete => self.complete(submitter).await,
        }
    }

    async fn select(&self, submitter: &Submitter, category: Category) -> Outcome {
        let submission = Submission::new(category, Utc::now());
        if let Some(previous) = self.store.set(submitter.id, submission).await {
            debug!(
                user_id = %submitter.id,
                previous_category = ?previous.category,
                "Replaced unfinished submission"
            );
        }
        info!(user_id = %submitter.id, category = ?category, "Submission started");
        Outcome::Started(category)
    }

    async fn text(&self, submitter: &Submitter, text: String) -> Outcome {
        if text.is_empty() {
            return Outcome::Ignored;
        }

        let outcome = self
            .store
            .update(submitter.id, |submission| {
                let first = !submission.has_text();
                if !first {
                    submission.text.push('\n');
                }
                submission.text.push_str(&text);
                Outcome::TextAccepted { first }
            })
            .await;

        match outcome {
            Some(outcome) => {
                debug!(user_id = %submitter.id, text_length = text.len(), "Text appended");
                outcome
            }
            None => Outcome::Ignored,
        }
    }

    async fn photo(&self, submitter: &Submitter, photo: PhotoRef) -> Outcome {
        let outcome = self
            .store
            .update(submitter.id, |submission| {
                if !submission.has_text() {
                    Outcome::Rejected(Rejection::TextRequired)
                } else if submission.photos.len() >= MAX_PHOTOS {
                    Outcome::Rejected(Rejection::PhotoLimitReached)
                } else {
                    submission.photos.push(photo);
                    Outcome::PhotoAccepted {
                        count: submission.photos.len(),
                    }
                }
            })
            .await
            .unwrap_or(Outcome::Ignored);

        debug!(user_id = %submitter.id, outcome = ?outcome, "Photo handled");
        outcome
    }

    async fn complete(&self, submitter: &Submitter) -> Outcome {
        let Some(submission) = self.store.take(submitter.id).await else {
            return Outcome::Ignored;
        };

        let report = Report::new(submitter, submission);
        info!(
            user_id = %submitter.id,
            category = ?report.category,
            photos = report.photos.len(),
            "Submission completed, handing off"
        );
        self.dispatcher.dispatch(report);
        Outcome::Completed
    }
}
