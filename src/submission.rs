//! # Submission Module
//!
//! Data model for a single user's in-progress problem report or suggestion,
//! plus the fixed limits that govern how submissions are collected.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of photos attached to one submission; a hard cap
pub const MAX_PHOTOS: usize = 4;
/// Age after which an unfinished submission is discarded
pub const MAX_AGE_MINUTES: i64 = 60;
/// How often the background sweep looks for expired submissions
pub const SWEEP_INTERVAL_MINUTES: i64 = 60;

/// Kind of submission chosen by the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    ProblemReport,
    Suggestion,
}

impl Category {
    /// Callback payload carried by the inline keyboard button for this category
    pub fn callback_data(self) -> &'static str {
        match self {
            Category::ProblemReport => "report_problem",
            Category::Suggestion => "make_suggestion",
        }
    }

    /// Parse a callback payload back into a category
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "report_problem" => Some(Category::ProblemReport),
            "make_suggestion" => Some(Category::Suggestion),
            _ => None,
        }
    }
}

/// Opaque reference to a photo already uploaded to the chat platform
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoRef(pub String);

impl PhotoRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PhotoRef {
    fn from(value: String) -> Self {
        PhotoRef(value)
    }
}

impl From<&str> for PhotoRef {
    fn from(value: &str) -> Self {
        PhotoRef(value.to_string())
    }
}

/// One in-progress submission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub category: Category,
    pub text: String,
    pub photos: Vec<PhotoRef>,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Start an empty submission of the given category
    pub fn new(category: Category, created_at: DateTime<Utc>) -> Self {
        Self {
            category,
            text: String::new(),
            photos: Vec::new(),
            created_at,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Whether the submission is older than `max_age` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.created_at) > max_age
    }
}

/// Per-user submission state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SubmissionState {
    #[default]
    NoSubmission,
    InProgress(Submission),
}

impl From<Option<Submission>> for SubmissionState {
    fn from(value: Option<Submission>) -> Self {
        match value {
            Some(submission) => SubmissionState::InProgress(submission),
            None => SubmissionState::NoSubmission,
        }
    }
}

/// Expiry settings for unfinished submissions
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Unfinished submissions older than this are swept
    pub max_age: Duration,
    /// Period of the expiry sweep
    pub sweep_interval: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::minutes(MAX_AGE_MINUTES),
            sweep_interval: Duration::minutes(SWEEP_INTERVAL_MINUTES),
        }
    }
}

/// Identity of the user sending events
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitter {
    pub id: u64,
    pub username: Option<String>,
    pub first_name: String,
}

impl Submitter {
    /// `@username` when the user has one, the first name otherwise
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => format!("@{username}"),
            _ => self.first_name.clone(),
        }
    }
}

/// A finished submission as handed to the dispatcher
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub category: Category,
    pub submitter_id: u64,
    pub display_name: String,
    pub text: String,
    pub photos: Vec<PhotoRef>,
}

impl Report {
    pub fn new(submitter: &Submitter, submission: Submission) -> Self {
        Self {
            category: submission.category,
            submitter_id: submitter.id,
            display_name: submitter.display_name(),
            text: submission.text,
            photos: submission.photos,
        }
    }
}
