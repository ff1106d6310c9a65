//! Error types for loading, question construction, selection and sessions.
//!
//! Fetch and load errors are recovered inside the loader, so the aggregate
//! session start never fails because of one part. Session errors signal
//! misuse of the state machine by the caller.

use thiserror::Error;

use crate::model::PartId;
use crate::session::SessionState;

/// Errors returned by a [`ResourceFetcher`](crate::traits::ResourceFetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing exists at the location.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {location}")]
    Status { location: String, status: u16 },

    /// The request did not complete in time.
    #[error("timed out after {secs}s fetching {location}")]
    Timeout { location: String, secs: u64 },

    /// Transport or I/O failure.
    #[error("network error fetching {location}: {message}")]
    Network { location: String, message: String },
}

impl FetchError {
    /// Returns `true` when the resource simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            FetchError::NotFound(_) | FetchError::Status { status: 404, .. }
        )
    }
}

/// Errors that stop one part from contributing questions.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No candidate location produced a body.
    #[error("no resource available for part {part} (tried {})", .tried.join(", "))]
    Unavailable { part: PartId, tried: Vec<String> },

    /// The body was neither JSON nor contained an embedded JSON object.
    #[error("failed to parse {location}: {message}")]
    Parse { location: String, message: String },

    /// The body parsed but held neither a question array nor a `questions` field.
    #[error("unexpected shape in {location}: {message}")]
    Shape { location: String, message: String },
}

/// Reasons a raw record cannot become a [`Question`](crate::model::Question).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text is missing")]
    MissingText,

    #[error("neither `options` nor `answers` is present")]
    MissingOptions,

    #[error("neither `correct_answer` nor `correct` is present")]
    MissingCorrect,

    #[error("expected at least 2 options, found {0}")]
    TooFewOptions(usize),

    #[error("correct answer {0:?} is not one of the options")]
    CorrectNotInOptions(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Errors from the limit preset group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown limit preset #{index} ({available} configured)")]
    UnknownPreset { index: usize, available: usize },
}

/// State-machine misuse in the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("question index {index} out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },

    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("question {index} has not been answered")]
    NotAnswered { index: usize },

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("{selected:?} is not an option of the current question")]
    UnknownOption { selected: String },
}
