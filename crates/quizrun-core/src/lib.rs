//! quizrun-core — Question pool assembly, selection and session progression.
//!
//! This crate defines the question model, the tolerant source loader, the
//! selection policy, the session state machine and scoring that every
//! quizrun front end builds on.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod report;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod traits;

pub use error::{FetchError, LoadError, QuestionError, SelectionError, SessionError};
pub use model::{PartId, Question, QuestionPool};
pub use scoring::{score, Response, Score};
pub use session::{SessionController, SessionState};
