//! Question-by-question session state machine.
//!
//! `NotStarted -> InProgress -> Completed`. Each question is answered once
//! and then advanced past; after every `advance` the number of recorded
//! responses equals the current index.
//!
//! Options of the current question are presented in a freshly shuffled
//! order, independent of the shuffle that ordered the questions.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SessionError;
use crate::model::Question;
use crate::scoring::{score, Response, Score};
use crate::selection::shuffle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Owns one session's questions and responses.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    questions: Vec<Question>,
    index: usize,
    responses: Vec<Response>,
    presented: Vec<String>,
    rng: StdRng,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Controller whose option order is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            state: SessionState::NotStarted,
            questions: Vec::new(),
            index: 0,
            responses: Vec::new(),
            presented: Vec::new(),
            rng,
        }
    }

    /// A controller already started over `questions`. With a seed, option
    /// order is reproducible.
    pub fn started(questions: Vec<Question>, seed: Option<u64>) -> Self {
        let mut session = match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        session.begin(questions);
        session
    }

    /// Begin a session over `questions`. An empty list completes at once.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<SessionState, SessionError> {
        if self.state == SessionState::InProgress {
            return Err(SessionError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }
        self.begin(questions);
        Ok(self.state)
    }

    fn begin(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.index = 0;
        self.responses.clear();
        self.state = if self.questions.is_empty() {
            SessionState::Completed
        } else {
            SessionState::InProgress
        };
        self.present_current();

        tracing::debug!("session started with {} questions", self.questions.len());
    }

    /// Record `selected` as the answer to the current question.
    ///
    /// `selected` must be one of the question's options; any other text is
    /// rejected with [`SessionError::UnknownOption`] and nothing is recorded,
    /// so free-form input never counts as a wrong answer.
    pub fn answer(&mut self, selected: &str) -> Result<&Response, SessionError> {
        self.require_in_progress("answer")?;
        if self.is_answered() {
            return Err(SessionError::AlreadyAnswered { index: self.index });
        }

        let question = self.current_question()?;
        if !question.options().iter().any(|o| o == selected) {
            return Err(SessionError::UnknownOption {
                selected: selected.to_string(),
            });
        }

        let response = Response::new(selected, question.correct_option());
        self.responses.push(response);
        Ok(&self.responses[self.index])
    }

    /// Move past the answered current question.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        self.require_in_progress("advance")?;
        if !self.is_answered() {
            return Err(SessionError::NotAnswered { index: self.index });
        }

        self.index += 1;
        if self.index == self.questions.len() {
            self.state = SessionState::Completed;
            tracing::debug!("session completed after {} questions", self.index);
        }
        self.present_current();
        Ok(self.state)
    }

    /// The question awaiting an answer.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.questions
            .get(self.index)
            .ok_or(SessionError::OutOfRange {
                index: self.index,
                len: self.questions.len(),
            })
    }

    /// Options of the current question in presentation order.
    pub fn presented_options(&self) -> Result<&[String], SessionError> {
        self.current_question()?;
        Ok(&self.presented)
    }

    /// Whether the current question already has a response.
    pub fn is_answered(&self) -> bool {
        self.responses.len() > self.index
    }

    /// Discard the session and return to `NotStarted`.
    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.questions.clear();
        self.index = 0;
        self.responses.clear();
        self.presented.clear();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// One-based position of the current question and the session length.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.index + 1).min(total), total)
    }

    /// Score over the responses recorded so far.
    pub fn score(&self) -> Score {
        score(&self.responses)
    }

    fn require_in_progress(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.state == SessionState::InProgress {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn present_current(&mut self) {
        self.presented = match self.questions.get(self.index) {
            Some(q) => shuffle(q.options(), &mut self.rng),
            None => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartId;

    fn questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    format!("question {i}"),
                    vec!["yes".into(), "no".into(), "maybe".into()],
                    "yes",
                    PartId::from("1"),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn three_question_progression() {
        let mut session = SessionController::with_seed(1);
        assert_eq!(session.start(questions(3)), Ok(SessionState::InProgress));

        for i in 0..3 {
            assert_eq!(session.index(), i);
            assert_eq!(session.responses().len(), i);
            session.answer("yes").unwrap();
            session.advance().unwrap();
            assert_eq!(session.responses().len(), session.index());
        }

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(
            session.current_question(),
            Err(SessionError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            session.score(),
            Score {
                correct: 3,
                incorrect: 0,
                total: 3
            }
        );
    }

    #[test]
    fn empty_start_completes_immediately() {
        let mut session = SessionController::with_seed(1);
        assert_eq!(session.start(vec![]), Ok(SessionState::Completed));
        assert_eq!(session.score(), Score::default());
        assert!(session.current_question().is_err());
    }

    #[test]
    fn answer_records_correct_option() {
        let mut session = SessionController::with_seed(1);
        session.start(questions(2)).unwrap();

        let response = session.answer("no").unwrap().clone();
        assert_eq!(response, Response::new("no", "yes"));
        assert!(!response.is_correct());
        assert_eq!(session.index(), 0, "answer must not advance");
    }

    #[test]
    fn misuse_is_rejected() {
        let mut session = SessionController::with_seed(1);
        assert_eq!(
            session.answer("yes").unwrap_err(),
            SessionError::InvalidState {
                operation: "answer",
                state: SessionState::NotStarted
            }
        );

        session.start(questions(2)).unwrap();
        assert_eq!(
            session.advance(),
            Err(SessionError::NotAnswered { index: 0 })
        );
        assert_eq!(
            session.answer("perhaps").unwrap_err(),
            SessionError::UnknownOption {
                selected: "perhaps".into()
            }
        );
        session.answer("yes").unwrap();
        assert_eq!(
            session.answer("no").unwrap_err(),
            SessionError::AlreadyAnswered { index: 0 }
        );
        assert!(matches!(
            session.start(questions(1)),
            Err(SessionError::InvalidState {
                operation: "start",
                ..
            })
        ));
    }

    #[test]
    fn started_controller_is_in_progress() {
        let session = SessionController::started(questions(2), Some(4));
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.progress(), (1, 2));
        assert!(!session.is_answered());

        let again = SessionController::started(questions(2), Some(4));
        assert_eq!(
            session.presented_options().unwrap(),
            again.presented_options().unwrap()
        );

        let empty = SessionController::started(vec![], None);
        assert_eq!(empty.state(), SessionState::Completed);
    }

    #[test]
    fn is_answered_tracks_current_question() {
        let mut session = SessionController::with_seed(1);
        session.start(questions(2)).unwrap();
        assert!(!session.is_answered());
        session.answer("yes").unwrap();
        assert!(session.is_answered());
        session.advance().unwrap();
        assert!(!session.is_answered());
    }

    #[test]
    fn restart_after_completion() {
        let mut session = SessionController::with_seed(1);
        session.start(questions(1)).unwrap();
        session.answer("maybe").unwrap();
        session.advance().unwrap();
        assert_eq!(session.score().incorrect, 1);

        assert_eq!(session.start(questions(2)), Ok(SessionState::InProgress));
        assert_eq!(session.index(), 0);
        assert!(session.responses().is_empty());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn presented_options_are_a_permutation() {
        let mut session = SessionController::with_seed(42);
        session.start(questions(4)).unwrap();

        while session.state() == SessionState::InProgress {
            let mut presented = session.presented_options().unwrap().to_vec();
            let mut authored = session.current_question().unwrap().options().to_vec();
            presented.sort();
            authored.sort();
            assert_eq!(presented, authored);

            session.answer("yes").unwrap();
            session.advance().unwrap();
        }
        assert!(session.presented_options().is_err());
    }

    #[test]
    fn progress_and_reset() {
        let mut session = SessionController::with_seed(1);
        session.start(questions(2)).unwrap();
        assert_eq!(session.progress(), (1, 2));
        session.answer("yes").unwrap();
        session.advance().unwrap();
        assert_eq!(session.progress(), (2, 2));

        session.reset();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.is_empty());
        assert_eq!(session.progress(), (0, 0));
    }
}
