//! Score computation over recorded responses.

use serde::{Deserialize, Serialize};

/// One answered question: what was picked and what was right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub selected: String,
    pub correct: String,
}

impl Response {
    pub fn new(selected: impl Into<String>, correct: impl Into<String>) -> Self {
        Self {
            selected: selected.into(),
            correct: correct.into(),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.selected == self.correct
    }
}

/// Final tally of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
}

impl Score {
    /// Share of correct answers in `[0, 1]`; `0.0` for an empty session.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Count correct and incorrect responses.
pub fn score(responses: &[Response]) -> Score {
    let correct = responses.iter().filter(|r| r.is_correct()).count();
    let total = responses.len();
    Score {
        correct,
        incorrect: total - correct,
        total,
    }
}
