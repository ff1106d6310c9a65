//! Core data model types for quizrun.
//!
//! A [`Question`] is created once during normalization and never mutated
//! afterwards. A [`QuestionPool`] holds everything loaded for one session
//! start and is rebuilt on the next one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// Identifier of a topic group ("part"), e.g. `"1"` or `"grammar"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PartId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for PartId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("part id must not be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A normalized multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_option: String,
    source_part: PartId,
}

impl Question {
    /// Build a question, enforcing at least two options and that the
    /// correct answer is one of them.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
        source_part: PartId,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_option = correct_option.into();

        if text.trim().is_empty() {
            return Err(QuestionError::MissingText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        if !options.contains(&correct_option) {
            return Err(QuestionError::CorrectNotInOptions(correct_option));
        }

        Ok(Self {
            text,
            options,
            correct_option,
            source_part,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in authored order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    pub fn source_part(&self) -> &PartId {
        &self.source_part
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_option == selected
    }
}

/// All questions loaded for one session start, in part submission order.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    questions: Vec<Question>,
    part_counts: BTreeMap<PartId, usize>,
    failed: BTreeSet<PartId>,
}

impl QuestionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one part's questions. A part that loaded nothing is still
    /// recorded with a count of zero.
    pub fn extend_part(&mut self, part: PartId, questions: Vec<Question>) {
        *self.part_counts.entry(part).or_insert(0) += questions.len();
        self.questions.extend(questions);
    }

    /// Record a part that could not be loaded. It gets no entry in
    /// [`part_counts`](Self::part_counts).
    pub fn mark_failed(&mut self, part: PartId) {
        self.failed.insert(part);
    }

    /// Parts that could not be loaded.
    pub fn failed_parts(&self) -> &BTreeSet<PartId> {
        &self.failed
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    /// Number of questions each loaded part contributed.
    pub fn part_counts(&self) -> &BTreeMap<PartId, usize> {
        &self.part_counts
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn question_invariants() {
        let q = Question::new("2 + 2?", opts(&["3", "4"]), "4", PartId::from("1")).unwrap();
        assert_eq!(q.correct_option(), "4");
        assert!(q.is_correct("4"));
        assert!(!q.is_correct("3"));

        assert_eq!(
            Question::new("2 + 2?", opts(&["4"]), "4", PartId::from("1")),
            Err(QuestionError::TooFewOptions(1))
        );
        assert_eq!(
            Question::new("2 + 2?", opts(&["3", "5"]), "4", PartId::from("1")),
            Err(QuestionError::CorrectNotInOptions("4".into()))
        );
        assert_eq!(
            Question::new("  ", opts(&["3", "4"]), "4", PartId::from("1")),
            Err(QuestionError::MissingText)
        );
    }

    #[test]
    fn part_id_parse() {
        assert_eq!(" 7 ".parse::<PartId>().unwrap(), PartId::from("7"));
        assert!("".parse::<PartId>().is_err());
        assert_eq!(PartId::from("7").to_string(), "7");
    }

    #[test]
    fn pool_tracks_part_counts() {
        let mut pool = QuestionPool::new();
        let q = Question::new("a?", opts(&["x", "y"]), "x", PartId::from("1")).unwrap();
        pool.extend_part(PartId::from("1"), vec![q.clone(), q]);
        pool.extend_part(PartId::from("2"), vec![]);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.part_counts().get(&PartId::from("1")), Some(&2));
        assert_eq!(pool.part_counts().get(&PartId::from("2")), Some(&0));
        assert!(pool.failed_parts().is_empty());
    }

    #[test]
    fn failed_parts_are_not_counted() {
        let mut pool = QuestionPool::new();
        pool.extend_part(PartId::from("1"), vec![]);
        pool.mark_failed(PartId::from("9"));

        assert_eq!(pool.part_counts().len(), 1);
        assert_eq!(pool.part_counts().get(&PartId::from("9")), None);
        assert!(pool.failed_parts().contains(&PartId::from("9")));
    }
}
