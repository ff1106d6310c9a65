//! Tolerant question-body normalizer.
//!
//! A body is parsed by a chain of strategies: plain JSON first, then the
//! first brace-delimited object found in the text (for script-shaped files
//! such as `const data = {...};`). The parsed value may be a bare array of
//! records or an object with a `questions` array. Each record accepts either
//! spelling of the options and correct-answer fields.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoadError, QuestionError};
use crate::model::{PartId, Question};

static EMBEDDED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("embedded object pattern is valid"));

/// One step in the parse chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole body is JSON.
    Direct,
    /// The body embeds a JSON object; take the first `{` through the last `}`.
    BraceExtract,
}

impl ParseStrategy {
    /// Strategies in the order they are attempted.
    pub const CHAIN: [ParseStrategy; 2] = [ParseStrategy::Direct, ParseStrategy::BraceExtract];

    fn attempt(self, body: &str) -> Result<Value, String> {
        match self {
            ParseStrategy::Direct => serde_json::from_str(body).map_err(|e| e.to_string()),
            ParseStrategy::BraceExtract => {
                let found = EMBEDDED_OBJECT
                    .find(body)
                    .ok_or_else(|| "no brace-delimited object found".to_string())?;
                serde_json::from_str(found.as_str()).map_err(|e| e.to_string())
            }
        }
    }
}

/// Raw record as it appears in question files.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answers: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    correct: Option<String>,
}

/// A record that was skipped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWarning {
    /// Zero-based position of the record in its container.
    pub index: usize,
    pub error: QuestionError,
}

/// Outcome of normalizing one body.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Strategy that produced the parsed value.
    pub strategy: ParseStrategy,
    pub questions: Vec<Question>,
    pub warnings: Vec<RecordWarning>,
}

/// Parse a body with the first strategy that succeeds.
pub fn parse_body(body: &str, location: &str) -> Result<(ParseStrategy, Value), LoadError> {
    let mut failures = Vec::new();

    for strategy in ParseStrategy::CHAIN {
        match strategy.attempt(body) {
            Ok(value) => return Ok((strategy, value)),
            Err(e) => failures.push(format!("{strategy:?}: {e}")),
        }
    }

    Err(LoadError::Parse {
        location: location.to_string(),
        message: failures.join("; "),
    })
}

/// Pull the record array out of either accepted container shape.
pub fn extract_records(value: Value, location: &str) -> Result<Vec<Value>, LoadError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(LoadError::Shape {
                location: location.to_string(),
                message: format!("`questions` must be an array, found {}", type_name(&other)),
            }),
            None => Err(LoadError::Shape {
                location: location.to_string(),
                message: "object has no `questions` field".into(),
            }),
        },
        other => Err(LoadError::Shape {
            location: location.to_string(),
            message: format!("expected an array or object, found {}", type_name(&other)),
        }),
    }
}

/// Map one raw record to a [`Question`] tagged with `part`.
pub fn normalize_record(record: Value, part: &PartId) -> Result<Question, QuestionError> {
    let raw: RawQuestion =
        serde_json::from_value(record).map_err(|e| QuestionError::Malformed(e.to_string()))?;

    let text = raw.question.ok_or(QuestionError::MissingText)?;
    let options = raw
        .options
        .or(raw.answers)
        .ok_or(QuestionError::MissingOptions)?;
    let correct = raw
        .correct_answer
        .or(raw.correct)
        .ok_or(QuestionError::MissingCorrect)?;

    Question::new(text, options, correct, part.clone())
}

/// Parse and normalize a whole body. Invalid records are skipped and
/// reported as warnings; only parse and shape failures are errors.
pub fn normalize_body(body: &str, location: &str, part: &PartId) -> Result<Normalized, LoadError> {
    let (strategy, value) = parse_body(body, location)?;
    let records = extract_records(value, location)?;

    let mut questions = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match normalize_record(record, part) {
            Ok(q) => questions.push(q),
            Err(error) => {
                tracing::warn!("skipping record {index} in {location}: {error}");
                warnings.push(RecordWarning { index, error });
            }
        }
    }

    Ok(Normalized {
        strategy,
        questions,
        warnings,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
