//! Session report types with JSON persistence.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::PartId;
use crate::scoring::Score;
use crate::session::SessionController;

/// A finished (or abandoned) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Parts the session was drawn from.
    pub parts: Vec<PartId>,
    /// Limit that was applied, if any.
    pub limit: Option<usize>,
    /// Number of questions in the session.
    pub question_count: usize,
    pub score: Score,
    /// Answered questions in session order.
    pub answers: Vec<AnsweredQuestion>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// One answered question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub part: PartId,
    pub question: String,
    pub selected: String,
    pub correct: String,
}

impl SessionReport {
    pub fn from_session(
        session: &SessionController,
        parts: Vec<PartId>,
        limit: Option<usize>,
        elapsed: Duration,
    ) -> Self {
        let answers = session
            .questions()
            .iter()
            .zip(session.responses())
            .map(|(q, r)| AnsweredQuestion {
                part: q.source_part().clone(),
                question: q.text().to_string(),
                selected: r.selected.clone(),
                correct: r.correct.clone(),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            parts,
            limit,
            question_count: session.len(),
            score: session.score(),
            answers,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    /// Whether every question of the session was answered.
    pub fn is_complete(&self) -> bool {
        self.score.total == self.question_count
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
