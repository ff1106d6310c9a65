//! Session start orchestration.
//!
//! Ties the aggregator, selection policy and session controller together
//! for one "start" trigger from the UI.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::aggregate::aggregate;
use crate::model::{PartId, QuestionPool};
use crate::selection::{select, PartSelection};
use crate::session::SessionController;
use crate::traits::{LoadReporter, ResourceFetcher};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum concurrent part loads.
    pub parallelism: usize,
    /// Fixed seed for question and option order.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            seed: None,
        }
    }
}

/// Starts sessions from a part selection.
pub struct QuizEngine {
    fetcher: Arc<dyn ResourceFetcher>,
    config: EngineConfig,
}

impl QuizEngine {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, config: EngineConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load a fresh pool for `parts`.
    pub async fn load_pool(&self, parts: &[PartId], reporter: &dyn LoadReporter) -> QuestionPool {
        aggregate(
            self.fetcher.as_ref(),
            parts,
            self.config.parallelism,
            reporter,
        )
        .await
    }

    /// Load the selected parts, apply the selection policy and start a
    /// session. A selection that yields no questions gives a session that
    /// is already completed.
    pub async fn start_session(
        &self,
        selection: &PartSelection,
        reporter: &dyn LoadReporter,
    ) -> SessionController {
        let parts = selection.ordered_parts();
        let pool = self.load_pool(&parts, reporter).await;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let questions = select(
            pool.questions(),
            selection.limit().value(),
            selection.is_multi_part(),
            &mut rng,
        );
        tracing::info!(
            "starting session: {} of {} questions from {} parts",
            questions.len(),
            pool.len(),
            parts.len()
        );

        SessionController::started(questions, self.config.seed.map(|s| s.wrapping_add(1)))
    }
}
