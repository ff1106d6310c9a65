//! Question pool aggregation.
//!
//! Loads every requested part concurrently and concatenates the results in
//! the order the parts were given. A part that fails contributes nothing.

use std::time::Instant;

use futures::stream::{self, StreamExt};

use crate::loader::try_load;
use crate::model::{PartId, QuestionPool};
use crate::traits::{LoadReporter, ResourceFetcher};

/// Build the session pool from `parts`.
///
/// At most `parallelism` loads are in flight at once; results are joined in
/// submission order regardless of completion order.
pub async fn aggregate(
    fetcher: &dyn ResourceFetcher,
    parts: &[PartId],
    parallelism: usize,
    reporter: &dyn LoadReporter,
) -> QuestionPool {
    let start = Instant::now();

    let outcomes: Vec<_> = stream::iter(parts)
        .map(|part| async move { (part, try_load(fetcher, part).await) })
        .buffered(parallelism.max(1))
        .collect()
        .await;

    let mut pool = QuestionPool::new();
    for (part, outcome) in outcomes {
        match outcome {
            Ok(normalized) => {
                tracing::info!(
                    "loaded {} questions for part {part} ({:?})",
                    normalized.questions.len(),
                    normalized.strategy
                );
                reporter.on_part_loaded(part, normalized.questions.len());
                pool.extend_part(part.clone(), normalized.questions);
            }
            Err(e) => {
                tracing::warn!("error loading part {part}: {e}");
                reporter.on_part_failed(part, &e);
                pool.mark_failed(part.clone());
            }
        }
    }

    reporter.on_pool_ready(parts.len(), pool.len(), start.elapsed());
    pool
}
