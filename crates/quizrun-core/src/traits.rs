//! Trait seams between the core and its collaborators.
//!
//! [`ResourceFetcher`] is implemented by the `quizrun-sources` crate;
//! [`LoadReporter`] is implemented by whatever drives a session start.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, LoadError};
use crate::model::PartId;

/// Transport that turns a candidate location (e.g. `test3.json`) into a body.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Human-readable fetcher name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch the raw body stored at `location`.
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Progress callbacks for pool aggregation.
pub trait LoadReporter: Send + Sync {
    fn on_part_loaded(&self, part: &PartId, count: usize);
    fn on_part_failed(&self, part: &PartId, error: &LoadError);
    fn on_pool_ready(&self, parts: usize, questions: usize, elapsed: Duration);
}

/// No-op load reporter.
pub struct NoopReporter;

impl LoadReporter for NoopReporter {
    fn on_part_loaded(&self, _: &PartId, _: usize) {}
    fn on_part_failed(&self, _: &PartId, _: &LoadError) {}
    fn on_pool_ready(&self, _: usize, _: usize, _: Duration) {}
}
