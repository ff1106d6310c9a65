//! Mock source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizrun_core::error::FetchError;
use quizrun_core::traits::ResourceFetcher;

/// An in-memory source for exercising loaders and sessions without I/O.
///
/// Locations not in the map answer with [`FetchError::NotFound`]; locations
/// marked as failing answer with a network error.
pub struct MockFetcher {
    /// Map of location → body.
    bodies: HashMap<String, String>,
    /// Locations that fail with a network error.
    failing: Vec<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Every location requested, in call order.
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Create a mock serving the given location → body mappings.
    pub fn new(bodies: HashMap<String, String>) -> Self {
        Self {
            bodies,
            failing: Vec::new(),
            call_count: AtomicU32::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serve an additional body.
    pub fn with_body(mut self, location: &str, body: &str) -> Self {
        self.bodies.insert(location.to_string(), body.to_string());
        self
    }

    /// Make `location` fail with a network error.
    pub fn with_failure(mut self, location: &str) -> Self {
        self.failing.push(location.to_string());
        self
    }

    /// Get the number of calls made to this fetcher.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Locations requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(location.to_string());
        }

        if self.failing.iter().any(|f| f == location) {
            return Err(FetchError::Network {
                location: location.to_string(),
                message: "mock failure".into(),
            });
        }

        self.bodies
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(location.to_string()))
    }
}
