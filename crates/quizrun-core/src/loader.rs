//! Per-part source loader.
//!
//! Tries the conventional locations for a part in priority order and
//! normalizes the first body that comes back.

use crate::error::LoadError;
use crate::model::{PartId, Question};
use crate::normalize::{normalize_body, Normalized};
use crate::traits::ResourceFetcher;

/// Locations tried for `part`, highest priority first.
pub fn candidate_locations(part: &PartId) -> [String; 3] {
    [
        format!("test{part}.js"),
        format!("test{part}.json"),
        format!("part{part}.json"),
    ]
}

/// Fetch and normalize one part, surfacing every failure.
pub async fn try_load(
    fetcher: &dyn ResourceFetcher,
    part: &PartId,
) -> Result<Normalized, LoadError> {
    let mut tried = Vec::new();

    for location in candidate_locations(part) {
        match fetcher.fetch(&location).await {
            Ok(body) => {
                tracing::debug!(fetcher = fetcher.name(), "fetched {location}");
                return normalize_body(&body, &location, part);
            }
            Err(e) if e.is_missing() => {
                tracing::debug!(fetcher = fetcher.name(), "{location} missing, trying next");
            }
            Err(e) => {
                tracing::warn!(fetcher = fetcher.name(), "{e}, trying next location");
            }
        }
        tried.push(location);
    }

    Err(LoadError::Unavailable {
        part: part.clone(),
        tried,
    })
}

/// Load one part, degrading to an empty list on any failure.
pub async fn load(fetcher: &dyn ResourceFetcher, part: &PartId) -> Vec<Question> {
    match try_load(fetcher, part).await {
        Ok(normalized) => normalized.questions,
        Err(e) => {
            tracing::warn!("error loading part {part}: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::FetchError;
    use crate::traits::ResourceFetcher;

    /// In-memory fetcher recording every requested location.
    #[derive(Default)]
    pub struct MapFetcher {
        pub bodies: HashMap<String, String>,
        pub broken: Vec<String>,
        pub requested: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        pub fn with(mut self, location: &str, body: &str) -> Self {
            self.bodies.insert(location.to_string(), body.to_string());
            self
        }

        pub fn broken(mut self, location: &str) -> Self {
            self.broken.push(location.to_string());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceFetcher for MapFetcher {
        fn name(&self) -> &str {
            "map"
        }

        async fn fetch(&self, location: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(location.to_string());
            if self.broken.iter().any(|b| b == location) {
                return Err(FetchError::Network {
                    location: location.to_string(),
                    message: "connection reset".into(),
                });
            }
            self.bodies
                .get(location)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(location.to_string()))
        }
    }

    pub fn body(prefix: &str, count: usize) -> String {
        let records: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "question": format!("{prefix} question {i}"),
                    "options": ["right", "wrong"],
                    "correct_answer": "right"
                })
            })
            .collect();
        serde_json::Value::Array(records).to_string()
    }
}
