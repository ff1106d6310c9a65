//! Local directory question source.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::error::FetchError;
use quizrun_core::traits::ResourceFetcher;

/// Reads question files from a directory on disk.
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ResourceFetcher for DirFetcher {
    fn name(&self) -> &str {
        "dir"
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let relative = Path::new(location);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            tracing::warn!("refusing to read outside the question directory: {location}");
            return Err(FetchError::NotFound(location.to_string()));
        }

        let path = self.root.join(relative);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FetchError::NotFound(location.to_string())
            } else {
                FetchError::Network {
                    location: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}
