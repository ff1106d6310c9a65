//! quizrun-sources — Question sources and configuration.
//!
//! Implements the `ResourceFetcher` trait over HTTP, a local directory and
//! an in-memory map, and loads the `quizrun.toml` configuration that picks
//! between them.

pub mod config;
pub mod dir;
pub mod http;
pub mod mock;

pub use config::{create_fetcher, load_config_from, QuizrunConfig, SourceConfig};
pub use dir::DirFetcher;
pub use http::HttpFetcher;
pub use mock::MockFetcher;
