//! Configuration loading and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizrun_core::model::PartId;
use quizrun_core::selection::LimitSettings;
use quizrun_core::traits::ResourceFetcher;

use crate::dir::DirFetcher;
use crate::http::{HttpFetcher, DEFAULT_TIMEOUT_SECS};

/// Where question files come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Http {
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    Dir {
        #[serde(default = "default_question_dir")]
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Dir {
            path: default_question_dir(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_question_dir() -> PathBuf {
    PathBuf::from("./questions")
}

/// Top-level quizrun configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizrunConfig {
    /// Question source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Every part offered for selection, used by "select all".
    #[serde(default)]
    pub parts: Vec<PartId>,
    /// Limit presets offered for multi-part sessions.
    #[serde(default)]
    pub limits: LimitSettings,
    /// Max concurrent part loads.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizrun-results")
}

impl Default for QuizrunConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            parts: Vec::new(),
            limits: LimitSettings::default(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a source config.
fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
        SourceConfig::Dir { path } => SourceConfig::Dir {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Replace the source with an HTTP source when a base URL override is set.
fn apply_base_url_override(config: &mut QuizrunConfig, base_url: Option<String>) {
    if let Some(base_url) = base_url.filter(|u| !u.trim().is_empty()) {
        let timeout_secs = match config.source {
            SourceConfig::Http { timeout_secs, .. } => timeout_secs,
            SourceConfig::Dir { .. } => DEFAULT_TIMEOUT_SECS,
        };
        config.source = SourceConfig::Http {
            base_url,
            timeout_secs,
        };
    }
}

/// Load config from an explicit path, or search the well-known paths:
///
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// Environment variable override: `QUIZRUN_BASE_URL`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizrunConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrun.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizrunConfig::default(),
    };

    apply_base_url_override(&mut config, std::env::var("QUIZRUN_BASE_URL").ok());
    config.source = resolve_source_config(&config.source);

    Ok(config)
}

/// Parse and sanity-check a TOML config string.
pub fn parse_config(content: &str) -> Result<QuizrunConfig> {
    let config: QuizrunConfig = toml::from_str(content)?;
    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");
    anyhow::ensure!(config.limits.step >= 1, "limits.step must be at least 1");
    anyhow::ensure!(config.limits.floor >= 1, "limits.floor must be at least 1");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}

/// Create a fetcher from its configuration.
pub fn create_fetcher(config: &SourceConfig) -> Result<Arc<dyn ResourceFetcher>> {
    match config {
        SourceConfig::Http {
            base_url,
            timeout_secs,
        } => Ok(Arc::new(HttpFetcher::new(base_url, *timeout_secs)?)),
        SourceConfig::Dir { path } => Ok(Arc::new(DirFetcher::new(path.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZRUN_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZRUN_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("https://${_QUIZRUN_TEST_VAR}.example.com/quiz"),
            "https://hello.example.com/quiz"
        );
        std::env::remove_var("_QUIZRUN_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_QUIZRUN_SELF_REF", "${_QUIZRUN_SELF_REF}");
        assert_eq!(
            resolve_env_vars("http://${_QUIZRUN_SELF_REF}/quiz"),
            "http://${_QUIZRUN_SELF_REF}/quiz"
        );
        std::env::remove_var("_QUIZRUN_SELF_REF");

        assert_eq!(resolve_env_vars("${_QUIZRUN_UNSET_VAR}/x"), "/x");
        assert_eq!(resolve_env_vars("a ${unterminated"), "a ${unterminated");
    }

    #[test]
    fn default_config() {
        let config = QuizrunConfig::default();
        assert_eq!(config.parallelism, 4);
        assert!(config.parts.is_empty());
        assert_eq!(config.limits, LimitSettings::default());
        assert_eq!(
            config.source,
            SourceConfig::Dir {
                path: PathBuf::from("./questions")
            }
        );
    }

    #[test]
    fn parse_http_source() {
        let toml_str = r#"
parallelism = 8
parts = ["1", "2", "3"]

[source]
type = "http"
base_url = "https://quiz.example.com/data"

[limits]
presets = [50, 100]
step = 25
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.parallelism, 8);
        assert_eq!(config.parts.len(), 3);
        assert_eq!(
            config.source,
            SourceConfig::Http {
                base_url: "https://quiz.example.com/data".into(),
                timeout_secs: 30
            }
        );
        assert_eq!(config.limits.presets, vec![50, 100]);
        assert_eq!(config.limits.step, 25);
        assert_eq!(config.limits.floor, 10);
    }

    #[test]
    fn rejects_zero_parallelism() {
        assert!(parse_config("parallelism = 0").is_err());
    }

    #[test]
    fn base_url_override_switches_source() {
        let mut config = QuizrunConfig::default();
        apply_base_url_override(&mut config, Some("http://localhost:8080".into()));
        assert_eq!(
            config.source,
            SourceConfig::Http {
                base_url: "http://localhost:8080".into(),
                timeout_secs: 30
            }
        );

        let mut untouched = QuizrunConfig::default();
        apply_base_url_override(&mut untouched, Some("  ".into()));
        assert!(matches!(untouched.source, SourceConfig::Dir { .. }));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizrun.toml");
        std::fs::write(&path, "[source]\ntype = \"dir\"\npath = \"./banks\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        if std::env::var("QUIZRUN_BASE_URL").is_err() {
            assert_eq!(
                config.source,
                SourceConfig::Dir {
                    path: PathBuf::from("./banks")
                }
            );
        }

        assert!(load_config_from(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
