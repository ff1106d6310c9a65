//! Subcommand implementations and the helpers they share.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use quizrun_core::error::LoadError;
use quizrun_core::model::PartId;
use quizrun_core::selection::PartSelection;
use quizrun_core::traits::{LoadReporter, ResourceFetcher};
use quizrun_core::Score;
use quizrun_sources::config::{load_config_from, QuizrunConfig, SourceConfig};
use quizrun_sources::http::DEFAULT_TIMEOUT_SECS;
use quizrun_sources::create_fetcher;

pub mod init;
pub mod parts;
pub mod play;
pub mod show;
pub mod validate;

/// Where to read question files from, as given on the command line.
pub struct SourceArgs {
    pub source_dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub config: Option<PathBuf>,
}

/// Limit preset flags.
pub struct LimitArgs {
    pub preset: Option<usize>,
    pub steps: Option<i32>,
}

/// Load the config and apply source overrides from flags.
pub fn resolve_config(args: &SourceArgs) -> Result<QuizrunConfig> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(path) = &args.source_dir {
        config.source = SourceConfig::Dir { path: path.clone() };
    } else if let Some(base_url) = &args.base_url {
        config.source = SourceConfig::Http {
            base_url: base_url.clone(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
    }
    Ok(config)
}

/// Build the fetcher for an already resolved config.
pub fn fetcher_for(config: &QuizrunConfig) -> Result<Arc<dyn ResourceFetcher>> {
    create_fetcher(&config.source)
}

/// Parse a comma-separated part list. Blank entries are ignored.
pub fn parse_parts(list: &str) -> Result<Vec<PartId>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<PartId>()
                .map_err(|e| anyhow::anyhow!("invalid part '{s}': {e}"))
        })
        .collect()
}

/// Build a selection from the part flags and apply the limit flags.
pub fn build_selection(
    config: &QuizrunConfig,
    parts: Option<&str>,
    all: bool,
    limit: &LimitArgs,
) -> Result<PartSelection> {
    let mut selection = PartSelection::new(config.limits.clone());

    if all {
        anyhow::ensure!(
            !config.parts.is_empty(),
            "--all needs a `parts` list in the config. Run `quizrun init` for a sample."
        );
        selection.select_all(config.parts.iter().cloned());
    }
    if let Some(list) = parts {
        for part in parse_parts(list)? {
            if !selection.contains(&part) {
                selection.toggle_part(part);
            }
        }
    }

    if let Some(preset) = limit.preset {
        if !selection.is_multi_part() {
            eprintln!("Warning: limit presets only apply when several parts are selected.");
        } else {
            selection.limit_mut().activate(preset)?;
            if let Some(steps) = limit.steps {
                selection.limit_mut().adjust_by(steps);
            }
        }
    } else if limit.steps.is_some() {
        eprintln!("Warning: --steps has no effect without --preset.");
    }

    Ok(selection)
}

/// Format a score as `correct/total (pct%)`.
pub fn format_score(score: &Score) -> String {
    format!(
        "{}/{} ({:.1}%)",
        score.correct,
        score.total,
        score.ratio() * 100.0
    )
}

/// Render a score as a table.
pub fn score_table(score: &Score) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Correct", "Incorrect", "Answered", "Score"]);
    table.add_row(vec![
        Cell::new(score.correct),
        Cell::new(score.incorrect),
        Cell::new(score.total),
        Cell::new(format!("{:.1}%", score.ratio() * 100.0)),
    ]);
    table
}

/// Console load reporter.
pub struct ConsoleReporter;

impl LoadReporter for ConsoleReporter {
    fn on_part_loaded(&self, part: &PartId, count: usize) {
        eprintln!("  Loaded part {part}: {count} questions");
    }

    fn on_part_failed(&self, part: &PartId, error: &LoadError) {
        eprintln!("  SKIPPED part {part}: {error}");
    }

    fn on_pool_ready(&self, parts: usize, questions: usize, elapsed: Duration) {
        eprintln!(
            "Pool ready: {questions} questions from {parts} parts ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_parts_list() {
        let parts = parse_parts(" 1, 2,,5 ").unwrap();
        assert_eq!(
            parts,
            vec![PartId::from("1"), PartId::from("2"), PartId::from("5")]
        );
        assert!(parse_parts("").unwrap().is_empty());
    }

    #[test]
    fn selection_from_flags() {
        let config = QuizrunConfig {
            parts: vec!["1".into(), "2".into(), "3".into()],
            ..QuizrunConfig::default()
        };

        let limit = LimitArgs {
            preset: Some(0),
            steps: Some(-1),
        };
        let selection = build_selection(&config, Some("1,2"), false, &limit).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.limit().value(), Some(50));

        let all = build_selection(
            &config,
            None,
            true,
            &LimitArgs {
                preset: None,
                steps: None,
            },
        )
        .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn preset_ignored_for_single_part() {
        let config = QuizrunConfig::default();
        let limit = LimitArgs {
            preset: Some(0),
            steps: None,
        };
        let selection = build_selection(&config, Some("4"), false, &limit).unwrap();
        assert_eq!(selection.limit().value(), None);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = QuizrunConfig::default();
        let limit = LimitArgs {
            preset: Some(7),
            steps: None,
        };
        assert!(build_selection(&config, Some("1,2"), false, &limit).is_err());
    }

    #[test]
    fn all_without_catalog_fails() {
        let config = QuizrunConfig::default();
        let limit = LimitArgs {
            preset: None,
            steps: None,
        };
        assert!(build_selection(&config, None, true, &limit).is_err());
    }

    #[test]
    fn score_formatting() {
        let score = Score {
            correct: 3,
            incorrect: 1,
            total: 4,
        };
        assert_eq!(format_score(&score), "3/4 (75.0%)");
    }
}
