//! The `quizrun parts` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizrun_core::engine::{EngineConfig, QuizEngine};

use super::{build_selection, fetcher_for, resolve_config, ConsoleReporter, LimitArgs, SourceArgs};

pub async fn execute(parts: Option<String>, limit: LimitArgs, source: SourceArgs) -> Result<()> {
    let config = resolve_config(&source)?;
    let selection = build_selection(&config, parts.as_deref(), parts.is_none(), &limit)?;
    anyhow::ensure!(selection.can_start(), "no parts to inspect");

    let engine = QuizEngine::new(
        fetcher_for(&config)?,
        EngineConfig {
            parallelism: config.parallelism,
            seed: None,
        },
    );
    let pool = engine
        .load_pool(&selection.ordered_parts(), &ConsoleReporter)
        .await;

    let mut table = Table::new();
    table.set_header(vec!["Part", "Questions"]);
    for part in selection.ordered_parts() {
        let count = if pool.failed_parts().contains(&part) {
            "unavailable".to_string()
        } else {
            pool.part_counts()
                .get(&part)
                .copied()
                .unwrap_or_default()
                .to_string()
        };
        table.add_row(vec![Cell::new(&part), Cell::new(count)]);
    }
    println!("{table}");

    println!("Total questions: {}", pool.len());
    if let Some(limit) = selection.effective_limit() {
        println!("Limit: {limit}");
    }
    println!(
        "Estimated session size: {}",
        selection.estimated_count(pool.part_counts())
    );

    Ok(())
}
