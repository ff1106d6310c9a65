//! The `quizrun show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizrun_core::report::SessionReport;

use super::{format_score, score_table};

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;

    let parts: Vec<&str> = report.parts.iter().map(|p| p.as_str()).collect();
    println!(
        "Session {} ({})",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Parts: {}", parts.join(", "));
    if let Some(limit) = report.limit {
        println!("Limit: {limit}");
    }
    println!("Duration: {:.1}s", report.duration_ms as f64 / 1000.0);

    println!("\n{}", score_table(&report.score));
    println!("Score: {}", format_score(&report.score));
    if !report.is_complete() {
        println!(
            "Incomplete: answered {} of {} questions.",
            report.score.total, report.question_count
        );
    }

    let missed: Vec<_> = report
        .answers
        .iter()
        .filter(|a| a.selected != a.correct)
        .collect();
    if !missed.is_empty() {
        println!("\nIncorrect answers:");
        for answer in missed {
            println!("  [part {}] {}", answer.part, answer.question);
            println!(
                "    yours: {}, correct: {}",
                answer.selected, answer.correct
            );
        }
    }

    Ok(())
}
