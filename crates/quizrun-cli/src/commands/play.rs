//! The `quizrun play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use quizrun_core::engine::{EngineConfig, QuizEngine};
use quizrun_core::report::SessionReport;
use quizrun_core::{SessionController, SessionState};

use super::{
    build_selection, fetcher_for, format_score, resolve_config, score_table, ConsoleReporter,
    LimitArgs, SourceArgs,
};

pub async fn execute(
    parts: Option<String>,
    all: bool,
    limit: LimitArgs,
    seed: Option<u64>,
    output: Option<PathBuf>,
    source: SourceArgs,
) -> Result<()> {
    let config = resolve_config(&source)?;
    tracing::debug!(?seed, source = ?config.source, "resolved play settings");
    let selection = build_selection(&config, parts.as_deref(), all, &limit)?;
    anyhow::ensure!(
        selection.can_start(),
        "no parts selected. Pass --parts (e.g. --parts 1,2) or --all"
    );

    let engine = QuizEngine::new(
        fetcher_for(&config)?,
        EngineConfig {
            parallelism: config.parallelism,
            seed,
        },
    );

    let parts = selection.ordered_parts();
    eprintln!(
        "quizrun v{}: loading {} part(s)",
        env!("CARGO_PKG_VERSION"),
        parts.len()
    );
    if let Some(limit) = selection.effective_limit() {
        eprintln!("Limit: {limit} questions");
    }

    let started = Instant::now();
    let mut session = engine.start_session(&selection, &ConsoleReporter).await;
    if session.is_empty() {
        println!("No questions available for the selected parts.");
        return Ok(());
    }

    let finished = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout().lock();
        run_session(&mut session, &mut input, &mut out)?
    };
    if !finished {
        println!("\nSession ended early.");
    }

    let score = session.score();
    println!("\n{}", score_table(&score));
    println!("Score: {}", format_score(&score));

    let dir = output.unwrap_or_else(|| config.output_dir.clone());
    let report = SessionReport::from_session(
        &session,
        parts,
        selection.effective_limit(),
        started.elapsed(),
    );
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = dir.join(format!("session-{timestamp}.json"));
    report.save_json(&path)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}

/// Drive `session` from `input` until it completes. Returns `false` when
/// the input ends first.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut SessionController,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    while session.state() == SessionState::InProgress {
        let (position, total) = session.progress();
        let text = session.current_question()?.text().to_string();
        let options = session.presented_options()?.to_vec();

        writeln!(out, "\nQuestion {position}/{total}: {text}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(out, "  {}) {option}", i + 1)?;
        }

        let choice = loop {
            write!(out, "Your answer: ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            match pick_option(&options, line.trim()) {
                Some(choice) => break choice,
                None => writeln!(out, "Please enter an option number or its text.")?,
            }
        };

        let response = session.answer(&choice)?;
        if response.is_correct() {
            writeln!(out, "Correct!")?;
        } else {
            writeln!(out, "Incorrect. Correct answer: {}", response.correct)?;
        }
        session.advance()?;
    }

    Ok(true)
}

/// Match exact option text first, then a one-based option number.
fn pick_option(options: &[String], entry: &str) -> Option<String> {
    if entry.is_empty() {
        return None;
    }
    if let Some(option) = options.iter().find(|o| o.as_str() == entry) {
        return Some(option.clone());
    }
    entry
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=options.len()).contains(n))
        .map(|n| options[n - 1].clone())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use quizrun_core::model::{PartId, Question};

    fn questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    format!("question {i}"),
                    vec!["Yes".into(), "No".into()],
                    "Yes",
                    PartId::from("1"),
                )
                .unwrap()
            })
            .collect()
    }

    fn started(count: usize) -> SessionController {
        let mut session = SessionController::with_seed(11);
        session.start(questions(count)).unwrap();
        session
    }

    #[test]
    fn answers_by_text() {
        let mut session = started(2);
        let mut input = Cursor::new("Yes\nNo\n");
        let mut out = Vec::new();

        let finished = run_session(&mut session, &mut input, &mut out).unwrap();
        assert!(finished);
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.score().correct, 1);
        assert_eq!(session.score().incorrect, 1);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Question 1/2: question 0"));
        assert!(printed.contains("Correct!"));
        assert!(printed.contains("Incorrect. Correct answer: Yes"));
    }

    #[test]
    fn reprompts_on_invalid_entry() {
        let mut session = started(1);
        let mut input = Cursor::new("maybe\n9\n\nYes\n");
        let mut out = Vec::new();

        assert!(run_session(&mut session, &mut input, &mut out).unwrap());
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed
                .matches("Please enter an option number or its text.")
                .count(),
            3
        );
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn end_of_input_stops_early() {
        let mut session = started(3);
        let mut input = Cursor::new("Yes\n");
        let mut out = Vec::new();

        assert!(!run_session(&mut session, &mut input, &mut out).unwrap());
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.score().total, 1);
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn pick_by_number() {
        let options = vec!["alpha".to_string(), "beta".to_string()];
        assert_eq!(pick_option(&options, "2").as_deref(), Some("beta"));
        assert_eq!(pick_option(&options, "beta").as_deref(), Some("beta"));
        assert_eq!(pick_option(&options, "0"), None);
        assert_eq!(pick_option(&options, "3"), None);
    }

    #[test]
    fn numeric_option_text_wins_over_position() {
        let options = vec!["2".to_string(), "1".to_string()];
        assert_eq!(pick_option(&options, "1").as_deref(), Some("1"));
    }
}
