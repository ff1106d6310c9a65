//! quizrun CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizrun", version, about = "Multiple-choice quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session in the terminal
    Play {
        /// Parts to include (comma-separated, e.g. "1,2,5")
        #[arg(long)]
        parts: Option<String>,

        /// Select every part listed in the config
        #[arg(long)]
        all: bool,

        /// Activate a limit preset by index (multi-part sessions only)
        #[arg(long)]
        preset: Option<usize>,

        /// Adjust the active limit by this many steps (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        steps: Option<i32>,

        /// Seed for reproducible question and option order
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to save the session report into (overrides `output_dir`)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Read question files from this directory
        #[arg(long, conflicts_with = "base_url")]
        source_dir: Option<PathBuf>,

        /// Fetch question files relative to this URL
        #[arg(long)]
        base_url: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show question counts per part and the estimated session size
    Parts {
        /// Parts to inspect (comma-separated); defaults to the config catalog
        #[arg(long)]
        parts: Option<String>,

        /// Activate a limit preset by index
        #[arg(long)]
        preset: Option<usize>,

        /// Adjust the active limit by this many steps (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        steps: Option<i32>,

        /// Read question files from this directory
        #[arg(long, conflicts_with = "base_url")]
        source_dir: Option<PathBuf>,

        /// Fetch question files relative to this URL
        #[arg(long)]
        base_url: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check question files in a directory
    Validate {
        /// Directory holding question files
        #[arg(long, default_value = "./questions")]
        dir: PathBuf,
    },

    /// Print a saved session report
    Show {
        /// Session report JSON
        #[arg(long)]
        report: PathBuf,
    },

    /// Create starter config and sample question files
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizrun=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            parts,
            all,
            preset,
            steps,
            seed,
            output,
            source_dir,
            base_url,
            config,
        } => {
            let source = commands::SourceArgs {
                source_dir,
                base_url,
                config,
            };
            let limit = commands::LimitArgs { preset, steps };
            commands::play::execute(parts, all, limit, seed, output, source).await
        }
        Commands::Parts {
            parts,
            preset,
            steps,
            source_dir,
            base_url,
            config,
        } => {
            let source = commands::SourceArgs {
                source_dir,
                base_url,
                config,
            };
            let limit = commands::LimitArgs { preset, steps };
            commands::parts::execute(parts, limit, source).await
        }
        Commands::Validate { dir } => commands::validate::execute(dir),
        Commands::Show { report } => commands::show::execute(report),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
