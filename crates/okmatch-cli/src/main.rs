//! okmatch CLI: answer questions and score matches.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod prompt;

#[derive(Parser)]
#[command(
    name = "okmatch",
    version,
    about = "Answer multiple-choice questions and compute match scores"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the match score between two answers files
    Match {
        /// First person's answers file
        a: PathBuf,

        /// Second person's answers file
        b: PathBuf,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Print a per-question table (text format)
        #[arg(long)]
        breakdown: bool,
    },

    /// Check answers files against the schema and domain rules
    Validate {
        /// Answers files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Interactively answer and author questions
    Answer {
        /// Answers file to write/append
        #[arg(short, long, value_name = "FILEPATH")]
        target: Option<PathBuf>,

        /// Answers file to source new questions from
        #[arg(short, long, value_name = "FILEPATH")]
        source: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("okmatch=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Match {
            a,
            b,
            format,
            breakdown,
        } => commands::matching::execute(a, b, format, breakdown, cli.config),
        Commands::Validate { files } => commands::validate::execute(files),
        Commands::Answer { target, source } => {
            commands::answer::execute(target, source, cli.config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
