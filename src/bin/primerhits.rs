//! Command-line interface for the `primerhits` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/primerhits/`:
//! - `analyze_cmd.rs`
//! - `align_cmd.rs`
//!
//! Scoring flags shared by both live in `scoring_args.rs`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name="primerhits", version=env!("CARGO_PKG_VERSION"), about="Score PCR primers against target sequences", disable_help_subcommand=true)]
struct Cli {
    /// Log progress (one line per primer); RUST_LOG overrides.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Test primers against FASTA files, writing hits files and histograms.
    #[command(visible_alias = "analyze_primers")]
    Analyze(analyze_cmd::AnalyzeCmd),
    /// Align and score one primer against the first record of a FASTA file.
    Align(align_cmd::AlignCmd),
}

#[path = "primerhits/scoring_args.rs"] mod scoring_args;
#[path = "primerhits/analyze_cmd.rs"] mod analyze_cmd;
#[path = "primerhits/align_cmd.rs"] mod align_cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Analyze(cmd) => analyze_cmd::run(cmd),
        Command::Align(cmd) => align_cmd::run(cmd),
    }
}
