//! CLI subcommand for `primerhits analyze`.
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use primerhits::*;
use tracing::info;

use crate::scoring_args::ScoringArgs;

/// Options for the `analyze` subcommand.
#[derive(Debug, Args)]
pub struct AnalyzeCmd {
    /// Tab-delimited primers file: name, 5'->3' sequence, optional comment.
    #[arg(short = 'P', long, value_name = "FILE")]
    pub primers: Option<PathBuf>,
    /// Test only this primer (looked up in --primers unless --primer-seq is given).
    #[arg(short = 'p', long)]
    pub primer_name: Option<String>,
    /// Sequence for --primer-name, 5' to 3'.
    #[arg(short = 's', long, requires = "primer_name")]
    pub primer_seq: Option<String>,
    /// FASTA files to test against, colon-separated.
    #[arg(short = 'f', long, value_name = "FILES", value_delimiter = ':', required = true, num_args = 1..)]
    pub fasta: Vec<PathBuf>,
    /// Directory for hits files and histograms.
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

pub fn run(cmd: AnalyzeCmd) -> Result<()> {
    if cmd.primers.is_none() && cmd.primer_seq.is_none() {
        anyhow::bail!("missing primer data: give --primers, or --primer-name with --primer-seq");
    }
    let parsed = match &cmd.primers {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("open primers file: {}", path.display()))?;
            Some(parse_primers(&text).with_context(|| format!("parse primers file: {}", path.display()))?)
        }
        None => None,
    };
    let primers = select_primers(parsed, cmd.primer_name.as_deref(), cmd.primer_seq.as_deref())?;
    let config = cmd.scoring.to_config();

    let mut inputs = Vec::with_capacity(cmd.fasta.len());
    for path in &cmd.fasta {
        let text = fs::read_to_string(path).with_context(|| format!("open FASTA: {}", path.display()))?;
        let records = parse_fasta(&text);
        if records.is_empty() {
            anyhow::bail!("no FASTA records in {}", path.display());
        }
        let name = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        inputs.push((path, name, records));
    }

    fs::create_dir_all(&cmd.output_dir)
        .with_context(|| format!("create output directory {}", cmd.output_dir.display()))?;

    for primer in &primers {
        info!("Starting {}", primer.name());
        for (path, name, records) in &inputs {
            let hits = evaluate_primer(primer, name, records, &config)
                .with_context(|| format!("primer {} against {}", primer.name(), path.display()))?;
            let (hits_path, hist_path) = write_primer_outputs(&cmd.output_dir, primer, path, &hits)
                .with_context(|| format!("write outputs to {}", cmd.output_dir.display()))?;
            info!(
                hits = %hits_path.display(),
                histogram = %hist_path.display(),
                sequences = hits.records.len(),
                "wrote outputs"
            );
        }
    }
    Ok(())
}
