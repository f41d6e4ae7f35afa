//! CLI subcommand for `primerhits align`.
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use primerhits::*;

use crate::scoring_args::ScoringArgs;

/// Options for the `align` subcommand.
#[derive(Debug, Args)]
pub struct AlignCmd {
    /// Primer name; its first token must end in `f` or `r`.
    #[arg(short = 'p', long)]
    pub primer_name: String,
    /// Primer sequence, 5' to 3'.
    #[arg(short = 's', long)]
    pub primer_seq: String,
    /// FASTA file (first record used).
    #[arg(short = 'f', long, value_name = "FILE")]
    pub fasta: PathBuf,
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

pub fn run(cmd: AlignCmd) -> Result<()> {
    let primer = Primer::new(correct_primer_name(&cmd.primer_name), &cmd.primer_seq)?;
    let text = fs::read_to_string(&cmd.fasta).with_context(|| format!("open FASTA: {}", cmd.fasta.display()))?;
    let record = parse_fasta(&text)
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no FASTA records in {}", cmd.fasta.display()))?;
    let config = cmd.scoring.to_config();
    let name = cmd.fasta.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();

    let hit = evaluate_pair(&primer, &record, &config)
        .with_context(|| format!("primer {} against {}", primer.name(), record.id))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in hits_header(&primer, &name, &config) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", hit.to_line())?;
    writeln!(out)?;
    let mid: String = hit
        .aligned
        .primer_hit
        .chars()
        .zip(hit.aligned.target_hit.chars())
        .map(|(p, t)| match matches(p, t) {
            _ if p == '-' || t == '-' => ' ',
            Ok(true) => '|',
            _ => '.',
        })
        .collect();
    writeln!(out, "P {}", hit.aligned.primer_hit)?;
    writeln!(out, "  {}", mid)?;
    writeln!(out, "T {}", hit.aligned.target_hit)?;
    Ok(())
}
