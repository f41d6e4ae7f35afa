//! Hit records and batch evaluation of a primer against a FASTA file.
//!
//! For every target sequence the primer is oriented, aligned and scored;
//! the resulting [`HitRecord`]s keep the order of the input sequences so hits
//! files and histograms are reproducible. Sequences are evaluated in parallel
//! with `rayon`.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::align::{local_align, AlignedPair};
use crate::common::{FastaRecord, PrimerError, ScoringConfig};
use crate::histogram::{HistogramBundle, HistogramRenderer, TextHistogram};
use crate::iupac::GAP;
use crate::primer::{orient, Primer};
use crate::zones::{score_primer, ScoreResult};

/// One primer × sequence result.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub seq_id: String,
    pub aligned: AlignedPair,
    pub score: ScoreResult,
}

fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// Weighted score rounded to 12 significant digits, printed in shortest form
/// with a trailing `.0` for whole numbers (`1.2`, `4.0`).
fn format_score(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v:?}");
    }
    let magnitude = v.abs().log10().floor() as i32;
    let decimals = (11 - magnitude).max(0) as usize;
    let rounded: f64 = format!("{v:.decimals$}").parse().unwrap_or(v);
    format!("{rounded:?}")
}

impl HitRecord {
    /// Comma-separated hits-file line.
    ///
    /// Fields: seq id, seq hit, primer hit, hit start, non 3' mismatches,
    /// 3' mismatches, last base mismatch, non 3' gaps, 3' gaps, weighted
    /// score, hits sequence end.
    pub fn to_line(&self) -> String {
        let s = &self.score;
        format!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            self.seq_id,
            self.aligned.target_hit,
            self.aligned.primer_hit,
            self.aligned.hit_start,
            s.non_tp_mismatches,
            s.tp_mismatches,
            py_bool(s.last_base_mismatch),
            s.non_tp_gaps,
            s.tp_gaps,
            format_score(s.weighted_score),
            py_bool(s.hits_sequence_end)
        )
    }
}

/// Commented header of a hits file.
pub fn hits_header(primer: &Primer, fasta_name: &str, config: &ScoringConfig) -> Vec<String> {
    vec![
        format!("# Primer: {} 5'-{}-3'", primer.name(), primer.sequence()),
        format!("# Input fasta file: {fasta_name}"),
        "# Parameters".to_string(),
        format!("# 3' length: {}", config.tp_len),
        format!("# non 3' mismatch penalty: {:.2} per mismatch", config.non_tp_mismatch_weight),
        format!("# 3' mismatch penalty: {:.2} per mismatch", config.tp_mismatch_weight),
        format!("# last base mismatch penalty: {:.2}", config.last_base_weight),
        format!("# non 3' gap penalty: {:.2} per gap", config.non_tp_gap_weight),
        format!("# 3' gap penalty: {:.2} per gap", config.tp_gap_weight),
        "# Note - seq hit and primer hit are the best local pairwise alignment results for a \
         given sequence and primer pair.  A gap in seq hit represents a deletion in the sequence, \
         whereas a gap in the primer hit signifies an insertion in the target sequence."
            .to_string(),
        "#".to_string(),
        "# seq ID, seq hit, primer hit, hit start position, non 3' mismatches, 3' mismatches \
         (except last base), last base mismatch, non 3' gaps, 3' gaps, overall weighted score, \
         hits sequence end"
            .to_string(),
    ]
}

fn evaluate_query(
    primer: &Primer,
    query: &str,
    record: &FastaRecord,
    config: &ScoringConfig,
) -> Result<HitRecord, PrimerError> {
    let target: String = record.seq.chars().filter(|&c| c != GAP).collect();
    let aligned = local_align(query, &target, config)?;
    let score = score_primer(primer, &aligned, config)?;
    Ok(HitRecord { seq_id: record.id.clone(), aligned, score })
}

/// Orient, align and score `primer` against one sequence.
pub fn evaluate_pair(
    primer: &Primer,
    record: &FastaRecord,
    config: &ScoringConfig,
) -> Result<HitRecord, PrimerError> {
    evaluate_query(primer, &orient(primer), record, config)
}

/// Everything produced for one (primer, FASTA file) pair.
#[derive(Clone, Debug)]
pub struct PrimerHits {
    pub header: Vec<String>,
    pub records: Vec<HitRecord>,
    pub histogram: HistogramBundle,
}

impl PrimerHits {
    /// Write the header and one line per hit.
    pub fn write_hits<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in &self.header {
            writeln!(out, "{line}")?;
        }
        for rec in &self.records {
            writeln!(out, "{}", rec.to_line())?;
        }
        Ok(())
    }
}

/// Evaluate `primer` against every record, keeping input order.
///
/// Sequences without any positive-scoring local alignment are skipped with a
/// warning; any other error aborts the batch.
pub fn evaluate_primer(
    primer: &Primer,
    fasta_name: &str,
    records: &[FastaRecord],
    config: &ScoringConfig,
) -> Result<PrimerHits, PrimerError> {
    let query = orient(primer);
    let results: Vec<Result<HitRecord, PrimerError>> = records
        .par_iter()
        .map(|r| evaluate_query(primer, &query, r, config))
        .collect();

    let mut hits = Vec::with_capacity(records.len());
    let mut histogram = HistogramBundle::new(primer, fasta_name, config);
    for (record, result) in records.iter().zip(results) {
        match result {
            Ok(hit) => {
                histogram.push(&hit.score);
                hits.push(hit);
            }
            Err(PrimerError::NoLocalAlignment) => {
                warn!(primer = primer.name(), seq = %record.id, "no local alignment, sequence skipped");
            }
            Err(e) => return Err(e),
        }
    }
    debug!(primer = primer.name(), fasta = fasta_name, hits = hits.len(), "primer evaluated");

    Ok(PrimerHits { header: hits_header(primer, fasta_name, config), records: hits, histogram })
}

/// Hits file and histogram paths: `<primer>_<stem>_hits.txt`, `<primer>_<stem>_hist.txt`.
///
/// `stem` is the FASTA file name up to its first `.`.
pub fn output_paths(out_dir: &Path, primer: &Primer, fasta_path: &Path) -> (PathBuf, PathBuf) {
    let file_name = fasta_path.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or("");
    (
        out_dir.join(format!("{}_{}_hits.txt", primer.name(), stem)),
        out_dir.join(format!("{}_{}_hist.txt", primer.name(), stem)),
    )
}

/// Write the hits file and the text histogram for one (primer, FASTA file) pair.
pub fn write_primer_outputs(
    out_dir: &Path,
    primer: &Primer,
    fasta_path: &Path,
    hits: &PrimerHits,
) -> io::Result<(PathBuf, PathBuf)> {
    let (hits_path, hist_path) = output_paths(out_dir, primer, fasta_path);
    let mut f = BufWriter::new(File::create(&hits_path)?);
    hits.write_hits(&mut f)?;
    f.flush()?;

    let mut renderer = TextHistogram::new(BufWriter::new(File::create(&hist_path)?));
    renderer.render(&hits.histogram)?;
    renderer.into_inner().flush()?;
    Ok((hits_path, hist_path))
}
