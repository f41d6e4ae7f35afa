//! Histogram data for one primer tested against one FASTA file.
//!
//! Per-hit values are capped while they are collected (5 mismatches, 5 gaps,
//! weighted score 5.0) so every panel has the same six buckets `0..=4, 5+`.
//! Binning is pure; drawing is left to a [`HistogramRenderer`]. The crate
//! ships [`TextHistogram`], which draws the seven-panel layout as text bars.
//!
//! ```rust
//! use primerhits::{bin, shared_axis_max};
//! let a = bin([0.0, 0.0, 1.0, 7.0], 5);
//! assert_eq!(a, vec![2, 1, 0, 0, 0, 1]);
//! let b = bin([2.4, 2.6, 3.0, 0.8], 5);
//! assert_eq!(b, vec![1, 0, 2, 1, 0, 0]);
//! assert_eq!(shared_axis_max(&[a, b]), 2);
//! ```
use std::io::Write;

use crate::common::ScoringConfig;
use crate::primer::Primer;
use crate::zones::ScoreResult;

pub const MAX_MISMATCHES: usize = 5;
pub const MAX_GAPS: usize = 5;
pub const MAX_WEIGHTED_SCORE: f64 = 5.0;
/// Bucket cap used when binning every panel.
pub const BIN_CAP: usize = 5;

/// Count `values` into unit-width buckets `[k, k+1)` for `k < cap` plus a
/// terminal `cap+` bucket. Negative values land in bucket 0.
pub fn bin(values: impl IntoIterator<Item = f64>, cap: usize) -> Vec<usize> {
    let mut counts = vec![0usize; cap + 1];
    for v in values {
        let r = v.floor();
        let idx = if r <= 0.0 { 0 } else { (r as usize).min(cap) };
        counts[idx] += 1;
    }
    counts
}

/// Largest single bucket across several binned distributions.
pub fn shared_axis_max(distributions: &[Vec<usize>]) -> usize {
    distributions.iter().flat_map(|d| d.iter().copied()).max().unwrap_or(0)
}

fn bin_counts(values: &[usize]) -> Vec<usize> {
    bin(values.iter().map(|&x| x as f64), BIN_CAP)
}

/// One binned panel of the histogram figure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub label: &'static str,
    pub counts: Vec<usize>,
}

/// Capped per-hit values for one (primer, FASTA file) batch plus figure text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramBundle {
    pub title: String,
    pub subtitle: String,
    pub non_tp_mismatches: Vec<usize>,
    pub tp_mismatches: Vec<usize>,
    pub non_tp_gaps: Vec<usize>,
    pub tp_gaps: Vec<usize>,
    pub weighted_scores: Vec<f64>,
    pub last_base_mismatches: Vec<usize>,
}

impl HistogramBundle {
    /// Empty bundle with the title/subtitle for `primer` tested against `fasta_name`.
    pub fn new(primer: &Primer, fasta_name: &str, config: &ScoringConfig) -> Self {
        let (min_gc, max_gc) = primer.gc_range();
        let title = format!(
            "{}; Degeneracy: {}; GC content {:.2} - {:.2}\n5'-{}-3'\nSequences tested: {}",
            primer.name(),
            primer.degeneracy(),
            min_gc,
            max_gc,
            primer.sequence(),
            fasta_name
        );
        let subtitle = format!(
            "3' length: {} nucleotides\n\
             Weighted score = non-3' mismatches * {:.2} + 3' mismatches * {:.2} + non 3' gaps * {:.2} + 3' gaps * {:.2}\n\
             An additional {:.2} penalty is assigned if the final 3' base mismatches\n\
             Weighted score is rounded to the nearest whole number in this graphical display",
            config.tp_len,
            config.non_tp_mismatch_weight,
            config.tp_mismatch_weight,
            config.non_tp_gap_weight,
            config.tp_gap_weight,
            config.last_base_weight
        );
        Self { title, subtitle, ..Default::default() }
    }

    /// Append one hit, capping each value for display.
    pub fn push(&mut self, score: &ScoreResult) {
        self.non_tp_mismatches.push(score.non_tp_mismatches.min(MAX_MISMATCHES));
        self.tp_mismatches.push(score.tp_mismatches.min(MAX_MISMATCHES));
        self.non_tp_gaps.push(score.non_tp_gaps.min(MAX_GAPS));
        self.tp_gaps.push(score.tp_gaps.min(MAX_GAPS));
        let w = if score.weighted_score <= MAX_WEIGHTED_SCORE {
            (score.weighted_score * 100.0).round() / 100.0
        } else {
            MAX_WEIGHTED_SCORE
        };
        self.weighted_scores.push(w);
        self.last_base_mismatches.push(score.last_base_mismatch as usize);
    }

    /// Number of hits collected.
    pub fn len(&self) -> usize {
        self.weighted_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weighted_scores.is_empty()
    }

    /// The six binned panels in display order.
    pub fn panels(&self) -> Vec<Panel> {
        vec![
            Panel { label: "Non 3' mismatches", counts: bin_counts(&self.non_tp_mismatches) },
            Panel { label: "3' mismatches", counts: bin_counts(&self.tp_mismatches) },
            Panel { label: "Final 3' base mismatches", counts: bin_counts(&self.last_base_mismatches) },
            Panel { label: "Non 3' gaps", counts: bin_counts(&self.non_tp_gaps) },
            Panel { label: "3' gaps", counts: bin_counts(&self.tp_gaps) },
            Panel {
                label: "Weighted Score",
                counts: bin(self.weighted_scores.iter().copied(), BIN_CAP),
            },
        ]
    }

    /// Shared y-axis size for all panels.
    pub fn axis_max(&self) -> usize {
        let binned: Vec<Vec<usize>> = self.panels().into_iter().map(|p| p.counts).collect();
        shared_axis_max(&binned)
    }
}

/// Draws a [`HistogramBundle`]; implementations own the output format.
pub trait HistogramRenderer {
    fn render(&mut self, bundle: &HistogramBundle) -> std::io::Result<()>;
}

/// Plain-text renderer: title, six bar panels on a shared scale, footer.
pub struct TextHistogram<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TextHistogram<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 50 }
    }

    /// Maximum bar width in characters.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HistogramRenderer for TextHistogram<W> {
    fn render(&mut self, bundle: &HistogramBundle) -> std::io::Result<()> {
        let axis = bundle.axis_max();
        writeln!(self.out, "{}", bundle.title)?;
        writeln!(self.out, "Sequences: {}   Shared axis max: {}", bundle.len(), axis)?;
        for panel in bundle.panels() {
            writeln!(self.out)?;
            writeln!(self.out, "{}", panel.label)?;
            let last = panel.counts.len() - 1;
            for (i, &c) in panel.counts.iter().enumerate() {
                let label = if i == last { format!("{i}+") } else { i.to_string() };
                let bar = if axis == 0 { 0 } else { (c * self.width).div_ceil(axis) };
                writeln!(self.out, "{label:>3} | {:<w$} {c}", "#".repeat(bar), w = self.width)?;
            }
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", bundle.subtitle)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(non_tp_mm: usize, tp_mm: usize, last: bool, gaps: usize, w: f64) -> ScoreResult {
        ScoreResult {
            weighted_score: w,
            non_tp_mismatches: non_tp_mm,
            tp_mismatches: tp_mm,
            last_base_mismatch: last,
            non_tp_gaps: gaps,
            tp_gaps: 0,
            hits_sequence_end: false,
        }
    }

    #[test]
    fn bins_are_half_open_and_capped() {
        assert_eq!(bin([0.0, 1.0, 1.0, 5.0, 9.0], 5), vec![1, 2, 0, 0, 0, 2]);
        assert_eq!(bin([0.4, 0.5, 1.49, 2.5], 3), vec![2, 1, 1, 0]);
        assert_eq!(bin([0.8], 5), vec![1, 0, 0, 0, 0, 0]);
        assert_eq!(bin([0.99, 4.99, 5.0], 5), vec![1, 0, 0, 0, 1, 1]);
        assert_eq!(bin(std::iter::empty(), 2), vec![0, 0, 0]);
        assert_eq!(bin([-1.0], 2), vec![1, 0, 0]);
    }

    #[test]
    fn axis_max_spans_all_distributions() {
        assert_eq!(shared_axis_max(&[vec![1, 2], vec![0, 7, 1]]), 7);
        assert_eq!(shared_axis_max(&[]), 0);
    }

    #[test]
    fn bundle_caps_values() {
        let p = Primer::new("8f", "AGAGTTTGATCMTGGCTCAG").unwrap();
        let mut b = HistogramBundle::new(&p, "seqs.fasta", &ScoringConfig::default());
        b.push(&result(0, 0, false, 0, 0.0));
        b.push(&result(9, 2, true, 7, 12.4));
        b.push(&result(1, 0, false, 0, 0.4000001));
        assert_eq!(b.len(), 3);
        assert_eq!(b.non_tp_mismatches, vec![0, 5, 1]);
        assert_eq!(b.non_tp_gaps, vec![0, 5, 0]);
        assert_eq!(b.weighted_scores, vec![0.0, 5.0, 0.4]);
        assert_eq!(b.last_base_mismatches, vec![0, 1, 0]);

        let panels = b.panels();
        assert_eq!(panels.len(), 6);
        assert_eq!(panels[0].counts, vec![1, 1, 0, 0, 0, 1]);
        assert_eq!(panels[2].label, "Final 3' base mismatches");
        assert_eq!(panels[5].counts, vec![2, 0, 0, 0, 0, 1]);
        assert_eq!(b.axis_max(), 3);
    }

    #[test]
    fn titles_describe_primer_and_weights() {
        let p = Primer::new("8f", "AGAGTTTGATCMTGGCTCAG").unwrap();
        let b = HistogramBundle::new(&p, "seqs.fasta", &ScoringConfig::default());
        assert!(b.title.starts_with("8f; Degeneracy: 2; GC content 0.45 - 0.50"));
        assert!(b.title.contains("5'-AGAGTTTGATCMTGGCTCAG-3'"));
        assert!(b.title.ends_with("Sequences tested: seqs.fasta"));
        assert!(b.subtitle.starts_with("3' length: 5 nucleotides"));
        assert!(b.subtitle.contains("non-3' mismatches * 0.40"));
        assert!(b.subtitle.contains("An additional 3.00 penalty"));
    }

    #[test]
    fn text_rendering() {
        let p = Primer::new("8f", "AGAG").unwrap();
        let mut b = HistogramBundle::new(&p, "x.fna", &ScoringConfig::default());
        b.push(&result(0, 0, false, 0, 0.0));
        b.push(&result(0, 1, false, 0, 1.0));
        let mut r = TextHistogram::new(Vec::new()).with_width(10);
        r.render(&b).unwrap();
        let text = String::from_utf8(r.into_inner()).unwrap();
        assert!(text.contains("Shared axis max: 2"));
        assert!(text.contains("Non 3' mismatches\n  0 | ########## 2\n"));
        assert!(text.contains("  1 | #####      1\n"));
        assert!(text.contains(" 5+ |            0\n"));
        assert!(text.trim_end().ends_with("graphical display"));
    }
}
