//! Common helpers shared by the scoring pipeline: the error type, minimal
//! FASTA parsing, and the scoring configuration.
//!
//! ## FASTA
//! The parser is intentionally permissive and suitable for small/medium files
//! and tests. It supports multi-record inputs and keeps all non‑alphabetic
//! symbols as‑is (conversion to uppercase only). Symbols are validated later,
//! when a sequence is aligned.
//!
//! ## Scoring
//! [`ScoringConfig`] bundles the zone length and weights used by the zone
//! scorer together with the substitution and gap scores used by the local
//! aligner.
//!
//! ## Examples
//! ```rust
//! use primerhits::parse_fasta;
//! let recs = parse_fasta(">seq1 some description\nACGT\n>seq2\nacgn\n");
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].id, "seq1");
//! assert_eq!(recs[1].seq, "ACGN");
//! ```

/// Errors that can be returned by the algorithms in this crate.
#[derive(thiserror::Error, Debug)]
pub enum PrimerError {
    /// The first underscore-delimited token of a primer name must end in `f` or `r`.
    #[error(
        "{name} not named correctly, all primers must start with an alphanumeric value \
         followed by \"f\" or \"r\". Any underscores should occur after this name. \
         Example: 219f_bacterial"
    )]
    InvalidName { name: String },
    /// A symbol outside the nucleotide/ambiguity/gap alphabet reached a comparison.
    #[error("unknown character: {a} or {b}")]
    UnknownSymbol { a: char, b: char },
    /// A sequence handed to the aligner contains a symbol outside the alphabet.
    #[error("invalid character {symbol:?} in sequence {sequence}")]
    InvalidSymbol { symbol: char, sequence: String },
    /// Pairwise alignment was requested for a number of sequences other than two.
    #[error("pairwise aligning of seqs requires exactly two seqs, got {count}")]
    Arity { count: usize },
    /// The degapped target hit could not be found in the target sequence.
    #[error("substring not found, query string {target}, target_hit {target_hit}")]
    Consistency { target: String, target_hit: String },
    /// No cell of the local alignment matrix scored above zero.
    #[error("no positive-scoring local alignment between primer and target")]
    NoLocalAlignment,
    /// Returned when sequence input is empty or otherwise invalid.
    #[error("invalid sequence input: {0}")]
    InvalidSequence(&'static str),
    /// A primers file line could not be understood.
    #[error("primers file line {line}: {reason}")]
    InvalidPrimersFile { line: usize, reason: String },
    /// A primer requested by name is absent from the primers file.
    #[error(
        "primer {name} not found in input primers file, please add to primers file \
         or specify its sequence"
    )]
    PrimerNotFound { name: String },
}

/// A simple in-memory FASTA record parsed by [`parse_fasta`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    /// Identifier from the FASTA header (first whitespace token after '>').
    pub id: String,
    /// Raw sequence (uppercase). Symbols are kept as-is by the parser.
    pub seq: String,
}

/// Parse a minimal FASTA string into a vector of [`FastaRecord`].
///
/// *Lines starting with `>` start a new record.* All other lines are appended
/// (without spaces) to the current sequence. Sequences are uppercased.
pub fn parse_fasta(text: &str) -> Vec<FastaRecord> {
    let mut out: Vec<FastaRecord> = vec![];
    let mut id: Option<String> = None;
    let mut seq = String::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(prev) = id.take() {
                out.push(FastaRecord { id: prev, seq: seq.to_ascii_uppercase() });
                seq.clear();
            }
            id = Some(rest.split_whitespace().next().unwrap_or("").to_string());
        } else {
            seq.push_str(line.trim());
        }
    }
    if let Some(prev) = id {
        out.push(FastaRecord { id: prev, seq: seq.to_ascii_uppercase() });
    }
    out
}

/// Parameters for aligning a primer and scoring the alignment.
///
/// The zone weights are applied to mismatch and gap counts by
/// [`score_primer`](crate::score_primer); the substitution and gap scores
/// drive [`local_align`](crate::local_align).
#[derive(Clone, Debug)]
pub struct ScoringConfig {
    /// Length of the 3' zone, last base included. Clamped to the alignment length.
    pub tp_len: usize,
    /// Penalty when the final 3' base mismatches.
    pub last_base_weight: f64,
    /// Penalty per mismatch in the 3' zone (last base excluded).
    pub tp_mismatch_weight: f64,
    /// Penalty per mismatch outside the 3' zone.
    pub non_tp_mismatch_weight: f64,
    /// Penalty per gap symbol in the 3' zone (last base included).
    pub tp_gap_weight: f64,
    /// Penalty per gap symbol outside the 3' zone.
    pub non_tp_gap_weight: f64,
    /// Cost of the first symbol of a gap run.
    pub gap_open: f64,
    /// Cost of every further symbol of a gap run.
    pub gap_extend: f64,
    /// Score for compatible symbols.
    pub match_score: f64,
    /// Score for a purine/purine or pyrimidine/pyrimidine mismatch.
    pub transition: f64,
    /// Score for every other mismatch.
    pub transversion: f64,
    /// Minimum integer scale factor so fractional scores are compared exactly;
    /// the aligner raises it by powers of ten when a score needs more decimals.
    pub scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tp_len: 5,
            last_base_weight: 3.0,
            tp_mismatch_weight: 1.0,
            non_tp_mismatch_weight: 0.4,
            tp_gap_weight: 3.0,
            non_tp_gap_weight: 1.0,
            gap_open: 5.0,
            gap_extend: 2.0,
            match_score: 1.0,
            transition: -1.0,
            transversion: -1.0,
            scale: 10.0,
        }
    }
}
