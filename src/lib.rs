//! # primerhits
//!
//! Score PCR primers for their ability to amplify target DNA.
//!
//! Each primer is locally aligned (Smith–Waterman, affine gaps, IUPAC
//! ambiguity codes) against every target sequence. The alignment is split
//! into a non-3' zone, a 3' zone and the final 3' base, and mismatches and
//! gaps are penalized more heavily the closer they are to the 3' end,
//! since those disrupt polymerase extension the most. A perfect hit scores
//! 0; the score grows with every weighted penalty.
//!
//! ## Pipeline
//! 1. [`orient`]: reverse primers (name token ending in `r`) are reverse
//!    complemented so they match the plus strand.
//! 2. [`local_align`]: best local alignment and the hit start in the target.
//! 3. [`score_primer`]: zone counts and the weighted score.
//! 4. [`hits_end`]: does the hit touch either end of the target?
//! 5. [`HistogramBundle`]: capped distributions for a whole FASTA file.
//!
//! ### Example
//! ```
//! use primerhits::{evaluate_pair, FastaRecord, Primer, ScoringConfig};
//! let primer = Primer::new("8f", "AGAGTTTGATCMTGGCTCAG").unwrap();
//! let target = FastaRecord {
//!     id: "seq1".into(),
//!     seq: "GCTAGAGAGTTTGATCATGGCTCAGATTGAACGCTGGCGGCAGGCCTAAC".into(),
//! };
//! let hit = evaluate_pair(&primer, &target, &ScoringConfig::default()).unwrap();
//! assert_eq!(hit.aligned.hit_start, 5);
//! assert_eq!(hit.score.weighted_score, 0.0);
//! assert!(!hit.score.hits_sequence_end);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod align;
pub mod common;
pub mod histogram;
pub mod hits;
pub mod iupac;
pub mod primer;
pub mod zones;

pub use align::{align_unaligned, local_align, AlignedPair};
pub use common::{parse_fasta, FastaRecord, PrimerError, ScoringConfig};
pub use histogram::{bin, shared_axis_max, HistogramBundle, HistogramRenderer, Panel, TextHistogram};
pub use hits::{
    evaluate_pair, evaluate_primer, hits_header, output_paths, write_primer_outputs, HitRecord, PrimerHits,
};
pub use iupac::{matches, reverse_complement, MatchScorer};
pub use primer::{correct_primer_name, orient, parse_primers, select_primers, Orientation, Primer};
pub use zones::{hits_end, score_primer, zone_bounds, ScoreResult, Zones};
