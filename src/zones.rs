//! Position-weighted scoring of an aligned primer.
//!
//! The aligned primer is split into three zones. For a forward primer the
//! 3' end is at the end of the alignment, for a reverse primer (already
//! reverse complemented to match the plus strand) it is at the start:
//!
//! ```text
//! forward:  [ non-3' ........ | 3' (tp_len-1) | last ]
//! reverse:  [ last | 3' (tp_len-1) | ........ non-3' ]
//! ```
//!
//! Within a zone a *mismatch* is a column where neither side is a gap and
//! the symbols are not compatible; every gap symbol counts once, on either
//! side, so a column with gaps on both sides counts twice. Gaps at the last
//! base are added to the 3' gap count.
use std::ops::Range;

use crate::align::AlignedPair;
use crate::common::{PrimerError, ScoringConfig};
use crate::iupac::{matches, GAP};
use crate::primer::{Orientation, Primer};

/// Mismatch and gap counts of one primer hit together with its weighted score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreResult {
    pub weighted_score: f64,
    pub non_tp_mismatches: usize,
    pub tp_mismatches: usize,
    pub last_base_mismatch: bool,
    pub non_tp_gaps: usize,
    pub tp_gaps: usize,
    pub hits_sequence_end: bool,
}

/// Column ranges of the three zones of an alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zones {
    pub non_tp: Range<usize>,
    pub tp: Range<usize>,
    pub last: usize,
}

/// Zone boundaries for an alignment of `len` columns (`len > 0`).
///
/// `tp_len` is clamped into `1..=len`, so the last base is always its own zone.
pub fn zone_bounds(orientation: Orientation, len: usize, tp_len: usize) -> Zones {
    let tp_len = tp_len.clamp(1, len.max(1));
    match orientation {
        Orientation::Forward => Zones {
            non_tp: 0..len - tp_len,
            tp: len - tp_len..len - 1,
            last: len - 1,
        },
        Orientation::Reverse => Zones {
            non_tp: tp_len..len,
            tp: 1..tp_len,
            last: 0,
        },
    }
}

#[derive(Default)]
struct ZoneCount {
    mismatches: usize,
    gaps: usize,
}

fn count_zone(primer: &[char], target: &[char], cols: Range<usize>) -> Result<ZoneCount, PrimerError> {
    let mut out = ZoneCount::default();
    for k in cols {
        let (p, t) = (primer[k], target[k]);
        out.gaps += (p == GAP) as usize + (t == GAP) as usize;
        if p != GAP && t != GAP && !matches(t, p)? {
            out.mismatches += 1;
        }
    }
    Ok(out)
}

/// True if a hit starting at `hit_start` touches either end of the target.
pub fn hits_end(target_len: usize, hit_start: usize, primer_len: usize) -> bool {
    hit_start == 0 || hit_start + primer_len >= target_len
}

/// Count zone mismatches/gaps of `aligned` and combine them into the weighted score.
pub fn score_primer(
    primer: &Primer,
    aligned: &AlignedPair,
    config: &ScoringConfig,
) -> Result<ScoreResult, PrimerError> {
    let p: Vec<char> = aligned.primer_hit.chars().collect();
    let t: Vec<char> = aligned.target_hit.chars().collect();
    if p.is_empty() {
        return Err(PrimerError::NoLocalAlignment);
    }
    if p.len() != t.len() {
        return Err(PrimerError::InvalidSequence("aligned primer and target differ in length"));
    }
    let zones = zone_bounds(primer.orientation(), p.len(), config.tp_len);

    let non_tp = count_zone(&p, &t, zones.non_tp)?;
    let tp = count_zone(&p, &t, zones.tp)?;
    let last = count_zone(&p, &t, zones.last..zones.last + 1)?;
    let last_base_mismatch = last.mismatches > 0;
    let tp_gaps = tp.gaps + last.gaps;

    let weighted_score = config.last_base_weight * (last_base_mismatch as u8 as f64)
        + config.tp_mismatch_weight * tp.mismatches as f64
        + config.non_tp_mismatch_weight * non_tp.mismatches as f64
        + config.tp_gap_weight * tp_gaps as f64
        + config.non_tp_gap_weight * non_tp.gaps as f64;

    Ok(ScoreResult {
        weighted_score,
        non_tp_mismatches: non_tp.mismatches,
        tp_mismatches: tp.mismatches,
        last_base_mismatch,
        non_tp_gaps: non_tp.gaps,
        tp_gaps,
        hits_sequence_end: hits_end(aligned.target_len, aligned.hit_start, primer.len()),
    })
}
