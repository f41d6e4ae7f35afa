//! IUPAC nucleotide alphabet and the ambiguity-aware compatibility table.
//!
//! Each symbol is a bitmask over the concrete bases `A`, `C`, `G`, `T`.
//! Two symbols are compatible when
//! - they are the same concrete base, or both are the gap symbol `-`, or
//! - one is an ambiguity code and the other a concrete base it represents.
//!
//! Two ambiguity codes are never compatible with each other, not even the
//! same code twice: `N` matches `A`, `C`, `G` and `T` but not `N` or `R`.
//! The table is symmetric and built at compile time.
//!
//! ```rust
//! use primerhits::matches;
//! assert!(matches('N', 'A').unwrap());
//! assert!(!matches('A', 'C').unwrap());
//! assert!(matches('-', '-').unwrap());
//! assert!(matches('A', 'Z').is_err());
//! ```
use crate::common::PrimerError;

/// Gap symbol used in aligned strings.
pub const GAP: char = '-';

const BASE_A: u8 = 1;
const BASE_C: u8 = 2;
const BASE_G: u8 = 4;
const BASE_T: u8 = 8;

/// Alphabet in table order: four concrete bases, eleven ambiguity codes, gap.
const SYMBOLS: [u8; 16] = *b"ACGTRYSWKMBDHVN-";

/// Bases represented by each entry of [`SYMBOLS`]; the gap represents none.
const MASKS: [u8; 16] = [
    BASE_A, BASE_C, BASE_G, BASE_T,
    BASE_A | BASE_G, BASE_C | BASE_T, BASE_C | BASE_G, BASE_A | BASE_T, BASE_G | BASE_T, BASE_A | BASE_C,
    BASE_C | BASE_G | BASE_T, BASE_A | BASE_G | BASE_T, BASE_A | BASE_C | BASE_T, BASE_A | BASE_C | BASE_G,
    BASE_A | BASE_C | BASE_G | BASE_T,
    0,
];

const GAP_INDEX: usize = 15;

const fn is_concrete(i: usize) -> bool {
    i < 4
}

const fn build_table() -> [[bool; 16]; 16] {
    let mut table = [[false; 16]; 16];
    let mut i = 0;
    while i < 16 {
        let mut j = 0;
        while j < 16 {
            table[i][j] = if i == j {
                is_concrete(i) || i == GAP_INDEX
            } else if is_concrete(i) && !is_concrete(j) && j != GAP_INDEX {
                MASKS[j] & MASKS[i] != 0
            } else if is_concrete(j) && !is_concrete(i) && i != GAP_INDEX {
                MASKS[i] & MASKS[j] != 0
            } else {
                false
            };
            j += 1;
        }
        i += 1;
    }
    table
}

static COMPATIBLE: [[bool; 16]; 16] = build_table();

/// Table index of `c` (case-insensitive), or `None` outside the alphabet.
#[inline]
fn index(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    let u = c.to_ascii_uppercase() as u8;
    SYMBOLS.iter().position(|&s| s == u)
}

/// True if `c` belongs to the nucleotide/ambiguity/gap alphabet.
pub fn is_symbol(c: char) -> bool {
    index(c).is_some()
}

/// True if `c` is one of the fifteen IUPAC nucleotide codes (gap excluded).
pub fn is_nucleotide(c: char) -> bool {
    matches!(index(c), Some(i) if i != GAP_INDEX)
}

/// Do `a` and `b` match under IUPAC ambiguity rules?
///
/// Fails with [`PrimerError::UnknownSymbol`] if either symbol is outside
/// the alphabet (gap included in the alphabet).
pub fn matches(a: char, b: char) -> Result<bool, PrimerError> {
    match (index(a), index(b)) {
        (Some(i), Some(j)) => Ok(COMPATIBLE[i][j]),
        _ => Err(PrimerError::UnknownSymbol { a, b }),
    }
}

/// Number of concrete bases `c` stands for (1 for A/C/G/T, 4 for N, 0 for gap).
pub fn base_count(c: char) -> Option<u32> {
    index(c).map(|i| MASKS[i].count_ones())
}

/// Complement of a single IUPAC symbol; gaps and unknown symbols map to themselves.
pub fn complement(c: char) -> char {
    let u = match c.to_ascii_uppercase() {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        'R' => 'Y',
        'Y' => 'R',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        other => other,
    };
    if c.is_ascii_lowercase() { u.to_ascii_lowercase() } else { u }
}

/// Reverse complement of an IUPAC sequence.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement).collect()
}

/// True for two different concrete bases of the same chemical class (A/G or C/T).
pub fn is_transition(a: char, b: char) -> bool {
    matches!(
        (a.to_ascii_uppercase(), b.to_ascii_uppercase()),
        ('A', 'G') | ('G', 'A') | ('C', 'T') | ('T', 'C')
    )
}

/// Match/mismatch scorer over the compatibility table.
///
/// Resulting scores are `match_score` for compatible symbols and
/// `mismatch_score` otherwise; unknown symbols are an error.
#[derive(Clone, Copy, Debug)]
pub struct MatchScorer {
    pub match_score: f64,
    pub mismatch_score: f64,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self { match_score: 1.0, mismatch_score: -1.0 }
    }
}

impl MatchScorer {
    pub fn new(match_score: f64, mismatch_score: f64) -> Self {
        Self { match_score, mismatch_score }
    }

    pub fn score(&self, a: char, b: char) -> Result<f64, PrimerError> {
        Ok(if matches(a, b)? { self.match_score } else { self.mismatch_score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_gap_matches() {
        for c in ['A', 'C', 'G', 'T', '-'] {
            assert!(matches(c, c).unwrap(), "{c}");
        }
        assert!(!matches('A', 'C').unwrap());
        assert!(!matches('G', 'T').unwrap());
        assert!(!matches('A', '-').unwrap());
        assert!(!matches('-', 'N').unwrap());
    }

    #[test]
    fn ambiguity_codes_match_their_bases_both_ways() {
        assert!(matches('N', 'A').unwrap());
        assert!(matches('A', 'N').unwrap());
        assert!(matches('R', 'G').unwrap());
        assert!(!matches('R', 'C').unwrap());
        assert!(matches('M', 'C').unwrap());
        assert!(!matches('T', 'M').unwrap());
        assert!(matches('b', 't').unwrap());
        assert!(!matches('B', 'A').unwrap());
    }

    #[test]
    fn ambiguity_codes_never_match_each_other() {
        assert!(!matches('N', 'N').unwrap());
        assert!(!matches('R', 'N').unwrap());
        assert!(!matches('S', 'S').unwrap());
    }

    #[test]
    fn table_is_symmetric() {
        for &a in SYMBOLS.iter() {
            for &b in SYMBOLS.iter() {
                let (a, b) = (a as char, b as char);
                assert_eq!(matches(a, b).unwrap(), matches(b, a).unwrap(), "{a}/{b}");
            }
        }
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        assert!(matches!(matches('A', 'X'), Err(PrimerError::UnknownSymbol { a: 'A', b: 'X' })));
        assert!(matches('U', 'A').is_err());
        assert!(matches('é', 'A').is_err());
        assert!(!is_symbol('*'));
        assert!(is_nucleotide('n'));
        assert!(!is_nucleotide('-'));
    }

    #[test]
    fn complements() {
        assert_eq!(reverse_complement("GGACTAC"), "GTAGTCC");
        assert_eq!(reverse_complement("ACGTRYKMBVDHSWN"), "NWSDHBVKMRYACGT");
        assert_eq!(complement('a'), 't');
        assert_eq!(base_count('N'), Some(4));
        assert_eq!(base_count('V'), Some(3));
        assert_eq!(base_count('-'), Some(0));
        assert_eq!(base_count('Z'), None);
    }

    #[test]
    fn transitions_and_scorer() {
        assert!(is_transition('A', 'G'));
        assert!(is_transition('t', 'c'));
        assert!(!is_transition('A', 'T'));
        assert!(!is_transition('A', 'A'));
        let s = MatchScorer::default();
        assert_eq!(s.score('N', 'G').unwrap(), 1.0);
        assert_eq!(s.score('A', 'G').unwrap(), -1.0);
        assert!(s.score('A', '?').is_err());
    }
}
