//! Smith–Waterman local alignment of a primer against a target with affine
//! gaps and IUPAC-aware substitution scores.
//!
//! Scores are multiplied by a power-of-ten scale (at least
//! [`ScoringConfig::scale`], raised until every configured score is a whole
//! number) and run through the dynamic programming pass as integers, so ties are resolved exactly and the
//! same inputs always give the same alignment. Ties are broken as follows:
//! the first maximal cell in row-major order (primer rows, target columns)
//! ends the alignment, and the traceback prefers a diagonal step, then a gap
//! in the target, then a gap in the primer.
//!
//! ```rust
//! use primerhits::{local_align, ScoringConfig};
//! let aln = local_align("GATCMTGG", "TTTGATCATGGTTT", &ScoringConfig::default()).unwrap();
//! assert_eq!(aln.primer_hit, "GATCMTGG");
//! assert_eq!(aln.target_hit, "GATCATGG");
//! assert_eq!(aln.hit_start, 3);
//! ```
use crate::common::{PrimerError, ScoringConfig};
use crate::iupac::{is_nucleotide, is_transition, MatchScorer, GAP};

/// Best local alignment of a primer against one target sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedPair {
    /// Aligned primer, gaps marked with `-`.
    pub primer_hit: String,
    /// Aligned target segment, gaps marked with `-`. Same length as `primer_hit`.
    pub target_hit: String,
    /// Offset of the degapped `target_hit` in the target sequence.
    pub hit_start: usize,
    /// Length of the whole target sequence.
    pub target_len: usize,
    /// Alignment score in unscaled units.
    pub score: f64,
}

impl AlignedPair {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.primer_hit.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.primer_hit.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Stop,
    Diag,
    Up,
    Left,
}

enum State {
    Best,
    GapInPrimer,
    GapInTarget,
}

/// Substitution scheme: compatible symbols score `match_score`; concrete
/// transitions score `transition`; everything else `transversion`.
struct Substitution {
    scorer: MatchScorer,
    transition: i32,
}

impl Substitution {
    fn new(config: &ScoringConfig, scale: f64) -> Self {
        Self {
            scorer: MatchScorer::new(
                scaled(config.match_score, scale) as f64,
                scaled(config.transversion, scale) as f64,
            ),
            transition: scaled(config.transition, scale),
        }
    }

    fn score(&self, x: char, y: char) -> Result<i32, PrimerError> {
        if is_transition(x, y) {
            return Ok(self.transition);
        }
        Ok(self.scorer.score(x, y)? as i32)
    }
}

fn scaled(v: f64, scale: f64) -> i32 {
    (v * scale).round() as i32
}

const MAX_SCALE: f64 = 1e6;

/// Smallest power-of-ten multiple of `config.scale` that makes every
/// alignment score integral, up to [`MAX_SCALE`].
fn effective_scale(config: &ScoringConfig) -> f64 {
    let values = [
        config.gap_open,
        config.gap_extend,
        config.match_score,
        config.transition,
        config.transversion,
    ];
    let mut scale = config.scale.max(1.0);
    while scale < MAX_SCALE && values.iter().any(|&v| ((v * scale) - (v * scale).round()).abs() > 1e-6) {
        scale *= 10.0;
    }
    scale
}

fn validate(seq: &str) -> Result<(), PrimerError> {
    match seq.chars().find(|&c| !is_nucleotide(c)) {
        Some(symbol) => Err(PrimerError::InvalidSymbol { symbol, sequence: seq.to_string() }),
        None => Ok(()),
    }
}

/// Align exactly two sequences, `[primer, target]`.
pub fn align_unaligned(seqs: &[&str], config: &ScoringConfig) -> Result<AlignedPair, PrimerError> {
    match seqs {
        [primer, target] => local_align(primer, target, config),
        _ => Err(PrimerError::Arity { count: seqs.len() }),
    }
}

/// Run Smith–Waterman local alignment of `primer` against `target` and locate the hit.
pub fn local_align(primer: &str, target: &str, config: &ScoringConfig) -> Result<AlignedPair, PrimerError> {
    if primer.is_empty() || target.is_empty() {
        return Err(PrimerError::InvalidSequence("empty sequence"));
    }
    let primer = primer.to_ascii_uppercase();
    let target = target.to_ascii_uppercase();
    validate(&primer)?;
    validate(&target)?;

    let a: Vec<char> = primer.chars().collect();
    let b: Vec<char> = target.chars().collect();
    let n = a.len();
    let m = b.len();

    let scale = effective_scale(config);
    let go = scaled(config.gap_open, scale);
    let ge = scaled(config.gap_extend, scale);
    let subst = Substitution::new(config, scale);

    let neg_inf = i32::MIN / 4;
    // h = best ending here, e = gap in primer (moves left), f = gap in target (moves up)
    let mut h = vec![vec![0i32; m + 1]; n + 1];
    let mut e = vec![vec![neg_inf; m + 1]; n + 1];
    let mut f = vec![vec![neg_inf; m + 1]; n + 1];
    let mut tb = vec![vec![Step::Stop; m + 1]; n + 1];
    let mut e_extended = vec![vec![false; m + 1]; n + 1];
    let mut f_extended = vec![vec![false; m + 1]; n + 1];

    let mut max_i = 0usize;
    let mut max_j = 0usize;
    let mut max_score = 0i32;

    for i in 1..=n {
        for j in 1..=m {
            let (open, extend) = (h[i][j - 1] - go, e[i][j - 1] - ge);
            e_extended[i][j] = extend > open;
            e[i][j] = open.max(extend);
            let (open, extend) = (h[i - 1][j] - go, f[i - 1][j] - ge);
            f_extended[i][j] = extend > open;
            f[i][j] = open.max(extend);

            let diag = h[i - 1][j - 1] + subst.score(a[i - 1], b[j - 1])?;
            let (best, dir) = if diag >= f[i][j] && diag >= e[i][j] {
                (diag, Step::Diag)
            } else if f[i][j] >= e[i][j] {
                (f[i][j], Step::Up)
            } else {
                (e[i][j], Step::Left)
            };
            // local alignment restarts at 0
            let (best, dir) = if best > 0 { (best, dir) } else { (0, Step::Stop) };
            h[i][j] = best;
            tb[i][j] = dir;
            if best > max_score {
                max_score = best;
                max_i = i;
                max_j = j;
            }
        }
    }
    if max_score == 0 {
        return Err(PrimerError::NoLocalAlignment);
    }

    let mut i = max_i;
    let mut j = max_j;
    let mut state = State::Best;
    let mut p_aln = Vec::new();
    let mut t_aln = Vec::new();
    loop {
        match state {
            State::Best => match tb[i][j] {
                Step::Stop => break,
                Step::Diag => {
                    p_aln.push(a[i - 1]);
                    t_aln.push(b[j - 1]);
                    i -= 1;
                    j -= 1;
                }
                Step::Up => state = State::GapInTarget,
                Step::Left => state = State::GapInPrimer,
            },
            State::GapInTarget => {
                p_aln.push(a[i - 1]);
                t_aln.push(GAP);
                if !f_extended[i][j] {
                    state = State::Best;
                }
                i -= 1;
            }
            State::GapInPrimer => {
                p_aln.push(GAP);
                t_aln.push(b[j - 1]);
                if !e_extended[i][j] {
                    state = State::Best;
                }
                j -= 1;
            }
        }
    }
    p_aln.reverse();
    t_aln.reverse();
    let primer_hit: String = p_aln.into_iter().collect();
    let target_hit: String = t_aln.into_iter().collect();

    let degapped: String = target_hit.chars().filter(|&c| c != GAP).collect();
    let hit_start = target.find(&degapped).ok_or_else(|| PrimerError::Consistency {
        target: target.clone(),
        target_hit: target_hit.clone(),
    })?;

    Ok(AlignedPair {
        primer_hit,
        target_hit,
        hit_start,
        target_len: m,
        score: max_score as f64 / scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const P8F: &str = "AGAGTTTGATCMTGGCTCAG";

    #[test]
    fn exact_substring_is_found() {
        let target = "GCTAGAGAGTTTGATCATGGCTCAGATTGAACGCTGGCGGCAGGCCTAAC";
        assert_eq!(target.len(), 50);
        let aln = local_align(P8F, target, &ScoringConfig::default()).unwrap();
        assert_eq!(aln.primer_hit, P8F);
        assert_eq!(aln.target_hit, "AGAGTTTGATCATGGCTCAG");
        assert_eq!(aln.hit_start, 5);
        assert_eq!(aln.target_len, 50);
        assert_eq!(aln.score, 20.0);
    }

    #[test]
    fn deletion_in_target_opens_one_gap() {
        let primer = "AGAGTTTGATCCTGGCTCAG";
        let target = "GGGGAGAGTTTGATCTGGCTCAGGGGG";
        let aln = local_align(primer, target, &ScoringConfig::default()).unwrap();
        assert_eq!(aln.primer_hit, primer);
        assert_eq!(aln.target_hit.len(), aln.primer_hit.len());
        assert_eq!(aln.target_hit.matches('-').count(), 1);
        assert_eq!(aln.target_hit.replace('-', ""), "AGAGTTTGATCTGGCTCAG");
        assert_eq!(aln.hit_start, 4);
        assert_eq!(aln.score, 14.0);
    }

    #[test]
    fn insertion_in_target_gaps_the_primer() {
        let primer = "AGAGTTTGATCCTGGCTCAG";
        let target = "TTAGAGTTTGATCCATGGCTCAGTT";
        let aln = local_align(primer, target, &ScoringConfig::default()).unwrap();
        assert_eq!(aln.primer_hit.matches('-').count(), 1);
        assert!(!aln.target_hit.contains('-'));
        assert_eq!(aln.target_hit, "AGAGTTTGATCCATGGCTCAG");
        assert_eq!(aln.hit_start, 2);
    }

    #[test]
    fn aligned_strings_have_equal_length() {
        let cfg = ScoringConfig::default();
        let cases = [
            ("GTGCCAGCMGCCGCGGTAA", "TACGTAGGGTGCAAGCGTTAATCGGAATTACTGGGCGTAAAGCG"),
            ("GGACTACHVGGGTWTCTAAT", "ATTAGATACCCTGGTAGTCCACGCCGTAAACG"),
            ("ACGT", "TTTTACGATTTT"),
            ("NNNN", "ACGTACGT"),
        ];
        for (p, t) in cases {
            let aln = local_align(p, t, &cfg).unwrap();
            assert_eq!(aln.primer_hit.len(), aln.target_hit.len(), "{p} vs {t}");
            let degapped = aln.target_hit.replace('-', "");
            assert_eq!(&t[aln.hit_start..aln.hit_start + degapped.len()], degapped);
        }
    }

    #[test]
    fn alignment_is_deterministic() {
        let cfg = ScoringConfig::default();
        let p = "GGACTACHVGGGTWTCTAAT";
        let t = "CCTACGGGAGGCAGCAGTGGGGAATATTGCACAATGGGCGCAAGCCTGATGCAGCCATGCCGCGTGTATGA";
        let first = local_align(p, t, &cfg).unwrap();
        for _ in 0..5 {
            assert_eq!(local_align(p, t, &cfg).unwrap(), first);
        }
    }

    #[test]
    fn lowercase_input_is_accepted() {
        let aln = local_align("acgt", "ttacgttt", &ScoringConfig::default()).unwrap();
        assert_eq!(aln.target_hit, "ACGT");
        assert_eq!(aln.hit_start, 2);
    }

    #[test]
    fn transition_score_is_configurable() {
        let mut cfg = ScoringConfig::default();
        assert!(matches!(local_align("AAAA", "GGGG", &cfg), Err(PrimerError::NoLocalAlignment)));
        cfg.transition = 0.5;
        let aln = local_align("AAAA", "GGGG", &cfg).unwrap();
        assert_eq!(aln.primer_hit, "AAAA");
        assert_eq!(aln.score, 2.0);
        assert!(matches!(local_align("AAAA", "CCCC", &cfg), Err(PrimerError::NoLocalAlignment)));
    }

    #[test]
    fn fractional_scores_are_not_rounded() {
        let mut cfg = ScoringConfig::default();
        assert_eq!(effective_scale(&cfg), 10.0);
        cfg.gap_extend = 0.25;
        assert_eq!(effective_scale(&cfg), 100.0);
        cfg.gap_extend = 2.0;
        cfg.match_score = 0.25;
        let aln = local_align("ACGT", "TTACGTTT", &cfg).unwrap();
        assert_eq!(aln.target_hit, "ACGT");
        assert_eq!(aln.score, 1.0);
    }

    #[test]
    fn input_errors() {
        let cfg = ScoringConfig::default();
        assert!(matches!(local_align("", "ACGT", &cfg), Err(PrimerError::InvalidSequence(_))));
        assert!(matches!(local_align("ACGT", "", &cfg), Err(PrimerError::InvalidSequence(_))));
        assert!(matches!(
            local_align("ACGT", "ACGTX", &cfg),
            Err(PrimerError::InvalidSymbol { symbol: 'X', .. })
        ));
        assert!(matches!(local_align("AC-GT", "ACGT", &cfg), Err(PrimerError::InvalidSymbol { symbol: '-', .. })));
    }

    #[test]
    fn exactly_two_sequences() {
        let cfg = ScoringConfig::default();
        assert!(matches!(align_unaligned(&["ACGT"], &cfg), Err(PrimerError::Arity { count: 1 })));
        assert!(matches!(
            align_unaligned(&["ACGT", "ACGT", "ACGT"], &cfg),
            Err(PrimerError::Arity { count: 3 })
        ));
        let aln = align_unaligned(&["ACGT", "GACGTG"], &cfg).unwrap();
        assert_eq!(aln.hit_start, 1);
    }
}
