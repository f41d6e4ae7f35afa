//! Primers, their orientation, and the tab-delimited primers file.
//!
//! A primer name carries its orientation: the first underscore-delimited
//! token ends in `f` (forward) or `r` (reverse), e.g. `27f_bacterial` or
//! `515r`. Orientation is derived once in [`Primer::new`].
//!
//! Primers files list one primer per line, tab separated, 5' to 3':
//! ```text
//! # comment
//! 815_v34f	GTGGCCNATRRCYAGAACGC	Darrow, Scopes, Bryan et al. 1926
//! ```
use crate::common::PrimerError;
use crate::iupac::{base_count, is_nucleotide, reverse_complement};

/// Strand a primer anneals to, relative to the target's plus strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    /// Orientation encoded in a primer name, if the name follows the convention.
    pub fn from_name(name: &str) -> Option<Self> {
        let token = name.split('_').next().unwrap_or("");
        match token.chars().last() {
            Some('f') => Some(Orientation::Forward),
            Some('r') => Some(Orientation::Reverse),
            _ => None,
        }
    }
}

/// An immutable, validated primer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Primer {
    name: String,
    sequence: String,
    orientation: Orientation,
}

impl Primer {
    /// Build a primer; the sequence is uppercased and must be IUPAC DNA.
    pub fn new(name: impl Into<String>, sequence: &str) -> Result<Self, PrimerError> {
        let name = name.into();
        let orientation = Orientation::from_name(&name)
            .ok_or_else(|| PrimerError::InvalidName { name: name.clone() })?;
        if sequence.is_empty() {
            return Err(PrimerError::InvalidSequence("empty primer sequence"));
        }
        let sequence = sequence.to_ascii_uppercase();
        if let Some(symbol) = sequence.chars().find(|&c| !is_nucleotide(c)) {
            return Err(PrimerError::InvalidSymbol { symbol, sequence });
        }
        Ok(Self { name, sequence, orientation })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sequence as written, 5' to 3'.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of concrete sequences the degenerate primer stands for.
    pub fn degeneracy(&self) -> u64 {
        self.sequence
            .chars()
            .map(|c| base_count(c).unwrap_or(1) as u64)
            .fold(1u64, |acc, n| acc.saturating_mul(n))
    }

    /// Lowest and highest possible GC fraction given the degenerate positions.
    pub fn gc_range(&self) -> (f64, f64) {
        let len = self.len() as f64;
        let min = self.sequence.chars().filter(|c| "GCS".contains(*c)).count() as f64;
        let max = self.sequence.chars().filter(|c| "GCSNRYKMBDHV".contains(*c)).count() as f64;
        (min / len, max / len)
    }
}

/// Sequence that should match the target's plus strand: the primer itself
/// for forward primers, its reverse complement for reverse primers.
pub fn orient(primer: &Primer) -> String {
    match primer.orientation() {
        Orientation::Forward => primer.sequence().to_string(),
        Orientation::Reverse => reverse_complement(primer.sequence()),
    }
}

/// Lowercase a trailing `F`/`R` on the first name token (`27F_v2` → `27f_v2`).
pub fn correct_primer_name(name: &str) -> String {
    let (head, tail) = match name.find('_') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    };
    match head.chars().last() {
        Some(c @ ('F' | 'R')) => {
            let mut fixed = head[..head.len() - 1].to_string();
            fixed.push(c.to_ascii_lowercase());
            fixed.push_str(tail);
            fixed
        }
        _ => name.to_string(),
    }
}

/// Parse a primers file into validated [`Primer`]s.
///
/// Names are passed through [`correct_primer_name`] and checked for the
/// orientation suffix; sequences are validated by [`Primer::new`].
pub fn parse_primers(text: &str) -> Result<Vec<Primer>, PrimerError> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t').map(str::trim);
        let (name, seq) = match (fields.next(), fields.next()) {
            (Some(n), Some(s)) if !n.is_empty() && !s.is_empty() => (n, s),
            _ => {
                return Err(PrimerError::InvalidPrimersFile {
                    line: idx + 1,
                    reason: "expected tab-separated primer name and sequence".into(),
                })
            }
        };
        out.push(Primer::new(correct_primer_name(name), seq)?);
    }
    if out.is_empty() {
        return Err(PrimerError::InvalidPrimersFile {
            line: 0,
            reason: "no primers were read, please check file format".into(),
        });
    }
    Ok(out)
}

/// Resolve which primers to test.
///
/// - name and sequence: a single primer built from them (`parsed` is ignored);
/// - name only: that primer looked up in `parsed`;
/// - neither: every parsed primer.
pub fn select_primers(
    parsed: Option<Vec<Primer>>,
    name: Option<&str>,
    sequence: Option<&str>,
) -> Result<Vec<Primer>, PrimerError> {
    let name = name.map(correct_primer_name);
    match (name, sequence, parsed) {
        (Some(n), Some(s), _) => Ok(vec![Primer::new(n, s)?]),
        (Some(n), None, Some(all)) => all
            .into_iter()
            .find(|p| p.name() == n)
            .map(|p| vec![p])
            .ok_or(PrimerError::PrimerNotFound { name: n }),
        (None, _, Some(all)) => Ok(all),
        (Some(n), None, None) => Err(PrimerError::PrimerNotFound { name: n }),
        (None, _, None) => Err(PrimerError::InvalidPrimersFile {
            line: 0,
            reason: "missing primer data, give a primers file or a primer name and sequence".into(),
        }),
    }
}
