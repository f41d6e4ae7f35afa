use clap::Args;
use primerhits::ScoringConfig;

/// Zone weights, 3' length and alignment scores.
#[derive(Debug, Args)]
pub struct ScoringArgs {
    /// Length of the 3' zone, final base included.
    #[arg(short = 't', long, default_value_t = 5)]
    pub tp_len: usize,
    /// Penalty for a mismatch at the final 3' base.
    #[arg(short = 'l', long, default_value_t = 3.0)]
    pub last_base_mm: f64,
    /// Penalty per 3' mismatch (final base excluded).
    #[arg(short = 'T', long, default_value_t = 1.0)]
    pub tp_mm: f64,
    /// Penalty per non-3' mismatch.
    #[arg(short = 'M', long, default_value_t = 0.4)]
    pub non_tp_mm: f64,
    /// Penalty per 3' gap.
    #[arg(short = 'g', long, default_value_t = 3.0)]
    pub tp_gap: f64,
    /// Penalty per non-3' gap.
    #[arg(short = 'G', long, default_value_t = 1.0)]
    pub non_tp_gap: f64,
    /// Alignment gap open penalty.
    #[arg(long, default_value_t = 5.0)]
    pub gap_open: f64,
    /// Alignment gap extension penalty.
    #[arg(long, default_value_t = 2.0)]
    pub gap_extend: f64,
    /// Alignment score for compatible bases.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub match_score: f64,
    /// Alignment score for a transition (A/G, C/T).
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub transition: f64,
    /// Alignment score for any other mismatch.
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub transversion: f64,
}

impl ScoringArgs {
    pub fn to_config(&self) -> ScoringConfig {
        ScoringConfig {
            tp_len: self.tp_len,
            last_base_weight: self.last_base_mm,
            tp_mismatch_weight: self.tp_mm,
            non_tp_mismatch_weight: self.non_tp_mm,
            tp_gap_weight: self.tp_gap,
            non_tp_gap_weight: self.non_tp_gap,
            gap_open: self.gap_open,
            gap_extend: self.gap_extend,
            match_score: self.match_score,
            transition: self.transition,
            transversion: self.transversion,
            ..Default::default()
        }
    }
}
