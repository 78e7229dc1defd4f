// scoring.rs - Affine-gap scoring scheme

use serde::{Deserialize, Serialize};
use crate::error::{DivergenceError, Result};

/// Scores used for every alignment of a run.
///
/// Gap scores are added to the alignment score, so they are zero or negative.
/// A gap of length `k` scores `gap_open + (k - 1) * gap_extend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringScheme {
    pub match_score: f64,
    pub mismatch_score: f64,
    pub gap_open: f64,
    pub gap_extend: f64,
    pub description: Option<String>,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 1.0,
            mismatch_score: 0.0,
            gap_open: -10.0,
            gap_extend: -1.0,
            description: Some("Default DNA scoring (match 1, mismatch 0, open -10, extend -1)".to_string()),
        }
    }
}

impl ScoringScheme {
    /// Create scheme from preset name
    pub fn from_mode(mode: &str) -> std::result::Result<Self, String> {
        match mode {
            "default" => Ok(Self::default()),
            "edit" => Ok(Self {
                match_score: 0.0,
                mismatch_score: -1.0,
                gap_open: -1.0,
                gap_extend: -1.0,
                description: Some("Unit-cost edit distance (linear gaps)".to_string()),
            }),
            _ => Err(format!("Unknown scoring preset: {}. Use: default, edit", mode)),
        }
    }

    /// Create custom scheme
    pub fn custom(match_score: f64, mismatch_score: f64, gap_open: f64, gap_extend: f64) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_open,
            gap_extend,
            description: Some("Custom scoring parameters".to_string()),
        }
    }

    /// Score for aligning `a` against `b`. Equality is byte-exact.
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }

    /// Reject values that would break the DP recurrences
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("match score", self.match_score),
            ("mismatch score", self.mismatch_score),
            ("gap open", self.gap_open),
            ("gap extend", self.gap_extend),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(DivergenceError::Config(format!("{} must be finite, got {}", name, value)));
            }
        }
        if self.gap_open > 0.0 || self.gap_extend > 0.0 {
            return Err(DivergenceError::Config(format!(
                "gap scores must be zero or negative (open {}, extend {})",
                self.gap_open, self.gap_extend
            )));
        }
        Ok(())
    }
}
