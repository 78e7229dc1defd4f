// divergence.rs - Percent mismatch over comparable columns

use serde::{Deserialize, Serialize};
use crate::core::aligner::Alignment;
use crate::core::alphabet::is_valid_base;
use crate::error::{DivergenceError, Result};

/// Mismatch counts over the columns where both symbols are valid bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceStats {
    pub mismatches: usize,
    pub comparable_length: usize,
}

impl DivergenceStats {
    /// Scan an alignment column by column
    pub fn from_alignment(alignment: &Alignment) -> Result<Self> {
        if alignment.aligned1.len() != alignment.aligned2.len() {
            return Err(DivergenceError::AlignmentLengthMismatch {
                left: alignment.aligned1.len(),
                right: alignment.aligned2.len(),
            });
        }

        let mut mismatches = 0;
        let mut comparable_length = 0;
        for (a, b) in alignment.columns() {
            if is_valid_base(a) && is_valid_base(b) {
                comparable_length += 1;
                if a != b {
                    mismatches += 1;
                }
            }
        }

        Ok(Self { mismatches, comparable_length })
    }

    /// Percent divergence in `[0, 100]`
    pub fn percentage(&self) -> Result<f64> {
        if self.comparable_length == 0 {
            return Err(DivergenceError::NoComparableData);
        }
        Ok(100.0 * (self.mismatches as f64 / self.comparable_length as f64))
    }
}

/// Percent mismatch between the two rows of `alignment`, counting only
/// columns where both symbols are A/G/C/T.
pub fn divergence(alignment: &Alignment) -> Result<f64> {
    DivergenceStats::from_alignment(alignment)?.percentage()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aligner::align;
    use crate::core::alphabet::count_valid_bases;
    use crate::core::scoring::ScoringScheme;

    fn pre_aligned(a: &str, b: &str) -> Alignment {
        Alignment::from_aligned(a, b).unwrap()
    }

    #[test]
    fn test_single_mismatch() {
        let aln = align(b"AGCT", b"AGGT", &ScoringScheme::default()).unwrap();
        let stats = DivergenceStats::from_alignment(&aln).unwrap();
        assert_eq!(stats, DivergenceStats { mismatches: 1, comparable_length: 4 });
        assert_eq!(divergence(&aln).unwrap(), 25.0);
    }

    #[test]
    fn test_ambiguous_and_gap_columns_are_skipped() {
        let aln = pre_aligned("AGCTN", "AGCT-");
        let stats = DivergenceStats::from_alignment(&aln).unwrap();
        assert_eq!(stats.comparable_length, 4);
        assert_eq!(stats.mismatches, 0);
        assert_eq!(divergence(&aln).unwrap(), 0.0);
    }

    #[test]
    fn test_lowercase_columns_are_skipped() {
        let aln = pre_aligned("AcGT", "AgGA");
        let stats = DivergenceStats::from_alignment(&aln).unwrap();
        assert_eq!(stats, DivergenceStats { mismatches: 1, comparable_length: 3 });
    }

    #[test]
    fn test_trailing_gaps_do_not_count() {
        let aln = align(b"AAAA", b"AA", &ScoringScheme::default()).unwrap();
        let stats = DivergenceStats::from_alignment(&aln).unwrap();
        assert_eq!(stats, DivergenceStats { mismatches: 0, comparable_length: 2 });
        assert_eq!(divergence(&aln).unwrap(), 0.0);
    }

    #[test]
    fn test_no_comparable_data() {
        let aln = pre_aligned("NN--", "--RY");
        assert!(matches!(divergence(&aln), Err(DivergenceError::NoComparableData)));
    }

    #[test]
    fn test_self_divergence_is_zero() {
        let scoring = ScoringScheme::default();
        for seq in [&b"ACGTACGTNNAC"[..], b"ttACGT", b"GATTACA"] {
            let aln = align(seq, seq, &scoring).unwrap();
            let stats = DivergenceStats::from_alignment(&aln).unwrap();
            assert_eq!(stats.mismatches, 0);
            assert_eq!(stats.comparable_length, count_valid_bases(seq));
        }
    }

    #[test]
    fn test_symmetry() {
        let scoring = ScoringScheme::default();
        let pairs: [(&[u8], &[u8]); 3] = [
            (b"ACGTACGTAC", b"ACGAACGTTC"),
            (b"GATTACA", b"GATACA"),
            (b"AGCT", b"AGGT"),
        ];
        for (a, b) in pairs {
            let forward = divergence(&align(a, b, &scoring).unwrap()).unwrap();
            let reverse = divergence(&align(b, a, &scoring).unwrap()).unwrap();
            assert_eq!(forward, reverse);
        }
        assert_eq!(divergence(&align(pairs[0].0, pairs[0].1, &scoring).unwrap()).unwrap(), 20.0);
    }

    #[test]
    fn test_percentage_bounds() {
        let all_different = pre_aligned("AAAA", "CCCC");
        assert_eq!(divergence(&all_different).unwrap(), 100.0);
        let third = DivergenceStats { mismatches: 1, comparable_length: 3 };
        let pct = third.percentage().unwrap();
        assert!(pct > 0.0 && pct < 100.0);
        assert_eq!(pct, 33.33333333333333);
    }
}
