// engine.rs - Per-specimen divergence pipeline

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use rayon::prelude::*;
use crate::core::aligner::{Alignment, PairwiseAligner};
use crate::core::divergence::DivergenceStats;
use crate::data::groups::{SpecimenGroups, SpecimenPair};
use crate::error::{DivergenceError, Result};

/// Successful comparison of one specimen's two sequences
#[derive(Debug, Clone)]
pub struct SpecimenDivergence {
    pub specimen: String,
    pub alignment: Alignment,
    pub stats: DivergenceStats,
    pub percentage: f64,
}

/// Result of one specimen pair, success or the error that excluded it
#[derive(Debug)]
pub struct SpecimenResult {
    pub specimen: String,
    pub outcome: Result<SpecimenDivergence>,
}

/// Everything a run produced, in input order
#[derive(Debug, Default)]
pub struct DivergenceReport {
    pub results: Vec<SpecimenResult>,
    /// Specimens with a single sequence (skipped silently)
    pub singletons: Vec<String>,
    /// Group-size errors for specimens with three or more sequences
    pub group_errors: Vec<DivergenceError>,
    pub total_records: usize,
    pub total_specimens: usize,
}

impl DivergenceReport {
    pub fn successes(&self) -> impl Iterator<Item = &SpecimenDivergence> {
        self.results.iter().filter_map(|r| r.outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &DivergenceError)> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.specimen.as_str(), e)))
    }

    /// Specimen -> percentage for every successful comparison
    pub fn divergences(&self) -> Vec<(&str, f64)> {
        self.successes().map(|s| (s.specimen.as_str(), s.percentage)).collect()
    }

    pub fn get(&self, specimen: &str) -> Option<f64> {
        self.successes().find(|s| s.specimen == specimen).map(|s| s.percentage)
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Runs align + divergence for every specimen pair
#[derive(Debug, Clone)]
pub struct DivergenceEngine {
    aligner: PairwiseAligner,
    show_progress: bool,
}

impl DivergenceEngine {
    pub fn new(aligner: PairwiseAligner) -> Self {
        Self {
            aligner,
            show_progress: false,
        }
    }

    /// Draw a progress bar while pairs are aligned
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn aligner(&self) -> &PairwiseAligner {
        &self.aligner
    }

    /// Align one pair and compute its divergence
    pub fn compare_pair(&self, pair: &SpecimenPair) -> Result<SpecimenDivergence> {
        let alignment = self.aligner.align(&pair.first.sequence, &pair.second.sequence)?;
        let stats = DivergenceStats::from_alignment(&alignment)?;
        let percentage = stats.percentage()?;
        Ok(SpecimenDivergence {
            specimen: pair.key.clone(),
            alignment,
            stats,
            percentage,
        })
    }

    /// Compare every pair in parallel; a failing specimen never stops the others
    pub fn compare_pairs(&self, pairs: &[SpecimenPair]) -> Vec<SpecimenResult> {
        let total = pairs.len();
        let pb = if self.show_progress {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            pb.set_style(style);
            pb
        } else {
            ProgressBar::hidden()
        };

        let update_interval = std::cmp::max(1, total / 100);
        let completed = AtomicUsize::new(0);
        let start = Instant::now();

        let results: Vec<SpecimenResult> = pairs
            .par_iter()
            .map(|pair| {
                let outcome = self.compare_pair(pair);
                match &outcome {
                    Ok(d) => debug!(
                        "{}: {} mismatches over {} comparable positions ({}%)",
                        d.specimen, d.stats.mismatches, d.stats.comparable_length, d.percentage
                    ),
                    Err(e) => error!("{} - alignment error: {}", pair.key, e),
                }

                let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if count % update_interval == 0 {
                    pb.set_position(count as u64);
                }

                SpecimenResult {
                    specimen: pair.key.clone(),
                    outcome,
                }
            })
            .collect();

        pb.finish_and_clear();
        debug!("Compared {} pairs in {:.2}s", total, start.elapsed().as_secs_f64());

        results
    }

    /// Full run over finalized groups: size check, then alignment and divergence
    pub fn run(&self, groups: SpecimenGroups) -> DivergenceReport {
        let total_records = groups.total_records();
        let total_specimens = groups.len();
        let partition = groups.partition();

        for err in &partition.oversized {
            error!("{}", err);
        }

        let results = self.compare_pairs(&partition.pairs);

        DivergenceReport {
            results,
            singletons: partition.singletons,
            group_errors: partition.oversized,
            total_records,
            total_specimens,
        }
    }
}

impl Default for DivergenceEngine {
    fn default() -> Self {
        Self::new(PairwiseAligner::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::SequenceRecord;

    fn groups(records: &[(&str, &str)]) -> SpecimenGroups {
        SpecimenGroups::from_records(
            records.iter().map(|(id, seq)| SequenceRecord::new(*id, seq.as_bytes())),
        )
    }

    #[test]
    fn test_run_mixed_groups() {
        let input = groups(&[
            ("S1|COI", "AGCT"),
            ("S1|COI", "AGGT"),
            ("S2.a", "AAAA"),
            ("S2.b", "AA"),
            ("S3|x", "ACGT"),
            ("S3|y", "ACGT"),
            ("S3|z", "ACGT"),
            ("S4", "ACGT"),
        ]);
        let report = DivergenceEngine::default().run(input);

        assert_eq!(report.total_records, 8);
        assert_eq!(report.total_specimens, 4);
        assert_eq!(report.divergences(), vec![("S1", 25.0), ("S2", 0.0)]);
        assert_eq!(report.singletons, vec!["S4".to_string()]);
        assert_eq!(report.group_errors.len(), 1);
        assert!(report.get("S3").is_none());
        assert!(report.get("S4").is_none());
    }

    #[test]
    fn test_failures_are_local() {
        let input = groups(&[
            ("bad", "NNNN"),
            ("bad", "NNNN"),
            ("empty", ""),
            ("empty", "ACGT"),
            ("good", "ACGT"),
            ("good", "ACGA"),
        ]);
        let report = DivergenceEngine::default().run(input);

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.get("good"), Some(25.0));
        let failures: Vec<_> = report.failures().map(|(s, e)| (s, e.kind())).collect();
        assert_eq!(failures, vec![("bad", "no-comparable-data"), ("empty", "invalid-input")]);
    }

    #[test]
    fn test_size_cap_surfaces_as_error() {
        let engine = DivergenceEngine::new(PairwiseAligner::default().with_max_cells(Some(10)));
        let report = engine.run(groups(&[("S1", "ACGTACGT"), ("S1", "ACGTACGT")]));
        let failures: Vec<_> = report.failures().map(|(_, e)| e.kind()).collect();
        assert_eq!(failures, vec!["alignment-too-large"]);
    }

    #[test]
    fn test_results_follow_input_order() {
        let mut records = Vec::new();
        for i in 0..50 {
            records.push((format!("S{:02}|a", i), "ACGTACGT".to_string()));
            records.push((format!("S{:02}|b", i), "ACGTACGA".to_string()));
        }
        let input = SpecimenGroups::from_records(
            records.iter().map(|(id, seq)| SequenceRecord::new(id.as_str(), seq.as_bytes())),
        );
        let report = DivergenceEngine::default().run(input);
        let keys: Vec<_> = report.results.iter().map(|r| r.specimen.clone()).collect();
        let expected: Vec<_> = (0..50).map(|i| format!("S{:02}", i)).collect();
        assert_eq!(keys, expected);
        assert!(report.successes().all(|s| s.percentage == 12.5));
    }
}
