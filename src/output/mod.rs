// mod.rs - Report writers

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::core::engine::DivergenceReport;
use crate::core::scoring::ScoringScheme;
use crate::error::{DivergenceError, Result};

/// Suffix appended to the input stem for the default table name
pub const TABLE_SUFFIX: &str = "_divergence_table.csv";

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                DivergenceError::Output(format!("Failed to create parent directory '{}': {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

/// Default table path: input file name up to its first `.`, plus
/// [`TABLE_SUFFIX`], next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or("");
    let stem = if stem.is_empty() { "pairdiv" } else { stem };
    input.with_file_name(format!("{}{}", stem, TABLE_SUFFIX))
}

/// Shortest round-trip decimal, always with a fractional part (`25.0`)
pub fn format_percentage(value: f64) -> String {
    format!("{:?}", value)
}

/// Write `specimen,percentage` lines, no header row
pub fn write_table(file_path: &Path, report: &DivergenceReport) -> Result<usize> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(file_path)
        .map_err(|e| DivergenceError::Output(format!("Failed to create output file '{}': {}", file_path.display(), e)))?;

    let mut written = 0;
    for (specimen, percentage) in report.divergences() {
        writer
            .write_record([specimen, format_percentage(percentage).as_str()])
            .map_err(|e| DivergenceError::Output(format!("Write error: {}", e)))?;
        written += 1;
    }

    writer.flush().map_err(|e| DivergenceError::Output(format!("Flush error: {}", e)))?;
    Ok(written)
}

/// Write aligned rows and counts for every successful specimen (TSV)
pub fn write_alignments(file_path: &Path, report: &DivergenceReport) -> Result<usize> {
    ensure_parent_dir(file_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(file_path)
        .map_err(|e| DivergenceError::Output(format!("Failed to create alignments file '{}': {}", file_path.display(), e)))?;

    writer
        .write_record([
            "specimen",
            "aligned_seq1",
            "aligned_seq2",
            "score",
            "mismatches",
            "comparable_length",
            "divergence",
        ])
        .map_err(|e| DivergenceError::Output(format!("Write error: {}", e)))?;

    let mut written = 0;
    for result in report.successes() {
        let (row1, row2) = result.alignment.rows();
        let score = result.alignment.score.map(|s| s.to_string()).unwrap_or_else(|| "NA".to_string());
        writer
            .write_record([
                result.specimen.clone(),
                row1,
                row2,
                score,
                result.stats.mismatches.to_string(),
                result.stats.comparable_length.to_string(),
                format_percentage(result.percentage),
            ])
            .map_err(|e| DivergenceError::Output(format!("Write error: {}", e)))?;
        written += 1;
    }

    writer.flush().map_err(|e| DivergenceError::Output(format!("Flush error: {}", e)))?;
    Ok(written)
}

/// One excluded specimen in the run summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryFailure {
    pub specimen: String,
    pub kind: String,
    pub message: String,
}

/// Machine-readable account of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub generated: String,
    pub command_line: String,
    pub input: String,
    pub output: String,
    pub scoring: ScoringScheme,
    pub max_cells: Option<usize>,
    pub threads: usize,
    pub total_records: usize,
    pub total_specimens: usize,
    pub pairs_compared: usize,
    pub divergences_written: usize,
    pub singletons: usize,
    pub oversized_groups: usize,
    pub failures: Vec<SummaryFailure>,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    pub fn from_report(
        report: &DivergenceReport,
        scoring: &ScoringScheme,
        max_cells: Option<usize>,
        input: &Path,
        output: &Path,
        command_line: &str,
        elapsed_seconds: f64,
    ) -> Self {
        let mut failures: Vec<SummaryFailure> = report
            .group_errors
            .iter()
            .map(|e| SummaryFailure {
                specimen: match e {
                    DivergenceError::GroupSize { specimen, .. } => specimen.clone(),
                    _ => String::new(),
                },
                kind: e.kind().to_string(),
                message: e.to_string(),
            })
            .collect();
        failures.extend(report.failures().map(|(specimen, e)| SummaryFailure {
            specimen: specimen.to_string(),
            kind: e.kind().to_string(),
            message: e.to_string(),
        }));

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            command_line: command_line.to_string(),
            input: input.display().to_string(),
            output: output.display().to_string(),
            scoring: scoring.clone(),
            max_cells,
            threads: rayon::current_num_threads(),
            total_records: report.total_records,
            total_specimens: report.total_specimens,
            pairs_compared: report.results.len(),
            divergences_written: report.success_count(),
            singletons: report.singletons.len(),
            oversized_groups: report.group_errors.len(),
            failures,
            elapsed_seconds,
        }
    }

    /// Write as pretty-printed JSON
    pub fn write(&self, file_path: &Path) -> Result<()> {
        ensure_parent_dir(file_path)?;
        let file = File::create(file_path)
            .map_err(|e| DivergenceError::Output(format!("Failed to create summary file '{}': {}", file_path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| DivergenceError::Output(format!("Failed to serialize summary: {}", e)))?;
        writeln!(writer).map_err(|e| DivergenceError::Output(format!("Write error: {}", e)))?;
        writer.flush().map_err(|e| DivergenceError::Output(format!("Flush error: {}", e)))?;
        Ok(())
    }
}
