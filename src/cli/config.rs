// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub output: Option<String>,
    pub save_alignments: Option<String>,
    pub summary: Option<String>,

    // Performance
    pub threads: Option<usize>,
    pub max_cells: Option<usize>,

    // Scoring
    pub scoring: Option<String>,
    pub match_score: Option<f64>,
    pub mismatch_score: Option<f64>,
    pub gap_open: Option<f64>,
    pub gap_extend: Option<f64>,

    // Specimen filtering
    pub include_specimens: Option<String>,
    pub exclude_specimens: Option<String>,

    // Flags
    pub dry_run: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# pairdiv.toml - Configuration file for pairdiv
# Command line arguments override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# FASTA file holding two sequences per specimen
input = "/path/to/pairs.fasta"

# Divergence table (omit to derive <input>_divergence_table.csv)
# output = "divergence.csv"

# Save aligned sequences per specimen (TSV format)
# save_alignments = "alignments.tsv"

# JSON run summary
# summary = "summary.json"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# Maximum DP cells per alignment, 0 = unlimited
max_cells = 0

# =============================================================================
# SCORING
# =============================================================================

# Preset: default (match 1, mismatch 0, open -10, extend -1), edit
scoring = "default"

# Custom scores (override the preset)
# match_score = 1.0
# mismatch_score = 0.0
# gap_open = -10.0
# gap_extend = -1.0

# =============================================================================
# SPECIMEN FILTERING
# =============================================================================

# Include only specimens matching regex pattern
# include_specimens = "^BOLD-.*"

# Exclude specimens matching regex pattern
# exclude_specimens = "^control"

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without aligning
dry_run = false

# Hide the progress bar
quiet = false

# Log every specimen result
verbose = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();
        assert_eq!(config.input.as_deref(), Some("/path/to/pairs.fasta"));
        assert_eq!(config.scoring.as_deref(), Some("default"));
        assert_eq!(config.max_cells, Some(0));
        assert_eq!(config.dry_run, Some(false));
        assert!(config.gap_open.is_none());
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairdiv.toml");
        let config = Config {
            input: Some("pairs.fasta".to_string()),
            gap_open: Some(-8.0),
            ..Config::new()
        };
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.input.as_deref(), Some("pairs.fasta"));
        assert_eq!(loaded.gap_open, Some(-8.0));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("threads = \"many\"").is_err());
    }
}
