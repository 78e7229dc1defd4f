// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.save_alignments.is_none() {
            self.save_alignments = config.save_alignments;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }
        if self.max_cells == 0 {
            if let Some(max_cells) = config.max_cells {
                self.max_cells = max_cells;
            }
        }

        // Scoring (only override the default preset, not an explicit CLI value)
        if self.scoring == "default" {
            if let Some(scoring) = config.scoring {
                self.scoring = scoring;
            }
        }
        if self.match_score.is_none() {
            self.match_score = config.match_score;
        }
        if self.mismatch_score.is_none() {
            self.mismatch_score = config.mismatch_score;
        }
        if self.gap_open.is_none() {
            self.gap_open = config.gap_open;
        }
        if self.gap_extend.is_none() {
            self.gap_extend = config.gap_extend;
        }

        // Specimen filtering
        if self.include_specimens.is_none() {
            self.include_specimens = config.include_specimens;
        }
        if self.exclude_specimens.is_none() {
            self.exclude_specimens = config.exclude_specimens;
        }

        // Flags (config can only switch them on)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
