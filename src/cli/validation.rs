// validation.rs - Input validation utilities

use regex::Regex;
use crate::cli::args::Args;
use crate::core::ScoringScheme;
use crate::data::SpecimenFilter;

pub struct ValidationResult {
    pub scoring: ScoringScheme,
    pub max_cells: Option<usize>,
    pub filter: SpecimenFilter,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if let Some(0) = args.threads {
        return Err("--threads must be at least 1".to_string());
    }

    // Any custom score switches to custom mode, missing ones fall back to the preset
    let preset = ScoringScheme::from_mode(&args.scoring)?;
    let scoring = if args.match_score.is_some()
        || args.mismatch_score.is_some()
        || args.gap_open.is_some()
        || args.gap_extend.is_some()
    {
        ScoringScheme::custom(
            args.match_score.unwrap_or(preset.match_score),
            args.mismatch_score.unwrap_or(preset.mismatch_score),
            args.gap_open.unwrap_or(preset.gap_open),
            args.gap_extend.unwrap_or(preset.gap_extend),
        )
    } else {
        preset
    };
    scoring.validate().map_err(|e| e.to_string())?;

    let max_cells = if args.max_cells == 0 { None } else { Some(args.max_cells) };

    let include = if let Some(pattern) = &args.include_specimens {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_specimens regex: {}", e))?)
    } else {
        None
    };

    let exclude = if let Some(pattern) = &args.exclude_specimens {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_specimens regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        scoring,
        max_cells,
        filter: SpecimenFilter { include, exclude },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["pairdiv"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let result = validate_args(&parse(&["--input", "x.fasta"])).unwrap();
        assert_eq!(result.scoring, ScoringScheme::default());
        assert!(result.max_cells.is_none());
        assert!(result.filter.is_empty());
    }

    #[test]
    fn test_custom_scores_fall_back_to_preset() {
        let result = validate_args(&parse(&["--match-score", "2", "--max-cells", "5000"])).unwrap();
        assert_eq!(result.scoring.match_score, 2.0);
        assert_eq!(result.scoring.gap_open, -10.0);
        assert_eq!(result.max_cells, Some(5000));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(validate_args(&parse(&["--scoring", "protein"])).is_err());
        assert!(validate_args(&parse(&["--gap-extend", "3"])).is_err());
        assert!(validate_args(&parse(&["--include-specimens", "(["])).is_err());
        assert!(validate_args(&parse(&["--threads", "0"])).is_err());
    }

    #[test]
    fn test_filter_compiled() {
        let result = validate_args(&parse(&["--exclude-specimens", "^ctrl"])).unwrap();
        assert!(!result.filter.accepts("ctrl-01"));
        assert!(result.filter.accepts("S1"));
    }
}
