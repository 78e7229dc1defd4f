// error.rs - Error types for alignment, divergence and run plumbing

use thiserror::Error;

/// Errors raised while computing specimen divergences.
///
/// Per-specimen variants are reported and the specimen is dropped from the
/// table; the remaining variants abort the whole run (see [`is_fatal`]).
///
/// [`is_fatal`]: DivergenceError::is_fatal
#[derive(Debug, Error)]
pub enum DivergenceError {
    /// Empty sequence handed to the aligner
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Aligned rows came back with different lengths (traceback bug)
    #[error("alignment length mismatch: {left} vs {right}")]
    AlignmentLengthMismatch { left: usize, right: usize },

    /// No position where both aligned symbols are valid bases
    #[error("no comparable positions (every column holds a gap or ambiguous base)")]
    NoComparableData,

    /// More than two sequences share one specimen key
    #[error("{specimen} - {count} sequences found, exactly two are compared per specimen")]
    GroupSize { specimen: String, count: usize },

    /// DP matrices would exceed the configured cell limit
    #[error("alignment needs {cells} DP cells, limit is {limit}")]
    AlignmentTooLarge { cells: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or malformed FASTA stream
    #[error("FASTA error: {0}")]
    Fasta(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("output error: {0}")]
    Output(String),
}

impl DivergenceError {
    /// Whether this error aborts the run rather than a single specimen.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DivergenceError::Io(_)
                | DivergenceError::Fasta(_)
                | DivergenceError::Config(_)
                | DivergenceError::Output(_)
        )
    }

    /// Short machine-friendly label, used in summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DivergenceError::InvalidInput(_) => "invalid-input",
            DivergenceError::AlignmentLengthMismatch { .. } => "alignment-length-mismatch",
            DivergenceError::NoComparableData => "no-comparable-data",
            DivergenceError::GroupSize { .. } => "group-size",
            DivergenceError::AlignmentTooLarge { .. } => "alignment-too-large",
            DivergenceError::Io(_) => "io",
            DivergenceError::Fasta(_) => "fasta",
            DivergenceError::Config(_) => "config",
            DivergenceError::Output(_) => "output",
        }
    }
}

pub type Result<T> = std::result::Result<T, DivergenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(!DivergenceError::NoComparableData.is_fatal());
        assert!(!DivergenceError::GroupSize { specimen: "S1".into(), count: 3 }.is_fatal());
        assert!(DivergenceError::Fasta("bad record".into()).is_fatal());
        assert!(DivergenceError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "x")).is_fatal());
    }

    #[test]
    fn test_group_size_message() {
        let err = DivergenceError::GroupSize { specimen: "S7".into(), count: 3 };
        assert!(err.to_string().starts_with("S7 - 3 sequences"));
        assert_eq!(err.kind(), "group-size");
    }
}
