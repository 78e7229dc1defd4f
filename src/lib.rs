// lib.rs - pairdiv library root

//! # pairdiv - Per-specimen nucleotide divergence from paired sequences
//!
//! Reads a FASTA file holding two sequences per specimen, aligns each pair
//! with an affine-gap global aligner and reports the percentage of mismatched
//! positions among the columns where both sequences carry a valid base.
//!
//! ## Features
//!
//! - **Explicit Gotoh DP**: three-state affine-gap global alignment with a fixed tie-break
//! - **Missing data aware**: only A/G/C/T columns count toward divergence
//! - **Parallel**: one alignment per specimen, dispatched on a rayon pool
//! - **Local failures**: a bad specimen is reported and skipped, the run continues
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use pairdiv::prelude::*;
//!
//! let records = read_fasta(std::path::Path::new("pairs.fasta"))?;
//! let groups = SpecimenGroups::from_records(records);
//!
//! let engine = DivergenceEngine::new(PairwiseAligner::new(ScoringScheme::default()));
//! let report = engine.run(groups);
//!
//! for (specimen, percentage) in report.divergences() {
//!     println!("{},{:?}", specimen, percentage);
//! }
//! # Ok::<(), pairdiv::DivergenceError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{align, divergence, Alignment, DivergenceStats, PairwiseAligner, ScoringScheme};
    pub use crate::core::{DivergenceEngine, DivergenceReport, SpecimenDivergence, SpecimenResult};
    pub use crate::data::{read_fasta, specimen_key, SequenceRecord, SpecimenFilter, SpecimenGroups};
    pub use crate::error::DivergenceError;
    pub use crate::output::{default_output_path, write_alignments, write_table, RunSummary};
}

// Re-export main types at the root level for convenience
pub use crate::core::{Alignment, DivergenceEngine, PairwiseAligner, ScoringScheme};
pub use crate::error::DivergenceError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "pairdiv v{} - Per-specimen divergence via affine-gap global alignment",
        VERSION
    )
}
