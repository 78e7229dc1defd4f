// mod.rs - Core logic module

pub mod aligner;
pub mod alphabet;
pub mod divergence;
pub mod engine;
pub mod scoring;

// Re-export main types for convenience
pub use aligner::{align, Alignment, PairwiseAligner};
pub use alphabet::{count_valid_bases, is_valid_base, GAP};
pub use divergence::{divergence, DivergenceStats};
pub use engine::{DivergenceEngine, DivergenceReport, SpecimenDivergence, SpecimenResult};
pub use scoring::ScoringScheme;
