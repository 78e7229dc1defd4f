// mod.rs - Data structures module

pub mod groups;
pub mod records;

// Re-export main types for convenience
pub use groups::{GroupOutcome, GroupPartition, SpecimenFilter, SpecimenGroup, SpecimenGroups, SpecimenPair};
pub use records::{read_fasta, read_records, specimen_key, SequenceRecord};
