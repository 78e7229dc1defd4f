// records.rs - FASTA record source and specimen key derivation

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use bio::io::fasta;
use crate::error::{DivergenceError, Result};

/// A single input sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    /// Record identifier: header text up to the first whitespace
    pub id: String,
    /// Rest of the header line, if any
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            description: None,
            sequence: sequence.into(),
        }
    }

    /// Specimen this record belongs to
    pub fn specimen_key(&self) -> &str {
        specimen_key(&self.id)
    }

    /// Full header line without the leading `>`
    pub fn header(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.id, desc),
            None => self.id.clone(),
        }
    }
}

/// Derive the specimen key from a record identifier.
///
/// Everything from the first `|` on is dropped, then everything from the
/// first `.` of what remains: `S12.b|COI|run3` becomes `S12`.
pub fn specimen_key(id: &str) -> &str {
    let before_pipe = id.split('|').next().unwrap_or(id);
    before_pipe.split('.').next().unwrap_or(before_pipe)
}

/// Read all records of a FASTA file in file order
pub fn read_fasta(path: &Path) -> Result<Vec<SequenceRecord>> {
    let file = File::open(path)
        .map_err(|e| DivergenceError::Fasta(format!("Failed to open FASTA file {}: {}", path.display(), e)))?;
    read_records(BufReader::new(file))
        .map_err(|e| match e {
            DivergenceError::Fasta(msg) => DivergenceError::Fasta(format!("{}: {}", path.display(), msg)),
            other => other,
        })
}

/// Read all records from any FASTA stream
pub fn read_records<R: Read>(reader: R) -> Result<Vec<SequenceRecord>> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();

    for (index, record_result) in reader.records().enumerate() {
        let record = record_result
            .map_err(|e| DivergenceError::Fasta(format!("Invalid FASTA record #{}: {}", index + 1, e)))?;

        records.push(SequenceRecord {
            id: record.id().to_string(),
            description: record.desc().map(str::to_string),
            sequence: record.seq().to_vec(),
        });
    }

    Ok(records)
}
