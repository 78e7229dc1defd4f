// groups.rs - Specimen grouping

use std::collections::HashMap;
use regex::Regex;
use crate::data::records::SequenceRecord;
use crate::error::DivergenceError;

/// All sequences sharing one specimen key, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenGroup {
    pub key: String,
    pub records: Vec<SequenceRecord>,
}

/// Exactly two sequences for one specimen, ready for alignment
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenPair {
    pub key: String,
    pub first: SequenceRecord,
    pub second: SequenceRecord,
}

/// What a group turns into once its size is checked
#[derive(Debug)]
pub enum GroupOutcome {
    Pair(SpecimenPair),
    /// A single sequence, skipped without an error
    Singleton(String),
    /// Three or more sequences, reported and skipped
    Oversized(DivergenceError),
}

impl SpecimenGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply the exactly-two rule
    pub fn into_outcome(self) -> GroupOutcome {
        let count = self.records.len();
        if count > 2 {
            return GroupOutcome::Oversized(DivergenceError::GroupSize {
                specimen: self.key,
                count,
            });
        }
        let mut records = self.records.into_iter();
        match (records.next(), records.next()) {
            (Some(first), Some(second)) => GroupOutcome::Pair(SpecimenPair {
                key: self.key,
                first,
                second,
            }),
            _ => GroupOutcome::Singleton(self.key),
        }
    }
}

/// Include/exclude patterns applied to specimen keys
#[derive(Debug, Clone, Default)]
pub struct SpecimenFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl SpecimenFilter {
    pub fn accepts(&self, key: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(key) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(key) {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

/// Groups split by the exactly-two rule
#[derive(Debug, Default)]
pub struct GroupPartition {
    pub pairs: Vec<SpecimenPair>,
    pub singletons: Vec<String>,
    pub oversized: Vec<DivergenceError>,
}

/// Finalized specimen -> sequences mapping, ordered by first appearance.
///
/// Built in one pass over the records and not modified afterwards; the
/// aligner only ever sees the pairs handed out by [`partition`].
///
/// [`partition`]: SpecimenGroups::partition
#[derive(Debug, Clone, Default)]
pub struct SpecimenGroups {
    groups: Vec<SpecimenGroup>,
    total_records: usize,
}

impl SpecimenGroups {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = SequenceRecord>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<SpecimenGroup> = Vec::new();
        let mut total_records = 0;

        for record in records {
            total_records += 1;
            let key = record.specimen_key().to_string();
            match index.get(&key) {
                Some(&slot) => groups[slot].records.push(record),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(SpecimenGroup { key, records: vec![record] });
                }
            }
        }

        Self { groups, total_records }
    }

    /// Drop specimens rejected by `filter`
    pub fn filtered(self, filter: &SpecimenFilter) -> Self {
        if filter.is_empty() {
            return self;
        }
        let groups: Vec<_> = self.groups.into_iter().filter(|g| filter.accepts(&g.key)).collect();
        let total_records = groups.iter().map(SpecimenGroup::len).sum();
        Self { groups, total_records }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn get(&self, key: &str) -> Option<&SpecimenGroup> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecimenGroup> {
        self.groups.iter()
    }

    /// Consume the groups, sorting them into pairs, singletons and
    /// oversized groups while keeping input order within each list
    pub fn partition(self) -> GroupPartition {
        let mut partition = GroupPartition::default();
        for group in self.groups {
            match group.into_outcome() {
                GroupOutcome::Pair(pair) => partition.pairs.push(pair),
                GroupOutcome::Singleton(key) => partition.singletons.push(key),
                GroupOutcome::Oversized(err) => partition.oversized.push(err),
            }
        }
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, seq: &str) -> SequenceRecord {
        SequenceRecord::new(id, seq.as_bytes())
    }

    fn sample_groups() -> SpecimenGroups {
        SpecimenGroups::from_records(vec![
            rec("B.1|COI", "ACGT"),
            rec("A|COI", "ACGT"),
            rec("B.2|COI", "ACGA"),
            rec("C|x", "AAAA"),
            rec("C|y", "AAAT"),
            rec("C|z", "AAAG"),
            rec("A.rev", "ACGG"),
            rec("D", "GGGG"),
        ])
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let groups = sample_groups();
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "A", "C", "D"]);
        assert_eq!(groups.total_records(), 8);
        let a = groups.get("A").unwrap();
        assert_eq!(a.records[0].sequence, b"ACGT");
        assert_eq!(a.records[1].sequence, b"ACGG");
    }

    #[test]
    fn test_partition_by_group_size() {
        let partition = sample_groups().partition();
        let pairs: Vec<_> = partition.pairs.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(pairs, vec!["B", "A"]);
        assert_eq!(partition.singletons, vec!["D".to_string()]);
        assert_eq!(partition.oversized.len(), 1);
        match &partition.oversized[0] {
            DivergenceError::GroupSize { specimen, count } => {
                assert_eq!(specimen, "C");
                assert_eq!(*count, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_pair_keeps_input_order() {
        let partition = sample_groups().partition();
        let b = &partition.pairs[0];
        assert_eq!(b.first.id, "B.1|COI");
        assert_eq!(b.second.id, "B.2|COI");
    }

    #[test]
    fn test_filter() {
        let filter = SpecimenFilter {
            include: Some(Regex::new("^[ABC]$").unwrap()),
            exclude: Some(Regex::new("^B$").unwrap()),
        };
        let groups = sample_groups().filtered(&filter);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "C"]);
        assert_eq!(groups.total_records(), 5);
        assert!(SpecimenFilter::default().accepts("anything"));
    }
}
