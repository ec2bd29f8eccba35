// Read-only opportunity collection with an id index for sibling lookups.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::record::{OpportunityRecord, RawOpportunity, RowKey};
use super::stage::StageValue;

/// Ordered, immutable set of opportunity rows.
///
/// Construction assigns each row a [`RowKey`] equal to its position and
/// indexes rows by trimmed opportunity id, so sibling lookups are O(k) in
/// the number of rows sharing an id.
#[derive(Debug, Clone, Default)]
pub struct OpportunityDataset {
    records: Vec<OpportunityRecord>,
    by_id: HashMap<String, Vec<usize>>,
    unrecognized_stages: BTreeMap<String, usize>,
}

impl OpportunityDataset {
    pub fn new(records: Vec<OpportunityRecord>) -> Self {
        let mut records = records;
        let mut by_id: HashMap<String, Vec<usize>> = HashMap::new();
        let mut unrecognized_stages: BTreeMap<String, usize> = BTreeMap::new();

        for (position, record) in records.iter_mut().enumerate() {
            record.key = RowKey::new(position);
            if let Some(id) = record.sibling_id() {
                by_id.entry(id.to_string()).or_default().push(position);
            }
            for stage in [&record.aws_stage, &record.partner_stage].into_iter().flatten() {
                if let StageValue::Unrecognized(raw) = stage {
                    *unrecognized_stages.entry(raw.clone()).or_default() += 1;
                }
            }
        }

        for (value, occurrences) in &unrecognized_stages {
            debug!(event = "unrecognized_stage", value = %value, occurrences);
        }

        Self {
            records,
            by_id,
            unrecognized_stages,
        }
    }

    /// Builds a dataset from string-typed rows.
    pub fn from_raw<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawOpportunity>,
    {
        Self::new(rows.into_iter().map(OpportunityRecord::from).collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OpportunityRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OpportunityRecord> {
        self.records.iter()
    }

    pub fn get(&self, key: RowKey) -> Option<&OpportunityRecord> {
        self.records.get(key.index()).filter(|record| record.key == key)
    }

    /// All rows carrying the given opportunity id.
    pub fn rows_with_id<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a OpportunityRecord> + 'a {
        self.by_id
            .get(id.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&position| self.records.get(position))
    }

    /// Other rows sharing `record`'s id. Blank ids have no siblings.
    pub fn siblings<'a>(
        &'a self,
        record: &'a OpportunityRecord,
    ) -> impl Iterator<Item = &'a OpportunityRecord> + 'a {
        record
            .sibling_id()
            .and_then(|id| self.by_id.get(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&position| self.records.get(position))
            .filter(move |other| other.key != record.key)
    }

    /// Stage strings outside the recognized domain, with occurrence counts.
    pub fn unrecognized_stages(&self) -> &BTreeMap<String, usize> {
        &self.unrecognized_stages
    }
}

impl FromIterator<OpportunityRecord> for OpportunityDataset {
    fn from_iter<I: IntoIterator<Item = OpportunityRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OpportunityDataset {
    type Item = &'a OpportunityRecord;
    type IntoIter = std::slice::Iter<'a, OpportunityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
