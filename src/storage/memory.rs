use super::types::{AwardRecord, RecipientRef, Recipient, RecordId};
use std::collections::HashMap;

/// Immutable in-memory collection of award records.
///
/// Built once from an ingest pass and never mutated afterwards, so it can be
/// shared behind an `Arc` and read from any number of tasks without locking.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<AwardRecord>,
    by_key: HashMap<(String, i32), RecordId>,
}

impl RecordStore {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AwardRecord>,
    {
        let mut store = Self::default();
        for record in records {
            store.insert(record);
        }
        store
    }

    fn insert(&mut self, record: AwardRecord) {
        match self.find(&record.category, record.year) {
            Some(id) => {
                tracing::debug!(
                    "Replacing record {} for {} {} (last write wins)",
                    id,
                    record.category,
                    record.year
                );
                self.records[id.0 as usize] = record;
            }
            None => {
                let id = RecordId(self.records.len() as u32);
                self.by_key.insert(record.key(), id);
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&AwardRecord> {
        self.records.get(id.0 as usize)
    }

    pub fn recipient(&self, at: RecipientRef) -> Option<&Recipient> {
        self.get(at.record)?.recipients.get(at.position as usize)
    }

    /// Looks a record up by its identity key. The category is matched case-insensitively.
    pub fn find(&self, category: &str, year: i32) -> Option<RecordId> {
        self.by_key
            .get(&(category.trim().to_lowercase(), year))
            .copied()
    }

    /// All records in arrival order, paired with their ids.
    pub fn all(&self) -> impl Iterator<Item = (RecordId, &AwardRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(slot, record)| (RecordId(slot as u32), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn recipient_count(&self) -> usize {
        self.records.iter().map(|r| r.recipients.len()).sum()
    }
}
