//! Secondary index over a `RecordStore`.
//!
//! Built once per snapshot. Lookups hand back candidate ids; callers verify
//! matches against the folded recipient fields kept alongside the postings.

use super::tokenizer::{fold, tokenize_text};
use crate::storage::memory::RecordStore;
use crate::storage::types::{RecipientRef, RecordId};
use std::collections::{BTreeMap, HashMap};

/// Case-folded copy of a recipient's searchable fields.
#[derive(Debug, Clone, Default)]
pub struct FoldedRecipient {
    pub firstname: String,
    pub surname: String,
    pub rationale: String,
}

#[derive(Debug, Default)]
pub struct CatalogIndex {
    years: BTreeMap<i32, Vec<RecordId>>,
    categories: HashMap<String, Vec<RecordId>>,
    first_names: HashMap<String, Vec<RecipientRef>>,
    surnames: HashMap<String, Vec<RecipientRef>>,
    rationale_terms: BTreeMap<String, Vec<RecipientRef>>,
    folded: Vec<Vec<FoldedRecipient>>,
}

impl CatalogIndex {
    pub fn build(store: &RecordStore) -> Self {
        let mut index = Self::default();

        for (id, record) in store.all() {
            index.years.entry(record.year).or_default().push(id);
            index
                .categories
                .entry(fold(&record.category))
                .or_default()
                .push(id);

            let mut folded_recipients = Vec::with_capacity(record.recipients.len());
            for (position, recipient) in record.recipients.iter().enumerate() {
                let at = RecipientRef {
                    record: id,
                    position: position as u32,
                };
                let folded = FoldedRecipient {
                    firstname: fold(&recipient.firstname),
                    surname: fold(&recipient.surname),
                    rationale: recipient.rationale.to_lowercase(),
                };

                index
                    .first_names
                    .entry(folded.firstname.clone())
                    .or_default()
                    .push(at);
                index
                    .surnames
                    .entry(folded.surname.clone())
                    .or_default()
                    .push(at);
                for term in tokenize_text(&folded.rationale) {
                    index.rationale_terms.entry(term).or_default().push(at);
                }

                folded_recipients.push(folded);
            }
            index.folded.push(folded_recipients);
        }

        tracing::debug!(
            "Built index: {} years, {} categories, {} rationale terms",
            index.years.len(),
            index.categories.len(),
            index.rationale_terms.len()
        );

        index
    }

    /// Records whose year lies in `start..=end`, in id order.
    pub fn years_in(&self, start: i32, end: i32) -> Vec<RecordId> {
        if start > end {
            return Vec::new();
        }
        let mut ids: Vec<RecordId> = self
            .years
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Records of a category (folded key), in id order.
    pub fn category(&self, folded: &str) -> &[RecordId] {
        self.categories
            .get(folded)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Recipients whose first name or surname equals the given folded value.
    ///
    /// Probes whichever non-empty part has the shorter posting list. The result
    /// still has to be checked against both fields.
    pub fn name_candidates(&self, firstname: &str, surname: &str) -> &[RecipientRef] {
        let by_first = self.first_names.get(firstname).map(Vec::as_slice);
        let by_surname = self.surnames.get(surname).map(Vec::as_slice);

        match (firstname.is_empty(), surname.is_empty()) {
            (false, true) => by_first.unwrap_or(&[]),
            (true, false) => by_surname.unwrap_or(&[]),
            _ => match (by_first, by_surname) {
                (Some(a), Some(b)) if b.len() < a.len() => b,
                (Some(a), Some(_)) => a,
                _ => &[],
            },
        }
    }

    /// Recipients whose rationale has a term containing `probe`, in (record, position) order.
    ///
    /// A keyword that occurs as a substring of a rationale has each of its
    /// alphanumeric runs inside one of the rationale's terms, so any one run
    /// of the keyword is a safe probe.
    pub fn rationale_candidates(&self, probe: &str) -> Vec<RecipientRef> {
        let mut refs: Vec<RecipientRef> = self
            .rationale_terms
            .iter()
            .filter(|(term, _)| term.contains(probe))
            .flat_map(|(_, refs)| refs.iter().copied())
            .collect();
        refs.sort_unstable();
        refs.dedup();
        refs
    }

    /// Every recipient of every record.
    pub fn all_recipients(&self) -> impl Iterator<Item = RecipientRef> + '_ {
        self.folded.iter().enumerate().flat_map(|(slot, recipients)| {
            (0..recipients.len()).map(move |position| RecipientRef {
                record: RecordId(slot as u32),
                position: position as u32,
            })
        })
    }

    pub fn folded(&self, at: RecipientRef) -> Option<&FoldedRecipient> {
        self.folded
            .get(at.record.0 as usize)?
            .get(at.position as usize)
    }

    pub fn rationale_term_count(&self) -> usize {
        self.rationale_terms.len()
    }

    pub fn name_key_count(&self) -> usize {
        self.first_names.len() + self.surnames.len()
    }
}
