use super::index::FoldedRecipient;
use super::snapshot::Snapshot;
use super::types::{AwardDetail, Category, FullName, Keyword, NO_MOTIVATION, YearRange};
use crate::error::{QueryError, Result};
use crate::storage::types::{AwardRecord, RecipientRef, RecordId};
use std::sync::Arc;

/// Stateless query operations over one immutable snapshot.
///
/// Inputs are already validated, so the only failures left are faults in the
/// snapshot itself. "No matches" is a zero count or an empty list, never an error.
pub struct QueryEngine {
    snapshot: Arc<Snapshot>,
}

impl QueryEngine {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    /// Sum of recipient-list lengths over the awards of `category` held in `range`.
    ///
    /// Every recipient of a matching award counts, regardless of its own fields.
    pub fn count_by_category_and_years(&self, category: Category, range: YearRange) -> Result<u64> {
        let index = self.snapshot.index();
        let by_year = index.years_in(range.start(), range.end());
        let by_category = index.category(category.as_str());
        let matching = intersect_sorted(&by_year, by_category);

        let mut total = 0u64;
        for id in matching.iter().copied() {
            total += self.record(id)?.recipients.len() as u64;
        }

        tracing::debug!(
            "category={} years={}..={} candidates(year={}, category={}) matched={} count={}",
            category,
            range.start(),
            range.end(),
            by_year.len(),
            by_category.len(),
            matching.len(),
            total
        );
        Ok(total)
    }

    /// Number of recipients whose rationale contains `keyword`, case-insensitively.
    pub fn count_by_motivation_keyword(&self, keyword: &Keyword) -> Result<u64> {
        let index = self.snapshot.index();
        let candidates: Vec<RecipientRef> = match keyword.tokens().first() {
            Some(probe) => index.rationale_candidates(probe),
            None => index.all_recipients().collect(),
        };

        let mut total = 0u64;
        for at in candidates.iter().copied() {
            if self.folded(at)?.rationale.contains(keyword.folded()) {
                total += 1;
            }
        }

        tracing::debug!(
            "keyword={:?} candidates={} count={}",
            keyword.folded(),
            candidates.len(),
            total
        );
        Ok(total)
    }

    /// Prizes held by recipients whose first name and surname both equal the query.
    pub fn details_by_name(&self, name: &FullName) -> Result<Vec<AwardDetail>> {
        let index = self.snapshot.index();
        let candidates = index.name_candidates(name.firstname(), name.surname());

        let mut details = Vec::new();
        for at in candidates.iter().copied() {
            let folded = self.folded(at)?;
            if folded.firstname != name.firstname() || folded.surname != name.surname() {
                continue;
            }

            let record = self.record(at.record)?;
            let recipient = record
                .recipients
                .get(at.position as usize)
                .ok_or(QueryError::DanglingRecord { id: at.record })?;
            let motivation = if recipient.rationale.trim().is_empty() {
                NO_MOTIVATION.to_string()
            } else {
                recipient.rationale.clone()
            };

            details.push(AwardDetail {
                year: record.year,
                category: record.category.clone(),
                motivation,
            });
        }

        tracing::debug!(
            "name={:?} {:?} candidates={} matched={}",
            name.firstname(),
            name.surname(),
            candidates.len(),
            details.len()
        );
        Ok(details)
    }

    fn record(&self, id: RecordId) -> Result<&AwardRecord> {
        self.snapshot
            .store()
            .get(id)
            .ok_or(QueryError::DanglingRecord { id })
    }

    fn folded(&self, at: RecipientRef) -> Result<&FoldedRecipient> {
        self.snapshot
            .index()
            .folded(at)
            .ok_or(QueryError::DanglingRecord { id: at.record })
    }
}

/// Intersection of two ascending id lists.
fn intersect_sorted(a: &[RecordId], b: &[RecordId]) -> Vec<RecordId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
