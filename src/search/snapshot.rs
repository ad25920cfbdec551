//! Published, immutable view of the Record Store and its Index.
//!
//! Readers take an `Arc<Snapshot>` and keep using it for the whole query, even
//! if a newer snapshot is published meanwhile. Publication builds the index
//! first and then swaps one pointer, so no reader can see a half-built index.

use super::index::CatalogIndex;
use crate::error::QueryError;
use crate::storage::memory::RecordStore;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug)]
pub struct Snapshot {
    store: RecordStore,
    index: CatalogIndex,
    generation: u64,
}

impl Snapshot {
    pub fn build(store: RecordStore, generation: u64) -> Self {
        let index = CatalogIndex::build(&store);
        Self {
            store,
            index,
            generation,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> SnapshotStats {
        SnapshotStats {
            generation: self.generation,
            records: self.store.len(),
            recipients: self.store.recipient_count(),
            name_keys: self.index.name_key_count(),
            rationale_terms: self.index.rationale_term_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotStats {
    pub generation: u64,
    pub records: usize,
    pub recipients: usize,
    pub name_keys: usize,
    pub rationale_terms: usize,
}

/// Holder of the currently published snapshot.
#[derive(Debug)]
pub struct SnapshotHandle {
    current: RwLock<Arc<Snapshot>>,
    generations: AtomicU64,
}

impl SnapshotHandle {
    pub fn new(store: RecordStore) -> Self {
        let snapshot = Snapshot::build(store, 1);
        tracing::info!(
            "Published snapshot generation 1 ({} records)",
            snapshot.store().len()
        );
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            generations: AtomicU64::new(1),
        }
    }

    pub fn current(&self) -> Result<Arc<Snapshot>, QueryError> {
        self.current
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| QueryError::Unavailable {
                message: "snapshot lock poisoned".to_string(),
            })
    }

    /// Indexes `store` and makes it the current snapshot. Returns the new generation.
    pub fn publish(&self, store: RecordStore) -> Result<u64, QueryError> {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot::build(store, generation));
        let records = snapshot.store().len();

        let mut guard = self.current.write().map_err(|_| QueryError::Unavailable {
            message: "snapshot lock poisoned".to_string(),
        })?;
        // A slower concurrent publish must not roll back a newer generation.
        if guard.generation() < generation {
            *guard = snapshot;
        }
        drop(guard);

        tracing::info!(
            "Published snapshot generation {} ({} records)",
            generation,
            records
        );
        Ok(generation)
    }
}
