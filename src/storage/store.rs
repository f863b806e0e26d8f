use super::snapshot::{load_snapshot, write_snapshot};
use super::types::ParticipantRecord;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Store handle shared between request handlers.
///
/// Readers (search, lookups) take the read lock. Ingestion holds the write
/// lock for the whole validate/dedup/append sequence so concurrent uploads
/// cannot break key uniqueness.
pub type SharedStore = Arc<RwLock<ParticipantStore>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize participants: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ordered, append-only collection of participants.
///
/// Keeps two independent uniqueness indexes, one per key space, so a `p_no`
/// that happens to equal some other participant's `mobile_no` is not treated
/// as a collision.
#[derive(Debug, Default)]
pub struct ParticipantStore {
    records: Vec<ParticipantRecord>,
    by_p_no: HashMap<String, usize>,
    mobile_nos: HashSet<String>,
    snapshot_path: Option<PathBuf>,
}

impl ParticipantStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store backed by the snapshot at `path`, loading whatever it
    /// currently holds.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_snapshot(&path).await;
        let mut store = Self {
            snapshot_path: Some(path),
            ..Self::default()
        };
        store.extend(records);
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Appends `records` in order and rewrites the snapshot.
    ///
    /// The in-memory mutation is kept even if the snapshot write fails; the
    /// error is returned so the caller can report it.
    pub async fn append(&mut self, records: Vec<ParticipantRecord>) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        self.extend(records);

        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        if let Err(err) = write_snapshot(path, &self.records).await {
            tracing::error!(
                "Snapshot write failed, in-memory store is ahead of {}: {}",
                path.display(),
                err
            );
            return Err(err);
        }

        Ok(())
    }

    pub fn all(&self) -> &[ParticipantRecord] {
        &self.records
    }

    pub fn find_by_p_no(&self, p_no: &str) -> Option<&ParticipantRecord> {
        self.by_p_no.get(p_no).map(|&idx| &self.records[idx])
    }

    pub fn contains_p_no(&self, p_no: &str) -> bool {
        self.by_p_no.contains_key(p_no)
    }

    pub fn contains_mobile(&self, mobile_no: &str) -> bool {
        self.mobile_nos.contains(mobile_no)
    }

    /// True if `key` is in use as either a `p_no` or a `mobile_no`.
    pub fn exists_by_key(&self, key: &str) -> bool {
        self.contains_p_no(key) || self.contains_mobile(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    fn extend(&mut self, records: Vec<ParticipantRecord>) {
        for record in records {
            let idx = self.records.len();
            self.by_p_no.entry(record.p_no.clone()).or_insert(idx);
            self.mobile_nos.insert(record.mobile_no.clone());
            self.records.push(record);
        }
    }
}
