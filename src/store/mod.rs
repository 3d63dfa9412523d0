//! Durable, ordered collection of check-ins backed by one JSON file.
//!
//! The store owns both the in-memory sequence and the file. Every mutation
//! goes through `add`, `remove`, `remove_at`, `update`, `replace_all` or
//! `insert_batch`, and every write replaces the file atomically.

mod atomic;

pub use atomic::write_atomic;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::codec::json;
use crate::errors::{AppError, AppResult};
use crate::models::CheckInRecord;

pub struct RecordStore {
    path: PathBuf,
    records: Vec<CheckInRecord>,
    load_error: Option<String>,
}

fn sort_newest_first(records: &mut [CheckInRecord]) {
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

impl RecordStore {
    /// Open the store at `path` and load whatever it holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
            load_error: None,
        };
        store.load();
        store
    }

    /// Open the store, failing when the file exists but cannot be read or
    /// decoded.
    pub fn open_strict(path: impl Into<PathBuf>) -> AppResult<Self> {
        let store = Self::open(path);
        match &store.load_error {
            Some(e) => Err(AppError::StoreUnreadable(format!(
                "{}: {e}",
                store.path.display()
            ))),
            None => Ok(store),
        }
    }

    /// Reload from disk, newest first.
    ///
    /// Best effort: a missing file is an empty store, and an unreadable or
    /// undecodable file also yields an empty store rather than partial data.
    pub fn load(&mut self) {
        self.records = Vec::new();
        self.load_error = None;

        if !self.path.exists() {
            debug!(path = %self.path.display(), "no check-in file yet");
            return;
        }

        let decoded = fs::read_to_string(&self.path)
            .map_err(AppError::from)
            .and_then(|content| json::decode(&content));

        match decoded {
            Ok(mut records) => {
                sort_newest_first(&mut records);
                debug!(path = %self.path.display(), count = records.len(), "check-ins loaded");
                self.records = records;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "check-in file unreadable, starting empty");
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Why the last `load` came up empty, when the file was there but
    /// unusable.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[CheckInRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&CheckInRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> HashSet<Uuid> {
        self.records.iter().map(CheckInRecord::id).collect()
    }

    fn write(&self, records: &[CheckInRecord]) -> AppResult<()> {
        let data = json::encode_compact(records)?;
        write_atomic(&self.path, data.as_bytes())?;
        Ok(())
    }

    /// Persist the in-memory sequence. On failure the in-memory state stays
    /// authoritative for the session and the error goes back to the caller.
    fn persist(&self, operation: &str) -> AppResult<()> {
        self.write(&self.records).inspect_err(|e| {
            warn!(path = %self.path.display(), operation, error = %e, "failed to persist check-ins");
        })
    }

    /// Prepend a new record (most recent first) and persist it.
    pub fn add(&mut self, record: CheckInRecord) -> AppResult<()> {
        if self.contains(record.id()) {
            return Err(AppError::DuplicateId(record.id()));
        }
        self.records.insert(0, record);
        self.persist("add")
    }

    /// Remove every record whose id is listed. Returns how many went away.
    pub fn remove(&mut self, ids: &[Uuid]) -> AppResult<usize> {
        let wanted: HashSet<Uuid> = ids.iter().copied().collect();
        let before = self.records.len();
        self.records.retain(|r| !wanted.contains(&r.id()));
        let removed = before - self.records.len();

        if removed > 0 {
            self.persist("remove")?;
        }
        Ok(removed)
    }

    /// Remove records by position in the current ordering. Out of range
    /// positions are ignored.
    pub fn remove_at(&mut self, positions: &[usize]) -> AppResult<usize> {
        let ids: Vec<Uuid> = positions
            .iter()
            .filter_map(|&p| self.records.get(p).map(CheckInRecord::id))
            .collect();
        self.remove(&ids)
    }

    /// Replace the record sharing `record`'s id. No match is a no-op and
    /// returns `Ok(false)`.
    pub fn update(&mut self, record: CheckInRecord) -> AppResult<bool> {
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == record.id()) else {
            return Ok(false);
        };
        *slot = record;
        self.persist("update")?;
        Ok(true)
    }

    /// Swap the whole sequence. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, records: Vec<CheckInRecord>) -> AppResult<()> {
        let mut seen = HashSet::new();
        self.records = records
            .into_iter()
            .filter(|r| seen.insert(r.id()))
            .collect();
        self.persist("replace_all")
    }

    /// Insert many records as one durable operation.
    ///
    /// The merged sequence is written first and only committed in memory once
    /// the write succeeded, so a failure has no side effects at all. Ids that
    /// are already present are skipped. Returns the number inserted.
    pub fn insert_batch(&mut self, records: Vec<CheckInRecord>) -> AppResult<usize> {
        let mut seen = self.ids();
        let fresh: Vec<CheckInRecord> = records
            .into_iter()
            .filter(|r| seen.insert(r.id()))
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        let inserted = fresh.len();
        let mut merged = self.records.clone();
        merged.extend(fresh);
        sort_newest_first(&mut merged);

        self.write(&merged)?;
        self.records = merged;
        Ok(inserted)
    }
}
