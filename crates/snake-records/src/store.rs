use std::path::{Path, PathBuf};

use snake_engine::SessionStats;

use crate::{PersistenceError, json_file};

/// The persisted session history.
///
/// The whole collection is read at [`open`](Self::open) and the whole
/// collection is written back on every [`append`](Self::append). Only the
/// most recent `limit` records are kept.
///
/// A failed write keeps the records in memory and marks the store dirty;
/// the next `append` or [`flush`](Self::flush) writes everything again.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
    limit: usize,
    records: Vec<SessionStats>,
    dirty: bool,
}

impl StatsStore {
    pub const DEFAULT_LIMIT: usize = 1000;

    /// Loads the history at `path`. A missing file is an empty history.
    pub fn open<P>(path: P, limit: usize) -> Result<Self, PersistenceError>
    where
        P: Into<PathBuf>,
    {
        let mut store = Self::empty(path, limit);
        store.records = json_file::read_array(&store.path)?;
        store.trim();
        log::debug!(
            "loaded {} session records from {}",
            store.records.len(),
            store.path.display()
        );
        Ok(store)
    }

    /// Creates an empty history that will be written to `path`.
    pub fn empty<P>(path: P, limit: usize) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            limit: limit.max(1),
            records: vec![],
            dirty: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in completion order, oldest first.
    #[must_use]
    pub fn records(&self) -> &[SessionStats] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if a previous write failed and has not been retried successfully.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Adds a completed session and rewrites the file.
    ///
    /// The record stays in memory even if the write fails.
    pub fn append(&mut self, record: SessionStats) -> Result<(), PersistenceError> {
        self.records.push(record);
        self.trim();
        self.dirty = true;
        self.flush()
    }

    /// Writes the collection if an earlier write is still pending.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.dirty {
            return Ok(());
        }
        json_file::write_atomic(&self.path, &self.records)?;
        self.dirty = false;
        Ok(())
    }

    fn trim(&mut self) {
        if let Some(excess) = self.records.len().checked_sub(self.limit) {
            self.records.drain(..excess);
        }
    }
}
