use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snake_engine::SessionStats;

use crate::{PersistenceError, json_file};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: usize,
    /// Longest the snake got during the session.
    pub length: usize,
    pub duration_seconds: f64,
    pub efficiency: f64,
    /// When the session started.
    pub date: DateTime<Utc>,
}

impl From<&SessionStats> for HighScoreEntry {
    fn from(stats: &SessionStats) -> Self {
        Self {
            score: stats.score,
            length: stats.max_length,
            duration_seconds: stats.duration_seconds,
            efficiency: stats.efficiency,
            date: stats.start_time,
        }
    }
}

/// The best sessions, highest score first.
///
/// Holds at most `limit` entries. Among equal scores the earlier session
/// ranks first.
#[derive(Debug, Clone)]
pub struct HighScoreTable {
    path: PathBuf,
    limit: usize,
    entries: Vec<HighScoreEntry>,
    dirty: bool,
}

impl HighScoreTable {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn open<P>(path: P, limit: usize) -> Result<Self, PersistenceError>
    where
        P: Into<PathBuf>,
    {
        let mut table = Self::empty(path, limit);
        table.entries = json_file::read_array(&table.path)?;
        table.sort_and_trim();
        Ok(table)
    }

    pub fn empty<P>(path: P, limit: usize) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            limit: limit.max(1),
            entries: vec![],
            dirty: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true if a session scoring `score` would enter the table.
    #[must_use]
    pub fn qualifies(&self, score: usize) -> bool {
        self.entries.len() < self.limit || self.entries.last().is_some_and(|min| score > min.score)
    }

    /// Enters the session if it qualifies and rewrites the file.
    ///
    /// Returns whether the session entered the table. When the write fails
    /// the entry is kept and the write is retried by the next `submit` or
    /// [`flush`](Self::flush).
    pub fn submit(&mut self, stats: &SessionStats) -> Result<bool, PersistenceError> {
        if !self.qualifies(stats.score) {
            self.flush()?;
            return Ok(false);
        }
        self.entries.push(HighScoreEntry::from(stats));
        self.sort_and_trim();
        self.dirty = true;
        log::info!("new high score entry: {}", stats.score);
        self.flush()?;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.dirty {
            return Ok(());
        }
        json_file::write_atomic(&self.path, &self.entries)?;
        self.dirty = false;
        Ok(())
    }

    fn sort_and_trim(&mut self) {
        // Stable: ties keep insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.limit);
    }
}
