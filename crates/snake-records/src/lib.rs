//! Persistence and reporting for completed snake sessions.
//!
//! - [`StatsStore`]: the session history file, a JSON array rewritten wholesale on every append
//! - [`HighScoreTable`]: the top-N table kept in its own file
//! - [`SessionArchive`]: both files behind the engine's [`StatsSink`](snake_engine::StatsSink)
//! - [`GameSummary`] and [`ProgressReport`]: aggregates over the history
//!
//! # Examples
//!
//! ```
//! use snake_records::StatsStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = StatsStore::open(dir.path().join("game_stats.json"), 1000).unwrap();
//! assert!(store.is_empty());
//! ```

use std::{io, path::PathBuf};

pub use self::{archive::*, high_scores::*, store::*, summary::*};

pub mod descriptive;
pub mod histogram;

mod archive;
mod high_scores;
mod json_file;
mod store;
mod summary;
#[cfg(test)]
mod test_util;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistenceError {
    #[display("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("failed to serialize data for {}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}
