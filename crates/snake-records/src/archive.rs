use std::path::PathBuf;

use snake_engine::{SessionStats, StatsSink};

use crate::{HighScoreTable, PersistenceError, StatsStore};

/// Where and how much to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Write completed sessions to the history file.
    pub save_history: bool,
    pub stats_file: PathBuf,
    pub high_scores_file: PathBuf,
    pub history_limit: usize,
    pub high_score_limit: usize,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            save_history: true,
            stats_file: PathBuf::from("data/game_stats.json"),
            high_scores_file: PathBuf::from("data/high_scores.json"),
            history_limit: StatsStore::DEFAULT_LIMIT,
            high_score_limit: HighScoreTable::DEFAULT_LIMIT,
        }
    }
}

/// The session history and the high-score table, updated together.
#[derive(Debug, Clone)]
pub struct SessionArchive {
    history: Option<StatsStore>,
    high_scores: HighScoreTable,
}

impl SessionArchive {
    #[must_use]
    pub fn new(history: Option<StatsStore>, high_scores: HighScoreTable) -> Self {
        Self {
            history,
            high_scores,
        }
    }

    /// Loads both files.
    ///
    /// A file that cannot be loaded is replaced by an empty collection; the
    /// load errors are returned alongside so the caller can report them.
    #[must_use]
    pub fn open(options: &ArchiveOptions) -> (Self, Vec<PersistenceError>) {
        let mut errors = vec![];

        let history = options.save_history.then(|| {
            StatsStore::open(&options.stats_file, options.history_limit).unwrap_or_else(|e| {
                log::warn!("starting with an empty session history: {e}");
                errors.push(e);
                StatsStore::empty(&options.stats_file, options.history_limit)
            })
        });
        let high_scores = HighScoreTable::open(&options.high_scores_file, options.high_score_limit)
            .unwrap_or_else(|e| {
                log::warn!("starting with an empty high-score table: {e}");
                errors.push(e);
                HighScoreTable::empty(&options.high_scores_file, options.high_score_limit)
            });

        (Self::new(history, high_scores), errors)
    }

    #[must_use]
    pub fn history(&self) -> Option<&StatsStore> {
        self.history.as_ref()
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }
}

impl StatsSink for SessionArchive {
    type Error = PersistenceError;

    /// Appends to the history and submits to the high-score table.
    ///
    /// Both updates are attempted; the first failure is returned.
    fn record(&mut self, stats: &SessionStats) -> Result<(), Self::Error> {
        let history = match &mut self.history {
            Some(store) => store.append(stats.clone()),
            None => Ok(()),
        };
        let high_scores = self.high_scores.submit(stats).map(|_| ());
        history.and(high_scores)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let history = match &mut self.history {
            Some(store) => store.flush(),
            None => Ok(()),
        };
        let high_scores = self.high_scores.flush();
        history.and(high_scores)
    }

    fn best_score(&self) -> Option<usize> {
        self.high_scores.best().map(|entry| entry.score)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, fs, io, time::Duration};

    use snake_engine::{
        Cell, CellKind, Command, Direction, FoodSeed, GameConfig, GameLoop, GameOutcome,
        GameSession, Hud, Renderer, SessionState,
    };

    use crate::test_util::stats_with_score;

    use super::*;

    /// Feeds commands to the loop and quits once a game-over frame is shown.
    #[derive(Debug)]
    struct Autopilot {
        script: VecDeque<Command>,
        game_over: bool,
    }

    impl Renderer for Autopilot {
        fn draw_cell(&mut self, _cell: Cell, _kind: CellKind) {}

        fn present(&mut self, hud: &Hud<'_>) -> io::Result<()> {
            self.game_over = hud.state.is_game_over();
            Ok(())
        }

        fn poll_input(&mut self, _timeout: Duration) -> io::Result<Option<Command>> {
            if let Some(command) = self.script.pop_front() {
                return Ok(Some(command));
            }
            Ok(self.game_over.then_some(Command::Quit))
        }
    }

    fn options_in(dir: &std::path::Path) -> ArchiveOptions {
        ArchiveOptions {
            stats_file: dir.join("data/game_stats.json"),
            high_scores_file: dir.join("data/high_scores.json"),
            ..ArchiveOptions::default()
        }
    }

    #[test]
    fn test_record_updates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());
        let (mut archive, errors) = SessionArchive::open(&options);
        assert!(errors.is_empty());
        assert_eq!(archive.best_score(), None);

        archive.record(&stats_with_score(42)).unwrap();
        archive.record(&stats_with_score(7)).unwrap();
        assert_eq!(archive.best_score(), Some(42));

        let (reopened, errors) = SessionArchive::open(&options);
        assert!(errors.is_empty());
        assert_eq!(reopened.history().unwrap().len(), 2);
        assert_eq!(reopened.high_scores().entries().len(), 2);
        assert_eq!(reopened.best_score(), Some(42));
    }

    #[test]
    fn test_history_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let options = ArchiveOptions {
            save_history: false,
            ..options_in(dir.path())
        };
        let (mut archive, _) = SessionArchive::open(&options);
        archive.record(&stats_with_score(3)).unwrap();

        assert!(archive.history().is_none());
        assert!(!options.stats_file.exists());
        assert!(options.high_scores_file.exists());
    }

    #[test]
    fn test_corrupt_history_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());
        fs::create_dir_all(options.stats_file.parent().unwrap()).unwrap();
        fs::write(&options.stats_file, "not json").unwrap();

        let (archive, errors) = SessionArchive::open(&options);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], PersistenceError::Parse { .. }));
        assert!(archive.history().unwrap().is_empty());
    }

    #[test]
    fn test_flush_retries_failed_record() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());
        fs::write(dir.path().join("data"), "").unwrap();

        let history = StatsStore::empty(&options.stats_file, 10);
        let high_scores = HighScoreTable::empty(&options.high_scores_file, 10);
        let mut archive = SessionArchive::new(Some(history), high_scores);
        assert!(archive.record(&stats_with_score(5)).is_err());
        assert_eq!(archive.best_score(), Some(5));

        fs::remove_file(dir.path().join("data")).unwrap();
        archive.flush().unwrap();
        let (reopened, _) = SessionArchive::open(&options);
        assert_eq!(reopened.history().unwrap().len(), 1);
        assert_eq!(reopened.best_score(), Some(5));
    }

    #[test]
    fn test_wall_collision_reaches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let options = options_in(dir.path());
        let (archive, _) = SessionArchive::open(&options);
        let config = GameConfig::new(10, 10)
            .with_seed(FoodSeed::new(4))
            .with_tick_interval(Duration::from_millis(1));
        let renderer = Autopilot {
            script: [Command::Start, Command::Turn(Direction::Left)].into(),
            game_over: false,
        };
        let mut game = GameLoop::new(GameSession::new(config), renderer, archive);
        game.run().unwrap();

        let (session, _, _) = game.into_parts();
        assert_eq!(
            session.state(),
            SessionState::GameOver(GameOutcome::WallCollision)
        );
        let reloaded = StatsStore::open(&options.stats_file, StatsStore::DEFAULT_LIMIT).unwrap();
        let finished = session.last_result().unwrap();
        assert_eq!(reloaded.len(), 1);
        let stored = &reloaded.records()[0];
        assert_eq!(stored.outcome, GameOutcome::WallCollision);
        assert_eq!(stored.score, finished.score);
        assert_eq!(stored.length, finished.length);
        assert_eq!(stored.ticks, finished.ticks);
        assert!((stored.duration_seconds - finished.duration_seconds).abs() < 1e-9);
    }
}
