use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CollisionError, Direction, FoodSeed};

/// How a completed session ended.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    #[display("hit the wall")]
    WallCollision,
    #[display("ran into itself")]
    SelfCollision,
    #[display("filled the board")]
    BoardFull,
}

impl From<CollisionError> for GameOutcome {
    fn from(error: CollisionError) -> Self {
        match error {
            CollisionError::SelfCollision => Self::SelfCollision,
            CollisionError::WallCollision => Self::WallCollision,
        }
    }
}

/// Summary of one completed session.
///
/// Produced once by [`SessionRecorder::finalize`] and never modified
/// afterwards. This is the record stored in the statistics file, so field
/// names are part of the on-disk schema:
///
/// ```json
/// {
///   "start_time": "2024-05-01T12:00:00Z",
///   "end_time": "2024-05-01T12:00:42Z",
///   "score": 7,
///   "length": 8,
///   "max_length": 8,
///   "ticks": 280,
///   "direction_changes": 31,
///   "duration_seconds": 42.0,
///   "efficiency": 0.16666666666666666,
///   "outcome": "wall_collision",
///   "seed": "00000000000004d2"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Food eaten during the session.
    pub score: usize,
    /// Snake length when the session ended.
    pub length: usize,
    pub max_length: usize,
    pub ticks: u64,
    pub direction_changes: u64,
    /// Time spent running, excluding pauses.
    pub duration_seconds: f64,
    /// `score / duration_seconds`, or 0 for a zero-length session.
    pub efficiency: f64,
    pub outcome: GameOutcome,
    pub seed: FoodSeed,
}

impl SessionStats {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds.max(0.0))
    }
}

/// Accumulates per-tick metrics for the session in progress.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use snake_engine::{Direction, FoodSeed, GameOutcome, SessionRecorder};
///
/// let mut recorder = SessionRecorder::start(FoodSeed::new(1), 1);
/// recorder.on_tick(Direction::Right, Duration::from_millis(500));
/// recorder.on_tick(Direction::Up, Duration::from_millis(500));
/// recorder.on_food_consumed();
///
/// let stats = recorder.finalize(GameOutcome::WallCollision);
/// assert_eq!(stats.score, 1);
/// assert_eq!(stats.direction_changes, 1);
/// assert_eq!(stats.efficiency, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SessionRecorder {
    start_time: DateTime<Utc>,
    seed: FoodSeed,
    score: usize,
    length: usize,
    max_length: usize,
    ticks: u64,
    direction_changes: u64,
    elapsed: Duration,
    last_direction: Option<Direction>,
}

impl SessionRecorder {
    /// Starts recording a session whose snake begins with `length` cells.
    #[must_use]
    pub fn start(seed: FoodSeed, length: usize) -> Self {
        Self {
            start_time: Utc::now(),
            seed,
            score: 0,
            length,
            max_length: length,
            ticks: 0,
            direction_changes: 0,
            elapsed: Duration::ZERO,
            last_direction: None,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn direction_changes(&self) -> u64 {
        self.direction_changes
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn seed(&self) -> FoodSeed {
        self.seed
    }

    /// Records one tick moving in `direction` that lasted `delta`.
    ///
    /// The first tick sets the baseline direction and is not counted as a
    /// change.
    pub fn on_tick(&mut self, direction: Direction, delta: Duration) {
        self.ticks += 1;
        self.elapsed += delta;
        if self.last_direction.is_some_and(|last| last != direction) {
            self.direction_changes += 1;
        }
        self.last_direction = Some(direction);
    }

    pub fn on_food_consumed(&mut self) {
        self.score += 1;
    }

    pub fn on_length(&mut self, length: usize) {
        self.length = length;
        self.max_length = self.max_length.max(length);
    }

    /// Closes the session and returns its immutable summary.
    #[must_use]
    pub fn finalize(&self, outcome: GameOutcome) -> SessionStats {
        let duration_seconds = self.elapsed.as_secs_f64();
        #[expect(clippy::cast_precision_loss)]
        let efficiency = if duration_seconds > 0.0 {
            self.score as f64 / duration_seconds
        } else {
            0.0
        };
        SessionStats {
            start_time: self.start_time,
            end_time: Utc::now(),
            score: self.score,
            length: self.length,
            max_length: self.max_length,
            ticks: self.ticks,
            direction_changes: self.direction_changes,
            duration_seconds,
            efficiency,
            outcome,
            seed: self.seed,
        }
    }
}
