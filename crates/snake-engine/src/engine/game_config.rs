use std::time::Duration;

use crate::{FoodSeed, GridSize, Snake};

/// Immutable game settings, fixed for the lifetime of a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: GridSize,
    /// Starting snake length, clamped to `1..=3`.
    pub initial_length: usize,
    /// Time between two ticks.
    pub tick_interval: Duration,
    /// Pins food placement. A random seed is drawn when `None`.
    pub seed: Option<FoodSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::new(40, 30),
            initial_length: 1,
            tick_interval: Duration::from_millis(150),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidGameConfig {
    #[display("grid must be at least 2x2 cells, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },
    #[display(
        "grid must be at most {}x{} cells, got {width}x{height}",
        GameConfig::MAX_GRID_SIDE,
        GameConfig::MAX_GRID_SIDE
    )]
    GridTooLarge { width: usize, height: usize },
    #[display("tick interval must be positive")]
    ZeroTickInterval,
}

impl GameConfig {
    /// Largest board side, in cells.
    pub const MAX_GRID_SIDE: usize = 256;

    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: GridSize::new(width, height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(self, seed: FoodSeed) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    #[must_use]
    pub fn with_tick_interval(self, tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            ..self
        }
    }

    #[must_use]
    pub fn with_initial_length(self, initial_length: usize) -> Self {
        Self {
            initial_length: initial_length.clamp(1, Snake::MAX_INITIAL_LENGTH),
            ..self
        }
    }

    /// Checks that a session can start with food on the board.
    pub fn validate(&self) -> Result<(), InvalidGameConfig> {
        let GridSize { width, height } = self.grid;
        if width < 2 || height < 2 {
            return Err(InvalidGameConfig::GridTooSmall { width, height });
        }
        if width > Self::MAX_GRID_SIDE || height > Self::MAX_GRID_SIDE {
            return Err(InvalidGameConfig::GridTooLarge { width, height });
        }
        if self.tick_interval.is_zero() {
            return Err(InvalidGameConfig::ZeroTickInterval);
        }
        Ok(())
    }
}
