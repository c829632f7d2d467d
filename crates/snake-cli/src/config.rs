use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr as _,
    time::Duration,
};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use snake_engine::{GameConfig, GridSize};
use snake_records::{ArchiveOptions, HighScoreTable, StatsStore};

use crate::view::Theme;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config/settings.json";

/// Settings read from the JSON configuration file.
///
/// Every section and key is optional; missing ones take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) game: GameSettings,
    pub(crate) data: DataSettings,
    pub(crate) features: FeatureSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GameSettings {
    /// Board width in pixels of `cell_size`.
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cell_size: usize,
    /// Milliseconds per tick.
    pub(crate) initial_speed: u64,
    /// Accepted for compatibility; the speed stays constant.
    pub(crate) speed_increase: u64,
    pub(crate) initial_length: usize,
    pub(crate) colors: ColorSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            cell_size: 20,
            initial_speed: 150,
            speed_increase: 5,
            initial_length: 1,
            colors: ColorSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ColorSettings {
    pub(crate) background: String,
    pub(crate) snake: String,
    pub(crate) snake_head: String,
    pub(crate) food: String,
    pub(crate) text: String,
    pub(crate) grid: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background: "#000000".to_owned(),
            snake: "#00FF00".to_owned(),
            snake_head: "#FFFF00".to_owned(),
            food: "#FF0000".to_owned(),
            text: "#FFFFFF".to_owned(),
            grid: "#333333".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DataSettings {
    pub(crate) save_game_history: bool,
    pub(crate) stats_file: PathBuf,
    pub(crate) high_scores_file: PathBuf,
    pub(crate) history_limit: usize,
    pub(crate) high_score_limit: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            save_game_history: true,
            stats_file: PathBuf::from("data/game_stats.json"),
            high_scores_file: PathBuf::from("data/high_scores.json"),
            history_limit: StatsStore::DEFAULT_LIMIT,
            high_score_limit: HighScoreTable::DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FeatureSettings {
    pub(crate) show_grid: bool,
    pub(crate) show_score: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_score: true,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum ConfigError {
    #[display("failed to read config file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("invalid config file {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

impl AppConfig {
    /// Reads the configuration at `path`. A missing file gives the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        let config = serde_json::from_str::<Self>(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_owned(),
            reason,
        })?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but falls back to the defaults on error
    /// after warning on stderr and in the log.
    pub(crate) fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            let e = anyhow::Error::from(e);
            log::warn!("{e:#}; using default settings");
            eprintln!("warning: {e:#}; using default settings");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), String> {
        let game = &self.game;
        if game.cell_size == 0 {
            return Err("game.cell_size must be positive".to_owned());
        }
        if game.initial_speed == 0 {
            return Err("game.initial_speed must be positive".to_owned());
        }
        self.game_config().validate().map_err(|e| e.to_string())
    }

    /// Board size in cells.
    pub(crate) fn grid_size(&self) -> GridSize {
        let GameSettings {
            width,
            height,
            cell_size,
            ..
        } = self.game;
        let cell_size = cell_size.max(1);
        GridSize::new(width / cell_size, height / cell_size)
    }

    pub(crate) fn game_config(&self) -> GameConfig {
        let grid = self.grid_size();
        GameConfig::new(grid.width, grid.height)
            .with_tick_interval(Duration::from_millis(self.game.initial_speed))
            .with_initial_length(self.game.initial_length)
    }

    pub(crate) fn archive_options(&self) -> ArchiveOptions {
        let data = &self.data;
        ArchiveOptions {
            save_history: data.save_game_history,
            stats_file: data.stats_file.clone(),
            high_scores_file: data.high_scores_file.clone(),
            history_limit: data.history_limit,
            high_score_limit: data.high_score_limit,
        }
    }
}

impl ColorSettings {
    /// Parses the colors, keeping the default for any that does not parse.
    pub(crate) fn theme(&self) -> Theme {
        let default = Theme::default();
        let parse = |key: &str, value: &str, fallback: Color| {
            Color::from_str(value).unwrap_or_else(|_| {
                log::warn!("invalid color for game.colors.{key}: {value:?}");
                fallback
            })
        };
        Theme {
            background: parse("background", &self.background, default.background),
            snake: parse("snake", &self.snake, default.snake),
            snake_head: parse("snake_head", &self.snake_head, default.snake_head),
            food: parse("food", &self.food, default.food),
            text: parse("text", &self.text, default.text),
            grid: parse("grid", &self.grid, default.grid),
        }
    }
}
