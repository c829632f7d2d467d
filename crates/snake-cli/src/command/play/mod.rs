use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use snake_engine::{FoodSeed, GameConfig, GameLoop, GameSession};
use snake_records::SessionArchive;

use crate::{
    config::{AppConfig, DEFAULT_CONFIG_PATH},
    logger,
};

use self::{renderer::TerminalRenderer, screen::ViewSettings};

mod keys;
mod renderer;
mod screen;

const DEFAULT_LOG_FILE: &str = "data/snake.log";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Configuration file [default: config/settings.json]
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Board width in cells, overriding the configuration
    #[clap(long)]
    pub(crate) width: Option<usize>,
    /// Board height in cells, overriding the configuration
    #[clap(long)]
    pub(crate) height: Option<usize>,
    /// Milliseconds per tick, overriding the configuration
    #[clap(long)]
    pub(crate) speed: Option<u64>,
    /// Seed for food placement, to replay the same layouts
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Log file [default: data/snake.log]
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

impl PlayArg {
    fn game_config(&self, config: &AppConfig) -> GameConfig {
        let mut game = config.game_config();
        if let Some(width) = self.width {
            game.grid.width = width;
        }
        if let Some(height) = self.height {
            game.grid.height = height;
        }
        if let Some(speed) = self.speed {
            game = game.with_tick_interval(Duration::from_millis(speed));
        }
        if let Some(seed) = self.seed {
            game = game.with_seed(FoodSeed::new(seed));
        }
        game
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let log_file = arg
        .log_file
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_LOG_FILE));
    logger::init(log_file)?;

    let config_path = arg
        .config
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load_or_default(config_path);
    let game_config = arg.game_config(&config);
    game_config
        .validate()
        .context("Invalid game settings")?;

    let (archive, load_errors) = SessionArchive::open(&config.archive_options());
    for error in load_errors {
        let error = anyhow::Error::from(error);
        eprintln!("warning: {error:#}; starting with empty data");
    }

    let settings = ViewSettings {
        theme: config.game.colors.theme(),
        show_grid: config.features.show_grid,
        show_score: config.features.show_score,
    };
    let session = GameSession::new(game_config);

    let persistence_error = ratatui::run(|terminal| -> io::Result<Option<String>> {
        let renderer = TerminalRenderer::new(terminal, settings);
        let mut game = GameLoop::new(session, renderer, archive);
        game.run()?;
        Ok(game.persistence_error().map(str::to_owned))
    })
    .context("Terminal error")?;

    if let Some(error) = persistence_error {
        eprintln!("warning: statistics could not be saved: {error}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use snake_engine::GridSize;

    use super::*;

    #[test]
    fn test_flags_override_config() {
        let arg = PlayArg {
            width: Some(12),
            speed: Some(80),
            seed: Some(3),
            ..PlayArg::default()
        };
        let game = arg.game_config(&AppConfig::default());
        assert_eq!(game.grid, GridSize::new(12, 30));
        assert_eq!(game.tick_interval, Duration::from_millis(80));
        assert_eq!(game.seed, Some(FoodSeed::new(3)));
    }

    #[test]
    fn test_huge_board_flags_rejected() {
        let arg = PlayArg {
            width: Some(1_000_000),
            height: Some(1_000_000),
            ..PlayArg::default()
        };
        assert!(arg.game_config(&AppConfig::default()).validate().is_err());
    }

    #[test]
    fn test_no_flags_use_config() {
        let game = PlayArg::default().game_config(&AppConfig::default());
        assert_eq!(game, AppConfig::default().game_config());
        assert_eq!(game.seed, None);
    }
}
