use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Paragraph, Wrap},
};
use snake_engine::{Cell, CellKind, Hud, SessionState};

use crate::view::{
    Theme,
    widgets::{BoardDisplay, KeyBindingDisplay, SessionStatsDisplay},
};

use super::keys;

/// Display options fixed for the whole run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewSettings {
    pub(crate) theme: Theme,
    pub(crate) show_grid: bool,
    pub(crate) show_score: bool,
}

/// One frame of the play screen.
pub(crate) struct PlayScreen<'a> {
    pub(crate) hud: &'a Hud<'a>,
    pub(crate) cells: &'a [(Cell, CellKind)],
    pub(crate) settings: &'a ViewSettings,
}

const WARNING_STYLE: Style = Style::new().fg(Color::LightRed);

impl PlayScreen<'_> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        let theme = &self.settings.theme;
        let text_style = theme.text_style();

        let board = BoardDisplay::new(self.hud.grid, self.cells, theme)
            .show_grid(self.settings.show_grid)
            .block(BlockWidget::bordered().title(" SNAKE ").style(text_style));
        let stats = self.settings.show_score.then(|| {
            SessionStatsDisplay::new(self.hud, text_style)
                .block(BlockWidget::bordered().title(" STATS ").style(text_style))
        });

        let [main_area, warning_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(u16::from(self.hud.persistence_error.is_some())),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let board_height = board.height();
        let mut columns = vec![Constraint::Length(board.width())];
        if let Some(stats) = &stats {
            columns.push(Constraint::Length(stats.width()));
        }
        let column_areas = Layout::horizontal(columns)
            .flex(Flex::Center)
            .spacing(1)
            .split(main_area);

        let [board_area] = Layout::vertical([Constraint::Length(board_height)])
            .flex(Flex::Center)
            .areas(column_areas[0]);
        frame.render_widget(board, board_area);

        if let Some(stats) = stats {
            let [stats_area] = Layout::vertical([Constraint::Length(stats.height())])
                .flex(Flex::Start)
                .areas(Rect {
                    y: board_area.y,
                    height: main_area.height.saturating_sub(board_area.y - main_area.y),
                    ..column_areas[1]
                });
            frame.render_widget(stats, stats_area);
        }

        if let Some(message) = self.overlay_message() {
            render_overlay(frame, board_area, message, text_style);
        }

        if let Some(error) = self.hud.persistence_error {
            let warning = Line::styled(format!("Statistics not saved: {error}"), WARNING_STYLE);
            frame.render_widget(warning.centered(), warning_area);
        }

        let help = KeyBindingDisplay::new(keys::bindings(self.hud.state));
        frame.render_widget(help, help_area);
    }

    fn overlay_message(&self) -> Option<Text<'static>> {
        let text = match self.hud.state {
            SessionState::Ready => Text::from(vec![
                Line::from("READY"),
                Line::from("Press Space to start"),
            ]),
            SessionState::Running => return None,
            SessionState::Paused => Text::from("PAUSED"),
            SessionState::GameOver(outcome) => Text::from(vec![
                Line::from("GAME OVER"),
                Line::from(format!("You {outcome}")),
                Line::from(format!("Score: {}", self.hud.score)),
                Line::from("Press R to play again"),
            ]),
        };
        Some(text.centered())
    }
}

fn render_overlay(frame: &mut Frame<'_>, board_area: Rect, message: Text<'_>, style: Style) {
    let height = u16::try_from(message.lines.len()).unwrap_or(u16::MAX) + 2;
    let width = u16::try_from(message.width()).unwrap_or(u16::MAX) + 4;
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(board_area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .block(BlockWidget::bordered().style(style))
        .style(style);
    frame.render_widget(paragraph, area);
}
