use std::{iter, time::Duration};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use snake_engine::{Hud, SessionState};

use crate::view;

pub(crate) struct SessionStatsDisplay<'a> {
    hud: &'a Hud<'a>,
    style: Style,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub(crate) fn new(hud: &'a Hud<'a>, style: Style) -> Self {
        Self {
            hud,
            style,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        22 + view::block_horizontal_margin(self.block.as_ref())
    }

    pub(crate) fn height(&self) -> u16 {
        let rows = if self.hud.last_result.is_some() {
            ROWS.len() + LAST_RESULT_ROWS.len()
        } else {
            ROWS.len()
        };
        u16::try_from(rows).unwrap_or(u16::MAX) + view::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&Hud<'_>) -> String),
    LabelValue(&'static str, &'static dyn Fn(&Hud<'_>) -> String),
}

pub(crate) fn format_duration(dur: Duration) -> String {
    format!(
        "{:0}:{:0>2}.{:0>2}",
        dur.as_secs() / 60,
        dur.as_secs() % 60,
        dur.subsec_millis() / 10
    )
}

fn state_label(state: SessionState) -> String {
    match state {
        SessionState::Ready => "READY".to_owned(),
        SessionState::Running => "RUNNING".to_owned(),
        SessionState::Paused => "PAUSED".to_owned(),
        SessionState::GameOver(_) => "GAME OVER".to_owned(),
    }
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|hud| hud.score.to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|hud| format_duration(hud.elapsed)),
    Row::Empty,
    Row::LabelValue("LENGTH:", &|hud| hud.length.to_string()),
    Row::LabelValue("BEST:", &|hud| {
        hud.best_score.map_or_else(|| "-".to_owned(), |s| s.to_string())
    }),
    Row::LabelValue("STATE:", &|hud| state_label(hud.state)),
];

const LAST_RESULT_ROWS: &[Row] = &[
    Row::Empty,
    Row::FullLabel("LAST GAME:"),
    Row::FullValue(&|hud| {
        hud.last_result
            .map(|stats| stats.outcome.to_string())
            .unwrap_or_default()
    }),
    Row::LabelValue("SCORE:", &|hud| {
        hud.last_result
            .map(|stats| stats.score.to_string())
            .unwrap_or_default()
    }),
    Row::LabelValue("TIME:", &|hud| {
        hud.last_result
            .map(|stats| format_duration(stats.duration()))
            .unwrap_or_default()
    }),
    Row::LabelValue("TURNS:", &|hud| {
        hud.last_result
            .map(|stats| stats.direction_changes.to_string())
            .unwrap_or_default()
    }),
    Row::LabelValue("FOOD/S:", &|hud| {
        hud.last_result
            .map(|stats| format!("{:.3}", stats.efficiency))
            .unwrap_or_default()
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = self.style;
        let rows = if self.hud.last_result.is_some() {
            [ROWS, LAST_RESULT_ROWS].concat()
        } else {
            ROWS.to_vec()
        };
        let rows_areas =
            Layout::vertical((0..rows.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(rows, rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.hud), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.hud), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
