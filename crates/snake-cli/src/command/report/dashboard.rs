use std::io;

use crossterm::event::{self, KeyCode};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize as _},
    symbols,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Paragraph},
};
use snake_engine::SessionStats;
use snake_records::{GameSummary, histogram::Histogram};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay};

const SCORE_BINS: usize = 10;

const BINDINGS: &[KeyBinding] = &[(&["q", "Esc"], "Quit")];

/// Shows score charts until q or Esc is pressed.
pub(super) fn run(terminal: &mut DefaultTerminal, records: &[SessionStats]) -> io::Result<()> {
    let dashboard = Dashboard::new(records);
    loop {
        terminal.draw(|frame| dashboard.draw(frame))?;
        if let Some(key) = event::read()?.as_key_press_event()
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            return Ok(());
        }
    }
}

struct Dashboard {
    summary: GameSummary,
    /// (game number, score)
    scores: Vec<(f64, f64)>,
    /// (duration in seconds, score)
    durations: Vec<(f64, f64)>,
    histogram: Histogram,
}

impl Dashboard {
    #[expect(clippy::cast_precision_loss)]
    fn new(records: &[SessionStats]) -> Self {
        let scores = records
            .iter()
            .enumerate()
            .map(|(i, r)| ((i + 1) as f64, r.score as f64))
            .collect();
        let durations = records
            .iter()
            .map(|r| (r.duration_seconds, r.score as f64))
            .collect();
        Self {
            summary: GameSummary::from_records(records),
            scores,
            durations,
            histogram: Histogram::new(records.iter().map(|r| r.score), SCORE_BINS),
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let [header_area, progression_area, lower_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let GameSummary {
            total_games,
            average_score,
            best_score,
            ..
        } = self.summary;
        let header = Paragraph::new(Line::from(format!(
            "Games: {total_games}  Average score: {average_score:.2}  Best score: {best_score}"
        )))
        .centered()
        .block(Block::bordered().title(" SNAKE STATISTICS "));
        frame.render_widget(header, header_area);

        if self.scores.is_empty() {
            frame.render_widget(
                Paragraph::new("No games recorded yet.").centered(),
                progression_area,
            );
        } else {
            let [distribution_area, duration_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(lower_area);
            frame.render_widget(self.progression_chart(), progression_area);
            frame.render_widget(self.distribution_chart(), distribution_area);
            frame.render_widget(self.duration_chart(), duration_area);
        }

        frame.render_widget(KeyBindingDisplay::new(BINDINGS), help_area);
    }

    #[expect(clippy::cast_precision_loss)]
    fn progression_chart(&self) -> Chart<'_> {
        let games = self.scores.len() as f64;
        let max_score = (self.summary.best_score as f64).max(1.0);
        let dataset = Dataset::default()
            .name("score")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::new().fg(Color::Green))
            .data(&self.scores);
        Chart::new(vec![dataset])
            .block(Block::bordered().title(" Score progression "))
            .x_axis(
                Axis::default()
                    .title("game")
                    .bounds([1.0, games.max(2.0)])
                    .labels(["1".to_owned(), format!("{games}")]),
            )
            .y_axis(
                Axis::default()
                    .title("score")
                    .bounds([0.0, max_score])
                    .labels(["0".to_owned(), format!("{max_score}")]),
            )
    }

    #[expect(clippy::cast_precision_loss)]
    fn duration_chart(&self) -> Chart<'_> {
        let max_duration = self
            .durations
            .iter()
            .map(|&(duration, _)| duration)
            .fold(1.0, f64::max)
            .ceil();
        let max_score = (self.summary.best_score as f64).max(1.0);
        let dataset = Dataset::default()
            .name("game")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::new().fg(Color::Yellow))
            .data(&self.durations);
        Chart::new(vec![dataset])
            .block(Block::bordered().title(" Duration vs score "))
            .x_axis(
                Axis::default()
                    .title("seconds")
                    .bounds([0.0, max_duration])
                    .labels(["0".to_owned(), format!("{max_duration}")]),
            )
            .y_axis(
                Axis::default()
                    .title("score")
                    .bounds([0.0, max_score])
                    .labels(["0".to_owned(), format!("{max_score}")]),
            )
    }

    fn distribution_chart(&self) -> BarChart<'_> {
        let bars = self
            .histogram
            .bins
            .iter()
            .map(|bin| {
                let label = if bin.range.start() == bin.range.end() {
                    bin.range.start().to_string()
                } else {
                    format!("{}-{}", bin.range.start(), bin.range.end())
                };
                Bar::default()
                    .value(u64::try_from(bin.count).unwrap_or(u64::MAX))
                    .label(Line::from(label))
            })
            .collect::<Vec<_>>();
        BarChart::default()
            .block(Block::bordered().title(" Score distribution "))
            .data(BarGroup::default().bars(&bars))
            .bar_width(7)
            .bar_gap(1)
            .bar_style(Style::new().fg(Color::Cyan))
            .value_style(Style::new().black().on_cyan())
    }
}
