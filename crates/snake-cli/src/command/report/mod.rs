use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use snake_engine::SessionStats;
use snake_records::{GameSummary, HighScoreTable, ProgressReport, StatsStore};

use crate::{
    config::{AppConfig, DEFAULT_CONFIG_PATH},
    view::widgets::format_duration,
};

mod dashboard;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Configuration file [default: config/settings.json]
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Show score charts in the terminal
    #[clap(long)]
    pub(crate) chart: bool,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let config_path = arg
        .config
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load_or_default(config_path);
    let data = &config.data;

    let history = StatsStore::open(&data.stats_file, data.history_limit)
        .context("Failed to load session history")?;
    let high_scores = HighScoreTable::open(&data.high_scores_file, data.high_score_limit)
        .context("Failed to load high scores")?;

    if arg.chart {
        ratatui::run(|terminal| dashboard::run(terminal, history.records()))
            .context("Terminal error")?;
        return Ok(());
    }

    let mut out = io::stdout().lock();
    write_report(&mut out, history.records(), &high_scores)?;
    out.flush()?;
    Ok(())
}

fn write_report<W>(
    out: &mut W,
    records: &[SessionStats],
    high_scores: &HighScoreTable,
) -> io::Result<()>
where
    W: io::Write,
{
    let Some(report) = ProgressReport::from_records(records) else {
        writeln!(out, "No games recorded yet.")?;
        return Ok(());
    };
    let ProgressReport {
        summary,
        worst_score,
        score_std_dev,
        recent,
        achievements,
    } = &report;
    let GameSummary {
        total_games,
        average_score,
        best_score,
        total_food,
        average_duration_seconds,
        ..
    } = summary;

    writeln!(out, "SNAKE PROGRESS REPORT")?;
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "  Games played:     {total_games}")?;
    writeln!(
        out,
        "  Total playtime:   {}",
        format_duration(summary.total_playtime())
    )?;
    writeln!(out, "  Average score:    {average_score:.2}")?;
    writeln!(out, "  Best score:       {best_score}")?;
    writeln!(out, "  Worst score:      {worst_score}")?;
    writeln!(out, "  Score std dev:    {score_std_dev:.2}")?;
    writeln!(out, "  Food eaten:       {total_food}")?;
    writeln!(out, "  Average duration: {average_duration_seconds:.1}s")?;

    if let Some(recent) = recent {
        writeln!(out)?;
        writeln!(out, "Recent performance")?;
        writeln!(out, "  Last 10 average:  {:.2}", recent.recent_average)?;
        writeln!(out, "  Earlier average:  {:.2}", recent.earlier_average)?;
        let trend = if recent.improvement > 0.0 {
            "improving"
        } else if recent.improvement < 0.0 {
            "declining"
        } else {
            "steady"
        };
        writeln!(out, "  Change:           {:+.2} ({trend})", recent.improvement)?;
    }

    if !achievements.is_empty() {
        writeln!(out)?;
        writeln!(out, "Achievements")?;
        for achievement in achievements {
            writeln!(out, "  {achievement}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "High scores")?;
    for (rank, entry) in high_scores.entries().iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {:>5}  length {:>3}  {:>7.1}s  {}",
            rank + 1,
            entry.score,
            entry.length,
            entry.duration_seconds,
            entry.date.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use snake_engine::{FoodSeed, GameOutcome, SessionRecorder, StatsSink as _};
    use snake_records::{ArchiveOptions, SessionArchive};

    use super::*;

    fn stats_with_score(score: usize) -> SessionStats {
        let mut stats =
            SessionRecorder::start(FoodSeed::new(1), 1).finalize(GameOutcome::SelfCollision);
        stats.score = score;
        stats.duration_seconds = 30.0;
        stats
    }

    #[test]
    fn test_empty_history_report() {
        let dir = tempfile::tempdir().unwrap();
        let table = HighScoreTable::empty(dir.path().join("high_scores.json"), 10);
        let mut out = vec![];
        write_report(&mut out, &[], &table).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No games recorded yet.\n");
    }

    #[test]
    fn test_report_lists_summary_and_high_scores() {
        let dir = tempfile::tempdir().unwrap();
        let options = ArchiveOptions {
            stats_file: dir.path().join("game_stats.json"),
            high_scores_file: dir.path().join("high_scores.json"),
            ..ArchiveOptions::default()
        };
        let (mut archive, _) = SessionArchive::open(&options);
        for score in [3, 11, 7] {
            archive.record(&stats_with_score(score)).unwrap();
        }

        let mut out = vec![];
        let history = archive.history().unwrap();
        write_report(&mut out, history.records(), archive.high_scores()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Games played:     3"));
        assert!(text.contains("Best score:       11"));
        assert!(text.contains("Worst score:      3"));
        assert!(text.contains("Total playtime:   1:30.00"));
        assert!(!text.contains("Recent performance"));
        let first_rank = text.lines().find(|line| line.contains(" 1. ")).unwrap();
        assert!(first_rank.contains("11"));
    }
}
