use std::time::Duration;

use serde::Serialize;
use snake_engine::SessionStats;

use crate::descriptive::DescriptiveStats;

/// Number of most recent games compared against the earlier ones.
pub const RECENT_GAMES: usize = 10;

/// Totals and averages over a session history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub total_games: usize,
    pub total_playtime_seconds: f64,
    pub average_score: f64,
    pub best_score: usize,
    pub total_food: usize,
    pub average_duration_seconds: f64,
}

impl GameSummary {
    /// Summarizes `records`. An empty history gives an all-zero summary.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_records(records: &[SessionStats]) -> Self {
        let total_games = records.len();
        let total_playtime_seconds = records.iter().map(|r| r.duration_seconds).sum::<f64>();
        let total_food = records.iter().map(|r| r.score).sum::<usize>();
        let best_score = records.iter().map(|r| r.score).max().unwrap_or(0);
        let (average_score, average_duration_seconds) = if total_games == 0 {
            (0.0, 0.0)
        } else {
            let n = total_games as f64;
            (total_food as f64 / n, total_playtime_seconds / n)
        };
        Self {
            total_games,
            total_playtime_seconds,
            average_score,
            best_score,
            total_food,
            average_duration_seconds,
        }
    }

    #[must_use]
    pub fn total_playtime(&self) -> Duration {
        Duration::from_secs_f64(self.total_playtime_seconds.max(0.0))
    }
}

/// Average score of the last [`RECENT_GAMES`] games against all earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentPerformance {
    pub recent_average: f64,
    pub earlier_average: f64,
    /// `recent_average - earlier_average`.
    pub improvement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum Achievement {
    #[display("Dedicated Player - played 10+ games")]
    DedicatedPlayer,
    #[display("Century Club - scored 100+ in one game")]
    CenturyClub,
    #[display("Time Master - 1+ hour of playtime")]
    TimeMaster,
    #[display("Consistent Player - low score variation")]
    ConsistentPlayer,
}

/// Long-term progress over a session history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub summary: GameSummary,
    pub worst_score: usize,
    /// Sample standard deviation of the scores.
    pub score_std_dev: f64,
    /// Present only when there are earlier games to compare with.
    pub recent: Option<RecentPerformance>,
    pub achievements: Vec<Achievement>,
}

impl ProgressReport {
    const DEDICATED_GAMES: usize = 10;
    const CENTURY_SCORE: usize = 100;
    const TIME_MASTER_SECONDS: f64 = 3600.0;
    const CONSISTENCY_MIN_GAMES: usize = 5;
    const CONSISTENCY_MAX_VARIATION: f64 = 0.5;

    /// Builds the report, or `None` when there are no records.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_records(records: &[SessionStats]) -> Option<Self> {
        let scores = DescriptiveStats::new(records.iter().map(|r| r.score as f64))?;
        let summary = GameSummary::from_records(records);
        let worst_score = records.iter().map(|r| r.score).min().unwrap_or(0);

        let recent = records
            .len()
            .checked_sub(RECENT_GAMES)
            .filter(|&split| split > 0)
            .map(|split| {
                let (earlier, recent) = records.split_at(split);
                let earlier_average = GameSummary::from_records(earlier).average_score;
                let recent_average = GameSummary::from_records(recent).average_score;
                RecentPerformance {
                    recent_average,
                    earlier_average,
                    improvement: recent_average - earlier_average,
                }
            });

        let mut achievements = vec![];
        if summary.total_games >= Self::DEDICATED_GAMES {
            achievements.push(Achievement::DedicatedPlayer);
        }
        if summary.best_score >= Self::CENTURY_SCORE {
            achievements.push(Achievement::CenturyClub);
        }
        if summary.total_playtime_seconds >= Self::TIME_MASTER_SECONDS {
            achievements.push(Achievement::TimeMaster);
        }
        if summary.total_games >= Self::CONSISTENCY_MIN_GAMES
            && scores
                .coefficient_of_variation()
                .is_some_and(|cv| cv < Self::CONSISTENCY_MAX_VARIATION)
        {
            achievements.push(Achievement::ConsistentPlayer);
        }

        Some(Self {
            summary,
            worst_score,
            score_std_dev: scores.sample_std_dev(),
            recent,
            achievements,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_util::{stats_with, stats_with_score};

    use super::*;

    #[test]
    fn test_empty_history() {
        let summary = GameSummary::from_records(&[]);
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.best_score, 0);
        assert!(ProgressReport::from_records(&[]).is_none());
    }

    #[test]
    fn test_summary_totals() {
        let records = [stats_with(2, 10.0), stats_with(6, 30.0), stats_with(4, 20.0)];
        let summary = GameSummary::from_records(&records);
        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.total_food, 12);
        assert_eq!(summary.best_score, 6);
        assert_eq!(summary.average_score, 4.0);
        assert_eq!(summary.total_playtime_seconds, 60.0);
        assert_eq!(summary.average_duration_seconds, 20.0);
        assert_eq!(summary.total_playtime(), Duration::from_secs(60));
    }

    #[test]
    fn test_recent_performance_needs_earlier_games() {
        let ten = (0..10).map(stats_with_score).collect::<Vec<_>>();
        let report = ProgressReport::from_records(&ten).unwrap();
        assert!(report.recent.is_none());

        let mut twelve = vec![stats_with_score(1), stats_with_score(3)];
        twelve.extend((0..10).map(|_| stats_with_score(5)));
        let report = ProgressReport::from_records(&twelve).unwrap();
        let recent = report.recent.unwrap();
        assert_eq!(recent.earlier_average, 2.0);
        assert_eq!(recent.recent_average, 5.0);
        assert_eq!(recent.improvement, 3.0);
    }

    #[test]
    fn test_achievements() {
        let records = (0..10)
            .map(|i| stats_with(100 + i, 400.0))
            .collect::<Vec<_>>();
        let report = ProgressReport::from_records(&records).unwrap();
        assert_eq!(
            report.achievements,
            vec![
                Achievement::DedicatedPlayer,
                Achievement::CenturyClub,
                Achievement::TimeMaster,
                Achievement::ConsistentPlayer,
            ]
        );
        assert_eq!(report.worst_score, 100);
    }

    #[test]
    fn test_inconsistent_scores_earn_nothing() {
        let records = [0, 0, 0, 0, 20].map(stats_with_score);
        let report = ProgressReport::from_records(&records).unwrap();
        assert!(report.achievements.is_empty());
        assert!((report.score_std_dev - 80.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_uses_sample_deviation() {
        // Population deviation would give a variation of 0.46 here.
        let records = [2, 2, 2, 2, 5].map(stats_with_score);
        let report = ProgressReport::from_records(&records).unwrap();
        assert!((report.score_std_dev - 1.3416).abs() < 1e-3);
        assert!(report.achievements.is_empty());

        let records = [2, 2, 2, 2, 4].map(stats_with_score);
        let report = ProgressReport::from_records(&records).unwrap();
        assert_eq!(report.achievements, vec![Achievement::ConsistentPlayer]);
    }
}
