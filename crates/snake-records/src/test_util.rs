use snake_engine::{FoodSeed, GameOutcome, SessionRecorder, SessionStats};

/// A wall-collision record with the given score and a 12.5 s duration.
pub(crate) fn stats_with_score(score: usize) -> SessionStats {
    stats_with(score, 12.5)
}

pub(crate) fn stats_with(score: usize, duration_seconds: f64) -> SessionStats {
    let mut stats =
        SessionRecorder::start(FoodSeed::new(9), 1).finalize(GameOutcome::WallCollision);
    stats.score = score;
    stats.length = score + 1;
    stats.max_length = score + 1;
    stats.duration_seconds = duration_seconds;
    #[expect(clippy::cast_precision_loss)]
    let efficiency = score as f64 / duration_seconds;
    stats.efficiency = efficiency;
    stats
}
