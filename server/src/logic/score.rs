use tracing::warn;

use super::Board;
use crate::store::HighScoreStore;

/// Seconds after which the time factor of a score turns negative.
pub const TIME_BUDGET_SECS: i64 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub score: i64,
    /// Best score after recording this one, `None` if the store failed.
    pub high_score: Option<i64>,
}

/// Number of safe cells the player has opened.
pub fn base_score(board: &Board) -> usize {
    board
        .cells()
        .filter(|cell| cell.is_revealed() && !cell.is_mine())
        .count()
}

/// `base_score * (9999 - elapsed_secs)`. Not clamped: games longer than the time budget score
/// below zero.
pub fn final_score(board: &Board, elapsed_secs: u32) -> i64 {
    base_score(board) as i64 * (TIME_BUDGET_SECS - i64::from(elapsed_secs))
}

/// Offers `score` to `store` and reads back the best score.
///
/// A failing store only costs the high score; `score` is reported either way. The store may
/// block, so async callers run this on a blocking thread.
pub fn record(store: &dyn HighScoreStore, score: i64) -> ScoreReport {
    let high_score = match store.write(score).and_then(|()| store.read()) {
        Ok(high_score) => Some(high_score),
        Err(e) => {
            warn!("High score store unavailable, reporting score {} alone: {}", score, e);
            None
        }
    };

    ScoreReport { score, high_score }
}
