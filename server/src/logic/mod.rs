//! The board engine: generation, flood-fill reveal, win detection and scoring.
//!
//! Nothing in here knows about HTTP or sessions; callers hand in a [`Board`] and serialize
//! whatever it looks like afterwards.

mod board;
mod difficulty;
mod error;
mod reveal;
mod score;

pub use board::{Board, Cell};
pub use difficulty::{Difficulty, DifficultySettings, resolve};
pub use error::{GameError, Result};
pub use reveal::{check_win, reveal};
pub use score::{ScoreReport, TIME_BUDGET_SECS, base_score, final_score, record};
