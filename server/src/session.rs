use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::{DashMap, Entry};
use minesweeper_common::models::{self, GameStatus};
use nanoid::nanoid;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::logic::{self, Board, Difficulty, GameError};

/// One player's game: the board, whether it has ended and how it was configured.
#[derive(Debug)]
pub struct Session {
    board: Board,
    game_over: bool,
    difficulty: Difficulty,
    last_activity: Instant,
}

impl Session {
    #[instrument(level = "trace")]
    pub fn new(difficulty: Difficulty) -> Self {
        info!("Creating new {} game", difficulty);
        Self::with_board(Board::generate(difficulty), difficulty)
    }

    pub fn with_board(board: Board, difficulty: Difficulty) -> Self {
        Self {
            board,
            game_over: false,
            difficulty,
            last_activity: Instant::now(),
        }
    }

    /// Throws the current board away and deals a new one.
    #[instrument(level = "trace", skip(self))]
    pub fn restart(&mut self, difficulty: Difficulty) {
        info!("Restarting game as {}", difficulty);
        *self = Self::new(difficulty);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn board_model(&self, expose_hidden: bool) -> models::Board {
        self.board.to_model(expose_hidden)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn reveal(&mut self, row: usize, col: usize) -> Result<GameStatus, GameError> {
        if self.game_over {
            debug!("Ignoring reveal on finished game at ({}, {})", row, col);
            return Ok(GameStatus::GameOver);
        }

        self.last_activity = Instant::now();

        let cell = self.board.cell(row, col)?;
        if cell.is_revealed() || cell.is_flagged() {
            debug!("Cell ({}, {}) is already revealed or flagged", row, col);
            return Ok(GameStatus::AlreadyRevealed);
        }

        if cell.is_mine() {
            warn!("Player hit mine at ({}, {}) - game over!", row, col);
            let mines = self.board.reveal_all_mines();
            self.game_over = true;
            info!("Game ended with loss, revealed {} mines", mines);
            return Ok(GameStatus::GameOver);
        }

        let opened = logic::reveal(&mut self.board, row, col)?;
        if logic::check_win(&self.board) {
            self.game_over = true;
            info!("Game won! All safe cells revealed.");
            Ok(GameStatus::Win)
        } else {
            debug!("Revealed {} cells, game continues", opened);
            Ok(GameStatus::Continue)
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> Result<GameStatus, GameError> {
        if self.game_over {
            debug!("Ignoring flag on finished game at ({}, {})", row, col);
            return Ok(GameStatus::GameOver);
        }

        self.last_activity = Instant::now();

        if !self.board.toggle_flag(row, col)? {
            debug!("Ignoring flag on revealed cell ({}, {})", row, col);
        }
        Ok(GameStatus::Continue)
    }

    /// Scores the board as it stands after `elapsed_secs` of play.
    pub fn final_score(&mut self, elapsed_secs: u32) -> i64 {
        self.last_activity = Instant::now();
        let score = logic::final_score(&self.board, elapsed_secs);
        info!("Scored {} after {}s", score, elapsed_secs);
        score
    }

    pub fn should_cleanup(&self, inactive_timeout: Duration) -> bool {
        self.last_activity.elapsed() > inactive_timeout
    }
}

const MIN_ID_LENGTH: usize = 5;
const ID_ATTEMPTS_PER_LENGTH: usize = 10;

/// All live sessions, keyed by their short random id.
///
/// Each session sits behind its own async mutex, so actions on one game are serialized while
/// different games proceed independently.
#[derive(Debug, Clone, Default)]
pub struct Sessions {
    inner: Arc<DashMap<String, Arc<Mutex<Session>>>>,
}

impl Sessions {
    /// Stores `session` under a fresh id and returns the id.
    ///
    /// Ids grow by one character whenever every attempt at the current length collides.
    #[instrument(level = "trace", skip(self, session))]
    pub fn register(&self, session: Session) -> String {
        let mut id_length = MIN_ID_LENGTH;

        loop {
            for _ in 0..ID_ATTEMPTS_PER_LENGTH {
                let id = nanoid!(id_length);
                if let Entry::Vacant(slot) = self.inner.entry(id.clone()) {
                    slot.insert(Arc::new(Mutex::new(session)));
                    info!("Created new session with ID: {}", id);
                    return id;
                }
                debug!("Session ID collision on {}", id);
            }

            id_length += 1;
            warn!("Session ids are crowded, lengthening them to {}", id_length);
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.inner.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drops sessions idle for longer than `inactive_timeout` and returns how many went away.
    /// A session that is locked right now is in use and stays.
    pub fn evict_idle(&self, inactive_timeout: Duration) -> usize {
        let mut evicted = 0;

        self.inner.retain(|id, session| {
            let idle = session
                .try_lock()
                .is_ok_and(|session| session.should_cleanup(inactive_timeout));
            if idle {
                debug!("Evicting idle session: {}", id);
                evicted += 1;
            }
            !idle
        });

        if evicted > 0 {
            info!("Evicted {} inactive sessions", evicted);
        }
        evicted
    }
}
