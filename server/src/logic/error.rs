use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell ({row}, {col}) is outside the board")]
    InvalidCoordinate { row: usize, col: usize },
    #[error("{mines} mines do not fit on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
