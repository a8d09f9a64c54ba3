use serde::{Deserialize, Serialize};

/// One cell of a serialized board.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub mine: bool,
    pub count: u8,
    pub revealed: bool,
    pub flagged: bool,
}

/// Rows of cells, outer index is the row.
pub type Board = Vec<Vec<Cell>>;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GameStatus {
    #[serde(rename = "new game started")]
    NewGame,
    #[serde(rename = "continue")]
    Continue,
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "game over")]
    GameOver,
    #[serde(rename = "already revealed")]
    AlreadyRevealed,
}
