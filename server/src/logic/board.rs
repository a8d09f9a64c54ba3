use std::collections::HashSet;

use minesweeper_common::models;
use rand::Rng;

use super::{
    Difficulty,
    error::{GameError, Result},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent: u8,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.mine
    }

    /// Number of mines among the cell's neighbours. Fixed once the board is built.
    pub fn adjacent(&self) -> u8 {
        self.adjacent
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    fn to_model(self, expose_hidden: bool) -> models::Cell {
        if self.revealed || expose_hidden {
            models::Cell {
                mine: self.mine,
                count: self.adjacent,
                revealed: self.revealed,
                flagged: self.flagged,
            }
        } else {
            models::Cell {
                flagged: self.flagged,
                ..Default::default()
            }
        }
    }
}

/// A rectangular minefield stored row-major.
///
/// Mine positions and adjacency counts are fixed at construction; afterwards only the
/// `revealed` and `flagged` state of cells changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    mines: usize,
    cells: Vec<Cell>,
}

/// Picks `mines` of `length` slots uniformly without replacement.
fn place_mines<R: Rng + ?Sized>(length: usize, mines: usize, rng: &mut R) -> Vec<bool> {
    let mut layout = Vec::with_capacity(length);

    let mut mines_left = mines;
    for cells_left in (1..=length).rev() {
        let value = rng.random_ratio(mines_left as u32, cells_left as u32);
        layout.push(value);
        if value {
            mines_left -= 1;
        }
    }

    layout
}

fn neighbors_of(
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
) -> impl Iterator<Item = (usize, usize)> {
    (-1isize..=1)
        .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
        .filter(|&offset| offset != (0, 0))
        .filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < rows && c < cols).then_some((r, c))
        })
}

impl Board {
    /// Builds a fresh board for `difficulty` using the thread-local random source.
    pub fn generate(difficulty: Difficulty) -> Self {
        Self::generate_with_rng(difficulty, &mut rand::rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let settings = difficulty.settings();
        let layout = place_mines(settings.rows * settings.cols, settings.mines, rng);
        Self::from_layout(settings.rows, settings.cols, layout)
    }

    /// Builds a board with mines at exactly the given `(row, col)` coordinates.
    ///
    /// Duplicate coordinates count once. At least one cell must stay free of mines.
    pub fn from_mines(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Result<Self> {
        let cells = rows * cols;
        let mut layout = vec![false; cells];

        for &(row, col) in mines {
            if row >= rows || col >= cols {
                return Err(GameError::InvalidCoordinate { row, col });
            }
            layout[row * cols + col] = true;
        }

        let distinct = mines.iter().collect::<HashSet<_>>().len();
        if distinct >= cells {
            return Err(GameError::TooManyMines {
                mines: distinct,
                cells,
            });
        }

        Ok(Self::from_layout(rows, cols, layout))
    }

    fn from_layout(rows: usize, cols: usize, layout: Vec<bool>) -> Self {
        let mut cells: Vec<Cell> = layout
            .iter()
            .map(|&mine| Cell {
                mine,
                ..Default::default()
            })
            .collect();

        for (index, cell) in cells.iter_mut().enumerate() {
            let (row, col) = (index / cols, index % cols);
            cell.adjacent = neighbors_of(rows, cols, row, col)
                .filter(|&(r, c)| layout[r * cols + c])
                .count() as u8;
        }

        Self {
            rows,
            cols,
            mines: layout.iter().filter(|&&mine| mine).count(),
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        let index = self.index(row, col)?;
        Ok(&self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let index = self.index(row, col)?;
        Ok(&mut self.cells[index])
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GameError::InvalidCoordinate { row, col })
        }
    }

    /// The in-bounds cells touching `(row, col)`, at most eight of them.
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + use<> {
        neighbors_of(self.rows, self.cols, row, col)
    }

    /// Flips the flag on a hidden cell. Returns whether anything changed; revealed cells are
    /// left alone.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> Result<bool> {
        let cell = self.cell_mut(row, col)?;
        if cell.revealed {
            return Ok(false);
        }
        cell.flagged = !cell.flagged;
        Ok(true)
    }

    /// Marks every mine revealed and returns how many there are.
    pub fn reveal_all_mines(&mut self) -> usize {
        let mut revealed = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.mine) {
            cell.revealed = true;
            revealed += 1;
        }
        revealed
    }

    /// Serializes the grid row by row. Unless `expose_hidden` is set, cells that are still
    /// hidden report neither their mine nor their count.
    pub fn to_model(&self, expose_hidden: bool) -> models::Board {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.to_model(expose_hidden)).collect())
            .collect()
    }
}
