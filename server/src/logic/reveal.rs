use super::{Board, error::Result};

/// Opens `(row, col)` and flood-fills outward through cells with no adjacent mines.
///
/// Revealed and flagged cells are left untouched, which also stops the fill from visiting a
/// cell twice. A mine is marked revealed but never expanded, and the border of numbered cells
/// around a zero region is revealed without cascading further. Returns how many cells were
/// newly revealed.
pub fn reveal(board: &mut Board, row: usize, col: usize) -> Result<usize> {
    board.cell(row, col)?;

    let mut revealed = 0;
    let mut to_visit = vec![(row, col)];

    while let Some((r, c)) = to_visit.pop() {
        let cell = board.cell_mut(r, c)?;
        if cell.revealed || cell.flagged {
            continue;
        }

        cell.revealed = true;
        revealed += 1;

        if cell.mine || cell.adjacent > 0 {
            continue;
        }

        to_visit.extend(
            board
                .neighbors(r, c)
                .filter(|&(nr, nc)| board.cell(nr, nc).is_ok_and(|cell| !cell.revealed)),
        );
    }

    Ok(revealed)
}

/// True once every cell without a mine has been revealed.
pub fn check_win(board: &Board) -> bool {
    board.cells().all(|cell| cell.mine || cell.revealed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::GameError;

    fn revealed_set(board: &Board) -> Vec<(usize, usize)> {
        (0..board.rows())
            .flat_map(|row| (0..board.cols()).map(move |col| (row, col)))
            .filter(|&(row, col)| board.cell(row, col).unwrap().is_revealed())
            .collect()
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut board = Board::from_mines(2, 2, &[(0, 0)]).unwrap();

        assert_eq!(reveal(&mut board, 1, 1).unwrap(), 1);

        assert_eq!(revealed_set(&board), vec![(1, 1)]);
        assert!(!check_win(&board));
    }

    #[test]
    fn revealing_the_last_safe_cell_wins() {
        let mut board = Board::from_mines(2, 2, &[(0, 0)]).unwrap();

        reveal(&mut board, 0, 1).unwrap();
        reveal(&mut board, 1, 0).unwrap();
        assert!(!check_win(&board));
        reveal(&mut board, 1, 1).unwrap();

        assert!(check_win(&board));
        assert!(!board.cell(0, 0).unwrap().is_revealed());
    }

    #[test]
    fn zero_region_opens_with_its_numbered_border() {
        // . . . .
        // . . 1 1
        // . . 1 *
        let mut board = Board::from_mines(3, 4, &[(2, 3)]).unwrap();

        let opened = reveal(&mut board, 0, 0).unwrap();

        assert_eq!(opened, 11);
        assert!(!board.cell(2, 3).unwrap().is_revealed());
        assert!(check_win(&board));
    }

    #[test]
    fn fill_stops_at_numbered_cells() {
        // . 1 * 1 .
        // . 1 1 1 .
        let mut board = Board::from_mines(2, 5, &[(0, 2)]).unwrap();

        reveal(&mut board, 0, 0).unwrap();

        assert_eq!(revealed_set(&board), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn mine_free_board_reveals_every_cell_once() {
        let mut board = Board::from_mines(16, 30, &[]).unwrap();

        let opened = reveal(&mut board, 7, 11).unwrap();

        assert_eq!(opened, 16 * 30);
        assert!(board.cells().all(|cell| cell.is_revealed()));
        assert!(check_win(&board));
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = Board::from_mines(5, 5, &[(4, 4), (0, 4)]).unwrap();

        reveal(&mut board, 2, 0).unwrap();
        let once = revealed_set(&board);
        let again = reveal(&mut board, 2, 0).unwrap();

        assert_eq!(again, 0);
        assert_eq!(revealed_set(&board), once);
    }

    #[test]
    fn flagged_cells_block_the_fill() {
        let mut board = Board::from_mines(1, 4, &[]).unwrap();
        board.toggle_flag(0, 2).unwrap();

        reveal(&mut board, 0, 0).unwrap();

        assert_eq!(revealed_set(&board), vec![(0, 0), (0, 1)]);
        assert_eq!(reveal(&mut board, 0, 2).unwrap(), 0);
        assert!(!check_win(&board));
    }

    #[test]
    fn mine_is_marked_but_not_expanded() {
        let mut board = Board::from_mines(3, 3, &[(1, 1)]).unwrap();

        assert_eq!(reveal(&mut board, 1, 1).unwrap(), 1);
        assert_eq!(revealed_set(&board), vec![(1, 1)]);
    }

    #[test]
    fn unrevealing_any_safe_cell_breaks_the_win() {
        let mines = [(0, 0), (3, 3)];
        let mut board = Board::from_mines(4, 4, &mines).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                if !mines.contains(&(row, col)) {
                    board.cell_mut(row, col).unwrap().revealed = true;
                }
            }
        }
        assert!(check_win(&board));

        for row in 0..4 {
            for col in 0..4 {
                if mines.contains(&(row, col)) {
                    continue;
                }
                let mut flipped = board.clone();
                flipped.cell_mut(row, col).unwrap().revealed = false;
                assert!(!check_win(&flipped), "({row}, {col}) hidden should not win");
            }
        }
    }

    #[test]
    fn out_of_range_reveal_is_rejected() {
        let mut board = Board::from_mines(2, 2, &[]).unwrap();

        assert_eq!(
            reveal(&mut board, 2, 0),
            Err(GameError::InvalidCoordinate { row: 2, col: 0 })
        );
        assert!(revealed_set(&board).is_empty());
    }
}
