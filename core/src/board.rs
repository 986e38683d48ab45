use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed 6x6 grid of tiles, row-major, origin top-left.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Board {
    cells: Array2<Tile>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: Array2::default([BOARD_SIZE as usize; 2]),
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < BOARD_SIZE && coords.1 < BOARD_SIZE {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.validate_coords(coords).ok().map(|coords| self[coords])
    }

    /// Cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        all_coords().map(|coords| (coords, self[coords]))
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Tile> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }

    pub fn count(&self, pred: impl Fn(Tile) -> bool) -> Count {
        self.cells.iter().filter(|&&tile| pred(tile)).count() as Count
    }

    /// Win condition: nothing pushable is left anywhere.
    pub fn is_cleared(&self) -> bool {
        !self.cells.iter().any(|tile| tile.is_pushable())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self> {
        let size = BOARD_SIZE as usize;
        if rows.len() != size || rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut board = Self::new();
        for (coords, tile) in all_coords().zip(rows.into_iter().flatten()) {
            board[coords] = tile;
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Vec<Tile>> {
    fn from(board: Board) -> Self {
        board.rows().map(|row| row.collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_board_is_blank_and_cleared() {
        let board = Board::new();
        assert_eq!(board.count(|t| t == Tile::Blank), 36);
        assert!(board.is_cleared());
    }

    #[test]
    fn holes_do_not_block_the_win() {
        let mut board = Board::new();
        board[(2, 2)] = Tile::Hole;
        assert!(board.is_cleared());

        board[(0, 0)] = Tile::Drill;
        assert!(!board.is_cleared());
    }

    #[test]
    fn rows_round_trip_preserves_layout() {
        let mut board = Board::new();
        board[(0, 5)] = Tile::Block;
        board[(5, 0)] = Tile::Arrow(Direction::Up);

        let rows: Vec<Vec<Tile>> = board.clone().into();
        assert_eq!(rows[0][5], Tile::Block);
        assert_eq!(rows[5][0], Tile::Arrow(Direction::Up));
        assert_eq!(Board::try_from(rows), Ok(board));
    }

    #[test]
    fn rejects_wrong_shape() {
        let rows = vec![vec![Tile::Blank; 6]; 5];
        assert_eq!(Board::try_from(rows), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn tile_at_is_bounds_checked() {
        let board = Board::new();
        assert_eq!(board.tile_at((6, 0)), None);
        assert_eq!(board.tile_at((5, 5)), Some(Tile::Blank));
    }
}
