use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows and columns.
pub type Coord = u8;

/// Count type used for moves, seconds and tile counts.
pub type Count = u32;

/// Two-dimensional coordinates `(row, col)`, origin top-left.
pub type Coord2 = (Coord, Coord);

/// Boards are always square with this many rows and columns.
pub const BOARD_SIZE: Coord = 6;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// One of the four unit pushes an arrow can point in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector as `(d_row, d_col)`.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Applies `dir` to `coords`, returning a value only when it remains on the board.
pub fn step(coords: Coord2, dir: Direction) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = dir.delta();

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= BOARD_SIZE {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= BOARD_SIZE {
        return None;
    }

    Some((next_row, next_col))
}

/// Walks from `coords` in `dir`, yielding every in-bounds cell including the start.
#[derive(Clone, Debug)]
pub struct RayIter {
    next: Option<Coord2>,
    dir: Direction,
}

impl RayIter {
    pub fn new(start: Coord2, dir: Direction) -> Self {
        let next = (start.0 < BOARD_SIZE && start.1 < BOARD_SIZE).then_some(start);
        Self { next, dir }
    }
}

impl Iterator for RayIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = step(current, self.dir);
        Some(current)
    }
}

/// Every coordinate on the board in row-major order.
pub fn all_coords() -> impl Iterator<Item = Coord2> + Clone {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
}
