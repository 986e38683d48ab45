use smallvec::SmallVec;

use crate::*;

/// Ordered run of pushable cells starting at the activated cell.
pub type Chain = SmallVec<[Coord2; BOARD_SIZE as usize]>;

/// Result of resolving one activation against a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushOutcome {
    pub board: Board,
    pub moved: bool,
}

/// Collects the chain of pushable cells from `origin` towards `dir`.
pub fn collect_chain(board: &Board, origin: Coord2, dir: Direction) -> Chain {
    RayIter::new(origin, dir)
        .take_while(|&coords| board[coords].is_pushable())
        .collect()
}

/// Pushes the chain starting at `origin` exactly one step, without the double-arrow follow-up.
///
/// Cells are evaluated from the far end of the chain back to the origin, so a cell that
/// vacates its square lets the one behind it move in the same activation.
pub fn push_once(board: &Board, origin: Coord2, dir: Direction) -> PushOutcome {
    let chain = collect_chain(board, origin, dir);
    let mut board = board.clone();
    let mut moved = false;

    for &coords in chain.iter().rev() {
        let Some(target) = step(coords, dir) else {
            log::trace!("{:?} blocked by the edge", coords);
            continue;
        };

        match board[target] {
            Tile::Hole => {
                log::trace!("{:?} fell into the hole at {:?}", board[coords], target);
                board[coords] = Tile::Blank;
                moved = true;
            }
            Tile::Blank => {
                log::trace!("{:?} slid {:?} -> {:?}", board[coords], coords, target);
                board[target] = board[coords];
                board[coords] = Tile::Blank;
                moved = true;
            }
            _ => {}
        }
    }

    PushOutcome { board, moved }
}

/// Resolves a full activation from `origin` towards `dir`.
///
/// A double arrow that moved is pushed a second time from its new cell. If it fell into a
/// hole on the first step there is nothing left to push and the second step is skipped.
pub fn resolve_push(board: &Board, origin: Coord2, dir: Direction) -> PushOutcome {
    let kind = board[origin];
    let first = push_once(board, origin, dir);

    if !kind.is_double_arrow() || !first.moved {
        return first;
    }

    // a moving chain always advances its origin by exactly one cell
    let Some(landed) = step(origin, dir).filter(|&coords| first.board[coords] == kind) else {
        log::trace!("{:?} left the board, no second push", kind);
        return first;
    };

    log::trace!("second push for {:?} from {:?}", kind, landed);
    let second = push_once(&first.board, landed, dir);
    PushOutcome {
        board: second.board,
        moved: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;
    use Tile::*;

    fn row_board(row: [Tile; 6]) -> Board {
        let mut board = Board::new();
        for (col, tile) in row.into_iter().enumerate() {
            board[(0, col as Coord)] = tile;
        }
        board
    }

    fn row_of(board: &Board) -> [Tile; 6] {
        core::array::from_fn(|col| board[(0, col as Coord)])
    }

    #[test]
    fn single_arrow_slides_one_cell() {
        let board = row_board([Arrow(Right), Blank, Blank, Blank, Blank, Blank]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(
            row_of(&outcome.board),
            [Blank, Arrow(Right), Blank, Blank, Blank, Blank]
        );
    }

    #[test]
    fn arrow_against_the_edge_is_a_no_op() {
        let board = row_board([Blank, Blank, Blank, Blank, Blank, Arrow(Right)]);

        let outcome = resolve_push(&board, (0, 5), Right);

        assert!(!outcome.moved);
        assert_eq!(outcome.board, board);
    }

    #[test]
    fn empty_chain_leaves_board_unchanged() {
        let board = row_board([Blank, Hole, Block, Blank, Blank, Blank]);

        for origin in [(0, 0), (0, 1), (3, 3)] {
            for dir in Direction::ALL {
                let outcome = resolve_push(&board, origin, dir);
                assert!(!outcome.moved);
                assert_eq!(outcome.board, board);
            }
        }
    }

    #[test]
    fn whole_chain_moves_when_the_far_end_has_room() {
        let board = row_board([Arrow(Right), Block, Cracked, Blank, Blank, Blank]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(
            row_of(&outcome.board),
            [Blank, Arrow(Right), Block, Cracked, Blank, Blank]
        );
    }

    #[test]
    fn chain_against_the_edge_does_not_move() {
        let board = row_board([Blank, Blank, Blank, Arrow(Right), Block, Block]);

        let outcome = resolve_push(&board, (0, 3), Right);

        assert!(!outcome.moved);
        assert_eq!(outcome.board, board);
    }

    #[test]
    fn far_end_falls_into_hole_and_the_rest_follow() {
        let board = row_board([Arrow(Right), Block, Hole, Blank, Blank, Blank]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(
            row_of(&outcome.board),
            [Blank, Arrow(Right), Hole, Blank, Blank, Blank]
        );
    }

    #[test]
    fn hole_keeps_absorbing_tiles() {
        let board = row_board([Arrow(Right), Block, Hole, Blank, Blank, Blank]);

        let first = resolve_push(&board, (0, 0), Right);
        let second = resolve_push(&first.board, (0, 1), Right);

        assert!(second.moved);
        assert_eq!(row_of(&second.board), [Blank, Blank, Hole, Blank, Blank, Blank]);
        assert!(second.board.is_cleared());
    }

    #[test]
    fn double_arrow_moves_two_cells_for_one_activation() {
        let board = row_board([DoubleArrow(Right), Blank, Blank, Block, Block, Block]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(
            row_of(&outcome.board),
            [Blank, Blank, DoubleArrow(Right), Block, Block, Block]
        );
    }

    #[test]
    fn double_arrow_stops_after_one_cell_when_blocked() {
        let board = row_board([DoubleArrow(Right), Blank, Block, Block, Block, Block]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(
            row_of(&outcome.board),
            [Blank, DoubleArrow(Right), Block, Block, Block, Block]
        );
    }

    #[test]
    fn double_arrow_that_falls_skips_the_second_push() {
        let board = row_board([DoubleArrow(Right), Hole, Blank, Blank, Blank, Blank]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(row_of(&outcome.board), [Blank, Hole, Blank, Blank, Blank, Blank]);
    }

    #[test]
    fn double_arrow_can_drop_a_block_on_the_second_push() {
        let board = row_board([DoubleArrow(Right), Block, Blank, Hole, Blank, Blank]);

        let outcome = resolve_push(&board, (0, 0), Right);

        assert!(outcome.moved);
        assert_eq!(
            row_of(&outcome.board),
            [Blank, Blank, DoubleArrow(Right), Hole, Blank, Blank]
        );
    }

    #[test]
    fn repeated_pushes_terminate_within_board_size() {
        let board = row_board([Arrow(Right), Block, Blank, Blank, Blank, Blank]);
        let mut current = board;
        let mut origin = (0, 0);
        let mut calls = 0;

        loop {
            calls += 1;
            let outcome = resolve_push(&current, origin, Right);
            if !outcome.moved {
                break;
            }
            current = outcome.board;
            origin = step(origin, Right).unwrap();
        }

        assert!(calls <= BOARD_SIZE as usize);
        assert_eq!(current.count(|t| t == Block), 1);
        assert_eq!(current.count(|t| t == Arrow(Right)), 1);
    }

    #[test]
    fn vertical_push_uses_rows() {
        let mut board = Board::new();
        board[(5, 2)] = Arrow(Up);
        board[(4, 2)] = Block;
        board[(2, 2)] = Hole;

        let outcome = resolve_push(&board, (5, 2), Up);

        assert!(outcome.moved);
        assert_eq!(outcome.board[(3, 2)], Block);
        assert_eq!(outcome.board[(4, 2)], Arrow(Up));
        assert_eq!(outcome.board[(5, 2)], Blank);
    }
}
