//! Pure move-generation and capture-resolution queries. Everything here is
//! a function of a board and a piece set; nothing mutates, so callers may
//! interleave and repeat queries freely.

use crate::board::{Board, Direction, GameError, Position};
use crate::pieces::{Colour, PieceSet};
use serde::{Deserialize, Serialize};

/// Which mechanic a capturing move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureKind {
    Approach,
    Withdrawal,
}

/// Squares the piece at `from` may move to: line-adjacent, unoccupied, and
/// not repeating `last` (the round's most recent move direction; `None`
/// excludes nothing). Recomputed from scratch on every call.
pub fn legal_targets(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    last: Option<Direction>,
) -> Vec<Position> {
    board
        .neighbours(from)
        .into_iter()
        .filter(|&target| pieces.is_empty_square(target))
        .filter(|&target| Direction::between(from, target) != last)
        .collect()
}

/// Opposing pieces removed if the piece at `from` moves to the adjacent
/// square `dest` and captures by approach: the contiguous run of enemies
/// starting one step beyond `dest` in the move direction, nearest first.
///
/// A `dest` further than one step away is a caller contract violation, not
/// a game-rule rejection; inputs that passed [`legal_targets`] never
/// trigger it.
pub fn capture_by_approach(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    dest: Position,
) -> Result<Vec<Position>, GameError> {
    check_adjacent(from, dest)?;
    Ok(approach_run(board, pieces, from, dest))
}

/// Opposing pieces removed if the piece at `from` moves to the adjacent
/// square `dest` and captures by withdrawal: the contiguous run of enemies
/// starting one step behind the vacated square, away from `dest`.
///
/// Same adjacency contract as [`capture_by_approach`].
pub fn capture_by_withdrawal(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    dest: Position,
) -> Result<Vec<Position>, GameError> {
    check_adjacent(from, dest)?;
    Ok(withdrawal_run(board, pieces, from, dest))
}

pub(crate) fn approach_run(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    dest: Position,
) -> Vec<Position> {
    let Some(colour) = pieces.colour_at(from) else {
        return Vec::new();
    };
    let Some(dir) = Direction::between(from, dest) else {
        return Vec::new();
    };
    capture_run(board, pieces, colour.opponent(), board.step(dest, dir), dir)
}

pub(crate) fn withdrawal_run(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    dest: Position,
) -> Vec<Position> {
    let Some(colour) = pieces.colour_at(from) else {
        return Vec::new();
    };
    let Some(dir) = Direction::between(from, dest) else {
        return Vec::new();
    };
    let back = dir.opposite();
    capture_run(board, pieces, colour.opponent(), board.step(from, back), back)
}

/// Walks `dir` from `start`, collecting `prey`-coloured pieces until the
/// first empty square, friendly piece, or board edge.
fn capture_run(
    board: &Board,
    pieces: &PieceSet,
    prey: Colour,
    start: Option<Position>,
    dir: Direction,
) -> Vec<Position> {
    let mut captured = Vec::new();
    let mut cursor = start;
    while let Some(square) = cursor {
        if pieces.colour_at(square) != Some(prey) {
            break;
        }
        captured.push(square);
        cursor = board.step(square, dir);
    }
    captured
}

/// The subset of `targets` that capture by approach for the piece at
/// `from`: those with an enemy on the square immediately beyond.
pub fn approach_candidates(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    targets: &[Position],
) -> Vec<Position> {
    let Some(colour) = pieces.colour_at(from) else {
        return Vec::new();
    };
    targets
        .iter()
        .copied()
        .filter(|&target| {
            Direction::between(from, target)
                .and_then(|dir| board.step(target, dir))
                .is_some_and(|beyond| pieces.colour_at(beyond) == Some(colour.opponent()))
        })
        .collect()
}

/// The subset of `targets` that capture by withdrawal for the piece at
/// `from`: those with an enemy on the square immediately behind the piece,
/// opposite the move direction.
pub fn withdrawal_candidates(
    board: &Board,
    pieces: &PieceSet,
    from: Position,
    targets: &[Position],
) -> Vec<Position> {
    let Some(colour) = pieces.colour_at(from) else {
        return Vec::new();
    };
    targets
        .iter()
        .copied()
        .filter(|&target| {
            Direction::between(from, target)
                .and_then(|dir| board.step(from, dir.opposite()))
                .is_some_and(|behind| pieces.colour_at(behind) == Some(colour.opponent()))
        })
        .collect()
}

/// Whether the piece at `from` has any capturing move at all. Used for the
/// forced-capture rule at the start of a round, where the direction and
/// history filters are necessarily empty.
pub fn can_capture(board: &Board, pieces: &PieceSet, from: Position) -> bool {
    let targets = legal_targets(board, pieces, from, None);
    !approach_candidates(board, pieces, from, &targets).is_empty()
        || !withdrawal_candidates(board, pieces, from, &targets).is_empty()
}

fn check_adjacent(from: Position, dest: Position) -> Result<(), GameError> {
    if from.chebyshev(dest) > 1 {
        return Err(GameError::NotAdjacent { from, dest });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(white: &[(usize, usize)], black: &[(usize, usize)]) -> (Board, PieceSet) {
        let board = Board::standard();
        let mut pieces = PieceSet::starting_positions(&board);
        pieces.clear();
        for &(row, col) in white {
            pieces.put(Position::new(row, col), Colour::White);
        }
        for &(row, col) in black {
            pieces.put(Position::new(row, col), Colour::Black);
        }
        (board, pieces)
    }

    fn at(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn positions(coords: &[(usize, usize)]) -> Vec<Position> {
        coords.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    fn sorted(mut v: Vec<Position>) -> Vec<Position> {
        v.sort();
        v
    }

    #[test]
    fn non_adjacent_destination_is_a_contract_violation() {
        let (board, pieces) = setup(&[(1, 2)], &[]);
        assert!(matches!(
            capture_by_approach(&board, &pieces, at(1, 2), at(1, 4)),
            Err(GameError::NotAdjacent { .. })
        ));
        assert!(matches!(
            capture_by_withdrawal(&board, &pieces, at(1, 2), at(3, 3)),
            Err(GameError::NotAdjacent { .. })
        ));
    }

    #[test]
    fn zero_distance_yields_an_empty_run() {
        let (board, pieces) = setup(&[(2, 2)], &[(2, 3)]);
        assert_eq!(
            capture_by_approach(&board, &pieces, at(2, 2), at(2, 2)).unwrap(),
            vec![]
        );
        assert_eq!(
            capture_by_withdrawal(&board, &pieces, at(2, 2), at(2, 2)).unwrap(),
            vec![]
        );
    }

    #[test]
    fn approach_captures_in_every_direction() {
        // (white pawn, destination, black pieces, expected run nearest-first)
        let cases: &[((usize, usize), (usize, usize), [(usize, usize); 2])] = &[
            ((1, 2), (2, 3), [(3, 4), (4, 5)]), // SE
            ((1, 2), (2, 2), [(3, 2), (4, 2)]), // S
            ((1, 5), (2, 4), [(3, 3), (4, 2)]), // SW
            ((1, 1), (1, 2), [(1, 3), (1, 4)]), // E
            ((1, 5), (1, 4), [(1, 3), (1, 2)]), // W
            ((4, 2), (3, 2), [(2, 2), (1, 2)]), // N
            ((4, 1), (3, 2), [(2, 3), (1, 4)]), // NE
            ((4, 4), (3, 3), [(2, 2), (1, 1)]), // NW
        ];
        for &(pawn, dest, blacks) in cases {
            let (board, pieces) = setup(&[pawn], &blacks);
            let run = capture_by_approach(
                &board,
                &pieces,
                at(pawn.0, pawn.1),
                at(dest.0, dest.1),
            )
            .unwrap();
            assert_eq!(run, positions(&blacks), "approach {:?} -> {:?}", pawn, dest);
        }
    }

    #[test]
    fn withdrawal_captures_in_every_direction() {
        // (white pawn, destination, black pieces, expected run nearest-first)
        let cases: &[((usize, usize), (usize, usize), [(usize, usize); 2])] = &[
            ((2, 3), (1, 2), [(3, 4), (4, 5)]),
            ((3, 4), (4, 5), [(2, 3), (1, 2)]),
            ((3, 2), (4, 1), [(2, 3), (1, 4)]),
            ((2, 3), (1, 4), [(3, 2), (4, 1)]),
            ((1, 3), (1, 2), [(1, 4), (1, 5)]),
            ((1, 3), (1, 4), [(1, 2), (1, 1)]),
            ((3, 1), (4, 1), [(2, 1), (1, 1)]),
            ((2, 1), (1, 1), [(3, 1), (4, 1)]),
        ];
        for &(pawn, dest, blacks) in cases {
            let (board, pieces) = setup(&[pawn], &blacks);
            let run = capture_by_withdrawal(
                &board,
                &pieces,
                at(pawn.0, pawn.1),
                at(dest.0, dest.1),
            )
            .unwrap();
            assert_eq!(
                run,
                positions(&blacks),
                "withdrawal {:?} -> {:?}",
                pawn,
                dest
            );
        }
    }

    #[test]
    fn a_gap_ends_the_run() {
        let (board, pieces) = setup(&[(1, 1)], &[(1, 3), (1, 5)]);
        let run = capture_by_approach(&board, &pieces, at(1, 1), at(1, 2)).unwrap();
        assert_eq!(run, positions(&[(1, 3)]));
    }

    #[test]
    fn a_friendly_piece_ends_the_run() {
        let (board, pieces) = setup(&[(1, 1), (1, 4)], &[(1, 3), (1, 5)]);
        let run = capture_by_approach(&board, &pieces, at(1, 1), at(1, 2)).unwrap();
        assert_eq!(run, positions(&[(1, 3)]));
    }

    #[test]
    fn no_qualifying_run_is_empty() {
        let (board, pieces) = setup(&[(2, 2)], &[(5, 9)]);
        assert_eq!(
            capture_by_approach(&board, &pieces, at(2, 2), at(2, 3)).unwrap(),
            vec![]
        );
        assert_eq!(
            capture_by_withdrawal(&board, &pieces, at(2, 2), at(2, 3)).unwrap(),
            vec![]
        );
    }

    #[test]
    fn legal_targets_exclude_occupied_squares() {
        let (board, pieces) = setup(&[(1, 1)], &[(1, 2)]);
        let targets = legal_targets(&board, &pieces, at(1, 1), None);
        assert_eq!(sorted(targets), sorted(positions(&[(2, 1), (2, 2)])));
    }

    #[test]
    fn legal_targets_exclude_the_last_move_direction() {
        let (board, pieces) = setup(&[(1, 2)], &[]);
        let unfiltered = legal_targets(&board, &pieces, at(1, 2), None);
        assert_eq!(
            sorted(unfiltered),
            sorted(positions(&[(1, 1), (1, 3), (2, 2)]))
        );
        let filtered = legal_targets(&board, &pieces, at(1, 2), Some(Direction::E));
        assert_eq!(sorted(filtered), sorted(positions(&[(1, 1), (2, 2)])));
    }

    #[test]
    fn approach_candidates_surround_a_strong_intersection() {
        let (board, pieces) = setup(
            &[(3, 3)],
            &[
                (1, 1),
                (1, 3),
                (1, 5),
                (3, 5),
                (3, 1),
                (5, 1),
                (5, 3),
                (5, 5),
            ],
        );
        let targets = legal_targets(&board, &pieces, at(3, 3), None);
        let candidates = approach_candidates(&board, &pieces, at(3, 3), &targets);
        assert_eq!(sorted(candidates), sorted(targets));
    }

    #[test]
    fn withdrawal_candidates_behind_the_piece() {
        let (board, pieces) = setup(&[(2, 2)], &[(1, 1), (1, 2), (1, 3), (2, 1)]);
        let targets = legal_targets(&board, &pieces, at(2, 2), None);
        let candidates = withdrawal_candidates(&board, &pieces, at(2, 2), &targets);
        assert_eq!(
            sorted(candidates),
            sorted(positions(&[(3, 2), (2, 3), (3, 3), (3, 1)]))
        );
    }

    #[test]
    fn can_capture_sees_both_mechanics() {
        let (board, pieces) = setup(&[(2, 2)], &[(2, 4)]);
        assert!(can_capture(&board, &pieces, at(2, 2)));

        let (board, pieces) = setup(&[(2, 2), (5, 9)], &[(2, 1)]);
        // White at (2,2) can withdraw east away from the black at (2,1).
        assert!(can_capture(&board, &pieces, at(2, 2)));
        assert!(!can_capture(&board, &pieces, at(5, 9)));
    }

    #[test]
    fn queries_are_idempotent() {
        let (board, pieces) = setup(&[(3, 3)], &[(3, 5), (1, 3)]);
        let first = legal_targets(&board, &pieces, at(3, 3), None);
        let second = legal_targets(&board, &pieces, at(3, 3), None);
        assert_eq!(first, second);
        let run1 = capture_by_approach(&board, &pieces, at(3, 3), at(3, 4)).unwrap();
        let run2 = capture_by_approach(&board, &pieces, at(3, 3), at(3, 4)).unwrap();
        assert_eq!(run1, run2);
    }
}
