//! Square selection rules: predicates deciding whether a target square is
//! reachable from an origin under one geometric/occupancy condition.
//!
//! Rules only capture construction data (depth, owner). The board and the
//! origin are supplied on every evaluation, so a rule stays valid while the
//! piece it belongs to moves around.

use crate::board::board::Board;
use crate::board::checkers_types::{Coordinate, Player};

pub trait SelectionRule {
    fn evaluate(&self, board: &Board, origin: Coordinate, target: Coordinate) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareSelectionRule {
    /// Target is `n` diagonal steps away in any direction, `1 <= n <= depth`.
    DiagonalExtents { depth: u8 },

    /// Target is exactly `depth` diagonal steps away with any piece between.
    DiagonalExtentsWithPieceBetween { depth: u8 },

    /// Target is exactly `depth` diagonal steps away with a piece owned by
    /// `owner` between.
    DiagonalExtentsWithCurrentPlayersPieceBetween { depth: u8, owner: Player },

    /// Target is exactly `depth` diagonal steps away with a piece not owned by
    /// `owner` between.
    DiagonalExtentsWithOtherThanCurrentPlayersPieceBetween { depth: u8, owner: Player },

    /// Target square holds no piece.
    EmptySquare,
}

impl SelectionRule for SquareSelectionRule {
    fn evaluate(&self, board: &Board, origin: Coordinate, target: Coordinate) -> bool {
        match self {
            SquareSelectionRule::DiagonalExtents { depth } => origin
                .diagonal_distance(target)
                .is_some_and(|distance| distance <= *depth),
            SquareSelectionRule::DiagonalExtentsWithPieceBetween { depth } => {
                exact_extent(origin, target, *depth)
                    && any_piece_between(board, origin, target, |_| true)
            }
            SquareSelectionRule::DiagonalExtentsWithCurrentPlayersPieceBetween { depth, owner } => {
                exact_extent(origin, target, *depth)
                    && any_piece_between(board, origin, target, |p| p.is_same_player(owner))
            }
            SquareSelectionRule::DiagonalExtentsWithOtherThanCurrentPlayersPieceBetween {
                depth,
                owner,
            } => {
                exact_extent(origin, target, *depth)
                    && any_piece_between(board, origin, target, |p| !p.is_same_player(owner))
            }
            SquareSelectionRule::EmptySquare => board
                .square_at(target)
                .is_some_and(|square| square.is_empty()),
        }
    }
}

#[inline]
fn exact_extent(origin: Coordinate, target: Coordinate, depth: u8) -> bool {
    origin.diagonal_distance(target) == Some(depth)
}

fn any_piece_between<F>(
    board: &Board,
    origin: Coordinate,
    target: Coordinate,
    owner_matches: F,
) -> bool
where
    F: Fn(&Player) -> bool,
{
    board
        .squares_between(origin, target)
        .into_iter()
        .filter_map(|square| board.piece_at(square.coordinate))
        .any(|(_, piece)| owner_matches(piece.owner()))
}
