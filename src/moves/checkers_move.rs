//! What happens when a lifted piece is put down on a candidate square.

use std::fmt;

use crate::board::board::Board;
use crate::board::checkers_types::{Coordinate, PieceId};
use crate::errors::CheckersResult;

/// A committed outcome for one target square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Step onto an empty square.
    Movement { destination: Coordinate },
    /// Jump onto `destination`, removing the piece on `captured_square`.
    Capture {
        destination: Coordinate,
        captured_square: Coordinate,
    },
    /// Put the piece back where it was lifted from.
    Cancel { origin_square: Coordinate },
}

impl Move {
    /// The square this move is keyed by in a piece's available moves.
    #[inline]
    pub fn square(&self) -> Coordinate {
        match *self {
            Move::Movement { destination } | Move::Capture { destination, .. } => destination,
            Move::Cancel { origin_square } => origin_square,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }

    #[inline]
    pub fn is_cancel(&self) -> bool {
        matches!(self, Move::Cancel { .. })
    }

    /// Realize the move for `piece` on `board`.
    ///
    /// A capture removes the captured piece before relocating the mover. Both
    /// squares are checked first, so a capture that no longer fits the board
    /// fails without touching it.
    pub fn apply(&self, board: &mut Board, piece: PieceId) -> CheckersResult<()> {
        match *self {
            Move::Movement { destination } => board.relocate_piece(piece, destination),
            Move::Capture {
                destination,
                captured_square,
            } => {
                board.check_relocation(piece, destination)?;
                board.check_occupied(captured_square)?;
                board.remove_piece_at(captured_square)?;
                board.relocate_piece(piece, destination)
            }
            Move::Cancel { .. } => Ok(()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Movement { destination } => write!(f, "move {destination}"),
            Move::Capture {
                destination,
                captured_square,
            } => write!(f, "capture {captured_square} to {destination}"),
            Move::Cancel { origin_square } => write!(f, "cancel {origin_square}"),
        }
    }
}
