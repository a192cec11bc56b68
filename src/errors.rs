//! Errors used throughout the checkers core.
//!
//! `CheckersError` is the single error type returned by board manipulation,
//! move calculation, the piece state machine and the automated player.
//!
//! Usage guidelines:
//! - `IllegalPlacement` and `IllegalTransition` are caller mistakes; the piece
//!   is left untouched and the caller should re-query available moves.
//! - `NoUsablePieces` is a game-rule outcome for the player that raised it;
//!   the surrounding turn manager decides what it means (resignation, loss).
//! - `InvariantViolated` indicates the rule sets and the board disagree. It is
//!   a bug, not a recoverable state.

use std::error::Error;
use std::fmt;

use crate::board::checkers_types::{Coordinate, PieceId};
use crate::pieces::piece_state::PieceState;

pub type CheckersResult<T> = Result<T, CheckersError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckersError {
    /// A capture rule selected a target but no opposing piece lies between
    /// the origin and that target.
    InvariantViolated(String),

    /// `place` was called with a coordinate absent from the piece's
    /// available moves.
    IllegalPlacement(Coordinate),

    /// The automated player found no piece it may play.
    ///
    /// Payload: the player's name.
    NoUsablePieces(String),

    /// A piece state transition was requested from the wrong state.
    IllegalTransition {
        from: PieceState,
        action: &'static str,
    },

    /// Coordinate lies outside the board.
    OutOfBounds(Coordinate),

    /// The piece handle does not refer to a piece on this board.
    UnknownPiece(PieceId),

    /// Tried to put a piece on an occupied square.
    SquareOccupied(Coordinate),

    /// Tried to take a piece from an empty square.
    EmptySquare(Coordinate),

    /// A shared board or player lock was poisoned by a panicking holder.
    ///
    /// Payload: what was being locked.
    LockPoisoned(&'static str),
}

impl fmt::Display for CheckersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckersError::InvariantViolated(msg) => write!(f, "invariant violated: {msg}"),
            CheckersError::IllegalPlacement(c) => {
                write!(f, "illegal placement: {c} is not an available move")
            }
            CheckersError::NoUsablePieces(name) => write!(f, "{name} had no usable pieces"),
            CheckersError::IllegalTransition { from, action } => {
                write!(f, "cannot {action} a piece that is {from:?}")
            }
            CheckersError::OutOfBounds(c) => write!(f, "coordinate {c} is off the board"),
            CheckersError::UnknownPiece(id) => write!(f, "no piece {id} on the board"),
            CheckersError::SquareOccupied(c) => write!(f, "square {c} is already occupied"),
            CheckersError::EmptySquare(c) => write!(f, "square {c} holds no piece"),
            CheckersError::LockPoisoned(what) => write!(f, "{what} lock poisoned"),
        }
    }
}

impl Error for CheckersError {}

#[cfg(test)]
mod tests {
    use super::CheckersError;
    use crate::board::checkers_types::Coordinate;
    use crate::pieces::piece_state::PieceState;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(
            CheckersError::IllegalPlacement(Coordinate::new(2, 5)).to_string(),
            "illegal placement: 2,5 is not an available move"
        );
        assert_eq!(
            CheckersError::NoUsablePieces("cpu".to_owned()).to_string(),
            "cpu had no usable pieces"
        );
        assert_eq!(
            CheckersError::IllegalTransition {
                from: PieceState::Lifted,
                action: "lift"
            }
            .to_string(),
            "cannot lift a piece that is Lifted"
        );
    }
}
