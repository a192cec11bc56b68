//! Shared value types for the checkers core: sides, players, piece kinds and
//! piece handles.

use std::fmt;

pub use crate::board::coordinate::Coordinate;

/// Side a player plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSide {
    White,
    Black,
}

impl PlayerSide {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerSide::White => 0,
            PlayerSide::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            PlayerSide::White => PlayerSide::Black,
            PlayerSide::Black => PlayerSide::White,
        }
    }
}

/// A participant in the game.
///
/// Two players are considered the same owner when their names match; the side
/// is not part of that comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub side: PlayerSide,
}

impl Player {
    pub fn new(name: impl Into<String>, side: PlayerSide) -> Self {
        Self {
            name: name.into(),
            side,
        }
    }

    #[inline]
    pub fn is_same_player(&self, other: &Player) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name, self.side)
    }
}

/// Piece kind. Kings are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
}

/// Stable handle of a piece inside its board's piece arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle the presentation layer may attach to a candidate move.
pub type VisualHandle = u64;
