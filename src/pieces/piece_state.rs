//! Interaction state of a piece: picked up, put down, or at rest.

use crate::errors::{CheckersError, CheckersResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PieceState {
    #[default]
    NotLifted,
    Lifted,
    Placed,
}

impl PieceState {
    /// `NotLifted -> Lifted`.
    pub fn lift(self) -> CheckersResult<Self> {
        match self {
            PieceState::NotLifted => Ok(PieceState::Lifted),
            from => Err(CheckersError::IllegalTransition {
                from,
                action: "lift",
            }),
        }
    }

    /// `Lifted -> Placed`.
    pub fn place(self) -> CheckersResult<Self> {
        match self {
            PieceState::Lifted => Ok(PieceState::Placed),
            from => Err(CheckersError::IllegalTransition {
                from,
                action: "place",
            }),
        }
    }

    /// `Placed -> NotLifted`. Settling an already resting piece is a no-op.
    pub fn settle(self) -> CheckersResult<Self> {
        match self {
            PieceState::Placed | PieceState::NotLifted => Ok(PieceState::NotLifted),
            from => Err(CheckersError::IllegalTransition {
                from,
                action: "settle",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PieceState;
    use crate::errors::CheckersError;

    #[test]
    fn full_cycle_returns_to_not_lifted() {
        let state = PieceState::default();
        let lifted = state.lift().expect("resting piece can be lifted");
        let placed = lifted.place().expect("lifted piece can be placed");
        assert_eq!(placed.settle(), Ok(PieceState::NotLifted));
    }

    #[test]
    fn guarded_transitions_reject_wrong_state() {
        assert!(matches!(
            PieceState::Lifted.lift(),
            Err(CheckersError::IllegalTransition { from: PieceState::Lifted, .. })
        ));
        assert!(matches!(
            PieceState::Placed.lift(),
            Err(CheckersError::IllegalTransition { from: PieceState::Placed, .. })
        ));
        assert!(PieceState::NotLifted.place().is_err());
        assert!(PieceState::Lifted.settle().is_err());
    }
}
