//! A piece on the board: owner, position, rule sets and the candidate moves
//! computed from them.

use crate::board::board::Board;
use crate::board::checkers_types::{Coordinate, PieceKind, Player};
use crate::errors::{CheckersError, CheckersResult};
use crate::moves::available_moves::AvailableMoves;
use crate::moves::checkers_move::Move;
use crate::pieces::checkers_pawn::{pawn_capture_rules, pawn_movement_rules};
use crate::pieces::piece_state::PieceState;
use crate::rules::square_selection_rule_set::SquareSelectionRuleSet;

#[derive(Debug, Clone)]
pub struct Piece {
    owner: Player,
    kind: PieceKind,
    coordinate: Coordinate,
    pub(crate) state: PieceState,
    movement_rules: SquareSelectionRuleSet,
    capture_rules: SquareSelectionRuleSet,
    pub(crate) available_moves: AvailableMoves,
}

impl Piece {
    pub fn new(owner: Player, kind: PieceKind, coordinate: Coordinate) -> Self {
        let (movement_rules, capture_rules) = match kind {
            PieceKind::Pawn => (pawn_movement_rules(&owner), pawn_capture_rules(&owner)),
        };

        Self {
            owner,
            kind,
            coordinate,
            state: PieceState::NotLifted,
            movement_rules,
            capture_rules,
            available_moves: AvailableMoves::new(),
        }
    }

    #[inline]
    pub fn owner(&self) -> &Player {
        &self.owner
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline]
    pub fn state(&self) -> PieceState {
        self.state
    }

    /// Moves computed by the last calculation. Stale once the board changes.
    #[inline]
    pub fn available_moves(&self) -> &AvailableMoves {
        &self.available_moves
    }

    #[inline]
    pub fn can_be_played_by(&self, player: &Player) -> bool {
        self.owner.is_same_player(player)
    }

    pub(crate) fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    /// Compute every candidate move of this piece on `board` without touching
    /// the stored map.
    ///
    /// Movement is tried first for each square so a square is never both a
    /// movement and a capture target. The cancel move keyed by the piece's own
    /// square is always present.
    pub fn compute_available_moves(&self, board: &Board) -> CheckersResult<AvailableMoves> {
        let origin = self.coordinate;
        let mut moves = AvailableMoves::new();

        for square in board.squares() {
            let target = square.coordinate;

            if self.movement_rules.select(board, target, origin) {
                moves.set(target, Move::Movement { destination: target });
                continue;
            }

            if self.capture_rules.select(board, target, origin) {
                let captured_square = self.find_capture_target(board, target)?;
                moves.set(
                    target,
                    Move::Capture {
                        destination: target,
                        captured_square,
                    },
                );
            }
        }

        moves.set(origin, Move::Cancel { origin_square: origin });
        Ok(moves)
    }

    /// First square strictly between this piece and `destination` holding an
    /// opposing piece.
    fn find_capture_target(
        &self,
        board: &Board,
        destination: Coordinate,
    ) -> CheckersResult<Coordinate> {
        board
            .squares_between(self.coordinate, destination)
            .into_iter()
            .find(|square| {
                board
                    .piece_at(square.coordinate)
                    .is_some_and(|(_, piece)| !piece.owner.is_same_player(&self.owner))
            })
            .map(|square| square.coordinate)
            .ok_or_else(|| {
                CheckersError::InvariantViolated(format!(
                    "capture rule selected {destination} from {} but no opposing piece lies between",
                    self.coordinate
                ))
            })
    }
}
