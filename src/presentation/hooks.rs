//! Notifications from the core to whatever draws, animates or plays sounds.
//!
//! Every method has a no-op default so a host only implements what it needs.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::board::checkers_types::{Coordinate, PieceId, PieceKind, PlayerSide};
use crate::moves::available_moves::AvailableMoves;
use crate::moves::checkers_move::Move;

pub trait PresentationHooks: Send {
    /// A piece was put on the board. Hosts pick mesh/material by side and kind.
    fn on_piece_created(&mut self, _piece: PieceId, _side: PlayerSide, _kind: PieceKind) {}

    /// A piece was lifted and its candidates computed. Hosts may attach a
    /// marker handle to each candidate through `AvailableMove::instance`.
    fn on_lift(&mut self, _piece: PieceId, _moves: &mut AvailableMoves) {}

    /// A lifted piece was put down with `mv`.
    fn on_place(&mut self, _piece: PieceId, _mv: &Move) {}

    /// A piece was taken off the board from `at`.
    fn on_capture(&mut self, _captured: PieceId, _at: Coordinate) {}
}

/// Headless hosts, tests and benches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPresentation;

impl PresentationHooks for NoPresentation {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationEvent {
    PieceCreated(PieceId, PlayerSide, PieceKind),
    Lifted { piece: PieceId, candidates: usize },
    Placed(PieceId, Move),
    Captured(PieceId, Coordinate),
}

/// Records every notification into a shared event list. Cloning shares the
/// list, so a caller can keep a handle after moving the recorder into a board.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    events: Arc<Mutex<Vec<PresentationEvent>>>,
    next_handle: u64,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresentationEvent> {
        self.lock_events().clone()
    }

    fn push(&self, event: PresentationEvent) {
        self.lock_events().push(event);
    }

    /// A panic while recording leaves the list intact up to that event, so a
    /// poisoned lock still yields everything recorded so far.
    fn lock_events(&self) -> MutexGuard<'_, Vec<PresentationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PresentationHooks for RecordingPresentation {
    fn on_piece_created(&mut self, piece: PieceId, side: PlayerSide, kind: PieceKind) {
        self.push(PresentationEvent::PieceCreated(piece, side, kind));
    }

    fn on_lift(&mut self, piece: PieceId, moves: &mut AvailableMoves) {
        for (_, entry) in moves.iter_mut() {
            self.next_handle += 1;
            entry.instance = Some(self.next_handle);
        }
        self.push(PresentationEvent::Lifted {
            piece,
            candidates: moves.len(),
        });
    }

    fn on_place(&mut self, piece: PieceId, mv: &Move) {
        self.push(PresentationEvent::Placed(piece, *mv));
    }

    fn on_capture(&mut self, captured: PieceId, at: Coordinate) {
        self.push(PresentationEvent::Captured(captured, at));
    }
}
