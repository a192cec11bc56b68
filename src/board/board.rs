//! The checkers board: squares, the piece arena, and the lift/place
//! interaction that mutates them.
//!
//! Squares are stored rank-major (`a1, b1, ..., h1, a2, ...`); that order is
//! the board's iteration order for squares and for pieces. Pieces live in an
//! arena indexed by `PieceId`; a captured piece leaves an empty slot so ids
//! stay stable for the whole game.

use std::fmt;

use crate::board::checkers_types::{Coordinate, PieceId, PieceKind, Player};
use crate::errors::{CheckersError, CheckersResult};
use crate::moves::available_moves::AvailableMoves;
use crate::moves::checkers_move::Move;
use crate::pieces::piece::Piece;
use crate::pieces::piece_state::PieceState;
use crate::presentation::hooks::{NoPresentation, PresentationHooks};

pub const STANDARD_BOARD_SIZE: u8 = 8;
/// Largest side length whose files and ranks fit a [`Coordinate`].
pub const MAX_BOARD_SIZE: u8 = i8::MAX as u8;
pub const STANDARD_ROWS_PER_SIDE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub coordinate: Coordinate,
    occupant: Option<PieceId>,
}

impl Square {
    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Dark squares are the playable ones in a standard setup.
    #[inline]
    pub fn is_dark(&self) -> bool {
        (self.coordinate.file + self.coordinate.rank) % 2 == 0
    }
}

pub struct Board {
    width: u8,
    height: u8,
    /// World-space size of the whole board, used only for presentation.
    extent: (f32, f32),
    squares: Vec<Square>,
    pieces: Vec<Option<Piece>>,
    presentation: Box<dyn PresentationHooks>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pieces", &self.piece_count())
            .finish()
    }
}

impl Board {
    /// Empty `width x height` board. Each side is clamped to
    /// [`MAX_BOARD_SIZE`] so every square has a valid coordinate.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.min(MAX_BOARD_SIZE);
        let height = height.min(MAX_BOARD_SIZE);
        let mut squares = Vec::with_capacity(usize::from(width) * usize::from(height));
        for rank in 0..height {
            for file in 0..width {
                squares.push(Square {
                    coordinate: Coordinate::new(file as i8, rank as i8),
                    occupant: None,
                });
            }
        }

        Self {
            width,
            height,
            extent: (f32::from(width), f32::from(height)),
            squares,
            pieces: Vec::new(),
            presentation: Box::new(NoPresentation),
        }
    }

    /// 8x8 board with twelve pawns per side on the dark squares of the three
    /// ranks nearest each player. White starts on rank 0.
    pub fn standard(white: &Player, black: &Player) -> Self {
        let mut board = Self::new(STANDARD_BOARD_SIZE, STANDARD_BOARD_SIZE);
        let black_start = STANDARD_BOARD_SIZE - STANDARD_ROWS_PER_SIDE;

        let setup: Vec<(Coordinate, &Player)> = board
            .squares
            .iter()
            .filter(|square| square.is_dark())
            .filter_map(|square| {
                let rank = square.coordinate.rank as u8;
                if rank < STANDARD_ROWS_PER_SIDE {
                    Some((square.coordinate, white))
                } else if rank >= black_start {
                    Some((square.coordinate, black))
                } else {
                    None
                }
            })
            .collect();

        for (coordinate, owner) in setup {
            board.place_new_piece(owner.clone(), PieceKind::Pawn, coordinate);
        }
        board
    }

    pub fn with_presentation(mut self, hooks: impl PresentationHooks + 'static) -> Self {
        self.presentation = Box::new(hooks);
        self
    }

    pub fn with_extent(mut self, width: f32, height: f32) -> Self {
        self.extent = (width, height);
        self
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, coordinate: Coordinate) -> bool {
        coordinate.file >= 0
            && coordinate.rank >= 0
            && (coordinate.file as u8) < self.width
            && (coordinate.rank as u8) < self.height
    }

    /// World-space size of one square.
    pub fn square_size(&self) -> (f32, f32) {
        (
            self.extent.0 / f32::from(self.width.max(1)),
            self.extent.1 / f32::from(self.height.max(1)),
        )
    }

    fn square_index(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.in_bounds(coordinate) {
            return None;
        }
        Some(coordinate.rank as usize * usize::from(self.width) + coordinate.file as usize)
    }

    pub fn square_at(&self, coordinate: Coordinate) -> Option<&Square> {
        self.square_index(coordinate).map(|idx| &self.squares[idx])
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> + '_ {
        self.squares.iter()
    }

    pub fn foreach_square<F: FnMut(&Square)>(&self, visitor: F) {
        self.squares.iter().for_each(visitor);
    }

    /// Pieces still on the board, in square order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.squares.iter().filter_map(|square| {
            let id = square.occupant?;
            self.pieces[id.0].as_ref().map(|piece| (id, piece))
        })
    }

    pub fn foreach_piece<F: FnMut(PieceId, &Piece)>(&self, mut visitor: F) {
        for (id, piece) in self.pieces() {
            visitor(id, piece);
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn piece(&self, id: PieceId) -> CheckersResult<&Piece> {
        self.pieces
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(CheckersError::UnknownPiece(id))
    }

    fn piece_mut(&mut self, id: PieceId) -> CheckersResult<&mut Piece> {
        self.pieces
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CheckersError::UnknownPiece(id))
    }

    pub fn piece_id_at(&self, coordinate: Coordinate) -> Option<PieceId> {
        self.square_at(coordinate).and_then(Square::occupant)
    }

    pub fn piece_at(&self, coordinate: Coordinate) -> Option<(PieceId, &Piece)> {
        let id = self.piece_id_at(coordinate)?;
        self.pieces[id.0].as_ref().map(|piece| (id, piece))
    }

    /// Squares strictly between `a` and `b` on their shared diagonal, ordered
    /// from `a`. Empty when the two do not share a diagonal.
    pub fn squares_between(&self, a: Coordinate, b: Coordinate) -> Vec<&Square> {
        a.diagonal_between(b)
            .into_iter()
            .filter_map(|coordinate| self.square_at(coordinate))
            .collect()
    }

    /// Ownership predicate used by players to find their pieces.
    pub fn can_be_played_by(&self, id: PieceId, player: &Player) -> bool {
        self.piece(id)
            .map(|piece| piece.can_be_played_by(player))
            .unwrap_or(false)
    }

    /// Put a new piece on an empty square.
    pub fn add_piece(
        &mut self,
        owner: Player,
        kind: PieceKind,
        coordinate: Coordinate,
    ) -> CheckersResult<PieceId> {
        let square = self
            .square_at(coordinate)
            .ok_or(CheckersError::OutOfBounds(coordinate))?;
        if !square.is_empty() {
            return Err(CheckersError::SquareOccupied(coordinate));
        }
        Ok(self.place_new_piece(owner, kind, coordinate))
    }

    fn place_new_piece(
        &mut self,
        owner: Player,
        kind: PieceKind,
        coordinate: Coordinate,
    ) -> PieceId {
        let id = PieceId(self.pieces.len());
        let side = owner.side;
        self.pieces.push(Some(Piece::new(owner, kind, coordinate)));
        if let Some(idx) = self.square_index(coordinate) {
            self.squares[idx].occupant = Some(id);
        }
        self.presentation.on_piece_created(id, side, kind);
        id
    }

    /// Fails unless `id` could be moved onto `destination`. Its own square
    /// counts as free.
    pub(crate) fn check_relocation(
        &self,
        id: PieceId,
        destination: Coordinate,
    ) -> CheckersResult<()> {
        let origin = self.piece(id)?.coordinate();
        let to_idx = self
            .square_index(destination)
            .ok_or(CheckersError::OutOfBounds(destination))?;
        match self.squares[to_idx].occupant {
            Some(_) if origin != destination => Err(CheckersError::SquareOccupied(destination)),
            _ => Ok(()),
        }
    }

    /// Fails unless a piece stands on `coordinate`.
    pub(crate) fn check_occupied(&self, coordinate: Coordinate) -> CheckersResult<PieceId> {
        self.square_at(coordinate)
            .ok_or(CheckersError::OutOfBounds(coordinate))?
            .occupant()
            .ok_or(CheckersError::EmptySquare(coordinate))
    }

    /// Move a piece to an empty square. Moving onto its own square is a no-op.
    pub(crate) fn relocate_piece(
        &mut self,
        id: PieceId,
        destination: Coordinate,
    ) -> CheckersResult<()> {
        self.check_relocation(id, destination)?;
        let origin = self.piece(id)?.coordinate();
        if origin == destination {
            return Ok(());
        }
        let to_idx = self
            .square_index(destination)
            .ok_or(CheckersError::OutOfBounds(destination))?;
        if let Some(from_idx) = self.square_index(origin) {
            self.squares[from_idx].occupant = None;
        }
        self.squares[to_idx].occupant = Some(id);
        self.piece_mut(id)?.set_coordinate(destination);
        Ok(())
    }

    /// Take the piece on `coordinate` off the board.
    pub(crate) fn remove_piece_at(&mut self, coordinate: Coordinate) -> CheckersResult<PieceId> {
        let idx = self
            .square_index(coordinate)
            .ok_or(CheckersError::OutOfBounds(coordinate))?;
        let id = self.squares[idx]
            .occupant
            .take()
            .ok_or(CheckersError::EmptySquare(coordinate))?;
        self.pieces[id.0] = None;
        self.presentation.on_capture(id, coordinate);
        Ok(id)
    }

    /// Recompute and store the candidate moves of `id`.
    pub fn calc_available_moves(&mut self, id: PieceId) -> CheckersResult<()> {
        let moves = self.piece(id)?.compute_available_moves(self)?;
        self.piece_mut(id)?.available_moves = moves;
        Ok(())
    }

    pub fn available_moves(&self, id: PieceId) -> CheckersResult<&AvailableMoves> {
        Ok(self.piece(id)?.available_moves())
    }

    /// `NotLifted -> Lifted`, recomputing the piece's candidates first.
    pub fn lift(&mut self, id: PieceId) -> CheckersResult<()> {
        let next = self.piece(id)?.state().lift()?;
        self.calc_available_moves(id)?;

        let Board {
            pieces,
            presentation,
            ..
        } = self;
        let piece = pieces
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(CheckersError::UnknownPiece(id))?;
        piece.state = next;
        presentation.on_lift(id, &mut piece.available_moves);
        Ok(())
    }

    /// `Lifted -> Placed`, executing the candidate keyed by `target`.
    ///
    /// A target absent from the candidates is rejected and the piece stays
    /// lifted.
    pub fn place(&mut self, id: PieceId, target: Coordinate) -> CheckersResult<Move> {
        let piece = self.piece(id)?;
        let next = piece.state().place()?;
        let mv = piece
            .available_moves()
            .get(target)
            .map(|entry| entry.mv)
            .ok_or(CheckersError::IllegalPlacement(target))?;

        mv.apply(self, id)?;
        self.piece_mut(id)?.state = next;
        self.presentation.on_place(id, &mv);
        Ok(mv)
    }

    /// `Placed -> NotLifted` for one piece.
    pub fn settle(&mut self, id: PieceId) -> CheckersResult<()> {
        let piece = self.piece_mut(id)?;
        piece.state = piece.state.settle()?;
        Ok(())
    }

    /// Make every placed piece ready for the next turn.
    pub fn settle_all(&mut self) {
        for piece in self.pieces.iter_mut().flatten() {
            if piece.state == PieceState::Placed {
                piece.state = PieceState::NotLifted;
            }
        }
    }
}
