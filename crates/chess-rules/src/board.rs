//! Authoritative board state
//!
//! An 8x8 grid keyed by (file, rank) gives O(1) occupancy lookup,
//! independent of any rendering coordinate system. The board also owns the
//! auxiliary state that outlives a single move: side to move, the en
//! passant window, the halfmove clock and the snapshot history used for
//! repetition detection.
//!
//! All mutation goes through the turn controller in [`crate::game`]; the
//! rules modules only read the board or clone it for simulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::history::PositionSnapshot;
use crate::types::{Piece, PieceColor, PieceKind, Square};

/// The authoritative position plus auxiliary move state
#[derive(Clone, Debug)]
pub(crate) struct Board {
    /// Grid indexed `[file][rank]`; `None` is an empty square
    squares: [[Option<Piece>; 8]; 8],
    side_to_move: PieceColor,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    /// Snapshots since the last irreversible move, for repetition counting
    snapshots: Vec<PositionSnapshot>,
}

impl Board {
    /// The standard starting position, White to move, initial snapshot
    /// recorded
    pub(crate) fn starting_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty(PieceColor::White);
        for color in [PieceColor::White, PieceColor::Black] {
            let back = color.back_rank();
            let pawn_rank = (back as i8 + color.forward()) as u8;
            for file in 0..8 {
                board.squares[file][back as usize] = Some(Piece::new(BACK_RANK[file], color));
                board.squares[file][pawn_rank as usize] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board.record_snapshot();
        board
    }

    /// An arbitrary position, initial snapshot recorded
    pub(crate) fn from_pieces(pieces: &[(Square, Piece)], side_to_move: PieceColor) -> Board {
        let mut board = Board::empty(side_to_move);
        for &(square, piece) in pieces {
            debug_assert!(
                board.piece_at(square).is_none(),
                "two pieces placed on {square}"
            );
            board.squares[square.file() as usize][square.rank() as usize] = Some(piece);
        }
        board.record_snapshot();
        board
    }

    fn empty(side_to_move: PieceColor) -> Board {
        Board {
            squares: [[None; 8]; 8],
            side_to_move,
            en_passant_target: None,
            halfmove_clock: 0,
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.file() as usize][square.rank() as usize]
    }

    pub(crate) fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub(crate) fn color_at(&self, square: Square) -> Option<PieceColor> {
        self.piece_at(square).map(|piece| piece.color)
    }

    /// All occupied squares with their pieces
    pub(crate) fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8).flat_map(move |file| {
            (0..8u8).filter_map(move |rank| {
                let square = Square::at(file, rank);
                self.piece_at(square).map(|piece| (square, piece))
            })
        })
    }

    pub(crate) fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// The king's square, `None` only for artificial kingless positions
    ///
    /// A live game always has both kings; the turn controller asserts that
    /// invariant after every committed move.
    pub(crate) fn king_square(&self, color: PieceColor) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    pub(crate) fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    pub(crate) fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub(crate) fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Occurrences of the current position in the snapshot history
    pub(crate) fn repetition_count(&self) -> usize {
        let current = PositionSnapshot::capture(self);
        self.snapshots
            .iter()
            .filter(|snapshot| **snapshot == current)
            .count()
    }

    // --- mutation, used by the move executor and simulation only ---

    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.file() as usize][square.rank() as usize].take()
    }

    /// Relocate a piece without any rule side effects
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let piece = self.remove_piece(from);
        debug_assert!(piece.is_some(), "relocate from empty square {from}");
        self.squares[to.file() as usize][to.rank() as usize] = piece;
    }

    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.file() as usize][square.rank() as usize].as_mut()
    }

    pub(crate) fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    /// A capture or pawn move: clock back to zero, and the position can
    /// never recur, so the repetition history restarts
    pub(crate) fn note_irreversible_move(&mut self) {
        self.halfmove_clock = 0;
        self.snapshots.clear();
    }

    pub(crate) fn note_reversible_move(&mut self) {
        self.halfmove_clock += 1;
    }

    pub(crate) fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    pub(crate) fn record_snapshot(&mut self) {
        let snapshot = PositionSnapshot::capture(self);
        self.snapshots.push(snapshot);
    }

    /// Read-only view handed to the presentation layer
    pub(crate) fn view(&self) -> BoardView {
        BoardView {
            pieces: self.pieces().collect(),
            side_to_move: self.side_to_move,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
        }
    }
}

/// Read-only snapshot of the live board for external readers
///
/// A detached copy: holding one never observes a move mid-application.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardView {
    /// Occupied squares with their pieces, file-major order
    pub pieces: Vec<(Square, Piece)>,
    pub side_to_move: PieceColor,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
}
