//! Position snapshots and move history
//!
//! [`PositionSnapshot`] is the unit of threefold-repetition detection: the
//! piece placement as an order-independent multiset, the side to move, and
//! the en passant target, compared by value. Castling-rights state is
//! deliberately not part of the snapshot (see DESIGN.md).
//!
//! [`MoveRecord`] / [`MoveHistory`] keep the chronological record of
//! completed moves for the presentation layer: notation display, move
//! review, and the check/checkmate annotations the status line shows.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{PieceColor, PieceKind, Square};

/// Value-comparable summary of a position
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionSnapshot {
    /// Sorted (square, kind, color) tuples; sorting makes comparison
    /// independent of piece enumeration order
    pieces: Vec<(Square, PieceKind, PieceColor)>,
    side_to_move: PieceColor,
    en_passant_target: Option<Square>,
}

impl PositionSnapshot {
    pub(crate) fn capture(board: &Board) -> PositionSnapshot {
        let mut pieces: Vec<_> = board
            .pieces()
            .map(|(square, piece)| (square, piece.kind, piece.color))
            .collect();
        pieces.sort_unstable();
        PositionSnapshot {
            pieces,
            side_to_move: board.side_to_move(),
            en_passant_target: board.en_passant_target(),
        }
    }
}

/// One completed move, as recorded for history display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub from: Square,
    pub to: Square,
    /// Kind of the captured piece, including en passant victims
    pub captured: Option<PieceKind>,
    /// Kind the pawn promoted to, when the move was a promotion
    pub promotion: Option<PieceKind>,
    pub is_castle: bool,
    pub is_en_passant: bool,
    /// The move left the opponent in check
    pub is_check: bool,
    /// The move ended the game by checkmate
    pub is_checkmate: bool,
}

/// Chronological record of all moves made since the last reset
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub(crate) fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// The most recent completed move, if any
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// All moves, oldest first
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }
}
