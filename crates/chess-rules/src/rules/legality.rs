//! True move legality
//!
//! A move is legal when it is pseudo-legal and does not leave the mover's
//! own king in check. Ordinary moves are verified by simulating on a
//! private clone and testing for check afterwards; that single rule covers
//! pins and discovered checks, so no separate pin logic exists anywhere.
//! Castling gets its own path-and-safety check instead of a simulation,
//! since king safety must hold at every square the king crosses.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::RuleSet;
use crate::types::{PieceColor, PieceKind, Square};

use super::attack::{in_check, is_attacked};
use super::movement::{is_path_clear, is_pseudo_legal};

/// A legal destination decorated for the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegalMove {
    pub destination: Square,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub is_castle: bool,
}

/// Whether moving the piece on `from` to `to` is fully legal
pub(crate) fn is_legal(board: &Board, from: Square, to: Square, rules: &RuleSet) -> bool {
    if !is_pseudo_legal(board, from, to, rules) {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    if piece.kind == PieceKind::King && (to.file() as i8 - from.file() as i8).abs() == 2 {
        return castling_legal(board, piece.color, from, to);
    }

    !leaves_king_in_check(board, piece.color, from, to, rules)
}

/// Castling path-and-safety check
///
/// The pseudo-legal gate has already established an unmoved king moving two
/// files along its rank. Rejects when the king is currently in check, when
/// the corresponding rook is missing, moved or obstructed, or when either
/// square the king transits (destination included) is attacked. No post-move
/// simulation is needed: an attacker bearing on a transit square through the
/// king's origin square would already have the king in check.
fn castling_legal(board: &Board, color: PieceColor, from: Square, to: Square) -> bool {
    if in_check(board, color) {
        return false;
    }

    let kingside = to.file() > from.file();
    let rook_file = if kingside { 7 } else { 0 };
    let rook_square = Square::at(rook_file, from.rank());

    match board.piece_at(rook_square) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == color && !rook.has_moved => {}
        _ => return false,
    }

    if !is_path_clear(board, from, rook_square) {
        return false;
    }

    let step = if kingside { 1 } else { -1 };
    for distance in 1..=2 {
        let Some(transit) = from.offset(step * distance, 0) else {
            return false;
        };
        if is_attacked(board, transit, color.opponent()) {
            return false;
        }
    }
    true
}

/// Simulate the move on a clone and test whether the mover ends in check
///
/// En passant removes the bypassed pawn beside the destination instead of
/// anything on the destination square itself.
fn leaves_king_in_check(
    board: &Board,
    mover: PieceColor,
    from: Square,
    to: Square,
    rules: &RuleSet,
) -> bool {
    let mut sim = board.clone();

    let is_en_passant = is_en_passant_capture(board, from, to, rules);
    if is_en_passant {
        sim.remove_piece(Square::at(to.file(), from.rank()));
    }
    sim.remove_piece(to);
    sim.relocate(from, to);

    in_check(&sim, mover)
}

/// The move is a pawn capturing onto the open en passant target
pub(crate) fn is_en_passant_capture(
    board: &Board,
    from: Square,
    to: Square,
    rules: &RuleSet,
) -> bool {
    rules.en_passant
        && board.piece_at(from).map(|piece| piece.kind) == Some(PieceKind::Pawn)
        && board.en_passant_target() == Some(to)
        && board.is_empty(to)
}

/// All legal destinations of the piece on `from`, decorated with capture /
/// en passant / castle flags
pub(crate) fn legal_destinations(board: &Board, from: Square, rules: &RuleSet) -> Vec<LegalMove> {
    let mut moves = Vec::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    for file in 0..8 {
        for rank in 0..8 {
            let to = Square::at(file, rank);
            if !is_legal(board, from, to, rules) {
                continue;
            }
            let is_en_passant = is_en_passant_capture(board, from, to, rules);
            moves.push(LegalMove {
                destination: to,
                is_capture: board.piece_at(to).is_some() || is_en_passant,
                is_en_passant,
                is_castle: piece.kind == PieceKind::King
                    && (to.file() as i8 - from.file() as i8).abs() == 2,
            });
        }
    }
    moves
}

/// Whether the side to move has any legal move at all
///
/// Exhaustive piece-by-destination scan with early exit; only the game-end
/// evaluator pays this cost, once per completed turn.
pub(crate) fn side_has_legal_move(board: &Board, color: PieceColor, rules: &RuleSet) -> bool {
    let origins: Vec<Square> = board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(square, _)| square)
        .collect();

    for from in origins {
        for file in 0..8 {
            for rank in 0..8 {
                if is_legal(board, from, Square::at(file, rank), rules) {
                    return true;
                }
            }
        }
    }
    false
}
