//! Pseudo-legal movement rules for each piece kind
//!
//! "Pseudo-legal" satisfies a piece's geometry and blocking rules while
//! ignoring whether the mover's own king ends up in check; the check-aware
//! filter lives in [`super::legality`].
//!
//! Two entry points share the per-kind helpers: [`is_pseudo_legal`] answers
//! for a move the side wants to play, [`is_attack`] answers whether the
//! piece bears on a square for check detection. The two differ only for
//! pawns (pushes never attack; diagonals attack even when empty, since a
//! king cannot be captured "forward") and for the king (the two-square
//! castling candidate is a move, not an attack).

use crate::board::Board;
use crate::config::RuleSet;
use crate::types::{Piece, PieceColor, PieceKind, Square};

/// Whether the piece on `from` can move to `to`, ignoring king safety
pub(crate) fn is_pseudo_legal(board: &Board, from: Square, to: Square, rules: &RuleSet) -> bool {
    let Some(piece) = common_gate(board, from, to) else {
        return false;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece.color, piece.has_moved, from, to, rules),
        PieceKind::Knight => knight_move(from, to),
        PieceKind::Bishop => bishop_move(board, from, to),
        PieceKind::Rook => rook_move(board, from, to),
        PieceKind::Queen => queen_move(board, from, to),
        PieceKind::King => king_move(piece.has_moved, from, to, rules),
    }
}

/// Whether the piece on `from` attacks `to` (attack-only mode)
pub(crate) fn is_attack(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = common_gate(board, from, to) else {
        return false;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_attack(piece.color, from, to),
        PieceKind::Knight => knight_move(from, to),
        PieceKind::Bishop => bishop_move(board, from, to),
        PieceKind::Rook => rook_move(board, from, to),
        PieceKind::Queen => queen_move(board, from, to),
        PieceKind::King => king_step(from, to),
    }
}

/// Shared rejections: null move, empty origin, own-color destination
fn common_gate(board: &Board, from: Square, to: Square) -> Option<Piece> {
    if from == to {
        return None;
    }
    let piece = board.piece_at(from)?;
    if board.color_at(to) == Some(piece.color) {
        return None;
    }
    Some(piece)
}

fn pawn_move(
    board: &Board,
    color: PieceColor,
    has_moved: bool,
    from: Square,
    to: Square,
    rules: &RuleSet,
) -> bool {
    let direction = color.forward();
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;

    // Single push onto an empty square
    if df == 0 && dr == direction {
        return board.is_empty(to);
    }

    // Double push from the starting rank, both squares empty
    if df == 0 && dr == 2 * direction && !has_moved {
        let Some(intermediate) = from.offset(0, direction) else {
            return false;
        };
        return board.is_empty(intermediate) && board.is_empty(to);
    }

    // Diagonal capture, or the en passant window
    if df.abs() == 1 && dr == direction {
        if board.piece_at(to).is_some() {
            return true;
        }
        return rules.en_passant && board.en_passant_target() == Some(to);
    }

    false
}

fn pawn_attack(color: PieceColor, from: Square, to: Square) -> bool {
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;
    df.abs() == 1 && dr == color.forward()
}

fn knight_move(from: Square, to: Square) -> bool {
    let df = (to.file() as i8 - from.file() as i8).abs();
    let dr = (to.rank() as i8 - from.rank() as i8).abs();
    (df == 2 && dr == 1) || (df == 1 && dr == 2)
}

fn bishop_move(board: &Board, from: Square, to: Square) -> bool {
    let df = (to.file() as i8 - from.file() as i8).abs();
    let dr = (to.rank() as i8 - from.rank() as i8).abs();
    df == dr && is_path_clear(board, from, to)
}

fn rook_move(board: &Board, from: Square, to: Square) -> bool {
    (from.file() == to.file() || from.rank() == to.rank()) && is_path_clear(board, from, to)
}

fn queen_move(board: &Board, from: Square, to: Square) -> bool {
    rook_move(board, from, to) || bishop_move(board, from, to)
}

fn king_move(has_moved: bool, from: Square, to: Square, rules: &RuleSet) -> bool {
    if king_step(from, to) {
        return true;
    }
    // Two-square castling candidate; path and safety are checked by the
    // legality filter
    let df = to.file() as i8 - from.file() as i8;
    rules.castling && !has_moved && to.rank() == from.rank() && df.abs() == 2
}

fn king_step(from: Square, to: Square) -> bool {
    let df = (to.file() as i8 - from.file() as i8).abs();
    let dr = (to.rank() as i8 - from.rank() as i8).abs();
    df <= 1 && dr <= 1
}

/// Every square strictly between `from` and `to` is empty
///
/// Callers guarantee the two squares share a rank, file or diagonal.
pub(crate) fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let df = (to.file() as i8 - from.file() as i8).signum();
    let dr = (to.rank() as i8 - from.rank() as i8).signum();

    let mut current = from.offset(df, dr);
    while let Some(square) = current {
        if square == to {
            return true;
        }
        if !board.is_empty(square) {
            return false;
        }
        current = square.offset(df, dr);
    }
    true
}
