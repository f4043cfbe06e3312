//! Square attack and check detection
//!
//! Built on the move generator's attack-only mode and deliberately unaware
//! of the legality filter: legality itself is defined in terms of check, so
//! check detection calling back into legality would never terminate.

use crate::board::Board;
use crate::types::{PieceColor, Square};

use super::movement::is_attack;

/// True iff any piece of `by` attacks `square`
pub(crate) fn is_attacked(board: &Board, square: Square, by: PieceColor) -> bool {
    board
        .pieces()
        .any(|(from, piece)| piece.color == by && is_attack(board, from, square))
}

/// True iff `color`'s king is attacked by the opponent
///
/// Kingless positions (possible in reduced test setups) count as not in
/// check.
pub(crate) fn in_check(board: &Board, color: PieceColor) -> bool {
    match board.king_square(color) {
        Some(king) => is_attacked(board, king, color.opponent()),
        None => false,
    }
}
