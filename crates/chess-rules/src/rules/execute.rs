//! Side effects of a committed move
//!
//! [`apply_move`] assumes legality has already been established and applies
//! everything a committed move entails: capture removal (en passant
//! included), rook relocation on castling, the one-half-move en passant
//! window, the halfmove clock, and promotion-pending detection. The turn
//! flip and snapshot recording stay with the turn controller, which defers
//! them while a promotion choice is outstanding.

use crate::board::Board;
use crate::config::RuleSet;
use crate::types::{PieceKind, Square};

use super::legality::is_en_passant_capture;

/// What a committed move did, for history records and the promotion flow
#[derive(Clone, Copy, Debug)]
pub(crate) struct MoveOutcome {
    pub captured: Option<PieceKind>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    /// The mover is a pawn that reached the far back rank; the turn must
    /// not advance until a replacement kind is supplied
    pub promotion_pending: bool,
}

impl MoveOutcome {
    pub(crate) fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Apply an already-legal move to the live board
pub(crate) fn apply_move(
    board: &mut Board,
    from: Square,
    to: Square,
    rules: &RuleSet,
) -> MoveOutcome {
    let Some(piece) = board.piece_at(from) else {
        debug_assert!(false, "apply_move on empty square {from}");
        return MoveOutcome {
            captured: None,
            is_en_passant: false,
            is_castle: false,
            promotion_pending: false,
        };
    };

    // Capture removal; the en passant victim sits beside the destination
    let is_en_passant = is_en_passant_capture(board, from, to, rules);
    let captured = if is_en_passant {
        board.remove_piece(Square::at(to.file(), from.rank()))
    } else {
        board.remove_piece(to)
    }
    .map(|victim| victim.kind);

    // The halfmove clock counts reversible halfmoves only
    if captured.is_some() || piece.kind == PieceKind::Pawn {
        board.note_irreversible_move();
    } else {
        board.note_reversible_move();
    }

    // Castling relocates the rook in the same transaction
    let df = to.file() as i8 - from.file() as i8;
    let is_castle = piece.kind == PieceKind::King && df.abs() == 2;
    if is_castle {
        let rank = from.rank();
        let (rook_from, rook_to) = if df > 0 { (7, 5) } else { (0, 3) };
        board.relocate(Square::at(rook_from, rank), Square::at(rook_to, rank));
        if let Some(rook) = board.piece_at_mut(Square::at(rook_to, rank)) {
            rook.has_moved = true;
        }
    }

    // The en passant window opens on a double push and closes on any other
    // move
    let dr = to.rank() as i8 - from.rank() as i8;
    let new_target = if rules.en_passant && piece.kind == PieceKind::Pawn && dr.abs() == 2 {
        from.offset(0, dr / 2)
    } else {
        None
    };

    board.relocate(from, to);
    if let Some(moved) = board.piece_at_mut(to) {
        moved.has_moved = true;
    }
    board.set_en_passant_target(new_target);

    MoveOutcome {
        captured,
        is_en_passant,
        is_castle,
        promotion_pending: piece.kind == PieceKind::Pawn
            && to.rank() == piece.color.promotion_rank(),
    }
}

/// Replace a promotion-pending pawn with the chosen kind
///
/// The caller has validated the choice; the pawn kind is gone for good and
/// the piece never re-triggers promotion.
pub(crate) fn apply_promotion(board: &mut Board, square: Square, kind: PieceKind) {
    debug_assert!(kind.is_promotion_choice(), "promotion to {kind:?}");
    if let Some(piece) = board.piece_at_mut(square) {
        debug_assert_eq!(piece.kind, PieceKind::Pawn, "promotion of a non-pawn");
        piece.kind = kind;
    } else {
        debug_assert!(false, "promotion on empty square {square}");
    }
}
