//! Game-end evaluation
//!
//! Runs once per completed turn, after the side to move has flipped. The
//! draw conditions are tested before the exhaustive legal-move scan, cheap
//! checks first, and each condition is gated by the active [`RuleSet`].

use tracing::trace;

use crate::board::Board;
use crate::config::RuleSet;
use crate::result::GameResult;
use crate::types::{PieceColor, PieceKind};

use super::attack::in_check;
use super::legality::side_has_legal_move;

/// Classify the position for the side now to move
pub(crate) fn evaluate(board: &Board, rules: &RuleSet) -> GameResult {
    if rules.insufficient_material && insufficient_material(board) {
        return GameResult::InsufficientMaterial;
    }
    if rules.fifty_move_rule && board.halfmove_clock() >= 100 {
        return GameResult::FiftyMoveRule;
    }
    if rules.threefold_repetition && board.repetition_count() >= 3 {
        return GameResult::ThreefoldRepetition;
    }

    let side = board.side_to_move();
    if !side_has_legal_move(board, side, rules) {
        return if in_check(board, side) {
            GameResult::Checkmate {
                winner: side.opponent(),
            }
        } else {
            GameResult::Stalemate
        };
    }

    trace!(
        halfmove_clock = board.halfmove_clock(),
        repetitions = board.repetition_count(),
        "position evaluated, game continues"
    );
    GameResult::InProgress
}

/// Neither side can mate: at most four pieces total and each side reduces
/// to a lone king, king+bishop or king+knight
fn insufficient_material(board: &Board) -> bool {
    if board.piece_count() > 4 {
        return false;
    }
    side_cannot_mate(board, PieceColor::White) && side_cannot_mate(board, PieceColor::Black)
}

fn side_cannot_mate(board: &Board, color: PieceColor) -> bool {
    let mut kinds: Vec<PieceKind> = board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(_, piece)| piece.kind)
        .collect();
    kinds.sort_unstable();

    matches!(
        kinds.as_slice(),
        [PieceKind::King]
            | [PieceKind::Knight, PieceKind::King]
            | [PieceKind::Bishop, PieceKind::King]
    )
}
