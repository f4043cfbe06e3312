//! Rule-set configuration
//!
//! The optional rules (castling, en passant, the draw conditions) are
//! independent modules selected per game through a [`RuleSet`], so hosts
//! that want a reduced variant configure one engine instead of forking it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects which optional rule modules are active
///
/// [`RuleSet::default`] enables everything, which is standard chess. Core
/// movement, check and checkmate/stalemate detection are not optional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleSet {
    /// King-and-rook castling
    pub castling: bool,
    /// The en passant capture window
    pub en_passant: bool,
    /// Draw after 100 halfmoves without a capture or pawn move
    pub fifty_move_rule: bool,
    /// Draw when a position occurs for the third time
    pub threefold_repetition: bool,
    /// Draw when neither side can mate
    pub insufficient_material: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            castling: true,
            en_passant: true,
            fifty_move_rule: true,
            threefold_repetition: true,
            insufficient_material: true,
        }
    }
}

impl RuleSet {
    /// Basic movement only: no castling, no en passant, no draw detection
    /// beyond stalemate.
    pub fn movement_only() -> Self {
        RuleSet {
            castling: false,
            en_passant: false,
            fifty_move_rule: false,
            threefold_repetition: false,
            insufficient_material: false,
        }
    }
}
