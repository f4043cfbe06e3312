//! Captured pieces tracking
//!
//! Tallies the pieces each side has taken and derives a material-advantage
//! figure in pawn units for the presentation layer (captured-piece trays,
//! advantage badges).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{PieceColor, PieceKind};

/// Pieces captured by each side since the last reset
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapturedPieces {
    /// Black pieces White has taken
    pub by_white: Vec<PieceKind>,
    /// White pieces Black has taken
    pub by_black: Vec<PieceKind>,
}

impl CapturedPieces {
    /// Record a capture; the capturing side is the captured piece's opponent
    pub(crate) fn add_capture(&mut self, captured_color: PieceColor, kind: PieceKind) {
        match captured_color {
            PieceColor::White => self.by_black.push(kind),
            PieceColor::Black => self.by_white.push(kind),
        }
    }

    /// Material difference in pawn units; positive favors White
    pub fn material_advantage(&self) -> i32 {
        let white: i32 = self.by_white.iter().map(|kind| piece_value(*kind)).sum();
        let black: i32 = self.by_black.iter().map(|kind| piece_value(*kind)).sum();
        white - black
    }

    pub(crate) fn clear(&mut self) {
        self.by_white.clear();
        self.by_black.clear();
    }
}

/// Standard piece values in pawn units; the king carries none since it is
/// never captured
fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}
