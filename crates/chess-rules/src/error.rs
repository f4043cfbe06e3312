//! Error types for the rules engine
//!
//! Every rejection is recoverable and leaves the live board state unchanged;
//! the presentation layer decides how to surface the reason.

use thiserror::Error;

use crate::types::{PieceColor, PieceKind, Square};

/// Errors returned when a request cannot be honored
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Coordinates outside the 0-7 board range
    #[error("Invalid square: file {file}, rank {rank} (must be 0-7)")]
    InvalidSquare { file: u8, rank: u8 },

    /// No piece on the addressed square
    #[error("No piece at {square}")]
    NoPieceAtSquare { square: Square },

    /// The addressed piece belongs to the side not on move
    #[error("Piece at {square} is {color}'s; it is not {color}'s turn")]
    NotYourTurn { square: Square, color: PieceColor },

    /// Wrong geometry, blocked path, own-color capture, or the mover's king
    /// would be left in check
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Promotion kind other than queen, rook, bishop or knight
    #[error("Invalid promotion choice: {kind:?}")]
    InvalidPromotionChoice { kind: PieceKind },

    /// A promotion choice was supplied with no promotion outstanding
    #[error("No promotion is pending")]
    NoPendingPromotion,

    /// A move was submitted while a promotion choice is outstanding
    #[error("A promotion choice is pending; supply it before the next move")]
    PromotionPending,

    /// The game has reached a terminal result
    #[error("The game is over; no further input is accepted")]
    GameOver,
}

/// Result type alias for engine operations
pub type RulesResult<T> = Result<T, MoveError>;
