//! Game result taxonomy
//!
//! Starts as `InProgress` and transitions to exactly one terminal state.
//! Checkmate, stalemate and the rule draws come from the game-end
//! evaluator; resignation, draw agreement and timeout are injected by the
//! collaborator layer (buttons, clocks). All non-`InProgress` states are
//! terminal: once set, the engine accepts no further moves.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::PieceColor;

/// Terminal classification of a game, or `InProgress`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    /// Game is still running; moves are accepted
    #[default]
    InProgress,
    /// The named color delivered mate
    Checkmate { winner: PieceColor },
    /// Side to move has no legal move but is not in check
    Stalemate,
    /// Neither side retains mating material
    InsufficientMaterial,
    /// 100 halfmoves without a capture or pawn move
    FiftyMoveRule,
    /// The same position occurred for the third time
    ThreefoldRepetition,
    /// The named color resigned
    Resignation { by: PieceColor },
    /// A draw offer was accepted
    DrawAgreed,
    /// The named color's clock expired
    Timeout { flagged: PieceColor },
}

impl GameResult {
    /// Whether the game has ended
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// The winning color, `None` for draws and for a running game
    pub fn winner(&self) -> Option<PieceColor> {
        match self {
            GameResult::Checkmate { winner } => Some(*winner),
            GameResult::Resignation { by } => Some(by.opponent()),
            GameResult::Timeout { flagged } => Some(flagged.opponent()),
            _ => None,
        }
    }

    /// Whether the game ended without a winner
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameResult::Stalemate
                | GameResult::InsufficientMaterial
                | GameResult::FiftyMoveRule
                | GameResult::ThreefoldRepetition
                | GameResult::DrawAgreed
        )
    }

    /// Human-readable result line for the presentation layer
    pub fn message(&self) -> String {
        match self {
            GameResult::InProgress => "Game in progress".to_string(),
            GameResult::Checkmate { winner } => format!("Checkmate! {winner} wins"),
            GameResult::Stalemate => "Stalemate! It's a draw".to_string(),
            GameResult::InsufficientMaterial => "Draw (insufficient material)".to_string(),
            GameResult::FiftyMoveRule => "Draw (50-move rule)".to_string(),
            GameResult::ThreefoldRepetition => "Draw (threefold repetition)".to_string(),
            GameResult::Resignation { by } => format!("{by} resigned"),
            GameResult::DrawAgreed => "Draw by agreement".to_string(),
            GameResult::Timeout { flagged } => {
                format!("Time over! {} wins", flagged.opponent())
            }
        }
    }
}
