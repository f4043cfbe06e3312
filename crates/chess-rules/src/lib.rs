//! Chess rules and legality engine
//!
//! Given a position, the engine answers which moves are legal, detects
//! check, and classifies the game as ongoing, checkmate, stalemate or one
//! of the draw conditions. Rendering, input mapping, clocks and menus are
//! external collaborators; they consume legal-move sets and [`GameResult`]
//! verdicts and feed the engine discrete requests.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chess_rules::{ChessGame, Square};
//!
//! let mut game = ChessGame::new();
//! let from = Square::new(4, 1)?; // e2
//! let to = Square::new(4, 3)?;   // e4
//! let moves = game.query_legal_moves(from)?;
//! assert!(moves.iter().any(|m| m.destination == to));
//! game.submit_move(from, to, None)?;
//! ```
//!
//! # Module Organization
//!
//! - `types` - squares, colors, piece kinds
//! - `board` - the authoritative position and its read-only view
//! - `rules` - movement, check, legality, execution, end evaluation
//! - `game` - the turn controller owning all live state
//! - `config` - composable rule-set selection
//! - `history`, `captured` - per-game bookkeeping for the UI layer
//! - `error`, `result` - rejection reasons and terminal verdicts
//!
//! The optional `serde` feature derives `Serialize`/`Deserialize` on the
//! public value types so a host application can ship them over its own
//! channel.

mod board;
mod captured;
mod config;
mod error;
mod game;
mod history;
mod result;
mod rules;
mod types;

pub use board::BoardView;
pub use captured::CapturedPieces;
pub use config::RuleSet;
pub use error::{MoveError, RulesResult};
pub use game::{ChessGame, TurnPhase};
pub use history::{MoveHistory, MoveRecord, PositionSnapshot};
pub use result::GameResult;
pub use rules::LegalMove;
pub use types::{Piece, PieceColor, PieceKind, Square};
