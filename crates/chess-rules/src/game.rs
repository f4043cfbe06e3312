//! Turn controller and public engine surface
//!
//! [`ChessGame`] is the one owner of live board state; every other module
//! reads it or simulates on clones. A submitted move is a single atomic
//! transaction: validate, execute, update auxiliary state, record history,
//! flip the side to move, evaluate the end state. Any rejection returns
//! before the first mutation, so a rejected request leaves the game
//! unchanged.
//!
//! The input layer drives the engine through a small state machine: select
//! a piece, submit a destination, supply a promotion choice when asked.
//! Clock expiry, resignation and draw agreement arrive out-of-band from the
//! collaborator layer and simply set a terminal result.

use tracing::{debug, info, warn};

use crate::board::{Board, BoardView};
use crate::captured::CapturedPieces;
use crate::config::RuleSet;
use crate::error::{MoveError, RulesResult};
use crate::history::{MoveHistory, MoveRecord};
use crate::result::GameResult;
use crate::rules::legality::{is_legal, legal_destinations};
use crate::rules::{attack, end, execute, LegalMove};
use crate::types::{Piece, PieceColor, PieceKind, Square};

/// Where the current turn stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the player on move to pick one of their pieces
    #[default]
    AwaitingSelection,
    /// A piece is selected; waiting for a destination (or a re-selection)
    AwaitingDestination,
    /// A pawn reached the back rank; waiting for the replacement kind
    AwaitingPromotionChoice,
    /// Terminal; all further input is rejected
    GameOver,
}

impl TurnPhase {
    /// Whether player input is accepted in this phase
    pub fn accepts_input(&self) -> bool {
        !matches!(self, TurnPhase::GameOver)
    }
}

/// Currently selected piece and its precomputed legal moves
#[derive(Debug, Default, Clone)]
struct Selection {
    square: Option<Square>,
    legal_moves: Vec<LegalMove>,
}

impl Selection {
    fn clear(&mut self) {
        self.square = None;
        self.legal_moves.clear();
    }
}

/// A fully applied pawn move waiting for its replacement kind
#[derive(Clone, Copy, Debug)]
struct PendingPromotion {
    color: PieceColor,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
}

/// A complete two-player chess session
///
/// Owns the board, the rule configuration and all per-game bookkeeping.
/// Collaborators never see board state mid-transaction; [`ChessGame::snapshot`]
/// hands out detached copies.
#[derive(Debug, Clone)]
pub struct ChessGame {
    board: Board,
    rules: RuleSet,
    phase: TurnPhase,
    selection: Selection,
    pending_promotion: Option<PendingPromotion>,
    /// Side with an outstanding draw offer
    draw_offer: Option<PieceColor>,
    result: GameResult,
    moves: MoveHistory,
    captured: CapturedPieces,
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}

impl ChessGame {
    /// A fresh game with the full standard rule set
    pub fn new() -> ChessGame {
        ChessGame::with_rules(RuleSet::default())
    }

    /// A fresh game with a custom rule set
    pub fn with_rules(rules: RuleSet) -> ChessGame {
        ChessGame {
            board: Board::starting_position(),
            rules,
            phase: TurnPhase::AwaitingSelection,
            selection: Selection::default(),
            pending_promotion: None,
            draw_offer: None,
            result: GameResult::InProgress,
            moves: MoveHistory::default(),
            captured: CapturedPieces::default(),
        }
    }

    /// A game starting from an arbitrary position
    ///
    /// Intended for endgame study and tests; the position is taken as given
    /// and becomes the first snapshot in the repetition history.
    pub fn from_setup(
        pieces: &[(Square, Piece)],
        side_to_move: PieceColor,
        rules: RuleSet,
    ) -> ChessGame {
        ChessGame {
            board: Board::from_pieces(pieces, side_to_move),
            rules,
            phase: TurnPhase::AwaitingSelection,
            selection: Selection::default(),
            pending_promotion: None,
            draw_offer: None,
            result: GameResult::InProgress,
            moves: MoveHistory::default(),
            captured: CapturedPieces::default(),
        }
    }

    /// Back to the standard start position; all bookkeeping cleared
    pub fn reset(&mut self) {
        self.board = Board::starting_position();
        self.phase = TurnPhase::AwaitingSelection;
        self.selection.clear();
        self.pending_promotion = None;
        self.draw_offer = None;
        self.result = GameResult::InProgress;
        self.moves.clear();
        self.captured.clear();
        debug!("game reset to starting position");
    }

    // --- queries ---

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.board.side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Whether `color`'s king is currently attacked
    pub fn is_in_check(&self, color: PieceColor) -> bool {
        attack::in_check(&self.board, color)
    }

    /// Detached read-only copy of the live position
    pub fn snapshot(&self) -> BoardView {
        self.board.view()
    }

    /// The currently selected square, if any
    pub fn selected_square(&self) -> Option<Square> {
        self.selection.square
    }

    /// Chronological record of completed moves
    pub fn move_history(&self) -> &MoveHistory {
        &self.moves
    }

    /// Captured-piece tally for both sides
    pub fn captured_pieces(&self) -> &CapturedPieces {
        &self.captured
    }

    /// Side with an outstanding draw offer, if any
    pub fn draw_offer(&self) -> Option<PieceColor> {
        self.draw_offer
    }

    /// All legal moves of the piece on `square`
    ///
    /// Pure query: repeated calls without an intervening move return the
    /// same set. The square must hold a piece of the side to move.
    pub fn query_legal_moves(&self, square: Square) -> RulesResult<Vec<LegalMove>> {
        self.check_accepting_moves()?;
        self.check_own_piece(square)?;
        Ok(legal_destinations(&self.board, square, &self.rules))
    }

    // --- selection ---

    /// Select an own-color piece, returning its legal moves
    ///
    /// Selecting another own piece replaces the selection.
    pub fn select(&mut self, square: Square) -> RulesResult<&[LegalMove]> {
        self.check_accepting_moves()?;
        self.check_own_piece(square)?;

        self.selection.square = Some(square);
        self.selection.legal_moves = legal_destinations(&self.board, square, &self.rules);
        self.phase = TurnPhase::AwaitingDestination;
        Ok(&self.selection.legal_moves)
    }

    /// Drop the current selection without moving
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        if self.phase == TurnPhase::AwaitingDestination {
            self.phase = TurnPhase::AwaitingSelection;
        }
    }

    // --- the move transaction ---

    /// Validate and play one move
    ///
    /// On success the move is fully applied: side effects, history record,
    /// snapshot, turn flip and end-state evaluation. A pawn reaching the
    /// back rank without an inline `promotion` choice parks the game in
    /// [`TurnPhase::AwaitingPromotionChoice`] with the turn not yet
    /// flipped; complete it with [`ChessGame::promote`]. On any error the
    /// game state is untouched.
    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> RulesResult<GameResult> {
        self.check_accepting_moves()?;
        let piece = self.check_own_piece(from)?;
        if let Some(kind) = promotion {
            if !kind.is_promotion_choice() {
                return Err(MoveError::InvalidPromotionChoice { kind });
            }
        }
        if !is_legal(&self.board, from, to, &self.rules) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let outcome = execute::apply_move(&mut self.board, from, to, &self.rules);
        if let Some(kind) = outcome.captured {
            self.captured.add_capture(piece.color.opponent(), kind);
        }

        debug!(
            %from,
            %to,
            kind = ?piece.kind,
            color = %piece.color,
            capture = outcome.is_capture(),
            castle = outcome.is_castle,
            "move executed"
        );

        let record = MoveRecord {
            kind: piece.kind,
            color: piece.color,
            from,
            to,
            captured: outcome.captured,
            promotion: None,
            is_castle: outcome.is_castle,
            is_en_passant: outcome.is_en_passant,
            is_check: false,
            is_checkmate: false,
        };

        if outcome.promotion_pending {
            match promotion {
                Some(kind) => {
                    execute::apply_promotion(&mut self.board, to, kind);
                    return Ok(self.finish_move(MoveRecord {
                        promotion: Some(kind),
                        ..record
                    }));
                }
                None => {
                    self.pending_promotion = Some(PendingPromotion {
                        color: piece.color,
                        from,
                        to,
                        captured: outcome.captured,
                    });
                    self.selection.clear();
                    self.phase = TurnPhase::AwaitingPromotionChoice;
                    debug!(square = %to, color = %piece.color, "promotion pending");
                    return Ok(GameResult::InProgress);
                }
            }
        }

        Ok(self.finish_move(record))
    }

    /// Complete a pending promotion with the chosen kind
    pub fn promote(&mut self, kind: PieceKind) -> RulesResult<GameResult> {
        if self.result.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let Some(pending) = self.pending_promotion else {
            return Err(MoveError::NoPendingPromotion);
        };
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotionChoice { kind });
        }

        execute::apply_promotion(&mut self.board, pending.to, kind);
        self.pending_promotion = None;
        debug!(square = %pending.to, ?kind, "promotion applied");

        let record = MoveRecord {
            kind: PieceKind::Pawn,
            color: pending.color,
            from: pending.from,
            to: pending.to,
            captured: pending.captured,
            promotion: Some(kind),
            is_castle: false,
            is_en_passant: false,
            is_check: false,
            is_checkmate: false,
        };
        Ok(self.finish_move(record))
    }

    /// Flip the turn, record history and evaluate the end state
    fn finish_move(&mut self, record: MoveRecord) -> GameResult {
        self.board.flip_side_to_move();
        self.board.record_snapshot();

        debug_assert!(
            self.board.king_square(PieceColor::White).is_some()
                && self.board.king_square(PieceColor::Black).is_some(),
            "a king left the board; the legality filter must prevent this"
        );

        self.result = end::evaluate(&self.board, &self.rules);

        self.moves.add_move(MoveRecord {
            is_check: attack::in_check(&self.board, self.board.side_to_move()),
            is_checkmate: matches!(self.result, GameResult::Checkmate { .. }),
            ..record
        });

        self.selection.clear();
        // Playing a move declines any outstanding draw offer
        self.draw_offer = None;

        if self.result.is_game_over() {
            self.phase = TurnPhase::GameOver;
            info!(result = %self.result.message(), "game over");
        } else {
            self.phase = TurnPhase::AwaitingSelection;
        }
        self.result
    }

    // --- out-of-band terminal events ---

    /// Resign on behalf of `color`; no-op once the game is over
    pub fn resign(&mut self, color: PieceColor) -> GameResult {
        if self.result.is_game_over() {
            warn!(%color, "resignation ignored, game already over");
            return self.result;
        }
        self.finish_out_of_band(GameResult::Resignation { by: color })
    }

    /// Report a flag fall from the clock layer; no-op once the game is over
    pub fn flag_timeout(&mut self, color: PieceColor) -> GameResult {
        if self.result.is_game_over() {
            warn!(%color, "timeout ignored, game already over");
            return self.result;
        }
        self.finish_out_of_band(GameResult::Timeout { flagged: color })
    }

    /// Offer a draw on behalf of the side to move
    ///
    /// Returns `false` when an offer is already outstanding or the game is
    /// over.
    pub fn offer_draw(&mut self) -> bool {
        if self.result.is_game_over() || self.draw_offer.is_some() {
            return false;
        }
        self.draw_offer = Some(self.board.side_to_move());
        debug!(by = %self.board.side_to_move(), "draw offered");
        true
    }

    /// Accept an outstanding draw offer; no-op when there is none
    pub fn accept_draw(&mut self) -> GameResult {
        if self.result.is_game_over() {
            return self.result;
        }
        if self.draw_offer.is_none() {
            warn!("draw acceptance ignored, no offer outstanding");
            return self.result;
        }
        self.draw_offer = None;
        self.finish_out_of_band(GameResult::DrawAgreed)
    }

    /// Decline an outstanding draw offer; play continues
    pub fn decline_draw(&mut self) {
        self.draw_offer = None;
    }

    fn finish_out_of_band(&mut self, result: GameResult) -> GameResult {
        self.result = result;
        self.phase = TurnPhase::GameOver;
        self.selection.clear();
        self.pending_promotion = None;
        info!(result = %result.message(), "game over");
        result
    }

    // --- shared validation ---

    fn check_accepting_moves(&self) -> RulesResult<()> {
        if self.result.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(MoveError::PromotionPending);
        }
        Ok(())
    }

    fn check_own_piece(&self, square: Square) -> RulesResult<Piece> {
        let piece = self
            .board
            .piece_at(square)
            .ok_or(MoveError::NoPieceAtSquare { square })?;
        if piece.color != self.board.side_to_move() {
            return Err(MoveError::NotYourTurn {
                square,
                color: piece.color,
            });
        }
        Ok(piece)
    }
}
