//! Game flow integration tests
//!
//! Full games driven through the public engine surface only: selection,
//! move submission, promotion, the out-of-band terminal events, and the
//! draw conditions, with the auxiliary bookkeeping (history, captures,
//! snapshots) checked along the way.

use chess_rules::{
    ChessGame, GameResult, MoveError, Piece, PieceColor, PieceKind, RuleSet, Square, TurnPhase,
};

use PieceColor::{Black, White};
use PieceKind::{King, Knight, Pawn, Queen, Rook};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank).expect("test square in bounds")
}

/// Submit a move that the script knows is legal
fn mv(game: &mut ChessGame, from: (u8, u8), to: (u8, u8)) -> GameResult {
    game.submit_move(sq(from.0, from.1), sq(to.0, to.1), None)
        .unwrap_or_else(|err| panic!("scripted move {from:?} -> {to:?} rejected: {err}"))
}

// ============================================================================
// Reset and opening position
// ============================================================================

#[test]
fn test_reset_yields_standard_start() {
    let game = ChessGame::new();
    let view = game.snapshot();

    assert_eq!(view.pieces.len(), 32);
    assert_eq!(view.side_to_move, White);
    assert_eq!(view.en_passant_target, None);
    assert_eq!(view.halfmove_clock, 0);

    assert_eq!(
        game.piece_at(sq(4, 0)),
        Some(Piece::new(King, White)),
        "white king starts on e1"
    );
    assert_eq!(game.piece_at(sq(3, 7)), Some(Piece::new(Queen, Black)));
    assert_eq!(game.piece_at(sq(0, 1)), Some(Piece::new(Pawn, White)));
    assert_eq!(game.phase(), TurnPhase::AwaitingSelection);
    assert_eq!(game.result(), GameResult::InProgress);
}

#[test]
fn test_twenty_legal_opening_moves() {
    let game = ChessGame::new();
    let mut total = 0;
    for file in 0..8 {
        for rank in 0..8 {
            let square = sq(file, rank);
            if game.piece_at(square).map(|p| p.color) == Some(White) {
                total += game.query_legal_moves(square).unwrap().len();
            }
        }
    }
    assert_eq!(total, 20, "16 pawn moves and 4 knight moves");
}

#[test]
fn test_query_legal_moves_is_idempotent() {
    let game = ChessGame::new();
    let first = game.query_legal_moves(sq(4, 1)).unwrap();
    let second = game.query_legal_moves(sq(4, 1)).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Rejections never mutate state
// ============================================================================

#[test]
fn test_rejected_moves_leave_the_game_untouched() {
    let mut game = ChessGame::new();
    let before = game.snapshot();

    assert_eq!(
        game.submit_move(sq(4, 1), sq(4, 5), None),
        Err(MoveError::IllegalMove {
            from: sq(4, 1),
            to: sq(4, 5),
        })
    );
    assert_eq!(
        game.submit_move(sq(4, 4), sq(4, 5), None),
        Err(MoveError::NoPieceAtSquare { square: sq(4, 4) })
    );
    assert_eq!(
        game.submit_move(sq(4, 6), sq(4, 5), None),
        Err(MoveError::NotYourTurn {
            square: sq(4, 6),
            color: Black,
        })
    );

    assert_eq!(game.snapshot(), before, "rejections must not change state");
    assert!(game.move_history().is_empty());
    assert_eq!(game.side_to_move(), White);
}

#[test]
fn test_selection_state_machine() {
    let mut game = ChessGame::new();
    assert_eq!(game.phase(), TurnPhase::AwaitingSelection);

    let move_count = game.select(sq(4, 1)).unwrap().len();
    assert_eq!(move_count, 2, "e-pawn has the single and double push");
    assert_eq!(game.phase(), TurnPhase::AwaitingDestination);
    assert_eq!(game.selected_square(), Some(sq(4, 1)));

    game.clear_selection();
    assert_eq!(game.phase(), TurnPhase::AwaitingSelection);
    assert_eq!(game.selected_square(), None);

    assert_eq!(
        game.select(sq(4, 6)),
        Err(MoveError::NotYourTurn {
            square: sq(4, 6),
            color: Black,
        })
    );
    assert_eq!(
        game.select(sq(4, 4)),
        Err(MoveError::NoPieceAtSquare { square: sq(4, 4) })
    );
}

// ============================================================================
// Checkmate
// ============================================================================

#[test]
fn test_fools_mate() {
    let mut game = ChessGame::new();

    mv(&mut game, (5, 1), (5, 2)); // f3
    mv(&mut game, (4, 6), (4, 4)); // e5
    mv(&mut game, (6, 1), (6, 3)); // g4
    let result = mv(&mut game, (3, 7), (7, 3)); // Qh4#

    assert_eq!(result, GameResult::Checkmate { winner: Black });
    assert_eq!(result.winner(), Some(Black));
    assert_eq!(game.phase(), TurnPhase::GameOver);

    let last = game.move_history().last_move().unwrap();
    assert!(last.is_check && last.is_checkmate);

    // Terminal: every further input is rejected
    assert_eq!(
        game.submit_move(sq(4, 1), sq(4, 2), None),
        Err(MoveError::GameOver)
    );
    assert_eq!(game.select(sq(4, 1)), Err(MoveError::GameOver));
    assert_eq!(game.query_legal_moves(sq(4, 1)), Err(MoveError::GameOver));
}

// ============================================================================
// En passant
// ============================================================================

/// Open the classic window: e4 a6 e5 d5 leaves a white pawn on e5 with d6
/// as the en passant target.
fn game_with_open_en_passant_window() -> ChessGame {
    let mut game = ChessGame::new();
    mv(&mut game, (4, 1), (4, 3)); // e4
    mv(&mut game, (0, 6), (0, 5)); // a6
    mv(&mut game, (4, 3), (4, 4)); // e5
    mv(&mut game, (3, 6), (3, 4)); // d5
    game
}

#[test]
fn test_en_passant_capture_in_the_window() {
    let mut game = game_with_open_en_passant_window();
    assert_eq!(game.snapshot().en_passant_target, Some(sq(3, 5)));

    let moves = game.query_legal_moves(sq(4, 4)).unwrap();
    let ep = moves
        .iter()
        .find(|m| m.destination == sq(3, 5))
        .expect("en passant capture should be offered");
    assert!(ep.is_capture && ep.is_en_passant);

    mv(&mut game, (4, 4), (3, 5)); // exd6 e.p.
    assert_eq!(game.piece_at(sq(3, 4)), None, "the d5 pawn is gone");
    assert_eq!(game.piece_at(sq(3, 5)).map(|p| p.kind), Some(Pawn));

    let last = game.move_history().last_move().unwrap();
    assert!(last.is_en_passant);
    assert_eq!(last.captured, Some(Pawn));
    assert_eq!(game.captured_pieces().by_white, vec![Pawn]);
}

#[test]
fn test_en_passant_window_closes_after_one_halfmove() {
    let mut game = game_with_open_en_passant_window();

    mv(&mut game, (7, 1), (7, 2)); // h3, declining the capture
    assert_eq!(game.snapshot().en_passant_target, None);

    mv(&mut game, (0, 5), (0, 4)); // a5
    let moves = game.query_legal_moves(sq(4, 4)).unwrap();
    assert!(
        moves.iter().all(|m| m.destination != sq(3, 5)),
        "the window closed one halfmove after the double push"
    );
}

// ============================================================================
// Castling
// ============================================================================

fn castling_setup(extra: &[(Square, Piece)]) -> ChessGame {
    let mut pieces = vec![
        (sq(4, 0), Piece::new(King, White)),
        (sq(0, 0), Piece::new(Rook, White)),
        (sq(7, 0), Piece::new(Rook, White)),
        (sq(4, 7), Piece::new(King, Black)),
    ];
    pieces.extend_from_slice(extra);
    ChessGame::from_setup(&pieces, White, RuleSet::default())
}

#[test]
fn test_kingside_castling_moves_both_pieces() {
    let mut game = castling_setup(&[]);

    let moves = game.query_legal_moves(sq(4, 0)).unwrap();
    let kingside = moves
        .iter()
        .find(|m| m.destination == sq(6, 0))
        .expect("kingside castling should be offered");
    assert!(kingside.is_castle);
    assert!(moves.iter().any(|m| m.destination == sq(2, 0) && m.is_castle));

    mv(&mut game, (4, 0), (6, 0)); // O-O
    assert_eq!(game.piece_at(sq(6, 0)).map(|p| p.kind), Some(King));
    assert_eq!(
        game.piece_at(sq(5, 0)).map(|p| p.kind),
        Some(Rook),
        "the rook lands beside the king"
    );
    assert_eq!(game.piece_at(sq(7, 0)), None);
    assert!(game.move_history().last_move().unwrap().is_castle);
}

#[test]
fn test_castling_denied_through_attacked_transit() {
    let game = castling_setup(&[(sq(5, 7), Piece::new(Rook, Black))]);

    let moves = game.query_legal_moves(sq(4, 0)).unwrap();
    assert!(
        moves.iter().all(|m| m.destination != sq(6, 0)),
        "f1 is swept by the rook on f8"
    );
    assert!(
        moves.iter().any(|m| m.destination == sq(2, 0) && m.is_castle),
        "queenside transit squares are untouched"
    );
}

#[test]
fn test_castling_rights_lost_after_king_moves() {
    let mut game = castling_setup(&[]);

    mv(&mut game, (4, 0), (5, 0)); // Kf1
    mv(&mut game, (4, 7), (3, 7)); // Kd8
    mv(&mut game, (5, 0), (4, 0)); // Ke1, back home
    mv(&mut game, (3, 7), (4, 7)); // Ke8

    let moves = game.query_legal_moves(sq(4, 0)).unwrap();
    assert!(
        moves.iter().all(|m| !m.is_castle),
        "returning home does not restore castling rights"
    );
}

// ============================================================================
// Promotion
// ============================================================================

fn promotion_setup() -> ChessGame {
    ChessGame::from_setup(
        &[
            (sq(0, 6), Piece::new(Pawn, White)),
            (sq(7, 0), Piece::new(King, White)),
            (sq(4, 4), Piece::new(King, Black)),
        ],
        White,
        RuleSet::default(),
    )
}

#[test]
fn test_promotion_waits_for_a_choice() {
    let mut game = promotion_setup();

    let result = mv(&mut game, (0, 6), (0, 7));
    assert_eq!(result, GameResult::InProgress);
    assert_eq!(game.phase(), TurnPhase::AwaitingPromotionChoice);
    assert_eq!(game.side_to_move(), White, "the turn has not flipped yet");
    assert_eq!(
        game.piece_at(sq(0, 7)).map(|p| p.kind),
        Some(Pawn),
        "the pawn stays a pawn until the choice arrives"
    );

    // Everything except the promotion choice is rejected meanwhile
    assert_eq!(
        game.submit_move(sq(7, 0), sq(7, 1), None),
        Err(MoveError::PromotionPending)
    );
    assert_eq!(game.select(sq(7, 0)), Err(MoveError::PromotionPending));
    assert_eq!(
        game.promote(Pawn),
        Err(MoveError::InvalidPromotionChoice { kind: Pawn })
    );
    assert_eq!(
        game.promote(King),
        Err(MoveError::InvalidPromotionChoice { kind: King })
    );

    let result = game.promote(Queen).unwrap();
    assert_eq!(result, GameResult::InProgress);
    assert_eq!(game.piece_at(sq(0, 7)).map(|p| p.kind), Some(Queen));
    assert_eq!(game.side_to_move(), Black);
    assert_eq!(game.phase(), TurnPhase::AwaitingSelection);

    let last = game.move_history().last_move().unwrap();
    assert_eq!(last.promotion, Some(Queen));
}

#[test]
fn test_inline_promotion_choice_completes_in_one_call() {
    let mut game = promotion_setup();

    let result = game.submit_move(sq(0, 6), sq(0, 7), Some(Rook)).unwrap();
    assert_eq!(result, GameResult::InProgress);
    assert_eq!(game.piece_at(sq(0, 7)).map(|p| p.kind), Some(Rook));
    assert_eq!(game.side_to_move(), Black);
}

#[test]
fn test_promote_without_pending_promotion() {
    let mut game = ChessGame::new();
    assert_eq!(game.promote(Queen), Err(MoveError::NoPendingPromotion));
}

// ============================================================================
// Draw conditions over full games
// ============================================================================

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut game = ChessGame::new();

    // Knights out and back twice: the starting position (White to move)
    // occurs after reset, after the 4th halfmove and after the 8th.
    let shuffle = [
        ((1, 0), (2, 2)),
        ((1, 7), (2, 5)),
        ((2, 2), (1, 0)),
        ((2, 5), (1, 7)),
    ];
    let mut result = GameResult::InProgress;
    for _ in 0..2 {
        for &(from, to) in &shuffle {
            result = mv(&mut game, from, to);
        }
    }

    assert_eq!(result, GameResult::ThreefoldRepetition);
    assert!(result.is_draw());
    assert_eq!(game.phase(), TurnPhase::GameOver);
}

#[test]
fn test_fifty_move_rule_with_repetition_disabled() {
    let rules = RuleSet {
        threefold_repetition: false,
        ..RuleSet::default()
    };
    let mut game = ChessGame::with_rules(rules);

    let shuffle = [
        ((1, 0), (2, 2)),
        ((1, 7), (2, 5)),
        ((2, 2), (1, 0)),
        ((2, 5), (1, 7)),
    ];
    let mut result = GameResult::InProgress;
    for _ in 0..25 {
        for &(from, to) in &shuffle {
            result = mv(&mut game, from, to);
        }
    }

    assert_eq!(
        result,
        GameResult::FiftyMoveRule,
        "100 quiet halfmoves with repetition switched off"
    );
    assert_eq!(game.snapshot().halfmove_clock, 100);
}

#[test]
fn test_insufficient_material_fires_on_the_capture() {
    let mut game = ChessGame::from_setup(
        &[
            (sq(3, 0), Piece::new(King, White)),
            (sq(2, 2), Piece::new(Knight, White)),
            (sq(4, 7), Piece::new(King, Black)),
            (sq(3, 4), Piece::new(Rook, Black)),
        ],
        White,
        RuleSet::default(),
    );

    // Nxd5 removes the last mating material on either side
    let result = mv(&mut game, (2, 2), (3, 4));
    assert_eq!(result, GameResult::InsufficientMaterial);
    assert_eq!(game.phase(), TurnPhase::GameOver);
}

// ============================================================================
// Out-of-band terminal events
// ============================================================================

#[test]
fn test_resignation() {
    let mut game = ChessGame::new();
    let result = game.resign(White);

    assert_eq!(result, GameResult::Resignation { by: White });
    assert_eq!(result.winner(), Some(Black));
    assert_eq!(
        game.submit_move(sq(4, 1), sq(4, 2), None),
        Err(MoveError::GameOver)
    );
    // Repeated resignation is a no-op, the first result stands
    assert_eq!(game.resign(Black), GameResult::Resignation { by: White });
}

#[test]
fn test_timeout_injection() {
    let mut game = ChessGame::new();
    let result = game.flag_timeout(Black);

    assert_eq!(result, GameResult::Timeout { flagged: Black });
    assert_eq!(result.winner(), Some(White));
    assert_eq!(game.phase(), TurnPhase::GameOver);
}

#[test]
fn test_draw_offer_accept() {
    let mut game = ChessGame::new();

    assert!(game.offer_draw());
    assert_eq!(game.draw_offer(), Some(White));
    assert!(!game.offer_draw(), "only one outstanding offer at a time");

    let result = game.accept_draw();
    assert_eq!(result, GameResult::DrawAgreed);
    assert!(result.is_draw());
    assert!(!game.offer_draw(), "the game is over");
}

#[test]
fn test_draw_offer_decline_resumes_play() {
    let mut game = ChessGame::new();

    assert!(game.offer_draw());
    game.decline_draw();
    assert_eq!(game.draw_offer(), None);
    assert_eq!(game.result(), GameResult::InProgress);
    assert!(game.offer_draw(), "a declined offer can be renewed");
}

#[test]
fn test_playing_a_move_declines_the_offer() {
    let mut game = ChessGame::new();

    assert!(game.offer_draw());
    mv(&mut game, (4, 1), (4, 3));
    assert_eq!(game.draw_offer(), None);
    assert_eq!(
        game.accept_draw(),
        GameResult::InProgress,
        "acceptance with no outstanding offer is a no-op"
    );
}

// ============================================================================
// Bookkeeping
// ============================================================================

#[test]
fn test_history_and_capture_tally() {
    let mut game = ChessGame::new();

    mv(&mut game, (4, 1), (4, 3)); // e4
    mv(&mut game, (3, 6), (3, 4)); // d5
    mv(&mut game, (4, 3), (3, 4)); // exd5

    assert_eq!(game.move_history().len(), 3);
    let last = game.move_history().last_move().unwrap();
    assert_eq!(last.captured, Some(Pawn));
    assert_eq!(game.captured_pieces().by_white, vec![Pawn]);
    assert_eq!(game.captured_pieces().material_advantage(), 1);

    game.reset();
    assert_eq!(game.snapshot().pieces.len(), 32);
    assert!(game.move_history().is_empty());
    assert_eq!(game.captured_pieces().material_advantage(), 0);
    assert_eq!(game.result(), GameResult::InProgress);
}

#[test]
fn test_check_is_recorded_and_queryable() {
    let mut game = ChessGame::new();

    mv(&mut game, (4, 1), (4, 3)); // e4
    mv(&mut game, (5, 6), (5, 5)); // f6
    mv(&mut game, (3, 0), (7, 4)); // Qh5+

    assert!(game.is_in_check(Black));
    assert!(!game.is_in_check(White));
    let last = game.move_history().last_move().unwrap();
    assert!(last.is_check && !last.is_checkmate);
}
