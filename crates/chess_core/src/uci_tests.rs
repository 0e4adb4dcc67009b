use super::*;
use crate::Color;

#[test]
fn test_plain_move_round_trip() {
    let game = Game::startpos();
    let mv = parse_uci_move(game.board(), "e2e4").unwrap();
    assert_eq!(move_to_uci(game.board(), mv), "e2e4");
}

#[test]
fn test_castling_uses_standard_notation() {
    let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let short = parse_uci_move(game.board(), "e1g1").expect("e1g1 should castle");
    assert_eq!(short.to, Square::H1, "rules engine encodes castling as king takes rook");
    assert_eq!(move_to_uci(game.board(), short), "e1g1");

    let long = parse_uci_move(game.board(), "e1c1").expect("e1c1 should castle");
    assert_eq!(long.to, Square::A1);
    assert_eq!(move_to_uci(game.board(), long), "e1c1");

    // The king-takes-rook spelling is accepted too
    assert_eq!(parse_uci_move(game.board(), "e1h1"), Some(short));
}

#[test]
fn test_promotion_notation() {
    let game = Game::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();

    let mv = parse_uci_move(game.board(), "e7e8n").unwrap();
    assert_eq!(mv.promotion, Some(Piece::Knight));
    assert_eq!(move_to_uci(game.board(), mv), "e7e8n");
    assert!(parse_uci_move(game.board(), "e7e8").is_none(), "promotion piece is required");
}

#[test]
fn test_parse_rejects_illegal_and_garbage() {
    let game = Game::startpos();
    assert!(parse_uci_move(game.board(), "e2e5").is_none());
    assert!(parse_uci_move(game.board(), "zz").is_none());
}

#[test]
fn test_set_position_startpos_with_moves() {
    let mut game = Game::startpos();
    set_position_from_uci(&mut game, &["startpos", "moves", "e2e4", "e7e5"]).unwrap();

    assert_eq!(game.ply_count(), 2);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.piece_on(Square::E5), Some((Color::Black, Piece::Pawn)));
}

#[test]
fn test_set_position_fen() {
    let mut game = Game::startpos();
    set_position_from_uci(
        &mut game,
        &["fen", "k7/8/1Q6/8/8/8/8/1K6", "b", "-", "-", "0", "1"],
    )
    .unwrap();

    assert_eq!(game.side_to_move(), Color::Black);
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_set_position_error_leaves_game_untouched() {
    let mut game = Game::startpos();
    set_position_from_uci(&mut game, &["startpos", "moves", "e2e4"]).unwrap();
    let before = game.position_id();

    let err = set_position_from_uci(&mut game, &["startpos", "moves", "e2e4", "e2e4"]).unwrap_err();
    assert_eq!(err, ChessError::IllegalMove("e2e4".to_string()));
    assert_eq!(game.position_id(), before);

    assert!(matches!(
        set_position_from_uci(&mut game, &["banana"]),
        Err(ChessError::MalformedPosition(_))
    ));
}
