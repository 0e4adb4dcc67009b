use super::*;
use chess_core::{move_to_uci, parse_uci_move, Game};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).expect("test FEN should parse")
}

fn ordered_uci(game: &mut Game) -> Vec<String> {
    let moves = order_moves(game);
    moves
        .into_iter()
        .map(|mv| move_to_uci(game.board(), mv))
        .collect()
}

#[test]
fn test_captures_first_by_victim_then_attacker() {
    // Pawn and queen can both take the queen on d5
    let mut pos = game("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1");
    let order = ordered_uci(&mut pos);

    assert_eq!(order[0], "e4d5", "Pawn takes queen should come first");
    assert_eq!(order[1], "d1d5", "Queen takes queen should come second");
}

#[test]
fn test_capture_score() {
    let mut pos = game("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1");
    let pxq = parse_uci_move(pos.board(), "e4d5").unwrap();
    let qxq = parse_uci_move(pos.board(), "d1d5").unwrap();

    assert_eq!(move_order_score(&mut pos, pxq), 10_000 + 9_000 - 100);
    // Neither capture gives check
    assert_eq!(move_order_score(&mut pos, qxq), 10_000 + 9_000 - 900);
}

#[test]
fn test_promotions_ordered_by_piece() {
    let mut pos = game("k7/4P3/8/8/8/8/8/4K3 w - - 0 1");
    let order = ordered_uci(&mut pos);

    assert_eq!(&order[..4], &["e7e8q", "e7e8r", "e7e8b", "e7e8n"]);
}

#[test]
fn test_checking_move_beats_quiet_moves() {
    // Rh1-h8 gives check, nothing can be captured or promoted
    let mut pos = game("k7/8/8/8/8/8/8/4K2R w - - 0 1");
    let check = parse_uci_move(pos.board(), "h1h8").unwrap();

    assert!(gives_check(&mut pos, check));
    assert_eq!(move_order_score(&mut pos, check), 500);
    // Rh1-a1 checks along the a-file, so two moves tie
    let order = ordered_uci(&mut pos);
    assert!(order[0] == "h1h8" || order[0] == "h1a1");
}

#[test]
fn test_en_passant_counts_as_pawn_capture() {
    let mut pos = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    let ep = parse_uci_move(pos.board(), "e5d6").unwrap();

    assert_eq!(move_order_score(&mut pos, ep), 10_000 + 1_000 - 100);
    assert_eq!(ordered_uci(&mut pos)[0], "e5d6");
}

#[test]
fn test_startpos_keeps_generation_order() {
    // No captures, promotions or checks: every move scores 0
    let mut pos = Game::startpos();
    let generated = pos.legal_moves();
    let ordered = order_moves(&mut pos);

    assert_eq!(ordered, generated);
}

#[test]
fn test_ordering_leaves_position_unchanged() {
    let mut pos = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = pos.position_id();
    let fen = pos.fen();

    let ordered = order_moves(&mut pos);

    assert_eq!(ordered.len(), 48);
    assert_eq!(pos.position_id(), before);
    assert_eq!(pos.fen(), fen);
    assert_eq!(pos.ply_count(), 0);
}
