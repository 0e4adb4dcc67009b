//! Property tests for the search
//!
//! Alpha-beta pruning and the transposition cache are optimisations only:
//! the score must match a plain minimax over the same tree.

use chess_core::{Board, Game, Move, MoveGuard, Position};
use minimax_engine::{evaluate, order_moves, Searcher, INFINITY, MATE_SCORE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Unpruned, uncached minimax over the same move order.
fn reference_minimax(game: &mut Game, depth: u8) -> i32 {
    if depth == 0 || game.is_terminal() {
        return evaluate(&*game);
    }

    let maximizing = game.side_to_move() == chess_core::Color::White;
    let mut best = if maximizing { -INFINITY } else { INFINITY };
    for mv in order_moves(game) {
        let mut child = MoveGuard::new(&mut *game, mv);
        let score = reference_minimax(&mut *child, depth - 1);
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

/// Plays `plies` random moves from the start and returns the result with no history.
fn random_position(rng: &mut StdRng, plies: usize) -> Game {
    let mut game = Game::startpos();
    for _ in 0..plies {
        let moves = game.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        game.play(mv).expect("generated move is legal");
    }
    let board: Board = game.board().clone();
    Game::from_board(board)
}

const SHUFFLE_FEN: &str = "k5nr/8/8/8/8/8/8/1N4K1 w - - 0 1";

/// Plays random quiet moves and then walks them back, keeping the history so
/// that positions repeat.
fn shuffled_game(rng: &mut StdRng, rounds: usize) -> Game {
    let mut game = Game::from_fen(SHUFFLE_FEN).expect("shuffle FEN should parse");
    for _ in 0..rounds {
        let mut played = Vec::new();
        for _ in 0..2 {
            let quiet: Vec<Move> = game
                .legal_moves()
                .into_iter()
                .filter(|&mv| !game.move_info(mv).is_capture())
                .collect();
            let Some(&mv) = quiet.choose(rng) else {
                return game;
            };
            game.play(mv).expect("generated move is legal");
            played.push(mv);
        }
        for mv in played {
            let back = Move {
                from: mv.to,
                to: mv.from,
                promotion: None,
            };
            if game.board().is_legal(back) {
                game.play(back).expect("checked move is legal");
            }
        }
    }
    game
}

#[test]
fn test_alpha_beta_matches_plain_minimax() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..12 {
        let plies = rng.gen_range(2..24);
        let mut game = random_position(&mut rng, plies);
        let fen = game.fen();

        for depth in 1..=3 {
            let expected = reference_minimax(&mut game, depth);
            let mut searcher = Searcher::default();
            let score = searcher.minimax(&mut game, depth, -INFINITY, INFINITY);

            assert_eq!(score, expected, "depth {depth} mismatch for {fen}");
            assert_eq!(game.fen(), fen, "search must restore the position");
        }
    }
}

#[test]
fn test_warm_cache_matches_cold_search() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut warm = Searcher::default();

    for _ in 0..8 {
        let plies = rng.gen_range(4..16);
        let mut game = random_position(&mut rng, plies);

        let cold = Searcher::default().best_move(&mut game, 2);
        let reused = warm.best_move(&mut game, 2);

        assert_eq!(reused.score, cold.score);
        assert_eq!(reused.best_move, cold.best_move);
    }
}

#[test]
fn test_best_move_score_matches_root_minimax() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..6 {
        let plies = rng.gen_range(2..20);
        let mut game = random_position(&mut rng, plies);
        if game.is_terminal() {
            continue;
        }

        let result = Searcher::default().best_move(&mut game, 2);
        assert_eq!(result.score, reference_minimax(&mut game, 2));
        assert!(result.score.abs() <= MATE_SCORE);
    }
}

#[test]
fn test_shared_cache_matches_plain_minimax_with_history() {
    let mut rng = StdRng::seed_from_u64(0xD1CE);
    let mut warm = Searcher::default();

    for _ in 0..10 {
        let rounds = rng.gen_range(1..4);
        let mut game = shuffled_game(&mut rng, rounds);
        let fen = game.fen();
        let plies = game.ply_count();

        for depth in 1..=3 {
            let expected = reference_minimax(&mut game, depth);
            let score = warm.minimax(&mut game, depth, -INFINITY, INFINITY);
            let cold = Searcher::default().minimax(&mut game, depth, -INFINITY, INFINITY);

            assert_eq!(score, expected, "depth {depth} mismatch for {fen} after {plies} plies");
            assert_eq!(cold, expected);
            assert_eq!(game.ply_count(), plies, "search must restore the history");
        }
    }
}
