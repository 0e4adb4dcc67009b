//! Move ordering heuristics.
//!
//! Good moves first means earlier cutoffs. Captures (most valuable victim,
//! least valuable attacker) come before promotions, which come before checks,
//! which come before everything else.

use std::cmp::Reverse;

use chess_core::{Move, MoveGuard, Position};

use crate::eval::piece_value;

const CAPTURE_BONUS: i32 = 10_000;
const PROMOTION_BONUS: i32 = 9_000;
const CHECK_BONUS: i32 = 500;

/// Heuristic score of one legal move; higher is tried first.
///
/// Tests for check by making and unmaking the move, so the position is
/// borrowed mutably but left unchanged.
pub fn move_order_score<P: Position + ?Sized>(pos: &mut P, mv: Move) -> i32 {
    let info = pos.move_info(mv);
    let mut score = 0;

    if let Some(captured) = info.captured {
        score += CAPTURE_BONUS + piece_value(captured) * 10;
        if let Some(attacker) = info.piece {
            score -= piece_value(attacker);
        }
    }
    if let Some(promotion) = info.promotion {
        score += PROMOTION_BONUS + piece_value(promotion);
    }
    if gives_check(pos, mv) {
        score += CHECK_BONUS;
    }
    score
}

/// Whether playing `mv` puts the opponent in check.
pub fn gives_check<P: Position + ?Sized>(pos: &mut P, mv: Move) -> bool {
    let child = MoveGuard::new(&mut *pos, mv);
    child.in_check()
}

/// Returns all legal moves, best first. Equal scores keep the order the
/// rules engine generated them in.
pub fn order_moves<P: Position + ?Sized>(pos: &mut P) -> Vec<Move> {
    let moves = pos.legal_moves();
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| (move_order_score(pos, mv), mv))
        .collect();
    scored.sort_by_key(|&(score, _)| Reverse(score));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
