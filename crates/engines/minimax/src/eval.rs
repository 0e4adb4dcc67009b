//! Static evaluation: material, piece placement and mobility.

use chess_core::{Color, Outcome, Piece, Position, Square};

use crate::pst;

/// Score for a mated side, signed towards the winner.
pub const MATE_SCORE: i32 = 10_000;

/// Every recognised draw scores exactly this, whatever the material.
pub const DRAW_SCORE: i32 = 0;

/// Material values in centipawns.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 300, 325, 500, 900, 0];

fn piece_idx(piece: Piece) -> usize {
    match piece {
        Piece::Pawn => 0,
        Piece::Knight => 1,
        Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 5,
    }
}

/// Base material value of a piece class.
pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUES[piece_idx(piece)]
}

/// Placement bonus for `piece` of `color` standing on `sq`.
pub fn piece_square_value(piece: Piece, sq: Square, color: Color) -> i32 {
    let table = match piece {
        Piece::Pawn => &pst::PAWN,
        Piece::Knight => &pst::KNIGHT,
        Piece::Bishop => &pst::BISHOP,
        Piece::Rook => &pst::ROOK,
        Piece::Queen => &pst::QUEEN,
        Piece::King => &pst::KING,
    };
    let sq = match color {
        Color::White => sq,
        Color::Black => sq.flip_rank(),
    };
    table[sq as usize]
}

/// Evaluates the position from White's point of view.
///
/// Returns a score in centipawns:
/// - `±MATE_SCORE` when the side to move is checkmated (sign favours the winner)
/// - `DRAW_SCORE` for stalemate, insufficient material and claimable draws
/// - otherwise material + placement, plus mobility of the side to move
pub fn evaluate<P: Position + ?Sized>(pos: &P) -> i32 {
    match pos.outcome() {
        Some(Outcome::Checkmate { winner }) => {
            return match winner {
                Color::White => MATE_SCORE,
                Color::Black => -MATE_SCORE,
            };
        }
        Some(Outcome::Draw(_)) => return DRAW_SCORE,
        None => {}
    }

    let mut score = 0i32;
    for sq in pos.occupied() {
        if let Some((color, piece)) = pos.piece_on(sq) {
            let value = piece_value(piece) + piece_square_value(piece, sq, color);
            score += if color == Color::White { value } else { -value };
        }
    }

    // More options for whoever is to act
    let mobility = pos.legal_move_count() as i32;
    if pos.side_to_move() == Color::White {
        score + mobility
    } else {
        score - mobility
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
