use cozy_chess::{Board, Move, Piece, Square};

use crate::{error::ChessError, game::Game, Position};

/// Writes a move in UCI long algebraic notation.
///
/// The rules engine encodes castling as the king capturing its own rook;
/// this converts it to the standard king two-file move (`e1g1`).
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let mut out = mv;
    let castles = board.piece_on(mv.from) == Some(Piece::King)
        && board.colors(board.side_to_move()).has(mv.to);
    if castles {
        let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
            cozy_chess::File::G
        } else {
            cozy_chess::File::C
        };
        out.to = Square::new(file, mv.from.rank());
    }
    out.to_string()
}

/// Parses a UCI move and matches it against the legal moves so castling
/// arrives in the rules engine's encoding. Accepts both `e1g1` and `e1h1`.
pub fn parse_uci_move(board: &Board, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if txt.len() < 4 {
        return None;
    }
    let txt = txt.to_ascii_lowercase();

    let mut found = None;
    board.generate_moves(|moves| {
        for mv in moves {
            if move_to_uci(board, mv) == txt || mv.to_string() == txt {
                found = Some(mv);
                return true;
            }
        }
        false
    });
    found
}

/// Applies the arguments of a UCI `position` command to `game`.
///
/// Supports `startpos` or `fen <fields...>`, each optionally followed by
/// `moves <m1> <m2> ...`. On error the game is left untouched.
pub fn set_position_from_uci(game: &mut Game, args: &[&str]) -> Result<(), ChessError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &args[args.len()..]),
    };

    let mut next = match setup.first() {
        None | Some(&"startpos") => Game::startpos(),
        Some(&"fen") => {
            if setup.len() < 2 {
                return Err(ChessError::MalformedPosition("fen without fields".to_string()));
            }
            Game::from_fen(&setup[1..].join(" "))?
        }
        Some(other) => {
            return Err(ChessError::MalformedPosition(format!(
                "expected 'startpos' or 'fen', got '{other}'"
            )));
        }
    };

    for txt in moves {
        let mv = parse_uci_move(next.board(), txt)
            .ok_or_else(|| ChessError::IllegalMove(txt.to_string()))?;
        next.make_move(mv);
    }

    *game = next;
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
