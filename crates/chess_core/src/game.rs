//! `cozy-chess` backed game with undo history and draw detection.

use cozy_chess::{BitBoard, Board, Color, File, Move, Piece, Square};

use crate::error::ChessError;
use crate::types::{
    color_idx, DrawReason, MoveInfo, Outcome, PositionId, RepetitionContext, PIECE_ORDER,
};
use crate::Position;

const DARK_SQUARES: BitBoard = BitBoard(0xAA55_AA55_AA55_AA55);
const LIGHT_SQUARES: BitBoard = BitBoard(!0xAA55_AA55_AA55_AA55);

/// A chess game: the current board plus everything needed to undo moves and
/// to recognise repetitions.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    /// Boards before each made move, innermost last
    undo: Vec<Board>,
    /// Zobrist hashes of every position reached, current last
    hashes: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Game {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    /// Starts a game from a board with no earlier history.
    pub fn from_board(board: Board) -> Self {
        let hash = board.hash();
        Self {
            board,
            undo: Vec::new(),
            hashes: vec![hash],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let board = fen
            .trim()
            .parse::<Board>()
            .map_err(|_| ChessError::InvalidFen {
                fen: fen.to_string(),
            })?;
        Ok(Self::from_board(board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    /// Number of moves made since the game was created.
    pub fn ply_count(&self) -> usize {
        self.undo.len()
    }

    /// Makes a move after checking that it is legal.
    pub fn play(&mut self, mv: Move) -> Result<(), ChessError> {
        if !self.board.is_legal(mv) {
            return Err(ChessError::IllegalMove(mv.to_string()));
        }
        self.make_move(mv);
        Ok(())
    }

    /// How many times the current placement has occurred, this time included.
    pub fn repetition_count(&self) -> usize {
        match self.hashes.last() {
            Some(&current) => self.hashes.iter().filter(|&&h| h == current).count(),
            None => 0,
        }
    }

    pub fn is_insufficient_material(&self) -> bool {
        side_has_insufficient_material(&self.board, Color::White)
            && side_has_insufficient_material(&self.board, Color::Black)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    /// Whether the side to move could claim the fifty-move rule with its next move.
    pub fn is_fifty_move_draw_on_next_move(&self) -> bool {
        if self.board.halfmove_clock() < 99 {
            return false;
        }
        let pawns = self.board.pieces(Piece::Pawn);
        let theirs = self.board.colors(!self.board.side_to_move());
        self.board
            .generate_moves(|moves| !pawns.has(moves.from) && !(moves.to & !theirs).is_empty())
    }

    /// Whether some legal move reaches a placement for the third time.
    pub fn is_repetition_on_next_move(&self) -> bool {
        let history = self.reversible_history();
        // A third occurrence needs a placement already seen twice
        let seen_twice = history
            .iter()
            .enumerate()
            .any(|(i, h)| history[i + 1..].contains(h));
        if !seen_twice {
            return false;
        }

        self.board.generate_moves(|moves| {
            moves.into_iter().any(|mv| {
                let mut child = self.board.clone();
                child.play_unchecked(mv);
                let hash = child.hash();
                history.iter().filter(|&&h| h == hash).count() >= 2
            })
        })
    }

    fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|moves| !moves.to.is_empty())
    }

    /// Hashes of the positions since the last capture or pawn move, current excluded.
    fn reversible_history(&self) -> &[u64] {
        let earlier = &self.hashes[..self.hashes.len().saturating_sub(1)];
        let window = usize::from(self.board.halfmove_clock()).min(earlier.len());
        &earlier[earlier.len() - window..]
    }
}

/// Fewest plies that could turn `from` into `to`, or None when no sequence of
/// quiet piece moves can. Never overestimates.
fn plies_to_reach(from: &Board, to: &Board) -> Option<usize> {
    let mut misplaced = [0usize; 2];
    for color in [Color::White, Color::Black] {
        for piece in PIECE_ORDER {
            let ours = from.colors(color) & from.pieces(piece);
            let target = to.colors(color) & to.pieces(piece);
            if ours.len() != target.len() || (piece == Piece::Pawn && ours != target) {
                return None;
            }
            misplaced[color_idx(color)] += (ours & !target).len() as usize;
        }
    }

    // Castling relocates two pieces in one ply
    let mover = from.side_to_move();
    let own = misplaced[color_idx(mover)].div_ceil(2);
    let other = misplaced[color_idx(!mover)].div_ceil(2);

    // k plies give the mover ceil(k/2) moves and the opponent floor(k/2)
    let mut plies = if own == 0 { 2 * other } else { (2 * own - 1).max(2 * other) };
    let same_side = mover == to.side_to_move();
    if (plies % 2 == 0) != same_side {
        plies += 1;
    }
    Some(plies)
}

/// Whether `color` can no longer deliver mate with the material it has.
fn side_has_insufficient_material(board: &Board, color: Color) -> bool {
    let ours = board.colors(color);
    let heavy = board.pieces(Piece::Pawn) | board.pieces(Piece::Rook) | board.pieces(Piece::Queen);
    if !(ours & heavy).is_empty() {
        return false;
    }

    if !(ours & board.pieces(Piece::Knight)).is_empty() {
        // A lone knight only fails to mate when the opponent has no blockers.
        let theirs = board.colors(!color);
        let blockers = theirs & !board.pieces(Piece::King) & !board.pieces(Piece::Queen);
        return ours.len() <= 2 && blockers.is_empty();
    }

    let bishops = board.pieces(Piece::Bishop);
    if !(ours & bishops).is_empty() {
        let same_shade = (bishops & DARK_SQUARES).is_empty() || (bishops & LIGHT_SQUARES).is_empty();
        return same_shade
            && board.pieces(Piece::Pawn).is_empty()
            && board.pieces(Piece::Knight).is_empty();
    }

    true
}

fn file_code(file: Option<File>) -> u8 {
    file.map_or(8, |f| f as u8)
}

impl Position for Game {
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn legal_move_count(&self) -> usize {
        let mut count = 0;
        self.board.generate_moves(|piece_moves| {
            count += piece_moves.into_iter().count();
            false
        });
        count
    }

    fn make_move(&mut self, mv: Move) {
        debug_assert!(self.board.is_legal(mv), "make_move called with illegal move {mv}");
        self.undo.push(self.board.clone());
        self.board.play_unchecked(mv);
        self.hashes.push(self.board.hash());
    }

    fn unmake_move(&mut self) {
        debug_assert!(!self.undo.is_empty(), "unmake_move without a matching make_move");
        if let Some(previous) = self.undo.pop() {
            self.board = previous;
            self.hashes.pop();
        }
    }

    fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                Outcome::Checkmate {
                    winner: !self.board.side_to_move(),
                }
            } else {
                Outcome::Draw(DrawReason::Stalemate)
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        if self.is_fifty_move_draw() {
            return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
        }
        if self.repetition_count() >= 3 {
            return Some(Outcome::Draw(DrawReason::Repetition));
        }
        if self.is_fifty_move_draw_on_next_move() {
            return Some(Outcome::Draw(DrawReason::FiftyMoveOnNextMove));
        }
        if self.is_repetition_on_next_move() {
            return Some(Outcome::Draw(DrawReason::RepetitionOnNextMove));
        }
        None
    }

    fn position_id(&self) -> PositionId {
        let board = &self.board;
        let mut pieces = [0u64; 6];
        for (slot, piece) in pieces.iter_mut().zip(PIECE_ORDER) {
            *slot = board.pieces(piece).0;
        }
        let mut colors = [0u64; 2];
        for color in [Color::White, Color::Black] {
            colors[color_idx(color)] = board.colors(color).0;
        }
        let white = board.castle_rights(Color::White);
        let black = board.castle_rights(Color::Black);

        PositionId {
            pieces,
            colors,
            white_to_move: board.side_to_move() == Color::White,
            castling: [
                file_code(white.short),
                file_code(white.long),
                file_code(black.short),
                file_code(black.long),
            ],
            en_passant: file_code(board.en_passant()),
            halfmove_clock: board.halfmove_clock(),
            repetitions: (self.repetition_count().saturating_sub(1)).min(2) as u8,
        }
    }

    fn repetition_context(&self, plies: u8) -> RepetitionContext {
        let history = self.reversible_history();
        let boards = &self.undo[self.undo.len() - history.len()..];
        let current = self.board.hash();

        let mut entries: Vec<(u64, u8)> = Vec::new();
        for (board, &hash) in boards.iter().zip(history) {
            // The current placement is counted by `position_id`
            if hash == current || entries.iter().any(|&(h, _)| h == hash) {
                continue;
            }
            let Some(first_visit) = plies_to_reach(&self.board, board) else {
                continue;
            };
            let earlier = history.iter().filter(|&&h| h == hash).count();
            let visits_needed = 3usize.saturating_sub(earlier).max(1);
            // Coming back to a placement takes at least four plies
            if first_visit + 4 * (visits_needed - 1) <= usize::from(plies) {
                entries.push((hash, earlier.min(2) as u8));
            }
        }

        entries.sort_unstable();
        RepetitionContext { entries }
    }

    fn occupied(&self) -> BitBoard {
        self.board.occupied()
    }

    fn piece_on(&self, sq: Square) -> Option<(Color, Piece)> {
        Some((self.board.color_on(sq)?, self.board.piece_on(sq)?))
    }

    fn move_info(&self, mv: Move) -> MoveInfo {
        let board = &self.board;
        let them = !board.side_to_move();
        let piece = board.piece_on(mv.from);

        let captured = if board.colors(them).has(mv.to) {
            board.piece_on(mv.to)
        } else if piece == Some(Piece::Pawn) && mv.from.file() != mv.to.file() {
            // Diagonal pawn move onto an empty square: en passant.
            Some(Piece::Pawn)
        } else {
            None
        };

        MoveInfo {
            piece,
            captured,
            promotion: mv.promotion,
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
