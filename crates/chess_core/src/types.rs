use cozy_chess::{Color, Piece};

/// Why a game ended without a winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    /// Half-move clock reached 100, so either side may claim a draw.
    FiftyMoveRule,
    /// The current placement occurred for the third time.
    Repetition,
    /// Half-move clock at 99 and a move exists that neither captures nor moves a pawn.
    FiftyMoveOnNextMove,
    /// Some legal move reaches a placement for the third time.
    RepetitionOnNextMove,
}

/// Terminal classification of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move is mated; `winner` is the other side.
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl Outcome {
    pub fn is_draw(self) -> bool {
        matches!(self, Outcome::Draw(_))
    }
}

/// What a move does, as seen from the position it is played in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    /// The moving piece (None only for moves that are not legal here)
    pub piece: Option<Piece>,
    /// Piece removed by the move; a pawn for en passant, None for castling
    pub captured: Option<Piece>,
    pub promotion: Option<Piece>,
}

impl MoveInfo {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

/// Exact identity of a position, usable as a hash map key.
///
/// Built from the full board state rather than a zobrist hash so that two
/// different boards can never share an identity. The half-move clock and the
/// repetition count of the current placement are included because they decide
/// the claimable draws. Earlier positions that a search could still repeat are
/// described separately by [`RepetitionContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionId {
    /// Pawn, knight, bishop, rook, queen, king occupancy
    pub pieces: [u64; 6],
    /// White, black occupancy
    pub colors: [u64; 2],
    pub white_to_move: bool,
    /// Castling rook files as (white short, white long, black short, black long), 8 = none
    pub castling: [u8; 4],
    /// En passant file, 8 = none
    pub en_passant: u8,
    pub halfmove_clock: u8,
    /// Earlier occurrences of this placement in the game history, capped at 2
    pub repetitions: u8,
}

/// Earlier positions of the game that could reach a third occurrence within a
/// given number of plies, as `(zobrist hash, occurrences capped at 2)`.
///
/// Two nodes with equal [`PositionId`] and equal context for a horizon have the
/// same draws, and therefore the same scores, everywhere inside that horizon.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RepetitionContext {
    /// Sorted by hash
    pub entries: Vec<(u64, u8)>,
}

impl RepetitionContext {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Piece classes in the order used by [`PositionId::pieces`].
pub const PIECE_ORDER: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

pub fn color_idx(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}
