//! Chess rules adapter for the search engines.
//!
//! The rules themselves (move generation, make/unmake, check detection,
//! hashing) come from `cozy-chess`. This crate narrows them down to the
//! [`Position`] capability set a search needs and adds the pieces the rules
//! engine leaves out: undo history, claimable draws, an exact position
//! identity, and UCI notation.

pub mod error;
pub mod game;
pub mod guard;
pub mod types;
pub mod uci;

pub use cozy_chess::{BitBoard, Board, Color, File, Move, Piece, Rank, Square};
pub use error::ChessError;
pub use game::Game;
pub use guard::MoveGuard;
pub use types::*;
pub use uci::*;

// =============================================================================
// Position adapter: everything a search is allowed to ask of a game
// =============================================================================

/// Capability set the search core consumes.
///
/// Implementations are mutated in place: `unmake_move` must restore exactly
/// the state (identity, side to move, legal moves) that preceded the matching
/// `make_move`, and pairs must nest to any depth.
pub trait Position {
    fn side_to_move(&self) -> Color;

    /// Legal moves in enumeration order.
    fn legal_moves(&self) -> Vec<Move>;

    fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    fn make_move(&mut self, mv: Move);

    /// Takes back the most recent `make_move`.
    fn unmake_move(&mut self);

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    /// Checkmate or a recognised (including claimable) draw; None while the game goes on.
    fn outcome(&self) -> Option<Outcome>;

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Stable identity, equal exactly when the positions are the same.
    fn position_id(&self) -> PositionId;

    /// Earlier positions that the next `plies` plies could bring to a third
    /// occurrence. Together with `position_id` this decides every draw
    /// inside that horizon.
    fn repetition_context(&self, plies: u8) -> RepetitionContext;

    fn occupied(&self) -> BitBoard;

    fn piece_on(&self, sq: Square) -> Option<(Color, Piece)>;

    /// Classifies a legal move of the side to move.
    fn move_info(&self, mv: Move) -> MoveInfo;
}

// =============================================================================
// Engine trait, implemented by all chess engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns, positive favours White
    pub score: i32,
    /// Search depth in plies
    pub depth: u8,
    /// Number of nodes searched (for stats)
    pub nodes: u64,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Search the game's current position to `depth` plies.
    ///
    /// The game is mutated during the search and restored before returning.
    fn search(&mut self, game: &mut Game, depth: u8) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game (clear hash tables, etc.)
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
