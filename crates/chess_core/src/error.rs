use thiserror::Error;

/// Errors raised when building positions or applying moves from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid FEN '{fen}'")]
    InvalidFen { fen: String },

    #[error("illegal or unparseable move '{0}'")]
    IllegalMove(String),

    #[error("malformed position command: {0}")]
    MalformedPosition(String),
}
