//! Error types shared by the board model, codecs, and protocol front-end.
//!
//! Search control flow never uses these: an aborted search is reported as
//! `Ok(None)` and mate/stalemate are ordinary scores.

use thiserror::Error;

use crate::game_state::chess_types::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("malformed move text '{0}'")]
    MalformedMove(String),

    #[error("illegal move '{0}'")]
    IllegalMove(String),

    #[error("no piece on origin square {square}")]
    NoPieceOnSquare { square: Square },

    #[error("undo stack is empty")]
    EmptyUndoStack,

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },

    #[error("worker thread panicked")]
    WorkerPanicked,

    #[error("opening table: {0}")]
    OpeningTable(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
