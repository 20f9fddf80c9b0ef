use crate::types::{Move, Player};

/// Errors surfaced by the engine to its callers.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    /// Board description with the wrong number of cells.
    #[error("board description must have {expected} cells, got {actual}")]
    MalformedDescription { expected: usize, actual: usize },

    /// Player code other than 1 (black) or 2 (white).
    #[error("invalid player code {0} (expected 1 for black or 2 for white)")]
    InvalidPlayerCode(i64),

    #[error("position ({row},{col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    /// Occupied cell, or a cell with no occupied neighbour.
    #[error("illegal placement at {0}")]
    IllegalPlacement(Move),

    #[error("{0} has no legal moves")]
    NoLegalMoves(Player),
}
