//! Move selection for a 6x6 Othello-like game.
//!
//! A move is legal on any empty cell next to a stone of either color, and
//! captures follow the usual Othello line rule. [`ai::search::Searcher`]
//! picks moves with a NegaScout search over the material balance.

pub mod board;
pub mod driver;
pub mod error;
pub mod rules;
pub mod types;
pub mod wasm;

pub mod ai {
    pub mod search;
}

pub use board::Board;
pub use error::EngineError;
pub use types::{CellState, Move, Player, SearchOutcome};
