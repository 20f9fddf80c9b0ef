use std::fmt;

use serde::Serialize;

use crate::error::EngineError;

pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

/// Contents of one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Black,
    White,
}

impl CellState {
    /// Description symbol: `O` is white, `X` is black, anything else is empty.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'O' => Self::White,
            'X' => Self::Black,
            _ => Self::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '+',
            Self::Black => 'X',
            Self::White => 'O',
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Maps the external player code (1 = black, 2 = white).
    pub fn from_code(code: i64) -> Result<Self, EngineError> {
        match code {
            c if c == i64::from(PLAYER_BLACK) => Ok(Self::Black),
            c if c == i64::from(PLAYER_WHITE) => Ok(Self::White),
            other => Err(EngineError::InvalidPlayerCode(other)),
        }
    }
}

impl From<Player> for CellState {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => CellState::Black,
            Player::White => CellState::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
        }
    }
}

/// A board coordinate. `row` is the vertical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Result of a root search, returned from the wasm API and the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub best_move: Move,
    /// Score of `best_move` from the mover's perspective.
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed_ms: u64,
}
