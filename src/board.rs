use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::EngineError;
use crate::rules::{self, PlacementRule};
use crate::types::{CellState, Move, Player};

pub const BOARD_SIZE: usize = 6;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Chebyshev neighbours of every cell, indexed row-major.
static NEIGHBORS: Lazy<[Vec<usize>; NUM_CELLS]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let (row, col) = idx_to_row_col(idx);
        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| (row + dr, col + dc))
            .filter(|&(r, c)| in_bounds(r, c))
            .map(|(r, c)| (r as usize) * BOARD_SIZE + c as usize)
            .collect()
    })
});

/// 6x6 board state, one `CellState` per cell in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [CellState; NUM_CELLS],
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [CellState::Empty; NUM_CELLS],
        }
    }

    /// Parses a 36-symbol row-major description.
    /// `O` is white, `X` is black, any other symbol is empty.
    pub fn from_description(description: &str) -> Result<Self, EngineError> {
        let actual = description.chars().count();
        if actual != NUM_CELLS {
            return Err(EngineError::MalformedDescription {
                expected: NUM_CELLS,
                actual,
            });
        }

        let mut board = Self::empty();
        for (cell, symbol) in board.cells.iter_mut().zip(description.chars()) {
            *cell = CellState::from_symbol(symbol);
        }
        Ok(board)
    }

    /// Inverse of `from_description`, writing `+` for empty cells.
    pub fn to_description(&self) -> String {
        self.cells.iter().map(|cell| cell.symbol()).collect()
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        in_bounds(row, col)
    }

    /// Panics if the coordinate is off the board.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.piece_at(row, col).is_empty()
    }

    /// Panics if the coordinate is off the board.
    pub fn piece_at(&self, row: usize, col: usize) -> CellState {
        self.cells[idx(row, col)]
    }

    /// True when at least one of the eight surrounding cells holds a stone.
    pub fn has_occupied_neighbor(&self, row: usize, col: usize) -> bool {
        NEIGHBORS[idx(row, col)]
            .iter()
            .any(|&n| !self.cells[n].is_empty())
    }

    /// Puts `player` on an empty cell that touches an occupied cell.
    /// Captures are not required. Returns false and leaves the board
    /// unchanged otherwise.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> bool {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return false;
        }
        if !self.is_empty(row, col) || !self.has_occupied_neighbor(row, col) {
            return false;
        }

        self.cells[idx(row, col)] = player.into();
        true
    }

    /// Line captures for a stone `player` just put on (row, col).
    /// Returns the number of flipped cells.
    pub fn flip(&mut self, row: usize, col: usize, player: Player) -> usize {
        let stone = CellState::from(player);
        let mut flipped = 0;

        for (dr, dc) in DIRECTIONS {
            let run = self.capture_run(row, col, dr, dc, player);
            let (mut r, mut c) = (row as i32, col as i32);
            for _ in 0..run {
                r += dr;
                c += dc;
                self.cells[(r as usize) * BOARD_SIZE + c as usize] = stone;
            }
            flipped += run;
        }

        flipped
    }

    /// Number of cells `flip` would rewrite, without touching the board.
    pub fn capture_count(&self, row: usize, col: usize, player: Player) -> usize {
        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| self.capture_run(row, col, dr, dc, player))
            .sum()
    }

    /// Copy of this board with `mv` placed and flipped for `player`.
    pub fn place_and_flip(&self, mv: Move, player: Player) -> Result<Self, EngineError> {
        let (row, col) = (mv.row as usize, mv.col as usize);
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(EngineError::OutOfBounds {
                row: i32::from(mv.row),
                col: i32::from(mv.col),
            });
        }

        let mut next = *self;
        if !next.place(row, col, player) {
            return Err(EngineError::IllegalPlacement(mv));
        }
        next.flip(row, col, player);
        Ok(next)
    }

    /// Material balance from `player`'s side.
    pub fn evaluate(&self, player: Player) -> i32 {
        let (black, white) = self.count();
        let diff = i32::from(black) - i32::from(white);
        match player {
            Player::Black => diff,
            Player::White => -diff,
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                CellState::Black => (black + 1, white),
                CellState::White => (black, white + 1),
                CellState::Empty => (black, white),
            })
    }

    pub fn empty_count(&self) -> u8 {
        let (black, white) = self.count();
        NUM_CELLS as u8 - black - white
    }

    /// Legal moves in row-major scan order.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        rules::legal_moves(self, player, PlacementRule::Adjacent)
    }

    /// True when neither side can move.
    pub fn is_game_over(&self) -> bool {
        rules::is_game_over(self, PlacementRule::Adjacent)
    }

    // Length of the opponent run starting next to (row, col) in direction
    // (dr, dc), or 0 unless a `player` stone closes it on the board.
    fn capture_run(&self, row: usize, col: usize, dr: i32, dc: i32, player: Player) -> usize {
        let own = CellState::from(player);
        let opp = CellState::from(player.opponent());
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        let mut run = 0;

        while in_bounds(r, c) && self.cells[(r as usize) * BOARD_SIZE + c as usize] == opp {
            run += 1;
            r += dr;
            c += dc;
        }

        if in_bounds(r, c) && self.cells[(r as usize) * BOARD_SIZE + c as usize] == own {
            run
        } else {
            0
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_description(s)
    }
}

/// Six rows of `+`, `X` and `O`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn idx(row: usize, col: usize) -> usize {
    assert!(row < BOARD_SIZE && col < BOARD_SIZE, "({row},{col}) is off the board");
    row * BOARD_SIZE + col
}

fn idx_to_row_col(idx: usize) -> (i32, i32) {
    ((idx / BOARD_SIZE) as i32, (idx % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
