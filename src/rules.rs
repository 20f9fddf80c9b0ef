use crate::board::{BOARD_SIZE, Board};
use crate::types::{Move, Player};

/// Which empty cells a side may play on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementRule {
    /// Any empty cell touching a stone of either color. A move may flip nothing.
    #[default]
    Adjacent,
    /// Standard Othello legality: the move must flip at least one stone.
    Capturing,
}

impl PlacementRule {
    pub fn allows(self, board: &Board, row: usize, col: usize, player: Player) -> bool {
        if !board.is_empty(row, col) {
            return false;
        }
        match self {
            Self::Adjacent => board.has_occupied_neighbor(row, col),
            Self::Capturing => board.capture_count(row, col, player) > 0,
        }
    }
}

/// Scans rows 0..6 then columns 0..6; the order is the search's move order.
pub fn legal_moves(board: &Board, player: Player, rule: PlacementRule) -> Vec<Move> {
    let mut moves = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if rule.allows(board, row, col, player) {
                moves.push(Move::new(row as u8, col as u8));
            }
        }
    }
    moves
}

pub fn has_legal_move(board: &Board, player: Player, rule: PlacementRule) -> bool {
    (0..BOARD_SIZE).any(|row| (0..BOARD_SIZE).any(|col| rule.allows(board, row, col, player)))
}

pub fn is_game_over(board: &Board, rule: PlacementRule) -> bool {
    !has_legal_move(board, Player::Black, rule) && !has_legal_move(board, Player::White, rule)
}
