use web_time::Instant;

use crate::board::Board;
use crate::error::EngineError;
use crate::rules::{self, PlacementRule};
use crate::types::{Move, Player, SearchOutcome};

/// Window bound. Symmetric so that negating a bound never overflows.
pub const SCORE_INFINITY: i32 = i32::MAX;
pub const DEFAULT_DEPTH: u32 = 4;
pub const DEFAULT_SHALLOW_ACCEPT_DEPTH: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root position.
    pub depth: u32,
    pub rule: PlacementRule,
    /// At or below this remaining depth a null-window fail-high is taken as
    /// the new alpha without a full-window re-search. 0 always re-searches.
    pub shallow_accept_depth: u32,
}

impl SearchConfig {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    pub fn with_rule(self, rule: PlacementRule) -> Self {
        Self { rule, ..self }
    }

    pub fn with_shallow_accept_depth(self, shallow_accept_depth: u32) -> Self {
        Self {
            shallow_accept_depth,
            ..self
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            rule: PlacementRule::default(),
            shallow_accept_depth: DEFAULT_SHALLOW_ACCEPT_DEPTH,
        }
    }
}

/// NegaScout searcher over material balance.
pub struct Searcher {
    config: SearchConfig,
    nodes: u64,
}

impl Searcher {
    pub fn new(depth: u32) -> Self {
        Self::with_config(SearchConfig::new(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    /// Nodes visited by the last `search` (or accumulated `negascout` calls).
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks the best move for `player`. Ties keep the earliest move in scan
    /// order. A root depth of 0 scores each child statically, like depth 1.
    pub fn search(
        &mut self,
        board: &Board,
        player: Player,
    ) -> Result<SearchOutcome, EngineError> {
        let start_time = Instant::now();
        self.nodes = 0;

        let moves = rules::legal_moves(board, player, self.config.rule);
        let child_depth = self.config.depth.saturating_sub(1);
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let child = play(board, mv, player);
            let score = -self.negascout(
                &child,
                child_depth,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                player.opponent(),
            );
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        let (best_move, score) = best.ok_or(EngineError::NoLegalMoves(player))?;
        Ok(SearchOutcome {
            best_move,
            score,
            depth: self.config.depth,
            nodes: self.nodes,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Principal-variation search, scored from `player`'s side.
    /// Bounds are clamped to `-SCORE_INFINITY..=SCORE_INFINITY`, so
    /// `i32::MIN` and `i32::MAX` may be passed as the full window.
    pub fn negascout(
        &mut self,
        board: &Board,
        depth: u32,
        alpha: i32,
        beta: i32,
        player: Player,
    ) -> i32 {
        let mut alpha = alpha.max(-SCORE_INFINITY);
        let beta = beta.min(SCORE_INFINITY);
        self.nodes += 1;
        let rule = self.config.rule;

        if depth == 0 || rules::is_game_over(board, rule) {
            return board.evaluate(player);
        }

        let moves = rules::legal_moves(board, player, rule);
        if moves.is_empty() {
            // Pass: same board, other side, one ply used.
            return -self.negascout(board, depth - 1, -beta, -alpha, player.opponent());
        }

        let mut b = beta;
        for mv in moves {
            let child = play(board, mv, player);
            let score = -self.negascout(&child, depth - 1, -b, -alpha, player.opponent());

            if score > alpha {
                if b == beta || depth <= self.config.shallow_accept_depth {
                    alpha = score;
                } else {
                    alpha = -self.negascout(&child, depth - 1, -beta, -score, player.opponent());
                }
            }

            if alpha >= beta {
                return alpha;
            }

            b = alpha + 1;
        }

        alpha
    }
}

// Generated moves are always placeable, so no error path here.
fn play(board: &Board, mv: Move, player: Player) -> Board {
    let (row, col) = (mv.row as usize, mv.col as usize);
    let mut child = *board;
    let placed = child.place(row, col, player);
    debug_assert!(placed, "generated move {mv} must be placeable");
    child.flip(row, col, player);
    child
}

/// Best move for `player` searching `depth` plies with the default rules.
pub fn best_move(board: &Board, player: Player, depth: u32) -> Result<Move, EngineError> {
    Searcher::new(depth)
        .search(board, player)
        .map(|outcome| outcome.best_move)
}

/// One-off NegaScout call with the default rules.
pub fn negascout(board: &Board, depth: u32, alpha: i32, beta: i32, player: Player) -> i32 {
    Searcher::new(depth).negascout(board, depth, alpha, beta, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_SIZE, NUM_CELLS};

    const EMPTY_ROW: &str = "++++++";

    fn board_from_rows(rows: [&str; BOARD_SIZE]) -> Board {
        Board::from_description(&rows.concat()).unwrap()
    }

    fn negamax(board: &Board, depth: u32, player: Player, rule: PlacementRule) -> i32 {
        if depth == 0 || rules::is_game_over(board, rule) {
            return board.evaluate(player);
        }

        let moves = rules::legal_moves(board, player, rule);
        if moves.is_empty() {
            return -negamax(board, depth - 1, player.opponent(), rule);
        }

        moves
            .into_iter()
            .map(|mv| {
                let child = board.place_and_flip(mv, player).unwrap();
                -negamax(&child, depth - 1, player.opponent(), rule)
            })
            .max()
            .unwrap()
    }

    fn negamax_best(board: &Board, depth: u32, player: Player) -> (Move, i32) {
        let mut best: Option<(Move, i32)> = None;
        for mv in board.legal_moves(player) {
            let child = board.place_and_flip(mv, player).unwrap();
            let score = -negamax(&child, depth - 1, player.opponent(), PlacementRule::Adjacent);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((mv, score));
            }
        }
        best.unwrap()
    }

    fn sample_positions() -> Vec<Board> {
        vec![
            board_from_rows([EMPTY_ROW, EMPTY_ROW, "++X+++", "+++O++", EMPTY_ROW, EMPTY_ROW]),
            board_from_rows([EMPTY_ROW, "+XO+++", "+OXX++", "++OX++", "+++O++", EMPTY_ROW]),
            board_from_rows(["XXXXXO", "XOOOOO", "XOXXXO", "XOXOXO", "XOOOXX", "XXXX++"]),
            board_from_rows(["OXXXXX", "XOOOXX", "XOXOXO", "XXOOXO", "OXXOX+", "XXXX++"]),
        ]
    }

    #[test]
    fn horizon_returns_static_evaluation() {
        let board = board_from_rows([
            "XX++++", "O+++++", EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW,
        ]);
        let mut searcher = Searcher::new(0);

        let score = searcher.negascout(&board, 0, -SCORE_INFINITY, SCORE_INFINITY, Player::Black);

        assert_eq!(score, 1);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn terminal_position_returns_static_evaluation() {
        let board = Board::from_description(&"O".repeat(NUM_CELLS)).unwrap();

        assert_eq!(
            negascout(&board, 5, -SCORE_INFINITY, SCORE_INFINITY, Player::Black),
            -(NUM_CELLS as i32)
        );
    }

    #[test]
    fn negascout_matches_negamax_when_always_re_searching() {
        let config = SearchConfig::new(4).with_shallow_accept_depth(0);

        for board in sample_positions() {
            for player in [Player::Black, Player::White] {
                for depth in 1..=4 {
                    let mut searcher = Searcher::with_config(config);
                    let score =
                        searcher.negascout(&board, depth, -SCORE_INFINITY, SCORE_INFINITY, player);

                    assert_eq!(
                        score,
                        negamax(&board, depth, player, PlacementRule::Adjacent),
                        "depth {depth}, {player} to move on\n{board}"
                    );
                }
            }
        }
    }

    #[test]
    fn capturing_rule_search_matches_negamax() {
        let config = SearchConfig::new(4)
            .with_rule(PlacementRule::Capturing)
            .with_shallow_accept_depth(0);

        for board in sample_positions() {
            for player in [Player::Black, Player::White] {
                for depth in 1..=4 {
                    let mut searcher = Searcher::with_config(config);
                    let score =
                        searcher.negascout(&board, depth, -SCORE_INFINITY, SCORE_INFINITY, player);

                    assert_eq!(score, negamax(&board, depth, player, PlacementRule::Capturing));
                }
            }
        }
    }

    #[test]
    fn best_move_agrees_with_negamax_up_to_depth_two() {
        for board in sample_positions() {
            for player in [Player::Black, Player::White] {
                for depth in 1..=2 {
                    let outcome = Searcher::new(depth).search(&board, player).unwrap();

                    assert_eq!(
                        (outcome.best_move, outcome.score),
                        negamax_best(&board, depth, player)
                    );
                }
            }
        }
    }

    #[test]
    fn two_seed_position_at_depth_two_matches_reference() {
        let board = board_from_rows([
            EMPTY_ROW, EMPTY_ROW, "++X+++", "+++O++", EMPTY_ROW, EMPTY_ROW,
        ]);

        let outcome = Searcher::new(2).search(&board, Player::White).unwrap();

        assert_eq!((outcome.best_move, outcome.score), negamax_best(&board, 2, Player::White));
        assert!(board.legal_moves(Player::White).contains(&outcome.best_move));
        assert_eq!(outcome.depth, 2);
        assert!(outcome.nodes > 0);
    }

    #[test]
    fn search_is_deterministic() {
        let board = sample_positions().remove(1);

        let first = Searcher::new(4).search(&board, Player::Black).unwrap();
        let second = Searcher::new(4).search(&board, Player::Black).unwrap();

        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
        assert_eq!(best_move(&board, Player::Black, 4), Ok(first.best_move));
    }

    #[test]
    fn ties_keep_the_first_move_in_scan_order() {
        // No reply captures, so every move leaves the material even.
        let board = board_from_rows([
            EMPTY_ROW, EMPTY_ROW, "++X+++", EMPTY_ROW, EMPTY_ROW, EMPTY_ROW,
        ]);

        let outcome = Searcher::new(1).search(&board, Player::White).unwrap();

        assert_eq!(outcome.best_move, Move::new(1, 1));
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn capture_is_preferred_over_quiet_move() {
        let board = board_from_rows([
            EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, "+OXX++", EMPTY_ROW, EMPTY_ROW,
        ]);

        let outcome = Searcher::new(1).search(&board, Player::White).unwrap();

        assert_eq!(outcome.best_move, Move::new(3, 4));
        assert_eq!(outcome.score, 4);
    }

    #[test]
    fn root_without_moves_reports_no_legal_moves() {
        let full = Board::from_description(&"X".repeat(NUM_CELLS)).unwrap();

        assert_eq!(
            best_move(&full, Player::White, 3),
            Err(EngineError::NoLegalMoves(Player::White))
        );
        assert_eq!(
            best_move(&Board::empty(), Player::Black, 3),
            Err(EngineError::NoLegalMoves(Player::Black))
        );
    }

    #[test]
    fn depth_zero_root_scores_children_statically() {
        let board = board_from_rows([
            EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, "+OXX++", EMPTY_ROW, EMPTY_ROW,
        ]);

        let shallow = Searcher::new(0).search(&board, Player::White).unwrap();
        let one_ply = Searcher::new(1).search(&board, Player::White).unwrap();

        assert_eq!(shallow.best_move, one_ply.best_move);
        assert_eq!(shallow.score, one_ply.score);
    }

    #[test]
    fn pass_hands_the_turn_over_with_one_ply_used() {
        // White has no capture; black's only move takes (0,1).
        let board = board_from_rows([
            "XO++++", EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW, EMPTY_ROW,
        ]);
        let config = SearchConfig::new(2).with_rule(PlacementRule::Capturing);

        let white = Searcher::with_config(config).negascout(
            &board,
            2,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            Player::White,
        );
        let black = Searcher::with_config(config).negascout(
            &board,
            1,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            Player::Black,
        );

        assert_eq!(black, 3);
        assert_eq!(white, -black);
        assert_ne!(white, board.evaluate(Player::White));
    }

    #[test]
    fn shallow_accept_depth_is_two_by_default() {
        let config = SearchConfig::default();

        assert_eq!(config.shallow_accept_depth, DEFAULT_SHALLOW_ACCEPT_DEPTH);
        assert_eq!(config.rule, PlacementRule::Adjacent);
        assert_eq!(SearchConfig::new(7).depth, 7);
    }

    #[test]
    fn integer_extremes_act_as_the_full_window() {
        let board = sample_positions().remove(0);

        for depth in 0..=3 {
            assert_eq!(
                negascout(&board, depth, i32::MIN, i32::MAX, Player::White),
                negascout(&board, depth, -SCORE_INFINITY, SCORE_INFINITY, Player::White)
            );
        }
    }

    #[test]
    fn shallow_accept_keeps_the_null_window_score_near_the_horizon() {
        let board = board_from_rows([EMPTY_ROW, "+XO+++", "+OXX++", "++OX++", "++++O+", EMPTY_ROW]);
        let full = SearchConfig::new(3).with_shallow_accept_depth(0);

        let shortcut = negascout(&board, 3, -SCORE_INFINITY, SCORE_INFINITY, Player::White);
        let re_searched = Searcher::with_config(full).negascout(
            &board,
            3,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            Player::White,
        );

        assert_eq!(shortcut, 7);
        assert_eq!(re_searched, 5);
        assert_eq!(re_searched, negamax(&board, 3, Player::White, PlacementRule::Adjacent));

        let outcome = Searcher::new(3).search(&board, Player::White).unwrap();
        assert_eq!((outcome.best_move, outcome.score), (Move::new(0, 0), 7));
        let outcome = Searcher::with_config(full).search(&board, Player::White).unwrap();
        assert_eq!((outcome.best_move, outcome.score), (Move::new(0, 0), 5));
    }
}
