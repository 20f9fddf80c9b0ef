//! Text front end: reads a position, a player code and a depth, then prints
//! the chosen move and the board after it is played.

use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};

use crate::ai::search::Searcher;
use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Player, SearchOutcome};

const POSITION_PROMPT: &str = "Enter board position (36 cells, X = black, O = white):";
const PLAYER_PROMPT: &str = "Enter player to move (1 = black X, 2 = white O):";
const DEPTH_PROMPT: &str = "Enter search depth:";

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub board: Board,
    pub player: Player,
    pub depth: u32,
}

/// Search result plus the board with the move applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub outcome: SearchOutcome,
    pub board: Board,
}

/// Prompts on `out` before each whitespace-separated field read from `input`.
pub fn read_request<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<Request, DriverError> {
    let mut tokens = Tokens::new(input);

    writeln!(out, "{POSITION_PROMPT}")?;
    out.flush()?;
    let board = Board::from_description(&tokens.next_field("position")?)?;

    writeln!(out, "{PLAYER_PROMPT}")?;
    out.flush()?;
    let player = Player::from_code(parse_number(tokens.next_field("player")?, "player")?)?;

    writeln!(out, "{DEPTH_PROMPT}")?;
    out.flush()?;
    let depth = parse_number(tokens.next_field("depth")?, "depth")?;

    Ok(Request {
        board,
        player,
        depth,
    })
}

pub fn respond(request: &Request) -> Result<Response, DriverError> {
    let outcome = Searcher::new(request.depth).search(&request.board, request.player)?;
    let board = request.board.place_and_flip(outcome.best_move, request.player)?;
    Ok(Response { outcome, board })
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Best Move: {}", self.outcome.best_move)?;
        writeln!(f, "Board:")?;
        write!(f, "{}", self.board)?;
        writeln!(f, "{}", self.board.to_description())
    }
}

fn parse_number<T: std::str::FromStr>(
    value: String,
    field: &'static str,
) -> Result<T, DriverError> {
    value
        .parse()
        .map_err(|_| DriverError::InvalidNumber { field, value })
}

struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_field(&mut self, field: &'static str) -> Result<String, DriverError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(DriverError::MissingField(field));
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        self.pending
            .pop_front()
            .ok_or(DriverError::MissingField(field))
    }
}
