//! Browser bindings. Positions cross the boundary as 36-char descriptions.

use wasm_bindgen::prelude::*;

use crate::ai::search::Searcher;
use crate::board::Board;
use crate::types::{Move, Player};

/// Runs a search and returns the serialized `SearchOutcome`.
#[wasm_bindgen]
pub fn find_best_move(position: &str, player: u8, depth: u32) -> Result<JsValue, JsError> {
    let board = Board::from_description(position)?;
    let player = Player::from_code(i64::from(player))?;
    let outcome = Searcher::new(depth).search(&board, player)?;
    to_js(&outcome)
}

/// Legal moves for `player` as `[{ row, col }, ...]` in scan order.
#[wasm_bindgen]
pub fn legal_moves(position: &str, player: u8) -> Result<JsValue, JsError> {
    let board = Board::from_description(position)?;
    let player = Player::from_code(i64::from(player))?;
    to_js(&board.legal_moves(player))
}

/// Plays a move and returns the resulting description.
#[wasm_bindgen]
pub fn play_move(position: &str, player: u8, row: u8, col: u8) -> Result<String, JsError> {
    let board = Board::from_description(position)?;
    let player = Player::from_code(i64::from(player))?;
    let next = board.place_and_flip(Move::new(row, col), player)?;
    Ok(next.to_description())
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
