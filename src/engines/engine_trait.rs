//! Engine abstraction used by the self-play driver.
//!
//! Defines common input parameters and output payloads so different search
//! strategies can be selected at runtime behind a single trait interface.

use crate::errors::OnitamaResult;
use crate::game_state::game::Game;
use crate::moves::game_move::GameMove;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the game is already decided.
    pub best_move: Option<GameMove>,
    /// Score of `best_move` for the side to move.
    pub score: i32,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn choose_move(&mut self, game: &Game, params: &GoParams) -> OnitamaResult<EngineOutput>;
}
