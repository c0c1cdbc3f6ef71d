//! Engine abstraction used by the UCI front-end.
//!
//! The front-end parses `go` into [`GoParams`] and prints whatever the engine
//! returns in [`EngineOutput`]; budgeting and move choice stay behind the trait.

use crate::errors::EngineResult;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
    pub infinite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Options advertised in reply to `uci`, one `option ...` line each.
    fn option_lines(&self) -> Vec<String> {
        Vec::new()
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> EngineResult<EngineOutput>;
}
