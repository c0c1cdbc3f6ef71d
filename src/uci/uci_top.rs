//! UCI protocol front-end and command loop.
//!
//! Parses commands, keeps the current position, routes `go` to the engine and
//! prints protocol output. Bad input never ends the loop: it is reported as an
//! `info string` line and logged.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::engines::engine_pvs::PvsEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::{apply_long_algebraic_move, move_to_long_algebraic};
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_NAME: &str = concat!("PVS Chess ", env!("CARGO_PKG_VERSION"));
const UCI_ENGINE_AUTHOR: &str = "pvs_chess contributors";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new(Box::new(PvsEngine::new()));

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
}

impl UciState {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            game_state: GameState::new_game(),
            engine,
        }
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Handle one input line. Returns `Ok(true)` on `quit`.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        let Some(cmd) = trimmed.split_whitespace().next() else {
            return Ok(false);
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name {UCI_ENGINE_NAME}")?;
                writeln!(out, "id author {UCI_ENGINE_AUTHOR}")?;
                for option in self.engine.option_lines() {
                    writeln!(out, "{option}")?;
                }
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    warn!(%err, line = trimmed, "setoption rejected");
                    writeln!(out, "info string setoption error: {err}")?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    warn!(%err, line = trimmed, "position rejected");
                    writeln!(out, "info string position error: {err}")?;
                }
            }
            "go" => {
                self.handle_go(trimmed, out)?;
            }
            "d" => {
                writeln!(out, "{}", render_game_state(&self.game_state))?;
                writeln!(out, "Fen: {}", self.game_state.get_fen())?;
                writeln!(out, "Key: {:016x}", self.game_state.zobrist_key)?;
            }
            "stop" => {
                // Search is synchronous; by the time this is read it is over.
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                warn!(line = trimmed, "unknown command");
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> EngineResult<()> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut in_value = false;
        let mut seen_name = false;

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" if !seen_name => seen_name = true,
                "value" if seen_name && !in_value => in_value = true,
                _ if in_value => value_tokens.push(tok),
                _ if seen_name => name_tokens.push(tok),
                _ => {}
            }
        }

        self.engine
            .set_option(&name_tokens.join(" "), &value_tokens.join(" "))
    }

    /// Set up the position. Moves are applied in order and validated against
    /// the legal list; the first illegal or malformed one stops the sequence,
    /// keeping the moves before it.
    fn handle_position(&mut self, line: &str) -> EngineResult<()> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut base_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.next_if(|tok| *tok != "moves") {
                    fen_parts.push(next);
                }
                GameState::from_fen(&fen_parts.join(" "))?
            }
            Some(other) => {
                return Err(EngineError::InvalidFen(format!(
                    "expected 'startpos' or 'fen', got '{other}'"
                )))
            }
            None => {
                return Err(EngineError::InvalidFen(
                    "incomplete position command".to_owned(),
                ))
            }
        };

        let mut failure = None;
        if tokens.next_if_eq(&"moves").is_some() {
            for lan in tokens {
                if let Err(err) = apply_long_algebraic_move(lan, &mut base_state) {
                    failure = Some(err);
                    break;
                }
            }
        }

        self.game_state = base_state;
        failure.map_or(Ok(()), Err)
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let params = parse_go_params(line);
        match self.engine.choose_move(&self.game_state, &params) {
            Ok(result) => {
                for info in &result.info_lines {
                    writeln!(out, "{info}")?;
                }
                match result.best_move {
                    Some(best_move) => writeln!(out, "bestmove {}", move_to_long_algebraic(&best_move))?,
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            Err(err) => {
                warn!(%err, "search failed");
                writeln!(out, "info string go error: {err}")?;
                writeln!(out, "bestmove 0000")?;
            }
        }
        Ok(())
    }
}

/// Unknown or unparsable fields are skipped.
fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);
    while let Some(token) = tokens.next() {
        match token {
            "depth" => params.depth = tokens.next().and_then(|x| x.parse::<u8>().ok()),
            "movetime" => params.movetime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "wtime" => params.wtime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "btime" => params.btime_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "winc" => params.winc_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "binc" => params.binc_ms = tokens.next().and_then(|x| x.parse::<u64>().ok()),
            "movestogo" => params.movestogo = tokens.next().and_then(|x| x.parse::<u16>().ok()),
            "infinite" => params.infinite = true,
            _ => {}
        }
    }
    params
}
