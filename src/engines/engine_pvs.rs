//! The principal variation search engine behind the UCI front-end.
//!
//! Owns one [`Searcher`] (and with it the transposition table and ordering
//! heuristics) for the lifetime of a game, plus the static opening replies.

use tracing::{debug, info};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_move_time, DEFAULT_MOVE_OVERHEAD_MS};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::iterative_deepening::{SearchConfig, Searcher, DEFAULT_HASH_MB};
use crate::search::move_ordering::MAX_PLY;
use crate::tables::opening_book::OpeningTable;

pub const MAX_HASH_MB: usize = 1024;

pub struct PvsEngine {
    searcher: Searcher<PieceSquareScorer>,
    opening_table: OpeningTable,
    hash_mb: usize,
    /// Depth used when `go` names none; `None` searches to the ply cap.
    fixed_depth: Option<u8>,
    own_book: bool,
    move_overhead_ms: u64,
}

impl Default for PvsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PvsEngine {
    pub fn new() -> Self {
        // The embedded table is checked by the unit tests; a broken one only
        // disables book replies.
        let opening_table = OpeningTable::load_default().unwrap_or_default();
        Self::with_opening_table(opening_table)
    }

    pub fn with_opening_table(opening_table: OpeningTable) -> Self {
        Self {
            searcher: Searcher::new(PieceSquareScorer, DEFAULT_HASH_MB),
            opening_table,
            hash_mb: DEFAULT_HASH_MB,
            fixed_depth: None,
            own_book: true,
            move_overhead_ms: DEFAULT_MOVE_OVERHEAD_MS,
        }
    }

    #[inline]
    pub fn hash_mb(&self) -> usize {
        self.hash_mb
    }

    #[inline]
    pub fn fixed_depth(&self) -> Option<u8> {
        self.fixed_depth
    }

    #[inline]
    pub fn own_book(&self) -> bool {
        self.own_book
    }

    #[inline]
    pub fn move_overhead_ms(&self) -> u64 {
        self.move_overhead_ms
    }

    fn search_config(&self, game_state: &GameState, params: &GoParams) -> SearchConfig {
        let depth = params.depth.or(self.fixed_depth);
        let timed = params.infinite
            || params.movetime_ms.is_some()
            || params.wtime_ms.is_some()
            || params.btime_ms.is_some();

        // A bare `go depth N` runs to that depth without a clock.
        let movetime_ms = if depth.is_some() && !timed {
            None
        } else {
            Some(resolve_move_time(game_state.side_to_move, params, self.move_overhead_ms))
        };

        SearchConfig {
            max_depth: depth.unwrap_or(MAX_PLY as u8).clamp(1, MAX_PLY as u8),
            movetime_ms,
            stop_flag: None,
        }
    }
}

fn parse_bool_option(name: &str, value: &str) -> EngineResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_option(name, value)),
    }
}

fn invalid_option(name: &str, value: &str) -> EngineError {
    EngineError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

impl Engine for PvsEngine {
    fn new_game(&mut self) {
        info!("new game, clearing search tables");
        self.searcher.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        let trimmed = value.trim();
        if name.eq_ignore_ascii_case("Hash") {
            let parsed = trimmed
                .parse::<usize>()
                .ok()
                .filter(|mb| (1..=MAX_HASH_MB).contains(mb))
                .ok_or_else(|| invalid_option(name, value))?;
            self.hash_mb = parsed;
            self.searcher.resize_table(parsed);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("FixedDepth") {
            let parsed = trimmed
                .parse::<u8>()
                .ok()
                .filter(|depth| usize::from(*depth) <= MAX_PLY)
                .ok_or_else(|| invalid_option(name, value))?;
            self.fixed_depth = (parsed > 0).then_some(parsed);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("OwnBook") {
            self.own_book = parse_bool_option(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveOverhead") {
            self.move_overhead_ms = trimmed
                .parse::<u64>()
                .map_err(|_| invalid_option(name, value))?;
            return Ok(());
        }
        debug!(name, value, "ignoring unknown option");
        Ok(())
    }

    fn option_lines(&self) -> Vec<String> {
        vec![
            format!("option name Hash type spin default {DEFAULT_HASH_MB} min 1 max {MAX_HASH_MB}"),
            format!("option name FixedDepth type spin default 0 min 0 max {MAX_PLY}"),
            "option name OwnBook type check default true".to_owned(),
            format!("option name MoveOverhead type spin default {DEFAULT_MOVE_OVERHEAD_MS} min 0 max 10000"),
        ]
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> EngineResult<EngineOutput> {
        let mut position = game_state.clone();
        let mut out = EngineOutput::default();

        if generate_legal_moves(&mut position)?.is_empty() {
            let verdict = if is_king_in_check(&position, position.side_to_move) {
                "checkmate"
            } else {
                "stalemate"
            };
            out.info_lines.push(format!("info string {verdict}"));
            return Ok(out);
        }

        if self.own_book && params.depth.is_none() {
            if let Some(reply) = self.opening_table.choose_reply(&mut position)? {
                info!(plies = position.history_len(), "opening table reply");
                out.best_move = Some(reply);
                out.info_lines.push("info string opening table move".to_owned());
                return Ok(out);
            }
        }

        let config = self.search_config(&position, params);
        let result = self.searcher.search(&mut position, &config)?;

        out.info_lines
            .extend(result.iterations.iter().map(|iteration| iteration.to_uci_line()));
        out.info_lines.push(format!(
            "info string tt probes {} hits {} stores {} size_entries {}",
            result.tt_stats.probes,
            result.tt_stats.hits,
            result.tt_stats.stores,
            self.searcher.table_len()
        ));
        out.best_move = result.best_move;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::{apply_long_algebraic_move, move_to_long_algebraic};

    fn best_lan(out: &EngineOutput) -> String {
        move_to_long_algebraic(&out.best_move.expect("engine should pick a move"))
    }

    #[test]
    fn start_position_uses_opening_table() {
        let mut engine = PvsEngine::new();
        let out = engine
            .choose_move(
                &GameState::new_game(),
                &GoParams {
                    movetime_ms: Some(200),
                    ..GoParams::default()
                },
            )
            .expect("engine should answer");
        assert_eq!(best_lan(&out), "e2e4");
        assert!(out.info_lines.iter().any(|l| l == "info string opening table move"));
    }

    #[test]
    fn book_can_be_disabled() {
        let mut engine = PvsEngine::new();
        engine.set_option("OwnBook", "false").expect("valid option");
        let mut game = GameState::new_game();
        apply_long_algebraic_move("e2e4", &mut game).expect("legal");
        apply_long_algebraic_move("e7e5", &mut game).expect("legal");
        let out = engine
            .choose_move(
                &game,
                &GoParams {
                    depth: Some(2),
                    ..GoParams::default()
                },
            )
            .expect("engine should answer");
        assert!(out.best_move.is_some());
        assert!(out.info_lines.iter().any(|l| l.starts_with("info depth 2 ")));
        assert!(!out.info_lines.iter().any(|l| l.contains("opening table")));
    }

    #[test]
    fn reports_checkmate_and_stalemate_without_a_move() {
        let mut engine = PvsEngine::new();
        let mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        let out = engine.choose_move(&mated, &GoParams::default()).expect("answer");
        assert!(out.best_move.is_none());
        assert_eq!(out.info_lines, ["info string checkmate"]);

        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN");
        let out = engine.choose_move(&stalemate, &GoParams::default()).expect("answer");
        assert!(out.best_move.is_none());
        assert_eq!(out.info_lines, ["info string stalemate"]);
    }

    #[test]
    fn fixed_depth_search_reports_each_iteration() {
        let mut engine = PvsEngine::new();
        engine.set_option("FixedDepth", "3").expect("valid option");
        let game = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("FEN");
        let out = engine.choose_move(&game, &GoParams::default()).expect("answer");
        assert_eq!(best_lan(&out), "d1d5");
        let depth_lines = out
            .info_lines
            .iter()
            .filter(|l| l.starts_with("info depth"))
            .count();
        assert_eq!(depth_lines, 3);
    }

    #[test]
    fn options_are_validated() {
        let mut engine = PvsEngine::new();
        engine.set_option("Hash", "16").expect("valid hash");
        assert_eq!(engine.hash_mb(), 16);
        assert!(engine.set_option("Hash", "0").is_err());
        assert!(engine.set_option("Hash", "4096").is_err());
        assert_eq!(engine.hash_mb(), 16);

        engine.set_option("FixedDepth", "0").expect("valid depth");
        assert_eq!(engine.fixed_depth(), None);
        assert!(engine.set_option("FixedDepth", "deep").is_err());

        engine.set_option("OwnBook", "off").expect("valid bool");
        assert!(!engine.own_book());
        assert!(engine.set_option("OwnBook", "maybe").is_err());

        engine.set_option("MoveOverhead", "30").expect("valid overhead");
        assert_eq!(engine.move_overhead_ms(), 30);
        engine.set_option("Threads", "8").expect("unknown options are ignored");
    }

    #[test]
    fn bare_depth_has_no_clock_but_time_controls_do() {
        let engine = PvsEngine::new();
        let game = GameState::new_game();
        let depth_only = engine.search_config(
            &game,
            &GoParams {
                depth: Some(4),
                ..GoParams::default()
            },
        );
        assert_eq!(depth_only.max_depth, 4);
        assert_eq!(depth_only.movetime_ms, None);

        let clocked = engine.search_config(
            &game,
            &GoParams {
                wtime_ms: Some(3_000),
                ..GoParams::default()
            },
        );
        assert_eq!(clocked.max_depth, MAX_PLY as u8);
        assert_eq!(clocked.movetime_ms, Some(100));
    }
}
