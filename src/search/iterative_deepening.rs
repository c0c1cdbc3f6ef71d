//! Iterative deepening principal variation search.
//!
//! One `Searcher` owns the transposition table and the ordering heuristics,
//! so independent searchers never share state. The position is searched in
//! place with make/unmake and is restored before every return, aborted
//! searches included.
//!
//! Node layout:
//! - stop check, depth exhausted -> quiescence, ply cap -> static score
//! - repetition / fifty-move draw and mate-distance pruning (not at the root)
//! - check extension, transposition probe, null move
//! - ordered move loop with PVS and late move reductions
//! - fail-hard beta cutoff, otherwise exact/upper store

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::EngineResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{
    make_move_in_place, make_null_move, unmake_move_in_place, unmake_null_move,
};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_captures, generate_legal_moves};
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{
    is_mate_score, BoardScorer, PieceSquareScorer, INF_SCORE, MATE_SCORE,
};
use crate::search::move_ordering::{
    order_moves, order_tactical_moves, HistoryTable, KillerTable, MAX_PLY,
};
use crate::search::transposition_table::{
    score_from_tt, score_to_tt, Bound, TTEntry, TTStats, TranspositionTable,
};
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Nodes between wall-clock samples. Must be a power of two.
const TIME_CHECK_INTERVAL: u64 = 1024;
const ASPIRATION_MIN_DEPTH: i32 = 3;
const ASPIRATION_FIRST_EXPANSION: i32 = 80;
const NULL_MOVE_REDUCTION: i32 = 2;
const NULL_MOVE_MIN_DEPTH: i32 = 3;
/// Moves searched at full depth before reductions start.
const LMR_FULL_DEPTH_MOVES: usize = 3;
const LMR_MIN_CHILD_DEPTH: i32 = 2;

pub const DEFAULT_HASH_MB: usize = 64;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_PLY as u8,
            movetime_ms: None,
            stop_flag: None,
        }
    }
}

/// Progress report for one completed iteration.
#[derive(Debug, Clone, Copy)]
pub struct SearchInfo {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub nps: u64,
    pub elapsed_ms: u64,
    pub best_move: Move,
}

impl SearchInfo {
    /// `info depth D score cp S|mate N nodes N nps N time MS pv MOVE`
    pub fn to_uci_line(&self) -> String {
        format!(
            "info depth {} score {} nodes {} nps {} time {} pv {}",
            self.depth,
            format_score(self.score),
            self.nodes,
            self.nps,
            self.elapsed_ms,
            move_to_long_algebraic(&self.best_move)
        )
    }
}

/// `cp N`, or `mate N` in moves (negative when being mated).
pub fn format_score(score: i32) -> String {
    if !is_mate_score(score) {
        return format!("cp {score}");
    }
    let plies = MATE_SCORE - score.abs();
    let moves = (plies + 1) / 2;
    if score > 0 {
        format!("mate {moves}")
    } else {
        format!("mate -{moves}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub tt_stats: TTStats,
    pub iterations: Vec<SearchInfo>,
}

pub struct Searcher<S: BoardScorer = PieceSquareScorer> {
    scorer: S,
    tt: TranspositionTable,
    killers: KillerTable,
    history: HistoryTable,

    nodes: u64,
    started_at: Instant,
    deadline: Option<Instant>,
    stop_flag: Option<Arc<AtomicBool>>,
    stopped: bool,
    root_best: Option<Move>,
}

impl Default for Searcher<PieceSquareScorer> {
    fn default() -> Self {
        Self::new(PieceSquareScorer, DEFAULT_HASH_MB)
    }
}

impl<S: BoardScorer> Searcher<S> {
    pub fn new(scorer: S, hash_mb: usize) -> Self {
        Self {
            scorer,
            tt: TranspositionTable::new_with_mb(hash_mb),
            killers: KillerTable::default(),
            history: HistoryTable::default(),
            nodes: 0,
            started_at: Instant::now(),
            deadline: None,
            stop_flag: None,
            stopped: false,
            root_best: None,
        }
    }

    /// Replace the table with an empty one of the given size.
    pub fn resize_table(&mut self, hash_mb: usize) {
        self.tt = TranspositionTable::new_with_mb(hash_mb);
    }

    /// Forget everything learned so far (new game).
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
    }

    #[inline]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    #[inline]
    pub fn table_len(&self) -> usize {
        self.tt.len()
    }

    fn prepare(&mut self, config: &SearchConfig) {
        self.started_at = Instant::now();
        self.deadline = config
            .movetime_ms
            .map(|ms| self.started_at + Duration::from_millis(ms));
        self.stop_flag = config.stop_flag.clone();
        self.stopped = false;
        self.nodes = 0;
        self.root_best = None;
        self.killers.clear();
        self.tt.reset_stats();
    }

    /// Search `game_state` to `config.max_depth` plies or until the time
    /// budget runs out. Returns the best move of the last completed
    /// iteration; `best_move` is `None` only when there is no legal move.
    pub fn search(&mut self, game_state: &mut GameState, config: &SearchConfig) -> EngineResult<SearchResult> {
        self.prepare(config);
        let mut result = SearchResult::default();

        let mut root_moves = generate_legal_moves(game_state)?;
        if root_moves.is_empty() {
            result.best_score = if is_king_in_check(game_state, game_state.side_to_move) {
                -MATE_SCORE
            } else {
                0
            };
            return Ok(result);
        }

        let tt_move = self.tt.probe(game_state.zobrist_key).and_then(|e| e.best_move);
        order_moves(game_state, &mut root_moves, tt_move, self.killers.at(0), &self.history);
        result.best_move = root_moves.first().copied();

        let max_depth = config.max_depth.clamp(1, (MAX_PLY - 1) as u8);
        let mut prev_score = 0;

        for depth in 1..=max_depth {
            let Some(score) = self.search_with_aspiration(game_state, i32::from(depth), prev_score)? else {
                debug!(depth, "iteration aborted");
                break;
            };

            let best_move = self.root_move_after_iteration(game_state, &root_moves);
            prev_score = score;
            result.best_move = best_move.or(result.best_move);
            result.best_score = score;
            result.reached_depth = depth;

            let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
            if let Some(best_move) = result.best_move {
                let info = SearchInfo {
                    depth,
                    score,
                    nodes: self.nodes,
                    nps: nodes_per_second(self.nodes, elapsed_ms),
                    elapsed_ms,
                    best_move,
                };
                debug!(
                    depth,
                    score,
                    nodes = self.nodes,
                    best = %move_to_long_algebraic(&best_move),
                    "iteration complete"
                );
                result.iterations.push(info);
            }

            // A mate inside the searched horizon cannot improve with depth.
            if is_mate_score(score) && MATE_SCORE - score.abs() <= i32::from(depth) {
                break;
            }
            if self.deadline.is_some_and(|limit| Instant::now() >= limit) {
                break;
            }
        }

        result.nodes = self.nodes;
        result.elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        result.nps = nodes_per_second(result.nodes, result.elapsed_ms);
        result.tt_stats = self.tt.stats();
        Ok(result)
    }

    /// The stored root move if it is legal here, else the best root move
    /// seen during the iteration.
    fn root_move_after_iteration(&mut self, game_state: &GameState, root_moves: &[Move]) -> Option<Move> {
        let from_table = self
            .tt
            .probe(game_state.zobrist_key)
            .and_then(|entry| entry.best_move)
            .and_then(|mv| root_moves.iter().copied().find(|root| *root == mv));
        from_table
            .or_else(|| self.root_best.filter(|mv| root_moves.contains(mv)))
            .or_else(|| root_moves.first().copied())
    }

    fn search_with_aspiration(
        &mut self,
        game_state: &mut GameState,
        depth: i32,
        prev_score: i32,
    ) -> EngineResult<Option<i32>> {
        let (mut alpha, mut beta) = if depth >= ASPIRATION_MIN_DEPTH {
            let window = 35 + 3 * depth;
            (
                (prev_score - window).max(-INF_SCORE),
                (prev_score + window).min(INF_SCORE),
            )
        } else {
            (-INF_SCORE, INF_SCORE)
        };
        let mut expansion = ASPIRATION_FIRST_EXPANSION;

        loop {
            // A failed window may have recorded a move it did not prove.
            self.root_best = None;
            let Some(score) = self.pvs(game_state, depth, 0, alpha, beta, true)? else {
                return Ok(None);
            };

            if score <= alpha && alpha > -INF_SCORE {
                alpha = (alpha - expansion).max(-INF_SCORE);
            } else if score >= beta && beta < INF_SCORE {
                beta = (beta + expansion).min(INF_SCORE);
            } else {
                return Ok(Some(score));
            }
            expansion = expansion * 9 / 5 + 10;
        }
    }

    /// True once the deadline has passed or the stop flag was raised. The
    /// clock is sampled every `TIME_CHECK_INTERVAL` nodes.
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.nodes & (TIME_CHECK_INTERVAL - 1) == 0 {
            let out_of_time = self.deadline.is_some_and(|limit| Instant::now() >= limit);
            let flagged = self
                .stop_flag
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed));
            self.stopped = out_of_time || flagged;
        }
        self.stopped
    }

    fn pvs(
        &mut self,
        game_state: &mut GameState,
        mut depth: i32,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        allow_null: bool,
    ) -> EngineResult<Option<i32>> {
        if self.should_stop() {
            return Ok(None);
        }
        if depth <= 0 {
            return self.quiescence(game_state, ply, alpha, beta);
        }
        if ply >= MAX_PLY - 1 {
            return Ok(Some(self.scorer.score(game_state)));
        }
        self.nodes += 1;

        if ply > 0 {
            if game_state.is_repetition() {
                return Ok(Some(0));
            }
            if game_state.is_fifty_move_draw() {
                // Mate delivered on the hundredth halfmove still counts.
                let mated = is_king_in_check(game_state, game_state.side_to_move)
                    && generate_legal_moves(game_state)?.is_empty();
                return Ok(Some(if mated { -MATE_SCORE + ply as i32 } else { 0 }));
            }

            alpha = alpha.max(-MATE_SCORE + ply as i32);
            beta = beta.min(MATE_SCORE - ply as i32 - 1);
            if alpha >= beta {
                return Ok(Some(alpha));
            }
        }

        let in_check = is_king_in_check(game_state, game_state.side_to_move);
        if in_check {
            depth += 1;
        }
        let is_pv = beta - alpha > 1;
        let key = game_state.zobrist_key;

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(key) {
            tt_move = entry.best_move;
            if ply > 0 && i32::from(entry.depth) >= depth {
                let score = score_from_tt(entry.score, ply);
                if entry.cuts_window(score, alpha, beta) {
                    return Ok(Some(match entry.bound {
                        Bound::Exact => score,
                        Bound::Lower => beta,
                        Bound::Upper => alpha,
                    }));
                }
            }
        }

        if allow_null
            && !is_pv
            && !in_check
            && depth >= NULL_MOVE_MIN_DEPTH
            && game_state.has_non_pawn_material(game_state.side_to_move)
            && self.scorer.score(game_state) >= beta
        {
            let undo = make_null_move(game_state);
            let result = self.pvs(game_state, depth - 1 - NULL_MOVE_REDUCTION, ply + 1, -beta, -beta + 1, false);
            unmake_null_move(game_state, undo);
            let Some(score) = result? else {
                return Ok(None);
            };
            if -score >= beta {
                return Ok(Some(beta));
            }
        }

        let mut moves = generate_legal_moves(game_state)?;
        if moves.is_empty() {
            return Ok(Some(if in_check { -MATE_SCORE + ply as i32 } else { 0 }));
        }
        order_moves(game_state, &mut moves, tt_move, self.killers.at(ply), &self.history);

        let side = game_state.side_to_move;
        let alpha_orig = alpha;
        let mut best_score = -INF_SCORE;
        let mut best_move = moves[0];

        for (index, mv) in moves.into_iter().enumerate() {
            make_move_in_place(game_state, mv)?;
            let result = self.search_child(game_state, mv, index, depth, ply, alpha, beta);
            unmake_move_in_place(game_state)?;
            let Some(score) = result? else {
                return Ok(None);
            };

            if score > best_score {
                best_score = score;
                best_move = mv;
                if ply == 0 {
                    self.root_best = Some(mv);
                }
            }

            if score >= beta {
                if mv.is_quiet() {
                    self.killers.record(ply, mv);
                    self.history.record(side, mv, depth);
                }
                self.tt.store(TTEntry {
                    key,
                    depth: stored_depth(depth),
                    score: score_to_tt(beta, ply),
                    bound: Bound::Lower,
                    best_move: Some(mv),
                });
                return Ok(Some(beta));
            }
            alpha = alpha.max(score);
        }

        let bound = if alpha > alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.store(TTEntry {
            key,
            depth: stored_depth(depth),
            score: score_to_tt(best_score, ply),
            bound,
            best_move: Some(best_move),
        });

        Ok(Some(best_score))
    }

    /// Score of `mv` (already made) from the parent's point of view. The
    /// first move gets the full window; later ones are null-window probes,
    /// reduced for late quiet moves, re-searched when they beat alpha.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        game_state: &mut GameState,
        mv: Move,
        index: usize,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
    ) -> EngineResult<Option<i32>> {
        let child_depth = depth - 1;
        let child_ply = ply + 1;

        if index == 0 {
            let score = self.pvs(game_state, child_depth, child_ply, -beta, -alpha, true)?;
            return Ok(score.map(|s| -s));
        }

        let mut score = alpha + 1;
        if index >= LMR_FULL_DEPTH_MOVES
            && child_depth >= LMR_MIN_CHILD_DEPTH
            && mv.is_quiet()
            && !mv.is_castling()
        {
            let Some(reduced) =
                self.pvs(game_state, child_depth - 1, child_ply, -alpha - 1, -alpha, true)?
            else {
                return Ok(None);
            };
            score = -reduced;
        }

        if score > alpha {
            let Some(probe) = self.pvs(game_state, child_depth, child_ply, -alpha - 1, -alpha, true)? else {
                return Ok(None);
            };
            score = -probe;

            if score > alpha && score < beta {
                let Some(full) = self.pvs(game_state, child_depth, child_ply, -beta, -alpha, true)? else {
                    return Ok(None);
                };
                score = -full;
            }
        }

        Ok(Some(score))
    }

    /// Captures and promotions until the position is quiet. In check every
    /// evasion is searched and standing pat is not allowed.
    fn quiescence(
        &mut self,
        game_state: &mut GameState,
        ply: usize,
        mut alpha: i32,
        beta: i32,
    ) -> EngineResult<Option<i32>> {
        if self.should_stop() {
            return Ok(None);
        }
        self.nodes += 1;
        if ply >= MAX_PLY - 1 {
            return Ok(Some(self.scorer.score(game_state)));
        }

        let mut moves = if is_king_in_check(game_state, game_state.side_to_move) {
            let evasions = generate_legal_moves(game_state)?;
            if evasions.is_empty() {
                return Ok(Some(-MATE_SCORE + ply as i32));
            }
            evasions
        } else {
            let stand_pat = self.scorer.score(game_state);
            if stand_pat >= beta {
                return Ok(Some(beta));
            }
            alpha = alpha.max(stand_pat);
            generate_legal_captures(game_state)?
        };
        order_tactical_moves(game_state, &mut moves);

        for mv in moves {
            make_move_in_place(game_state, mv)?;
            let result = self.quiescence(game_state, ply + 1, -beta, -alpha);
            unmake_move_in_place(game_state)?;
            let Some(score) = result? else {
                return Ok(None);
            };
            let score = -score;

            if score >= beta {
                return Ok(Some(beta));
            }
            alpha = alpha.max(score);
        }

        Ok(Some(alpha))
    }
}

#[inline]
fn stored_depth(depth: i32) -> u8 {
    depth.clamp(0, i32::from(u8::MAX)) as u8
}

#[inline]
fn nodes_per_second(nodes: u64, elapsed_ms: u64) -> u64 {
    if elapsed_ms == 0 {
        0
    } else {
        nodes.saturating_mul(1000) / elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::{apply_long_algebraic_move, move_to_long_algebraic};

    fn search_fen(fen: &str, depth: u8) -> (SearchResult, GameState) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let mut searcher = Searcher::new(PieceSquareScorer, 4);
        let config = SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        };
        let result = searcher.search(&mut game, &config).expect("search should run");
        (result, game)
    }

    fn best_lan(result: &SearchResult) -> String {
        move_to_long_algebraic(&result.best_move.expect("a move should be found"))
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let (result, _) = search_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 4);
        assert_eq!(best_lan(&result), "a1a8");
        assert_eq!(result.best_score, MATE_SCORE - 1);
        assert_eq!(format_score(result.best_score), "mate 1");
    }

    #[test]
    fn checkmated_side_gets_mate_score_and_no_move() {
        let (result, _) = search_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 4);
        assert!(result.best_move.is_none());
        assert_eq!(result.best_score, -MATE_SCORE);
    }

    #[test]
    fn stalemate_scores_zero() {
        let (result, _) = search_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 4);
        assert!(result.best_move.is_none());
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn wins_hanging_queen() {
        let (result, _) = search_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 3);
        assert_eq!(best_lan(&result), "d1d5");
        assert!(result.best_score > 300);
    }

    #[test]
    fn avoids_stalemating_when_winning() {
        // Qf7 stalemates; anything sensible keeps the win.
        let (result, _) = search_fen("7k/8/6K1/8/8/8/5Q2/8 w - - 0 1", 3);
        assert_ne!(best_lan(&result), "f2f7");
        assert!(result.best_score > 500);
    }

    #[test]
    fn search_restores_position() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let (result, game) = search_fen(fen, 4);
        assert!(result.best_move.is_some());
        assert_eq!(game.get_fen(), fen);
        assert!(game.undo_stack.is_empty());
        assert!(game.repetition_history.is_empty());
        assert_eq!(result.iterations.len(), result.reached_depth as usize);
    }

    #[test]
    fn respects_time_budget() {
        let mut game = GameState::new_game();
        let mut searcher = Searcher::default();
        let config = SearchConfig {
            max_depth: 64,
            movetime_ms: Some(150),
            stop_flag: None,
        };
        let started = Instant::now();
        let result = searcher.search(&mut game, &config).expect("search should run");
        assert!(started.elapsed() < Duration::from_millis(150 + 400));
        assert!(result.best_move.is_some());
        assert!(result.reached_depth >= 1);
    }

    #[test]
    fn raised_stop_flag_still_returns_a_legal_move() {
        let mut game = GameState::new_game();
        let mut searcher = Searcher::default();
        let flag = Arc::new(AtomicBool::new(true));
        let config = SearchConfig {
            max_depth: 10,
            movetime_ms: None,
            stop_flag: Some(flag),
        };
        let result = searcher.search(&mut game, &config).expect("search should run");
        let best = result.best_move.expect("fallback move");
        assert!(generate_legal_moves(&mut game).expect("moves").contains(&best));
        assert_eq!(result.reached_depth, 0);
    }

    #[test]
    fn root_score_never_exceeds_beta() {
        let fens = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens {
            for (alpha, beta) in [(-50, 50), (-1, 0), (200, 201), (-600, -400)] {
                let mut game = GameState::from_fen(fen).expect("FEN should parse");
                let mut searcher = Searcher::new(PieceSquareScorer, 1);
                searcher.prepare(&SearchConfig::default());
                let score = searcher
                    .pvs(&mut game, 3, 0, alpha, beta, true)
                    .expect("search should run")
                    .expect("not aborted");
                assert!(score <= beta, "{fen}: {score} > {beta}");
                assert!(score > -INF_SCORE);
                assert_eq!(game.get_fen(), fen);
            }
        }
    }

    fn pvs_at(game: &mut GameState, depth: i32, ply: usize) -> i32 {
        let mut searcher = Searcher::new(PieceSquareScorer, 1);
        searcher.prepare(&SearchConfig::default());
        searcher
            .pvs(game, depth, ply, -INF_SCORE, INF_SCORE, true)
            .expect("search should run")
            .expect("not aborted")
    }

    #[test]
    fn repeated_position_below_root_is_a_draw() {
        let mut game = GameState::new_game();
        for lan in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            apply_long_algebraic_move(lan, &mut game).expect("legal move");
        }
        assert!(game.is_repetition());
        assert_eq!(pvs_at(&mut game, 2, 1), 0);
        assert_eq!(game.repetition_history.len(), 4);
    }

    #[test]
    fn fifty_move_rule_applies_below_root_only() {
        let fen = "4k3/8/8/8/8/8/3q4/R3K3 w - - 100 80";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        assert_eq!(pvs_at(&mut game, 2, 1), 0);
        // At the root the capture resets the clock and keeps the rook.
        assert!(pvs_at(&mut game, 2, 0) > 300);
        assert_eq!(game.get_fen(), fen);
    }

    #[test]
    fn mate_on_hundredth_halfmove_beats_fifty_move_draw() {
        let mut game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80").expect("FEN should parse");
        assert_eq!(pvs_at(&mut game, 2, 1), -MATE_SCORE + 1);
    }

    #[test]
    fn each_aspiration_pass_starts_without_a_root_move() {
        let mut game = GameState::new_game();
        let mut searcher = Searcher::new(PieceSquareScorer, 1);
        searcher.prepare(&SearchConfig {
            stop_flag: Some(Arc::new(AtomicBool::new(true))),
            ..SearchConfig::default()
        });
        searcher.root_best = Some(Move::quiet(6, 21));
        let score = searcher
            .search_with_aspiration(&mut game, 1, 0)
            .expect("search should run");
        assert!(score.is_none());
        assert!(searcher.root_best.is_none());
    }

    #[test]
    fn formats_mate_scores_in_moves() {
        assert_eq!(format_score(35), "cp 35");
        assert_eq!(format_score(MATE_SCORE - 3), "mate 2");
        assert_eq!(format_score(-MATE_SCORE + 2), "mate -1");
    }

    #[test]
    fn info_line_has_protocol_fields() {
        let info = SearchInfo {
            depth: 5,
            score: -12,
            nodes: 1000,
            nps: 50_000,
            elapsed_ms: 20,
            best_move: Move::quiet(12, 28),
        };
        assert_eq!(
            info.to_uci_line(),
            "info depth 5 score cp -12 nodes 1000 nps 50000 time 20 pv e2e4"
        );
    }
}
