//! Move ordering: transposition move, captures by MVV-LVA, killers, history.
//!
//! Priority bands, highest first:
//! transposition move, captures and promotions, castling, first killer,
//! second killer, history. History is clamped below the killer band so the
//! bands never overlap.

use std::cmp::Reverse;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

pub const MAX_PLY: usize = 64;

const TT_MOVE_BONUS: i32 = 2_000_000;
const TACTICAL_BONUS: i32 = 1_000_000;
const CASTLING_BONUS: i32 = 50_000;
const KILLER_BONUSES: [i32; 2] = [40_000, 35_000];
const HISTORY_CAP: i32 = 30_000;

/// Two quiet moves per ply that recently caused a beta cutoff.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self {
            slots: [[None; 2]; MAX_PLY],
        }
    }
}

impl KillerTable {
    #[inline]
    pub fn at(&self, ply: usize) -> [Option<Move>; 2] {
        self.slots.get(ply).copied().unwrap_or([None; 2])
    }

    pub fn record(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn clear(&mut self) {
        self.slots.fill([None; 2]);
    }
}

/// Cutoff counts per (side, origin, destination).
#[derive(Debug, Clone)]
pub struct HistoryTable {
    scores: Box<[[[i32; 64]; 64]; 2]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self {
            scores: Box::new([[[0; 64]; 64]; 2]),
        }
    }
}

impl HistoryTable {
    #[inline]
    pub fn score(&self, side: Color, mv: Move) -> i32 {
        self.scores[side.index()][mv.from as usize][mv.to as usize]
    }

    pub fn record(&mut self, side: Color, mv: Move, depth: i32) {
        let entry = &mut self.scores[side.index()][mv.from as usize][mv.to as usize];
        *entry = entry.saturating_add(depth * depth).min(HISTORY_CAP);
    }

    pub fn clear(&mut self) {
        self.scores.iter_mut().flatten().for_each(|row| row.fill(0));
    }
}

/// Most valuable victim, least valuable attacker. Promotions count the
/// promoted piece's gain as part of the victim.
pub fn mvv_lva(game_state: &GameState, mv: Move) -> i32 {
    let victim = mv.captured.map_or(0, PieceKind::value);
    let promotion_gain = mv
        .promotion
        .map_or(0, |kind| kind.value() - PieceKind::Pawn.value());
    let attacker = game_state.piece_at(mv.from).map_or(0, |piece| piece.kind.value());
    10 * (victim + promotion_gain) - attacker
}

pub fn move_priority(
    game_state: &GameState,
    mv: Move,
    tt_move: Option<Move>,
    killers: [Option<Move>; 2],
    history: &HistoryTable,
) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_BONUS;
    }
    if mv.is_tactical() {
        return TACTICAL_BONUS + mvv_lva(game_state, mv);
    }
    if mv.is_castling() {
        return CASTLING_BONUS;
    }
    for (killer, bonus) in killers.iter().zip(KILLER_BONUSES) {
        if *killer == Some(mv) {
            return bonus;
        }
    }
    history.score(game_state.side_to_move, mv).min(HISTORY_CAP)
}

/// Stable sort, highest priority first.
pub fn order_moves(
    game_state: &GameState,
    moves: &mut [Move],
    tt_move: Option<Move>,
    killers: [Option<Move>; 2],
    history: &HistoryTable,
) {
    moves.sort_by_cached_key(|mv| Reverse(move_priority(game_state, *mv, tt_move, killers, history)));
}

/// Quiescence ordering: MVV-LVA only.
pub fn order_tactical_moves(game_state: &GameState, moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| Reverse(mvv_lva(game_state, *mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

    #[test]
    fn pawn_takes_queen_beats_queen_takes_pawn() {
        let game = GameState::from_fen("4k3/8/3q4/2P1p3/3Q4/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let pxq = Move::new(34, 43, Some(PieceKind::Queen), None, 1);
        let qxp = Move::new(27, 36, Some(PieceKind::Pawn), None, 1);
        assert!(mvv_lva(&game, pxq) > mvv_lva(&game, qxp));
    }

    #[test]
    fn bands_rank_tt_capture_castle_killer_history() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let mut moves = generate_legal_moves(&mut game).expect("generation should succeed");
        let tt_move = long_algebraic_to_move("a1a5", &mut game).expect("legal");
        let killer = long_algebraic_to_move("h1h5", &mut game).expect("legal");
        let history_move = long_algebraic_to_move("a1a2", &mut game).expect("legal");
        let mut history = HistoryTable::default();
        for _ in 0..1000 {
            history.record(Color::Light, history_move, 10);
        }

        order_moves(&game, &mut moves, Some(tt_move), [Some(killer), None], &history);
        let lans: Vec<String> = moves.iter().map(move_to_long_algebraic).collect();

        assert_eq!(lans[0], "a1a5");
        assert!(lans[1..3].contains(&"a1a8".to_owned()));
        assert!(lans[1..3].contains(&"h1h8".to_owned()));
        assert!(lans[3..5].contains(&"e1g1".to_owned()));
        assert!(lans[3..5].contains(&"e1c1".to_owned()));
        assert_eq!(lans[5], "h1h5");
        assert_eq!(lans[6], "a1a2");
        assert_eq!(history.score(Color::Light, history_move), HISTORY_CAP);
    }

    #[test]
    fn killers_shift_and_ignore_duplicates() {
        let mut killers = KillerTable::default();
        let a = Move::quiet(1, 18);
        let b = Move::quiet(6, 21);
        killers.record(3, a);
        killers.record(3, a);
        assert_eq!(killers.at(3), [Some(a), None]);
        killers.record(3, b);
        assert_eq!(killers.at(3), [Some(b), Some(a)]);
        killers.record(MAX_PLY + 5, a);
        assert_eq!(killers.at(MAX_PLY + 5), [None, None]);
        killers.clear();
        assert_eq!(killers.at(3), [None, None]);
    }
}
