//! Perft: exhaustive legal-tree counts used to validate move generation.

use std::thread;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// Leaf statistics. Everything except `nodes` describes the move that
/// reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaves of the legal tree below `game_state` at exactly `depth` plies.
pub fn perft(game_state: &mut GameState, depth: u8) -> EngineResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(game_state, depth, &mut counts)?;
    Ok(counts)
}

/// Leaf counts per root move, in generation order, as long algebraic text.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> EngineResult<Vec<(String, u64)>> {
    let mut divided = Vec::new();
    if depth == 0 {
        return Ok(divided);
    }
    for mv in generate_legal_moves(game_state)? {
        let mut counts = PerftCounts::default();
        make_move_in_place(game_state, mv)?;
        if depth == 1 {
            counts.nodes = 1;
        } else {
            perft_recurse(game_state, depth - 1, &mut counts)?;
        }
        unmake_move_in_place(game_state)?;
        divided.push((move_to_long_algebraic(&mv), counts.nodes));
    }
    Ok(divided)
}

/// Splits the root moves across one worker thread each.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> EngineResult<PerftCounts> {
    if depth == 0 {
        return perft(&mut game_state.clone(), 0);
    }

    let mut root = game_state.clone();
    let root_moves = generate_legal_moves(&mut root)?;

    let handles: Vec<_> = root_moves
        .into_iter()
        .map(|mv| {
            let mut local_state = game_state.clone();
            thread::spawn(move || -> EngineResult<PerftCounts> {
                let mut local = PerftCounts::default();
                make_move_in_place(&mut local_state, mv)?;
                if depth == 1 {
                    tally_leaf(&mut local_state, mv, &mut local)?;
                } else {
                    perft_recurse(&mut local_state, depth - 1, &mut local)?;
                }
                Ok(local)
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| EngineError::WorkerPanicked)??;
        total.merge(local);
    }
    Ok(total)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> EngineResult<()> {
    let moves = generate_legal_moves(game_state)?;

    if depth == 1 {
        for mv in moves {
            make_move_in_place(game_state, mv)?;
            tally_leaf(game_state, mv, counts)?;
            unmake_move_in_place(game_state)?;
        }
        return Ok(());
    }

    for mv in moves {
        make_move_in_place(game_state, mv)?;
        perft_recurse(game_state, depth - 1, counts)?;
        unmake_move_in_place(game_state)?;
    }
    Ok(())
}

/// Called with `mv` already made.
fn tally_leaf(game_state: &mut GameState, mv: Move, counts: &mut PerftCounts) -> EngineResult<()> {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.is_castling() {
        counts.castles += 1;
    }
    if mv.is_promotion() {
        counts.promotions += 1;
    }
    if is_king_in_check(game_state, game_state.side_to_move) {
        counts.checks += 1;
        if generate_legal_moves(game_state)?.is_empty() {
            counts.checkmates += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> u64 {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        perft(&mut game, depth).expect("perft should run").nodes
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        let counts = perft(&mut game, 0).expect("perft should run");
        assert_eq!(counts, PerftCounts { nodes: 1, ..PerftCounts::default() });
    }

    #[test]
    fn start_position_reference_counts() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&mut game, 1).expect("perft").nodes, 20);
        assert_eq!(perft(&mut game, 2).expect("perft").nodes, 400);
        assert_eq!(perft(&mut game, 3).expect("perft").nodes, 8_902);
        assert_eq!(
            perft(&mut game, 4).expect("perft"),
            PerftCounts {
                nodes: 197_281,
                captures: 1_576,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 469,
                checkmates: 8,
            }
        );
        assert_eq!(game.get_fen(), GameState::new_game().get_fen());
    }

    #[test]
    fn kiwipete_reference_counts() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        assert_eq!(nodes(KIWIPETE, 2), 2_039);
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        assert_eq!(
            perft(&mut game, 3).expect("perft"),
            PerftCounts {
                nodes: 97_862,
                captures: 17_102,
                en_passant: 45,
                castles: 3_162,
                promotions: 0,
                checks: 993,
                checkmates: 1,
            }
        );
    }

    #[test]
    fn position_three_reference_counts() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2_812);
        let mut game = GameState::from_fen(POSITION_3).expect("FEN should parse");
        let counts = perft(&mut game, 4).expect("perft");
        assert_eq!(counts.nodes, 43_238);
        assert_eq!(counts.captures, 3_348);
        assert_eq!(counts.en_passant, 123);
        assert_eq!(counts.checks, 1_680);
        assert_eq!(counts.checkmates, 17);
    }

    #[test]
    fn promotion_heavy_positions() {
        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
        assert_eq!(nodes(POSITION_4, 3), 9_467);
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1_486);
        assert_eq!(nodes(POSITION_5, 3), 62_379);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let divided = perft_divide(&mut game, 2).expect("divide should run");
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 2_039);
        assert!(divided.iter().any(|(lan, _)| lan == "e1g1"));
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let game = GameState::from_fen(POSITION_3).expect("FEN should parse");
        let threaded = perft_multi_threaded(&game, 3).expect("perft should run");
        assert_eq!(threaded, perft(&mut game.clone(), 3).expect("perft should run"));
    }
}
