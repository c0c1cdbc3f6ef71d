//! Per-move time budgeting from raw `go` parameters.
//!
//! The front-end passes clock data through untouched; the engine turns it
//! into a single move time here.

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::Color;

pub const DEFAULT_MOVE_OVERHEAD_MS: u64 = 100;
pub const MIN_MOVE_TIME_MS: u64 = 50;
/// Clock assumed when `go` gives none (or zero) for the side to move.
pub const DEFAULT_CLOCK_MS: u64 = 60_000;
pub const INFINITE_MOVE_TIME_MS: u64 = 24 * 60 * 60 * 1000;
const DEFAULT_MOVES_TO_GO: u64 = 30;

/// Milliseconds the search may spend on this move.
pub fn resolve_move_time(side_to_move: Color, params: &GoParams, move_overhead_ms: u64) -> u64 {
    if params.infinite {
        return INFINITE_MOVE_TIME_MS;
    }
    if let Some(movetime) = params.movetime_ms {
        return movetime.saturating_sub(move_overhead_ms).max(MIN_MOVE_TIME_MS);
    }

    let (remaining, increment) = match side_to_move {
        Color::Light => (params.wtime_ms, params.winc_ms),
        Color::Dark => (params.btime_ms, params.binc_ms),
    };
    let remaining = remaining.filter(|ms| *ms > 0).unwrap_or(DEFAULT_CLOCK_MS);
    let moves_to_go = params
        .movestogo
        .map_or(DEFAULT_MOVES_TO_GO, |mtg| u64::from(mtg.max(1)));
    let increment_share = increment.unwrap_or(0).saturating_mul(4) / 5;

    (remaining / moves_to_go)
        .saturating_add(increment_share)
        .max(MIN_MOVE_TIME_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_move_time_subtracts_overhead_with_floor() {
        let params = GoParams {
            movetime_ms: Some(1_000),
            ..GoParams::default()
        };
        assert_eq!(resolve_move_time(Color::Light, &params, 100), 900);
        let short = GoParams {
            movetime_ms: Some(120),
            ..GoParams::default()
        };
        assert_eq!(resolve_move_time(Color::Light, &short, 100), MIN_MOVE_TIME_MS);
    }

    #[test]
    fn clock_uses_side_to_move_and_increment() {
        let params = GoParams {
            wtime_ms: Some(30_000),
            btime_ms: Some(90_000),
            winc_ms: Some(1_000),
            binc_ms: Some(0),
            ..GoParams::default()
        };
        assert_eq!(resolve_move_time(Color::Light, &params, 100), 1_000 + 800);
        assert_eq!(resolve_move_time(Color::Dark, &params, 100), 3_000);
    }

    #[test]
    fn missing_or_zero_clock_falls_back_to_default() {
        assert_eq!(resolve_move_time(Color::Dark, &GoParams::default(), 100), 2_000);
        let zero = GoParams {
            btime_ms: Some(0),
            ..GoParams::default()
        };
        assert_eq!(resolve_move_time(Color::Dark, &zero, 100), 2_000);
    }

    #[test]
    fn moves_to_go_and_infinite() {
        let params = GoParams {
            wtime_ms: Some(10_000),
            movestogo: Some(5),
            ..GoParams::default()
        };
        assert_eq!(resolve_move_time(Color::Light, &params, 100), 2_000);
        let infinite = GoParams {
            infinite: true,
            movetime_ms: Some(10),
            ..GoParams::default()
        };
        assert_eq!(resolve_move_time(Color::Light, &infinite, 100), INFINITE_MOVE_TIME_MS);
    }
}
