use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pvs_chess::game_state::game_state::GameState;
use pvs_chess::search::board_scoring::PieceSquareScorer;
use pvs_chess::search::iterative_deepening::{SearchConfig, Searcher};

const POSITIONS: &[(&str, &str)] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("rook_endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn search_depth() -> u8 {
    std::env::var("PVS_BENCH_DEPTH")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5)
}

fn bench_search(c: &mut Criterion) {
    let depth = search_depth();
    let mut group = c.benchmark_group(format!("search_d{depth}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    for (name, fen) in POSITIONS {
        let game = GameState::from_fen(fen).expect("benchmark FEN should parse");
        let config = SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(name), &game, |b, game| {
            b.iter(|| {
                // Fresh tables each run so iterations measure the same work.
                let mut searcher = Searcher::new(PieceSquareScorer, 16);
                let mut position = game.clone();
                let result = searcher
                    .search(black_box(&mut position), &config)
                    .expect("search benchmark run should succeed");
                assert!(result.best_move.is_some());
                black_box(result.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
