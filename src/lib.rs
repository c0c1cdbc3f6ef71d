//! Crate root module declarations for the PVS chess engine.
//!
//! Exposes the board model, move generation, search, engine, and UCI layers
//! so the binary, benches, and tests share stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod jump_tables;
    pub mod move_descriptions;
    pub mod sliding_rays;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod tables {
    pub mod opening_book;
}

pub mod uci {
    pub mod uci_top;
}

pub mod engines {
    pub mod engine_pvs;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
