//! Crate root module declarations for the Onitama engine.
//!
//! This file exposes all subsystems (game state, move generation, search,
//! engines, and utility helpers) so binaries, benches, and external tooling
//! can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod cards;
    pub mod game;
    pub mod onitama_types;
    pub mod position;
}

pub mod moves {
    pub mod card_table;
    pub mod game_move;
    pub mod onitama_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod search_engine;
    pub mod search_tree;
    pub mod tree_generation;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod render_position;
}
