//! Random-move engine.
//!
//! Picks uniformly among the legal moves. Used as a sparring partner in
//! self-play and for randomized integration tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::OnitamaResult;
use crate::game_state::game::Game;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Onitama Random"
    }

    fn choose_move(&mut self, game: &Game, _params: &GoParams) -> OnitamaResult<EngineOutput> {
        let legal_moves = game.legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = legal_moves.choose(&mut self.rng).copied();
        Ok(out)
    }
}
