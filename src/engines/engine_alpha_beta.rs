//! Alpha-beta engine: iterative deepening over the mobility evaluator.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{OnitamaError, OnitamaResult};
use crate::game_state::game::Game;
use crate::search::board_scoring::{EvalWeights, MobilityEvaluator};
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig};
use crate::search::search_engine::SearchEngine;

pub struct AlphaBetaEngine {
    default_depth: u8,
    weights: EvalWeights,
}

impl AlphaBetaEngine {
    pub fn new(default_depth: u8, weights: EvalWeights) -> OnitamaResult<Self> {
        weights.validate()?;
        Ok(Self {
            default_depth: default_depth.max(1),
            weights,
        })
    }

    pub fn with_depth(default_depth: u8) -> Self {
        Self {
            default_depth: default_depth.max(1),
            weights: EvalWeights::default(),
        }
    }

    pub fn default_depth(&self) -> u8 {
        self.default_depth
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::with_depth(SearchConfig::default().max_depth)
    }
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "Onitama AlphaBeta"
    }

    fn choose_move(&mut self, game: &Game, params: &GoParams) -> OnitamaResult<EngineOutput> {
        let mut out = EngineOutput::default();
        if let Some(winner) = game.check_victory() {
            out.info_lines
                .push(format!("info string game over, {winner} has won"));
            return Ok(out);
        }

        let evaluator = MobilityEvaluator::new(self.weights)?;
        let mut engine = SearchEngine::from_game(game, evaluator)?;
        let config = SearchConfig {
            max_depth: params.depth.unwrap_or(self.default_depth).max(1),
            movetime_ms: params.movetime_ms,
        };

        let report = match iterative_deepening_search(&mut engine, config) {
            Ok(report) => report,
            Err(OnitamaError::NoLegalMove) => {
                out.info_lines
                    .push("info string alphabeta_engine no_legal_moves".to_owned());
                return Ok(out);
            }
            Err(e) => return Err(e),
        };

        for iteration in &report.iterations {
            out.info_lines.push(format!(
                "info depth {} score {} nodes {} cutoffs {} pv {}",
                iteration.depth,
                iteration.score,
                iteration.stats.nodes,
                iteration.stats.cutoffs,
                iteration.best_move.to_game_move(engine.card_table())
            ));
        }
        out.info_lines.push(format!(
            "info string alphabeta_engine total_nodes {} time {}",
            report.total_nodes, report.elapsed_ms
        ));

        out.best_move = Some(report.best.best_move.to_game_move(engine.card_table()));
        out.score = report.best.score;
        Ok(out)
    }
}
