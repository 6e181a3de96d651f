//! Iterative deepening over `find_move`.
//!
//! Runs depth 1, 2, ... up to the configured limit. An optional move time is
//! only checked between completed depths; a running pass is never interrupted.

use std::time::Instant;

use log::trace;

use crate::errors::{OnitamaError, OnitamaResult};
use crate::search::board_scoring::{Evaluator, WIN_SCORE};
use crate::search::search_engine::{SearchEngine, SearchResult};

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            movetime_ms: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeepeningReport {
    /// Result of the deepest completed depth.
    pub best: SearchResult,
    /// One entry per completed depth, shallowest first.
    pub iterations: Vec<SearchResult>,
    pub total_nodes: u64,
    pub elapsed_ms: u64,
}

impl DeepeningReport {
    pub fn reached_depth(&self) -> u8 {
        self.best.depth
    }
}

pub fn iterative_deepening_search<E: Evaluator>(
    engine: &mut SearchEngine<E>,
    config: SearchConfig,
) -> OnitamaResult<DeepeningReport> {
    let started = Instant::now();
    let max_depth = config.max_depth.max(1);

    let mut iterations = Vec::with_capacity(max_depth as usize);
    let mut total_nodes = 0u64;

    for depth in 1..=max_depth {
        let result = engine.find_move(depth)?;
        total_nodes += result.stats.nodes;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        trace!(
            "depth {} score {} nodes {} cutoffs {} elapsed_ms {}",
            depth,
            result.score,
            result.stats.nodes,
            result.stats.cutoffs,
            elapsed_ms
        );
        iterations.push(result);

        if result.score.abs() >= WIN_SCORE {
            break;
        }
        if config.movetime_ms.is_some_and(|limit| elapsed_ms >= limit) {
            break;
        }
    }

    let best = *iterations.last().ok_or(OnitamaError::NoLegalMove)?;
    Ok(DeepeningReport {
        best,
        iterations,
        total_nodes,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}
