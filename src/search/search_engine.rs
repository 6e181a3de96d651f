//! Search engine state: the root position, its card table, the node arena and
//! the evaluator.
//!
//! The engine exclusively owns the `Position` it searches and mutates it in
//! place with apply/undo. Every public pass leaves it exactly as the root.
//! Search algorithms live in `alpha_beta.rs` and `tree_generation.rs` as
//! further `impl` blocks on `SearchEngine`.

use crate::errors::OnitamaResult;
use crate::game_state::game::GameSnapshot;
use crate::game_state::onitama_types::Position;
use crate::move_generation::move_generator::{generate_moves, legal_moves};
use crate::moves::card_table::CardTable;
use crate::moves::onitama_move::Move;
use crate::search::board_scoring::{Evaluator, MobilityEvaluator, WIN_SCORE};
use crate::search::search_tree::SearchTree;

/// Window bound for a full-width search. Strictly above any evaluation.
pub const SEARCH_INFINITY: i32 = WIN_SCORE + 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, leaves included.
    pub nodes: u64,
    /// Fail-high cutoffs (alpha-beta only).
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
    pub stats: SearchStats,
}

pub struct SearchEngine<E: Evaluator = MobilityEvaluator> {
    pub(crate) table: CardTable,
    pub(crate) position: Position,
    pub(crate) tree: SearchTree,
    pub(crate) evaluator: E,
    pub(crate) stats: SearchStats,
    move_buffers: Vec<Vec<Move>>,
}

impl<E: Evaluator> SearchEngine<E> {
    pub fn new(position: Position, table: CardTable, evaluator: E) -> Self {
        let root_terminal = position.winner().is_some();
        Self {
            table,
            position,
            tree: SearchTree::new(root_terminal),
            evaluator,
            stats: SearchStats::default(),
            move_buffers: Vec::new(),
        }
    }

    pub fn from_game<G: GameSnapshot + ?Sized>(game: &G, evaluator: E) -> OnitamaResult<Self> {
        let (position, table) = Position::from_snapshot(game)?;
        let mut engine = Self::new(position, table, evaluator);
        engine.tree.reset_root(game.check_victory().is_some());
        Ok(engine)
    }

    /// Replace the root with the current state of `game`.
    pub fn set_game_as_root<G: GameSnapshot + ?Sized>(&mut self, game: &G) -> OnitamaResult<()> {
        let (position, table) = Position::from_snapshot(game)?;
        self.position = position;
        self.table = table;
        self.tree.reset_root(game.check_victory().is_some());
        self.stats = SearchStats::default();
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn card_table(&self) -> &CardTable {
        &self.table
    }

    #[inline]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Counters of the most recent pass.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn root_is_terminal(&self) -> bool {
        self.tree.node(SearchTree::ROOT).terminal
    }

    /// Legal moves of the side to move at the root, in generation order.
    pub fn root_legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position, &self.table)
    }

    /// Static evaluation for the side to move.
    #[inline]
    pub(crate) fn evaluate_current(&self) -> i32 {
        self.evaluator
            .evaluate(&self.position, &self.table, self.position.active_player)
    }

    /// Clear the arena and counters before a new pass.
    pub(crate) fn begin_pass(&mut self) {
        self.tree.reset();
        self.stats = SearchStats::default();
    }

    /// Moves of the current position in the reusable buffer for `ply`.
    pub(crate) fn take_moves(&mut self, ply: usize) -> Vec<Move> {
        if self.move_buffers.len() <= ply {
            self.move_buffers.resize_with(ply + 1, || Vec::with_capacity(40));
        }
        let mut moves = std::mem::take(&mut self.move_buffers[ply]);
        moves.clear();
        generate_moves(&self.position, &self.table, &mut moves);
        moves
    }

    pub(crate) fn return_moves(&mut self, ply: usize, moves: Vec<Move>) {
        self.move_buffers[ply] = moves;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::cards::CardKind;
    use crate::game_state::game::Game;
    use crate::game_state::onitama_types::Player;

    #[test]
    fn engine_root_mirrors_the_game() {
        let game = Game::new([CardKind::Tiger; 5]);
        let engine =
            SearchEngine::from_game(&game, MobilityEvaluator::default()).expect("valid snapshot");
        assert_eq!(engine.position().active_player, Player::Blue);
        assert_eq!(engine.root_legal_moves().len(), 10);
        assert!(!engine.root_is_terminal());
        assert_eq!(engine.tree().len(), 1);
    }

    #[test]
    fn set_game_as_root_follows_the_game() {
        let mut game = Game::from_names(&["monkey", "crab", "tiger", "elephant", "rabbit"])
            .expect("card names are valid");
        let mut engine =
            SearchEngine::from_game(&game, MobilityEvaluator::default()).expect("valid snapshot");
        let first = engine.root_legal_moves()[0];
        game.do_move(first.to_game_move(engine.card_table()))
            .expect("generated move is legal");

        engine.set_game_as_root(&game).expect("valid snapshot");
        assert_eq!(engine.position().active_player, game.active_player());
        assert_eq!(engine.position().board, game.board());
        assert!(engine.position().is_consistent());
    }
}
