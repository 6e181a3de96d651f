//! Full-width tree expansion for node counting and throughput measurement.
//!
//! Every non-terminal node is expanded down to the requested depth with no
//! evaluation and no pruning. Unlike the searches, every node is kept in the
//! arena so that `get_nodes` can list whole levels afterwards.

use std::collections::VecDeque;

use log::debug;

use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::move_generator::generate_moves;
use crate::search::board_scoring::Evaluator;
use crate::search::search_engine::SearchEngine;
use crate::search::search_tree::{NodeId, NodeState, SearchTree};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    #[default]
    BreadthFirst,
    DepthFirst,
}

impl TraversalOrder {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bfs" | "breadth" | "breadth-first" => Some(Self::BreadthFirst),
            "dfs" | "depth" | "depth-first" => Some(Self::DepthFirst),
            _ => None,
        }
    }
}

impl<E: Evaluator> SearchEngine<E> {
    /// Rebuild the arena as the complete move tree to `depth`.
    ///
    /// Returns the number of nodes in the arena, root included.
    pub fn generate_tree(&mut self, depth: u8, order: TraversalOrder) -> usize {
        self.begin_pass();
        match order {
            TraversalOrder::BreadthFirst => self.expand_breadth_first(depth),
            TraversalOrder::DepthFirst => self.expand_depth_first(SearchTree::ROOT, depth),
        }
        debug!(
            "generate_tree depth={} order={:?} nodes={}",
            depth,
            order,
            self.tree.len()
        );
        self.tree.len()
    }

    /// Nodes exactly `depth` plies below the root of the last generated tree.
    pub fn get_nodes(&self, depth: u8) -> Vec<NodeId> {
        self.tree.nodes_at_depth(depth)
    }

    /// Node count of every level from the root down to `depth`.
    pub fn node_counts(&self, depth: u8) -> Vec<usize> {
        (0..=depth).map(|level| self.get_nodes(level).len()).collect()
    }

    fn expand_breadth_first(&mut self, depth: u8) {
        let mut frontier = VecDeque::from([SearchTree::ROOT]);
        let mut moves = Vec::with_capacity(40);

        while let Some(id) = frontier.pop_front() {
            let node = self.tree.node(id);
            if node.ply >= depth || node.terminal {
                continue;
            }

            let path = self.tree.path_to(id);
            for mv in &path {
                apply_move(&mut self.position, mv);
            }

            moves.clear();
            generate_moves(&self.position, &self.table, &mut moves);
            for mv in &moves {
                let terminal = apply_move(&mut self.position, mv);
                undo_move(&mut self.position, mv);
                let child = self.tree.add_child(id, *mv, terminal);
                frontier.push_back(child);
            }
            self.stats.nodes += moves.len() as u64;
            self.tree.node_mut(id).state = NodeState::Expanded;

            for mv in path.iter().rev() {
                undo_move(&mut self.position, mv);
            }
        }
    }

    fn expand_depth_first(&mut self, id: NodeId, depth: u8) {
        let node = self.tree.node(id);
        if node.ply >= depth || node.terminal {
            return;
        }

        let mut moves = Vec::with_capacity(40);
        generate_moves(&self.position, &self.table, &mut moves);
        self.tree.node_mut(id).state = NodeState::Expanded;
        self.stats.nodes += moves.len() as u64;

        for mv in &moves {
            let terminal = apply_move(&mut self.position, mv);
            let child = self.tree.add_child(id, *mv, terminal);
            self.expand_depth_first(child, depth);
            undo_move(&mut self.position, mv);
        }
    }
}
