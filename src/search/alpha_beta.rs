//! Negamax reference search, alpha-beta search and root move selection.
//!
//! Both searches share the same leaf rule: depth exhausted, a terminal node,
//! or a position without moves is scored by the evaluator for the side to
//! move. Only the root and its children are materialised in the arena; deeper
//! plies live on the recursion stack.

use log::debug;

use crate::errors::{OnitamaError, OnitamaResult};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::moves::onitama_move::Move;
use crate::search::board_scoring::Evaluator;
use crate::search::move_ordering::order_moves;
use crate::search::search_engine::{SearchEngine, SearchResult, SEARCH_INFINITY};
use crate::search::search_tree::{NodeId, NodeState, SearchTree};

impl<E: Evaluator> SearchEngine<E> {
    /// Full-width negamax value of the root. No pruning.
    pub fn negamax(&mut self, depth: u8) -> i32 {
        self.begin_pass();
        let terminal = self.root_is_terminal();
        self.negamax_node(Some(SearchTree::ROOT), depth, 0, terminal)
    }

    /// Fail-hard alpha-beta value of the root inside `(alpha, beta)`.
    pub fn alphabeta(&mut self, alpha: i32, beta: i32, depth: u8) -> i32 {
        self.begin_pass();
        let terminal = self.root_is_terminal();
        self.alphabeta_node(Some(SearchTree::ROOT), alpha, beta, depth, 0, terminal)
    }

    /// Pick the best root move with a full-window alpha-beta search.
    ///
    /// The chosen move is the first root child, in visit order, whose negated
    /// score equals the root score. Depth 0 searches one ply.
    pub fn find_move(&mut self, depth: u8) -> OnitamaResult<SearchResult> {
        let depth = depth.max(1);
        if self.root_is_terminal() {
            return Err(OnitamaError::NoLegalMove);
        }

        let score = self.alphabeta(-SEARCH_INFINITY, SEARCH_INFINITY, depth);
        let root = SearchTree::ROOT;
        let best = self
            .tree
            .children(root)
            .iter()
            .map(|&child| self.tree.node(child))
            .find(|node| node.score.map(|s| -s) == Some(score))
            .and_then(|node| node.last_move)
            .ok_or(OnitamaError::NoLegalMove)?;

        debug!(
            "find_move depth={} score={} nodes={} cutoffs={} best={}",
            depth,
            score,
            self.stats.nodes,
            self.stats.cutoffs,
            best.to_game_move(&self.table)
        );

        Ok(SearchResult {
            best_move: best,
            score,
            depth,
            stats: self.stats,
        })
    }

    fn negamax_node(&mut self, node: Option<NodeId>, depth: u8, ply: usize, terminal: bool) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 || terminal {
            return self.score_leaf(node);
        }

        let moves = self.take_moves(ply);
        if moves.is_empty() {
            self.return_moves(ply, moves);
            return self.score_leaf(node);
        }
        self.mark_expanded(node);

        let mut best = -SEARCH_INFINITY;
        for mv in &moves {
            let child_terminal = apply_move(&mut self.position, mv);
            let child = self.record_child(node, mv, child_terminal);
            let value = -self.negamax_node(child, depth - 1, ply + 1, child_terminal);
            undo_move(&mut self.position, mv);
            best = best.max(value);
        }

        self.return_moves(ply, moves);
        self.mark_scored(node, best);
        best
    }

    fn alphabeta_node(
        &mut self,
        node: Option<NodeId>,
        mut alpha: i32,
        beta: i32,
        depth: u8,
        ply: usize,
        terminal: bool,
    ) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 || terminal {
            return self.score_leaf(node);
        }

        let mut moves = self.take_moves(ply);
        if moves.is_empty() {
            self.return_moves(ply, moves);
            return self.score_leaf(node);
        }
        let board = self.position.board;
        order_moves(&mut moves, |mv| board[mv.origin as usize].is_king());
        self.mark_expanded(node);

        let mut failed_high = false;
        for mv in &moves {
            let child_terminal = apply_move(&mut self.position, mv);
            let child = self.record_child(node, mv, child_terminal);
            let value =
                -self.alphabeta_node(child, -beta, -alpha, depth - 1, ply + 1, child_terminal);
            undo_move(&mut self.position, mv);

            if value >= beta {
                failed_high = true;
                break;
            }
            if value > alpha {
                alpha = value;
            }
        }
        self.return_moves(ply, moves);

        let score = if failed_high {
            self.stats.cutoffs += 1;
            beta
        } else {
            alpha
        };
        self.mark_scored(node, score);
        score
    }

    fn score_leaf(&mut self, node: Option<NodeId>) -> i32 {
        let score = self.evaluate_current();
        self.mark_scored(node, score);
        score
    }

    fn record_child(
        &mut self,
        parent: Option<NodeId>,
        mv: &Move,
        terminal: bool,
    ) -> Option<NodeId> {
        // Grandchildren of the root are never needed for move selection.
        let parent = parent.filter(|&id| id == SearchTree::ROOT)?;
        Some(self.tree.add_child(parent, *mv, terminal))
    }

    fn mark_expanded(&mut self, node: Option<NodeId>) {
        if let Some(id) = node {
            self.tree.node_mut(id).state = NodeState::Expanded;
        }
    }

    fn mark_scored(&mut self, node: Option<NodeId>, score: i32) {
        if let Some(id) = node {
            let node = self.tree.node_mut(id);
            node.score = Some(score);
            node.state = NodeState::Scored;
        }
    }
}
