//! Perft: leaf counting over the make/unmake machinery.
//!
//! Counts positions exactly `depth` plies below the start without building
//! search-tree nodes. Terminal positions (a king captured or a king on its
//! goal) are leaves and are not expanded further, matching the full-tree
//! generation mode of the search engine.

use crate::game_state::onitama_types::Position;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::move_generator::generate_moves;
use crate::moves::card_table::CardTable;
use crate::moves::onitama_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub king_captures: usize,
    pub goal_reaches: usize,
    pub terminals: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.king_captures += rhs.king_captures;
        self.goal_reaches += rhs.goal_reaches;
        self.terminals += rhs.terminals;
    }

    fn record_leaf(&mut self, mv: &Move, terminal: bool) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.captures_king() {
            self.king_captures += 1;
        }
        if terminal {
            self.terminals += 1;
            if !mv.captures_king() {
                self.goal_reaches += 1;
            }
        }
    }
}

pub fn perft(position: &mut Position, table: &CardTable, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    let mut total = PerftCounts::default();
    let mut buffers = vec![Vec::with_capacity(40); depth as usize];
    perft_recurse(position, table, depth, &mut buffers, &mut total);
    total
}

/// Per-root-move breakdown, useful when two generators disagree.
pub fn perft_divide(position: &mut Position, table: &CardTable, depth: u8) -> Vec<(Move, PerftCounts)> {
    let mut root = Vec::new();
    generate_moves(position, table, &mut root);
    let mut out = Vec::with_capacity(root.len());
    for mv in root {
        let mut counts = PerftCounts::default();
        let terminal = apply_move(position, &mv);
        if depth <= 1 || terminal {
            if depth == 1 {
                counts.record_leaf(&mv, terminal);
            }
        } else {
            let mut buffers = vec![Vec::with_capacity(40); (depth - 1) as usize];
            perft_recurse(position, table, depth - 1, &mut buffers, &mut counts);
        }
        undo_move(position, &mv);
        out.push((mv, counts));
    }
    out
}

fn perft_recurse(
    position: &mut Position,
    table: &CardTable,
    depth: u8,
    buffers: &mut [Vec<Move>],
    counts: &mut PerftCounts,
) {
    let Some((moves, deeper)) = buffers.split_first_mut() else {
        return;
    };
    moves.clear();
    generate_moves(position, table, moves);

    let mut local = PerftCounts::default();
    for mv in moves.iter() {
        let terminal = apply_move(position, mv);
        if depth == 1 {
            local.record_leaf(mv, terminal);
        } else if !terminal {
            perft_recurse(position, table, depth - 1, deeper, &mut local);
        }
        undo_move(position, mv);
    }
    counts.merge(local);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::cards::CardKind;
    use crate::game_state::onitama_types::Player;

    fn tiger_opening() -> (Position, CardTable) {
        (
            Position::starting(Player::Blue),
            CardTable::new([CardKind::Tiger; 5]),
        )
    }

    #[test]
    fn depth_zero_counts_single_node() {
        let (mut position, table) = tiger_opening();
        assert_eq!(
            perft(&mut position, &table, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn five_tigers_regression_counts() {
        let (mut position, table) = tiger_opening();
        let start = position.clone();

        assert_eq!(perft(&mut position, &table, 1).nodes, 10);

        let two = perft(&mut position, &table, 2);
        assert_eq!(two.nodes, 100);
        assert_eq!(two.terminals, 4);
        assert_eq!(two.king_captures, 4);
        // Red retakes on the file Blue advanced on: 2 cards x 2 cards x 5 files.
        assert_eq!(two.captures, 20);

        assert_eq!(perft(&mut position, &table, 3).nodes, 80 * 12 + 16 * 8);
        assert_eq!(position, start);
    }

    #[test]
    fn divide_sums_to_perft() {
        let (mut position, table) = tiger_opening();
        let total = perft(&mut position, &table, 3).nodes;
        let divided: usize = perft_divide(&mut position, &table, 3)
            .iter()
            .map(|(_, counts)| counts.nodes)
            .sum();
        assert_eq!(divided, total);
    }
}
