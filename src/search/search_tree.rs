//! Index-addressed arena of search nodes.
//!
//! Nodes refer to each other through `NodeId`s. Parent links are only used to
//! replay the move path from the root; the arena owns every node.

use std::collections::VecDeque;

use crate::moves::onitama_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    Unvisited,
    /// Children generated.
    Expanded,
    /// Score backed up.
    Scored,
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Move that led here; `None` only for the root.
    pub last_move: Option<Move>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// The move into this node ended the game.
    pub terminal: bool,
    /// Score from the point of view of the player to move at this node.
    pub score: Option<i32>,
    pub ply: u8,
    pub state: NodeState,
}

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(root_terminal: bool) -> Self {
        Self {
            nodes: vec![Node {
                terminal: root_terminal,
                ..Node::default()
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root always exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_child(&mut self, parent: NodeId, mv: Move, terminal: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        let ply = self.nodes[parent.0].ply + 1;
        self.nodes.push(Node {
            last_move: Some(mv),
            parent: Some(parent),
            terminal,
            ply,
            ..Node::default()
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Drop every node except the root and return the root to `Unvisited`.
    pub fn reset(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[0];
        root.children.clear();
        root.score = None;
        root.state = NodeState::Unvisited;
    }

    /// Start over with a fresh root.
    pub fn reset_root(&mut self, root_terminal: bool) {
        self.reset();
        self.nodes[0].terminal = root_terminal;
    }

    /// Moves from the root down to `id`, root side first.
    pub fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut path = Vec::with_capacity(self.nodes[id.0].ply as usize);
        let mut cursor = id;
        while let Some(parent) = self.nodes[cursor.0].parent {
            if let Some(mv) = self.nodes[cursor.0].last_move {
                path.push(mv);
            }
            cursor = parent;
        }
        path.reverse();
        path
    }

    /// Nodes exactly `depth` plies below the root, in child-list order.
    pub fn nodes_at_depth(&self, depth: u8) -> Vec<NodeId> {
        let mut level = vec![Self::ROOT];
        for _ in 0..depth {
            level = level
                .iter()
                .flat_map(|id| self.nodes[id.0].children.iter().copied())
                .collect();
            if level.is_empty() {
                break;
            }
        }
        level
    }

    /// Breadth-first walk over every node reachable from the root.
    pub fn iter_breadth_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut queue = VecDeque::from([Self::ROOT]);
        std::iter::from_fn(move || {
            let id = queue.pop_front()?;
            queue.extend(self.nodes[id.0].children.iter().copied());
            Some(id)
        })
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new(false)
    }
}
