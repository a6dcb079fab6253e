//! Search nodes and the arena that owns them.

use std::ops::Index;

use crate::puzzle::{Move, Puzzle};

/// Position of a node inside its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A configuration plus the bookkeeping a search attaches to it.
///
/// `cost` is strategy specific: A* stores `f = g + h`, local beam stores the
/// Manhattan distance alone.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub puzzle: Puzzle,
    pub cost: u32,
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// Move that produced this node from its parent, `None` for the root.
    pub action: Option<Move>,
}

/// Append-only node storage for a single search.
///
/// A node can only name a parent that was inserted before it, so parent links
/// always point backwards and the nodes form a tree rooted at the first insert.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_root(&mut self, puzzle: Puzzle, cost: u32) -> NodeId {
        self.push(SearchNode {
            puzzle,
            cost,
            parent: None,
            action: None,
        })
    }

    pub fn insert_child(&mut self, parent: NodeId, action: Move, puzzle: Puzzle, cost: u32) -> NodeId {
        debug_assert!(parent.0 < self.nodes.len(), "parent must already exist");
        self.push(SearchNode {
            puzzle,
            cost,
            parent: Some(parent),
            action: Some(action),
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Nodes stored so far.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Moves leading from the root to `goal`, in the order they are played.
    /// The solution length is the length of the returned vector.
    pub fn reconstruct(&self, goal: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut pointer = &self[goal];
        while let (Some(parent), Some(action)) = (pointer.parent, pointer.action) {
            moves.push(action);
            pointer = &self[parent];
        }
        moves.reverse();
        moves
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}
