//! Solvers that drive a configuration to the goal.
//!
//! Both strategies grow a [`NodeArena`] forward from the root and stop at the
//! first goal node they reach, when the search space is exhausted, or as soon
//! as the node budget is overrun. Only the cost of an A* solution is fixed;
//! which of several equally short paths comes back depends on frontier tie
//! order.

pub mod astar;
pub mod beam;
pub mod node;

pub use astar::AStar;
pub use beam::LocalBeam;
pub use node::{NodeArena, NodeId, SearchNode};

use crate::error::{Error, Result};
use crate::puzzle::{Move, Puzzle};

/// A search strategy.
pub trait Solver {
    /// Searches from `root` for the goal configuration.
    fn solve(&self, root: &Puzzle) -> Result<Solution>;
}

/// Cap on the number of nodes a search may generate, root included.
#[derive(Debug, Clone, Copy)]
pub struct NodeBudget {
    limit: usize,
    generated: usize,
}

impl NodeBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, generated: 0 }
    }

    /// Records one generated node, failing once the total passes the limit.
    pub fn charge(&mut self) -> Result<()> {
        self.generated += 1;
        if self.generated > self.limit {
            return Err(Error::ResourceExceeded { limit: self.limit });
        }
        Ok(())
    }

    pub fn generated(&self) -> usize {
        self.generated
    }
}

/// Goal node found by a search, together with the tree that leads to it.
#[derive(Debug)]
pub struct Solution {
    nodes: NodeArena,
    goal: NodeId,
    generated: usize,
}

impl Solution {
    pub(crate) fn new(nodes: NodeArena, goal: NodeId, generated: usize) -> Self {
        Self {
            nodes,
            goal,
            generated,
        }
    }

    pub fn goal(&self) -> &SearchNode {
        &self.nodes[self.goal]
    }

    pub fn puzzle(&self) -> Puzzle {
        self.goal().puzzle
    }

    /// Moves from the starting configuration to the goal.
    pub fn moves(&self) -> Vec<Move> {
        self.nodes.reconstruct(self.goal)
    }

    /// Nodes generated during the search, root included.
    pub fn nodes_generated(&self) -> usize {
        self.generated
    }
}
