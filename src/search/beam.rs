use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tracing::{debug, trace};

use super::{NodeArena, NodeBudget, NodeId, Solution, Solver};
use crate::error::{Error, Result};
use crate::heuristic::manhattan_distance;
use crate::puzzle::Puzzle;

/// Local beam search scored by Manhattan distance alone.
///
/// Each round expands every node in the beam and keeps the `width` best
/// successors. A successor is only a candidate if its distance is no worse
/// than the node it came from, so the search gives up at any configuration
/// whose neighbours all score higher, solvable or not. Candidates with equal
/// distance are taken newest first, matching the A* frontier.
#[derive(Debug, Clone, Copy)]
pub struct LocalBeam {
    width: usize,
    max_nodes: usize,
}

impl LocalBeam {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            max_nodes: usize::MAX,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Solver for LocalBeam {
    fn solve(&self, root: &Puzzle) -> Result<Solution> {
        debug!(start = %root.notation(), width = self.width, max_nodes = self.max_nodes, "starting local beam search");

        let mut budget = NodeBudget::new(self.max_nodes);
        let mut nodes = NodeArena::new();
        let mut explored: HashSet<Puzzle> = HashSet::new();

        budget.charge()?;
        let mut beam = vec![nodes.insert_root(*root, manhattan_distance(root))];
        let mut round = 0usize;

        while !beam.is_empty() {
            let mut candidates: BinaryHeap<Reverse<(u32, Reverse<NodeId>)>> = BinaryHeap::new();

            for &id in &beam {
                let (puzzle, cost) = (nodes[id].puzzle, nodes[id].cost);
                explored.insert(puzzle);
                if puzzle.is_solved() {
                    debug!(
                        round,
                        generated = budget.generated(),
                        stored = nodes.len(),
                        "local beam reached goal"
                    );
                    return Ok(Solution::new(nodes, id, budget.generated()));
                }

                for (dir, next) in puzzle.successors() {
                    budget.charge()?;
                    let distance = manhattan_distance(&next);
                    if !explored.contains(&next) && distance <= cost {
                        let child = nodes.insert_child(id, dir, next, distance);
                        candidates.push(Reverse((distance, Reverse(child))));
                    }
                }
            }

            trace!(round, candidates = candidates.len(), "beam round complete");
            beam = std::iter::from_fn(|| candidates.pop())
                .take(self.width)
                .map(|Reverse((_, Reverse(id)))| id)
                .collect();
            round += 1;
        }

        debug!(round, generated = budget.generated(), "local beam ran out of candidates");
        Err(Error::Unreachable {
            generated: budget.generated(),
        })
    }
}
