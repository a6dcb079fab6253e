use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tracing::{debug, trace};

use super::{NodeArena, NodeBudget, NodeId, Solution, Solver};
use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::Puzzle;

/// Best-first search on `f = g + h`.
///
/// Nodes only carry `f`; a child's depth is recovered from its parent as
/// `f(parent) - h(parent)`, so `f(child) = f(parent) - h(parent) + 1 + h(child)`.
/// A configuration may sit in the frontier several times; only the cheapest
/// copy is expanded and later copies are dropped when popped. Among equal `f`
/// the most recently generated node is popped first, which favours deeper
/// nodes and keeps the generated count down.
#[derive(Debug, Clone, Copy)]
pub struct AStar {
    heuristic: Heuristic,
    max_nodes: usize,
}

impl AStar {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            max_nodes: usize::MAX,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Solver for AStar {
    fn solve(&self, root: &Puzzle) -> Result<Solution> {
        debug!(start = %root.notation(), heuristic = %self.heuristic, max_nodes = self.max_nodes, "starting A* search");

        let mut budget = NodeBudget::new(self.max_nodes);
        let mut nodes = NodeArena::new();
        let mut frontier: BinaryHeap<Reverse<(u32, Reverse<NodeId>)>> = BinaryHeap::new();
        let mut explored: HashSet<Puzzle> = HashSet::new();

        budget.charge()?;
        let root_id = nodes.insert_root(*root, self.heuristic.evaluate(root));
        frontier.push(Reverse((nodes[root_id].cost, Reverse(root_id))));

        while let Some(Reverse((cost, Reverse(id)))) = frontier.pop() {
            let puzzle = nodes[id].puzzle;
            if !explored.insert(puzzle) {
                continue;
            }
            if puzzle.is_solved() {
                debug!(
                    cost,
                    generated = budget.generated(),
                    explored = explored.len(),
                    stored = nodes.len(),
                    "A* reached goal"
                );
                return Ok(Solution::new(nodes, id, budget.generated()));
            }

            trace!(state = %puzzle.notation(), cost, "expanding");
            let depth = cost - self.heuristic.evaluate(&puzzle);
            for (dir, next) in puzzle.successors() {
                budget.charge()?;
                if explored.contains(&next) {
                    continue;
                }
                let child_cost = depth + 1 + self.heuristic.evaluate(&next);
                let child = nodes.insert_child(id, dir, next, child_cost);
                frontier.push(Reverse((child_cost, Reverse(child))));
            }
        }

        debug!(generated = budget.generated(), "A* frontier exhausted");
        Err(Error::Unreachable {
            generated: budget.generated(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    fn solve(start: &str, heuristic: Heuristic) -> Result<Solution> {
        AStar::new(heuristic).solve(&start.parse().unwrap())
    }

    #[test]
    fn test_goal_is_its_own_solution() {
        let solution = solve("b12345678", Heuristic::Manhattan).unwrap();
        assert!(solution.moves().is_empty());
        assert_eq!(solution.nodes_generated(), 1);
        assert_eq!(solution.goal().cost, 0);
    }

    #[test]
    fn test_one_move() {
        for heuristic in [Heuristic::MisplacedTiles, Heuristic::Manhattan] {
            let solution = solve("1b2345678", heuristic).unwrap();
            assert_eq!(solution.moves(), vec![Move::Left]);
            assert!(solution.puzzle().is_solved());
        }
    }

    #[test]
    fn test_goal_cost_equals_path_length() {
        let solution = solve("3124b5678", Heuristic::Manhattan).unwrap();
        assert_eq!(solution.moves().len(), 2);
        assert_eq!(solution.goal().cost, 2);
    }

    #[test]
    fn test_heuristics_agree_on_optimal_length() {
        let start: Puzzle = "76243518b".parse().unwrap();
        assert!(start.is_solvable());

        let h1 = AStar::new(Heuristic::MisplacedTiles).solve(&start).unwrap();
        let h2 = AStar::new(Heuristic::Manhattan).solve(&start).unwrap();
        assert_eq!(h1.moves().len(), 16);
        assert_eq!(h2.moves().len(), 16);
    }

    #[test]
    fn test_deep_puzzle() {
        let solution = solve("8b6543721", Heuristic::Manhattan).unwrap();
        assert_eq!(solution.moves().len(), 27);
    }

    #[test]
    fn test_equal_cost_prefers_newest_node() {
        // popping the oldest of equal-f nodes first generates 8773 here
        let start: Puzzle = "8b6543721".parse().unwrap();
        let solution = AStar::new(Heuristic::Manhattan)
            .with_max_nodes(3547)
            .solve(&start)
            .unwrap();
        assert_eq!(solution.nodes_generated(), 3547);

        let err = AStar::new(Heuristic::Manhattan)
            .with_max_nodes(3546)
            .solve(&start)
            .unwrap_err();
        assert!(matches!(err, Error::ResourceExceeded { limit: 3546 }));
    }

    #[test]
    fn test_moves_replay_to_goal() {
        let start: Puzzle = "7245b6831".parse().unwrap();
        let solution = AStar::new(Heuristic::Manhattan).solve(&start).unwrap();
        assert_eq!(solution.moves().len(), 26);

        let mut puzzle = start;
        for dir in solution.moves() {
            puzzle = puzzle.apply_move(dir).unwrap();
        }
        assert!(puzzle.is_solved());
    }

    #[test]
    fn test_budget_exceeded() {
        let start: Puzzle = "1b2345678".parse().unwrap();
        let err = AStar::new(Heuristic::Manhattan)
            .with_max_nodes(1)
            .solve(&start)
            .unwrap_err();
        assert!(matches!(err, Error::ResourceExceeded { limit: 1 }));

        // root alone already passes a zero budget, even at the goal
        let err = AStar::new(Heuristic::Manhattan)
            .with_max_nodes(0)
            .solve(&Puzzle::new())
            .unwrap_err();
        assert!(matches!(err, Error::ResourceExceeded { limit: 0 }));
    }

    #[test]
    fn test_budget_large_enough() {
        let start: Puzzle = "1b2345678".parse().unwrap();
        // root plus the three legal successors of the blank at index 1
        let solution = AStar::new(Heuristic::Manhattan)
            .with_max_nodes(4)
            .solve(&start)
            .unwrap();
        assert_eq!(solution.nodes_generated(), 4);
    }

    #[test]
    fn test_unsolvable_exhausts_frontier() {
        let start: Puzzle = "b21345678".parse().unwrap();
        let err = AStar::new(Heuristic::Manhattan).solve(&start).unwrap_err();
        assert!(matches!(err, Error::Unreachable { generated } if generated > 181_440));
    }
}
