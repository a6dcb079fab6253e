//! Stateful front end over the solvers: holds the current configuration,
//! the node budget and the randomization seed counter.

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::{Move, Puzzle};
use crate::search::{AStar, LocalBeam, Solution, Solver};

/// Initial settings for an [`EightPuzzle`] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Node budget applied to every solve.
    pub max_nodes: usize,
    /// Seed used by the first randomization.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_nodes: usize::MAX,
            seed: 0,
        }
    }
}

/// Seed source for randomization. Hands out its current value and then
/// advances by one, so the n-th randomization of a session always replays the
/// same moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounter(u64);

impl SeedCounter {
    pub fn new(start: u64) -> Self {
        Self(start)
    }

    pub fn peek(&self) -> u64 {
        self.0
    }

    pub fn advance(&mut self) -> u64 {
        let seed = self.0;
        self.0 = self.0.wrapping_add(1);
        seed
    }
}

/// One puzzle being worked on.
///
/// Solvers never touch the current configuration themselves; the session
/// adopts the goal node of a successful solve and leaves the configuration
/// unchanged when a command fails.
#[derive(Debug, Clone)]
pub struct EightPuzzle {
    current: Puzzle,
    max_nodes: usize,
    seed: SeedCounter,
}

impl EightPuzzle {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            current: Puzzle::new(),
            max_nodes: config.max_nodes,
            seed: SeedCounter::new(config.seed),
        }
    }

    pub fn current(&self) -> &Puzzle {
        &self.current
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn seed(&self) -> &SeedCounter {
        &self.seed
    }

    pub fn set_state(&mut self, puzzle: Puzzle) -> &Puzzle {
        self.current = puzzle;
        &self.current
    }

    pub fn apply_move(&mut self, direction: Move) -> Result<&Puzzle> {
        self.current = self.current.apply_move(direction)?;
        Ok(&self.current)
    }

    /// Replaces the current configuration with `n` random slides away from
    /// the goal. A negative count fails without consuming a seed.
    pub fn randomize(&mut self, n: i64) -> Result<&Puzzle> {
        let moves = usize::try_from(n).map_err(|_| Error::InvalidRandomizeCount { count: n })?;
        let seed = self.seed.advance();
        debug!(moves, seed, "randomizing state");

        let mut rng = StdRng::seed_from_u64(seed);
        self.current = Puzzle::scramble(moves, &mut rng);
        Ok(&self.current)
    }

    pub fn set_max_nodes(&mut self, max_nodes: usize) {
        self.max_nodes = max_nodes;
    }

    pub fn solve_a_star(&mut self, heuristic: Heuristic) -> Result<Solution> {
        let solver = AStar::new(heuristic).with_max_nodes(self.max_nodes);
        self.solve_with(&solver)
    }

    pub fn solve_beam(&mut self, width: usize) -> Result<Solution> {
        let solver = LocalBeam::new(width).with_max_nodes(self.max_nodes);
        self.solve_with(&solver)
    }

    fn solve_with(&mut self, solver: &dyn Solver) -> Result<Solution> {
        if !self.current.is_solvable() {
            warn!(
                state = %self.current.notation(),
                "configuration has odd inversion parity; the goal cannot be reached"
            );
        }
        let solution = solver.solve(&self.current)?;
        self.current = solution.puzzle();
        Ok(solution)
    }
}

impl Default for EightPuzzle {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
