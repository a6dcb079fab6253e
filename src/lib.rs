//! 8-puzzle solver: A* with misplaced-tile or Manhattan heuristics, and a
//! greedy local beam search, plus the script interpreter that drives them.

pub mod command;
pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod search;
pub mod session;

pub use command::{Command, Interpreter, ScriptReport};
pub use error::{Error, Result};
pub use heuristic::Heuristic;
pub use puzzle::{Move, Puzzle};
pub use search::{AStar, LocalBeam, Solution, Solver};
pub use session::{EightPuzzle, SessionConfig};
