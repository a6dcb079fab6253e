//! Distance-to-goal estimates

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};
use crate::puzzle::{Puzzle, BLANK, SIZE};

/// Heuristic selectable for A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// `h1`: number of misplaced numbered tiles.
    MisplacedTiles,
    /// `h2`: summed Manhattan distance of the numbered tiles.
    Manhattan,
}

impl Heuristic {
    pub fn evaluate(&self, puzzle: &Puzzle) -> u32 {
        match self {
            Heuristic::MisplacedTiles => misplaced_tiles(puzzle),
            Heuristic::Manhattan => manhattan_distance(puzzle),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::MisplacedTiles => write!(f, "h1"),
            Heuristic::Manhattan => write!(f, "h2"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "h1" => Ok(Heuristic::MisplacedTiles),
            "h2" => Ok(Heuristic::Manhattan),
            other => Err(Error::UnknownHeuristic(other.to_string())),
        }
    }
}

/// Counts positions 1..8 whose tile differs from the goal. The blank's
/// own goal cell is not counted.
pub fn misplaced_tiles(puzzle: &Puzzle) -> u32 {
    puzzle
        .tiles()
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(i, &tile)| tile as usize != i)
        .count() as u32
}

/// Sums, over every numbered tile, the row and column distance to the cell
/// whose index equals the tile's value.
pub fn manhattan_distance(puzzle: &Puzzle) -> u32 {
    let mut distance = 0;
    for (i, &value) in puzzle.tiles().iter().enumerate() {
        if value != BLANK {
            let (row, col) = (i / SIZE, i % SIZE);
            let target_row = value as usize / SIZE;
            let target_col = value as usize % SIZE;
            distance += row.abs_diff(target_row) + col.abs_diff(target_col);
        }
    }
    distance as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    #[test]
    fn test_goal_scores_zero() {
        let goal = Puzzle::new();
        assert_eq!(misplaced_tiles(&goal), 0);
        assert_eq!(manhattan_distance(&goal), 0);
    }

    #[test]
    fn test_single_slide() {
        let puzzle = Puzzle::new().apply_move(Move::Right).unwrap();
        assert_eq!(misplaced_tiles(&puzzle), 1);
        assert_eq!(manhattan_distance(&puzzle), 1);
    }

    #[test]
    fn test_known_scores() {
        let puzzle: Puzzle = "12345678b".parse().unwrap();
        assert_eq!(misplaced_tiles(&puzzle), 8);
        assert_eq!(manhattan_distance(&puzzle), 12);

        let puzzle: Puzzle = "2143b5678".parse().unwrap();
        assert_eq!(misplaced_tiles(&puzzle), 2);
        assert_eq!(manhattan_distance(&puzzle), 4);
    }

    #[test]
    fn test_misplaced_never_exceeds_manhattan() {
        let mut puzzle = Puzzle::new();
        for dir in [Move::Down, Move::Right, Move::Right, Move::Down, Move::Left, Move::Up] {
            puzzle = puzzle.apply_move(dir).unwrap();
            assert!(misplaced_tiles(&puzzle) <= manhattan_distance(&puzzle));
        }
    }

    #[test]
    fn test_parse_heuristic() {
        assert_eq!("h1".parse::<Heuristic>().unwrap(), Heuristic::MisplacedTiles);
        assert_eq!("h2".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert!(matches!("h3".parse::<Heuristic>(), Err(Error::UnknownHeuristic(_))));
    }
}
