//! Board representation and blank-tile moves

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::error::{Error, Result};

/// Width and height of the grid.
pub const SIZE: usize = 3;

/// Number of cells on the grid, blank included.
pub const CELLS: usize = SIZE * SIZE;

/// Tile value used for the blank.
pub const BLANK: u8 = 0;

const GOAL_TILES: [u8; CELLS] = [BLANK, 1, 2, 3, 4, 5, 6, 7, 8];

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Every direction, in the order searches expand them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            other => Err(Error::UnknownDirection(other.to_string())),
        }
    }
}

/// One arrangement of the eight numbered tiles and the blank.
///
/// Tiles are stored row-major; index `i` sits at row `i / 3`, column `i % 3`.
/// The blank index is always kept in sync with the tile array, so a `Puzzle`
/// can only be built through the goal constructor, a validated tile array, or
/// a legal move from another `Puzzle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    tiles: [u8; CELLS],
    blank: usize,
}

impl Puzzle {
    /// The goal configuration `b12345678`.
    pub const fn new() -> Self {
        Self {
            tiles: GOAL_TILES,
            blank: 0,
        }
    }

    /// Builds a configuration from raw tiles, checking that they form a
    /// permutation of the blank and 1 through 8.
    pub fn from_tiles(tiles: [u8; CELLS]) -> Result<Self> {
        let mut seen = [false; CELLS];
        for &tile in &tiles {
            let slot = seen.get_mut(tile as usize).ok_or_else(|| Error::InvalidConfiguration {
                input: notation_of(&tiles),
                reason: format!("tile {tile} is out of range"),
            })?;
            if *slot {
                return Err(Error::InvalidConfiguration {
                    input: notation_of(&tiles),
                    reason: format!("tile {} appears more than once", tile_char(tile)),
                });
            }
            *slot = true;
        }

        let blank = tiles
            .iter()
            .position(|&tile| tile == BLANK)
            .ok_or_else(|| Error::InvalidConfiguration {
                input: notation_of(&tiles),
                reason: "missing blank".to_string(),
            })?;

        Ok(Self { tiles, blank })
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Linear index of the blank.
    pub fn blank(&self) -> usize {
        self.blank
    }

    pub fn is_solved(&self) -> bool {
        self.tiles == GOAL_TILES
    }

    /// Returns the configuration reached by sliding the blank one step.
    ///
    /// Fails with [`Error::InvalidMove`] when the blank would leave the grid.
    pub fn apply_move(&self, movement: Move) -> Result<Self> {
        let (dr, dc) = movement.as_offset();

        let new_row = (self.blank / SIZE) as isize + dr;
        let new_col = (self.blank % SIZE) as isize + dc;

        if new_row >= 0 && new_row < SIZE as isize && new_col >= 0 && new_col < SIZE as isize {
            let target = new_row as usize * SIZE + new_col as usize;

            let mut tiles = self.tiles;
            tiles.swap(self.blank, target);

            Ok(Self {
                tiles,
                blank: target,
            })
        } else {
            Err(Error::InvalidMove {
                direction: movement,
                blank: self.blank,
            })
        }
    }

    /// Legal successors in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Puzzle)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |dir| self.apply_move(dir).ok().map(|next| (dir, next)))
    }

    /// Plays `moves` random legal slides starting from the goal.
    ///
    /// Each step draws a direction uniformly from those not yet tried at that
    /// step; a blocked draw is discarded and the draw repeated.
    pub fn scramble<R: Rng + ?Sized>(moves: usize, rng: &mut R) -> Self {
        let mut puzzle = Self::new();

        for _ in 0..moves {
            let mut candidates = Move::ALL.to_vec();
            while !candidates.is_empty() {
                let idx = rng.gen_range(0..candidates.len());
                match puzzle.apply_move(candidates[idx]) {
                    Ok(next) => {
                        puzzle = next;
                        break;
                    }
                    Err(_) => {
                        candidates.remove(idx);
                    }
                }
            }
        }

        puzzle
    }

    /// Whether the goal can be reached by legal slides.
    ///
    /// On an odd-width grid a slide never changes the parity of inversions
    /// among the numbered tiles, and the goal has none.
    pub fn is_solvable(&self) -> bool {
        Self::count_inversions(&self.tiles) % 2 == 0
    }

    fn count_inversions(tiles: &[u8]) -> usize {
        tiles
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// Compact single-line form, e.g. `b12345678`.
    pub fn notation(&self) -> String {
        notation_of(&self.tiles)
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Puzzle {
    type Err = Error;

    /// Parses `b12345678`, or the same with a separator after each of the
    /// first two rows (`b12 345 678`).
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        let cells: Vec<char> = match chars.len() {
            CELLS => chars,
            11 => chars
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != 3 && i != 7)
                .map(|(_, &c)| c)
                .collect(),
            len => {
                return Err(Error::InvalidConfiguration {
                    input: s.to_string(),
                    reason: format!("expected 9 cells (or 11 with row separators), got {len}"),
                })
            }
        };

        let mut tiles = [BLANK; CELLS];
        for (slot, &c) in tiles.iter_mut().zip(&cells) {
            *slot = match c {
                'b' => BLANK,
                '1'..='8' => c as u8 - b'0',
                other => {
                    return Err(Error::InvalidConfiguration {
                        input: s.to_string(),
                        reason: format!("unexpected symbol '{other}'"),
                    })
                }
            };
        }

        Self::from_tiles(tiles).map_err(|err| match err {
            Error::InvalidConfiguration { reason, .. } => Error::InvalidConfiguration {
                input: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(SIZE) {
            for &val in row {
                write!(f, "{}", tile_char(val))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn tile_char(tile: u8) -> char {
    match tile {
        BLANK => 'b',
        n => char::from_digit(u32::from(n), 10).unwrap_or('?'),
    }
}

fn notation_of(tiles: &[u8]) -> String {
    tiles.iter().map(|&t| tile_char(t)).collect()
}
