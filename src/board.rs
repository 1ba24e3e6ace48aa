use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default board dimensions
pub const STANDARD_ROWS: usize = 5;
pub const STANDARD_COLS: usize = 9;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("board dimensions must both be odd, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("destination {dest} is not adjacent to the piece at {from}")]
    NotAdjacent { from: Position, dest: Position },
}

/// A board intersection, addressed by 1-indexed row and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn chebyshev(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Compass direction of a single step along a board line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Row/column offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NE | Direction::SE | Direction::SW | Direction::NW
        )
    }

    /// Compass direction from one square towards another, or `None` when
    /// the squares coincide.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        use std::cmp::Ordering::*;
        match (to.row.cmp(&from.row), to.col.cmp(&from.col)) {
            (Equal, Equal) => None,
            (Less, Equal) => Some(Direction::N),
            (Less, Greater) => Some(Direction::NE),
            (Equal, Greater) => Some(Direction::E),
            (Greater, Greater) => Some(Direction::SE),
            (Greater, Equal) => Some(Direction::S),
            (Greater, Less) => Some(Direction::SW),
            (Equal, Less) => Some(Direction::W),
            (Less, Less) => Some(Direction::NW),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        write!(f, "{}", name)
    }
}

/// The intersection-line grid. Dimensions must both be odd; diagonals exist
/// only on squares whose row and column parity agree, which reproduces the
/// board's alternating strong/weak intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        Ok(Board { rows, cols })
    }

    /// The traditional 5x9 board.
    pub fn standard() -> Self {
        Board {
            rows: STANDARD_ROWS,
            cols: STANDARD_COLS,
        }
    }

    /// The degenerate 3x3 board, played under reduced rules.
    pub fn three_by_three() -> Self {
        Board { rows: 3, cols: 3 }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_three_by_three(&self) -> bool {
        self.rows == 3 && self.cols == 3
    }

    pub fn contains(&self, pos: Position) -> bool {
        (1..=self.rows).contains(&pos.row) && (1..=self.cols).contains(&pos.col)
    }

    /// One step from `pos` in `dir`, or `None` when it leaves the grid.
    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Whether diagonal lines pass through `pos`.
    pub fn has_diagonals(&self, pos: Position) -> bool {
        pos.row % 2 == pos.col % 2
    }

    /// Line-adjacent neighbours of `pos`: the orthogonal squares always,
    /// the diagonal squares only where the parity law grants them.
    pub fn neighbours(&self, pos: Position) -> Vec<Position> {
        let diagonals = self.has_diagonals(pos);
        Direction::ALL
            .iter()
            .filter(|dir| diagonals || !dir.is_diagonal())
            .filter_map(|&dir| self.step(pos, dir))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
