/// Grid cell addressing and 4-neighbour stepping.
/// All indices are zero-based; row 0 is the first row of the input.
use serde::{Deserialize, Serialize};

/// One cell of a heightfield, addressed by (row, column).
///
/// Ordering is lexicographic by row, then column, which is the order cells
/// are visited inside an elevation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbour one step in `dir`, or `None` if it falls outside a
    /// `height` × `width` grid.
    #[inline]
    pub fn step(self, dir: Direction, height: usize, width: usize) -> Option<Coord> {
        match dir {
            Direction::Up => self.row.checked_sub(1).map(|row| Coord::new(row, self.col)),
            Direction::Right => (self.col + 1 < width).then(|| Coord::new(self.row, self.col + 1)),
            Direction::Down => (self.row + 1 < height).then(|| Coord::new(self.row + 1, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Coord::new(self.row, col)),
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid adjacency. Diagonals are not neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Fixed exploration order used by every search strategy.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
}
