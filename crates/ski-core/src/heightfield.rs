use serde::{Deserialize, Serialize};

use crate::coords::Coord;

/// A 2D heightfield of integer elevations, row-major.
/// Immutable once loaded; the search only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightField {
    /// Row-major elevation values.
    pub data: Vec<i32>,
    pub width: usize,
    pub height: usize,
}

impl HeightField {
    /// Wrap row-major `data` of a `height` × `width` grid.
    ///
    /// Panics if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<i32>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "heightfield data length must equal width * height"
        );
        Self { data, width, height }
    }

    /// Build from a slice of equal-length rows. Panics on ragged input.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.len(), width, "row {i} has {} values, expected {width}", row.len());
            data.extend_from_slice(row);
        }
        Self { data, width, height }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn at(&self, c: Coord) -> i32 {
        self.get(c.row, c.col)
    }

    /// Every coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Coord::new(row, col)))
    }

    /// Elevation difference `from - to`, widened so extreme inputs cannot overflow.
    #[inline]
    pub fn drop_between(&self, from: Coord, to: Coord) -> i64 {
        i64::from(self.at(from)) - i64::from(self.at(to))
    }

    pub fn min_elevation(&self) -> i32 {
        self.data.iter().copied().fold(i32::MAX, i32::min)
    }

    pub fn max_elevation(&self) -> i32 {
        self.data.iter().copied().fold(i32::MIN, i32::max)
    }

    pub fn cell_count(&self) -> usize {
        self.data.len()
    }
}
