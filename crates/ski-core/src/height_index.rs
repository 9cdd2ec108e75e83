//! Cells grouped by elevation.
//!
//! Each coordinate lands in exactly one band, keyed by its elevation. Bands
//! iterate highest-first for the search and lowest-first for the memoized
//! strategy; cells within a band are in ascending (row, col) order so results
//! are reproducible when ties occur.
use std::collections::{BTreeMap, BTreeSet};

use crate::coords::Coord;
use crate::heightfield::HeightField;

#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    bands: BTreeMap<i32, BTreeSet<Coord>>,
}

impl HeightIndex {
    /// Visit every cell once and file it under its elevation.
    pub fn build(hf: &HeightField) -> Self {
        let mut bands: BTreeMap<i32, BTreeSet<Coord>> = BTreeMap::new();
        for c in hf.cells() {
            bands.entry(hf.at(c)).or_default().insert(c);
        }
        Self { bands }
    }

    /// `(elevation, cells)` from the highest elevation to the lowest.
    pub fn iter_descending(&self) -> impl Iterator<Item = (i32, &BTreeSet<Coord>)> + '_ {
        self.bands.iter().rev().map(|(&e, cells)| (e, cells))
    }

    /// `(elevation, cells)` from the lowest elevation to the highest.
    pub fn iter_ascending(&self) -> impl Iterator<Item = (i32, &BTreeSet<Coord>)> + '_ {
        self.bands.iter().map(|(&e, cells)| (e, cells))
    }

    pub fn band(&self, elevation: i32) -> Option<&BTreeSet<Coord>> {
        self.bands.get(&elevation)
    }

    pub fn min_elevation(&self) -> Option<i32> {
        self.bands.keys().next().copied()
    }

    pub fn max_elevation(&self) -> Option<i32> {
        self.bands.keys().next_back().copied()
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn cell_count(&self) -> usize {
        self.bands.values().map(BTreeSet::len).sum()
    }
}
