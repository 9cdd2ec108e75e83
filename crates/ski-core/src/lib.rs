//! Longest strictly-descending ski run over an integer elevation grid,
//! ties broken by the largest drop.
pub mod coords;
pub mod height_index;
pub mod heightfield;
pub mod loader;
pub mod report;
pub mod search;

pub use coords::{Coord, Direction};
pub use height_index::HeightIndex;
pub use heightfield::HeightField;
pub use loader::{load_grid, parse_grid, GridError, GridErrorKind};
pub use report::Report;
pub use search::{run_search, BestPath, SearchOptions, SearchOutcome, Strategy};

/// Index `hf` and run the configured search over it.
pub fn solve(hf: &HeightField, options: &SearchOptions) -> SearchOutcome {
    let index = HeightIndex::build(hf);
    tracing::debug!(
        bands = index.band_count(),
        cells = index.cell_count(),
        highest = index.max_elevation(),
        "height index built"
    );
    run_search(hf, &index, options)
}
