//! Dynamic-programming variant of the descent search.
//!
//! The best descent from a cell depends only on that cell, so bands are
//! resolved lowest-first: by the time a cell is reached every strictly lower
//! neighbour already knows its longest descent and the lowest elevation that
//! descent can end on. `iterations` counts resolved cells.
use super::SearchOutcome;
use crate::coords::{Coord, Direction};
use crate::height_index::HeightIndex;
use crate::heightfield::HeightField;

/// Cached best descent starting at one cell.
#[derive(Debug, Clone, Copy)]
struct Descent {
    length: usize,
    /// Lowest elevation reachable at the end of a longest descent.
    floor: i32,
    next: Option<Coord>,
}

pub fn search(hf: &HeightField, index: &HeightIndex) -> SearchOutcome {
    let mut memo: Vec<Option<Descent>> = vec![None; hf.cell_count()];
    let mut outcome = SearchOutcome::default();
    let mut winner: Option<Coord> = None;
    let slot = |c: Coord| c.row * hf.width + c.col;

    for (elevation, cells) in index.iter_ascending() {
        for &cell in cells {
            outcome.iterations += 1;

            let mut best = Descent {
                length: 1,
                floor: elevation,
                next: None,
            };
            for dir in Direction::ALL {
                let Some(n) = cell.step(dir, hf.height, hf.width) else {
                    continue;
                };
                if hf.at(n) >= elevation {
                    continue;
                }
                // Strictly lower cells live in earlier bands.
                let Some(below) = memo[slot(n)] else {
                    continue;
                };
                let length = below.length + 1;
                if length > best.length || (length == best.length && below.floor < best.floor) {
                    best = Descent {
                        length,
                        floor: below.floor,
                        next: Some(n),
                    };
                }
            }
            memo[slot(cell)] = Some(best);

            let drop = i64::from(elevation) - i64::from(best.floor);
            if outcome.best.beaten_by(best.length, drop) {
                outcome.best.length = best.length;
                outcome.best.drop = drop;
                winner = Some(cell);
            }
        }
    }

    let mut cursor = winner;
    while let Some(c) = cursor {
        outcome.best.route.push(c);
        cursor = memo[slot(c)].and_then(|d| d.next);
    }
    outcome
}
