//! Depth-first enumeration of every maximal descending walk.
//!
//! Bands are visited highest-first. Each start seeds a walk of one cell that
//! is extended through strictly lower neighbours (up, right, down, left) until
//! it dead-ends, at which point it is offered to the running best. The walk
//! lives on an explicit frame stack, so depth is bounded by the heap rather
//! than the thread stack.
use tracing::debug;

use super::{band_is_hopeless, SearchOutcome};
use crate::coords::{Coord, Direction};
use crate::height_index::HeightIndex;
use crate::heightfield::HeightField;

/// Per-cell state of the walk: which direction to try next and whether any
/// direction has already led somewhere.
#[derive(Debug, Default, Clone, Copy)]
struct Frame {
    next_dir: usize,
    extended: bool,
}

/// Run the exhaustive search over every band of `index`.
pub fn search(hf: &HeightField, index: &HeightIndex, pruning: bool) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let Some(floor) = index.min_elevation() else {
        return outcome;
    };

    for (elevation, starts) in index.iter_descending() {
        if pruning && band_is_hopeless(elevation, floor, outcome.best.length) {
            debug!(elevation, best_length = outcome.best.length, "remaining bands pruned");
            break;
        }
        for &start in starts {
            descend_from(hf, start, &mut outcome);
        }
    }
    outcome
}

/// Enumerate every maximal walk beginning at `start`, recording improvements
/// and node visits in `outcome`.
pub fn descend_from(hf: &HeightField, start: Coord, outcome: &mut SearchOutcome) {
    let mut path = vec![start];
    let mut frames = vec![Frame::default()];
    outcome.iterations += 1;

    while let Some(frame) = frames.last_mut() {
        let tail = path[path.len() - 1];

        match Direction::ALL.get(frame.next_dir) {
            Some(&dir) => {
                frame.next_dir += 1;
                let Some(next) = tail.step(dir, hf.height, hf.width) else {
                    continue;
                };
                // Membership is checked against the whole walk, not just the tail.
                if hf.at(next) >= hf.at(tail) || path.contains(&next) {
                    continue;
                }
                frame.extended = true;
                path.push(next);
                frames.push(Frame::default());
                outcome.iterations += 1;
            }
            None => {
                let dead_end = !frame.extended;
                if dead_end {
                    outcome.best.offer(&path, hf);
                }
                frames.pop();
                path.pop();
            }
        }
    }
}
