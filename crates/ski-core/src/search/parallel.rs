//! Band-synchronous parallel exhaustive search.
//!
//! Starts within one band are independent, so each runs on the rayon pool
//! with its own [`SearchOutcome`]. Outcomes are folded back in start order,
//! which keeps the route identical to the sequential search, and the pruning
//! bound is checked between bands against the fully merged best.
use rayon::prelude::*;
use tracing::debug;

use super::exhaustive::descend_from;
use super::{band_is_hopeless, SearchOutcome};
use crate::height_index::HeightIndex;
use crate::heightfield::HeightField;

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
        let partials: Vec<SearchOutcome> = starts
            .par_iter()
            .map(|&start| {
                let mut local = SearchOutcome::default();
                descend_from(hf, start, &mut local);
                local
            })
            .collect();
        for partial in partials {
            outcome.absorb(partial);
        }
    }
    outcome
}
