//! Longest strictly-descending walk over a heightfield.
//!
//! Objective: maximise the number of cells on the walk, then the elevation
//! drop from its first to its last cell. Three interchangeable strategies
//! produce the same `(length, drop)` on every grid:
//!
//! - `exhaustive`: depth-first enumeration of every maximal walk, starting
//!   from the highest band and pruning bands that cannot compete.
//! - `memoized`: one pass over the bands lowest-first, caching the best
//!   descent reachable from each cell.
//! - `parallel`: the exhaustive search with each band's starts spread over
//!   the rayon pool (feature `threading`).
pub mod exhaustive;
pub mod memoized;
#[cfg(feature = "threading")]
pub mod parallel;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coords::Coord;
use crate::height_index::HeightIndex;
use crate::heightfield::HeightField;

// ── Options ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Exhaustive,
    Memoized,
    Parallel,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhaustive" => Ok(Strategy::Exhaustive),
            "memoized" => Ok(Strategy::Memoized),
            "parallel" => Ok(Strategy::Parallel),
            other => Err(format!(
                "unknown strategy {other:?} (expected exhaustive, memoized or parallel)"
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Memoized => "memoized",
            Strategy::Parallel => "parallel",
        };
        f.write_str(name)
    }
}

/// Search configuration. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub strategy: Strategy,
    /// Skip elevation bands that cannot produce a better walk.
    /// Has no effect on the result, only on the work done.
    pub pruning: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Exhaustive,
            pruning: true,
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Best walk found so far. `length == 0` means nothing has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BestPath {
    pub length: usize,
    pub drop: i64,
    /// Cells of the winning walk, first to last.
    pub route: Vec<Coord>,
}

impl BestPath {
    /// Longer always wins; equal length needs a strictly larger drop.
    #[inline]
    pub fn beaten_by(&self, length: usize, drop: i64) -> bool {
        length > self.length || (length == self.length && drop > self.drop)
    }

    /// Record `route` if it beats the current best. Returns whether it did.
    pub fn offer(&mut self, route: &[Coord], hf: &HeightField) -> bool {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return false;
        };
        let drop = hf.drop_between(first, last);
        if !self.beaten_by(route.len(), drop) {
            return false;
        }
        self.length = route.len();
        self.drop = drop;
        self.route.clear();
        self.route.extend_from_slice(route);
        true
    }

    /// Keep whichever of `self` and `other` is better; `self` wins exact ties.
    pub fn merge(&mut self, other: BestPath) {
        if self.beaten_by(other.length, other.drop) {
            *self = other;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub best: BestPath,
    /// Search-node visits; diagnostic only.
    pub iterations: u64,
}

impl SearchOutcome {
    /// Fold a later, independently computed outcome into this one.
    pub fn absorb(&mut self, other: SearchOutcome) {
        self.best.merge(other.best);
        self.iterations += other.iterations;
    }
}

// ── Pruning ───────────────────────────────────────────────────────────────────

/// True when no walk starting at `elevation` can beat `best_length`.
///
/// A strictly descending integer walk from `elevation` holds at most
/// `elevation - floor + 1` cells, and a walk of exactly that length has the
/// smallest drop any walk of that length can have, so it cannot win a tie.
#[inline]
pub fn band_is_hopeless(elevation: i32, floor: i32, best_length: usize) -> bool {
    let span = i64::from(elevation) - i64::from(floor);
    span < i64::try_from(best_length).unwrap_or(i64::MAX)
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the configured strategy over `hf`, whose bands are `index`.
pub fn run_search(hf: &HeightField, index: &HeightIndex, options: &SearchOptions) -> SearchOutcome {
    let outcome = match options.strategy {
        Strategy::Exhaustive => exhaustive::search(hf, index, options.pruning),
        Strategy::Memoized => memoized::search(hf, index),
        Strategy::Parallel => run_parallel(hf, index, options.pruning),
    };
    info!(
        strategy = %options.strategy,
        pruning = options.pruning,
        length = outcome.best.length,
        drop = outcome.best.drop,
        iterations = outcome.iterations,
        "search finished"
    );
    outcome
}

#[cfg(feature = "threading")]
fn run_parallel(hf: &HeightField, index: &HeightIndex, pruning: bool) -> SearchOutcome {
    parallel::search(hf, index, pruning)
}

#[cfg(not(feature = "threading"))]
fn run_parallel(hf: &HeightField, index: &HeightIndex, pruning: bool) -> SearchOutcome {
    tracing::warn!("built without the `threading` feature, running the exhaustive search");
    exhaustive::search(hf, index, pruning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_prefers_length_then_strict_drop() {
        let best = BestPath { length: 3, drop: 5, route: Vec::new() };
        assert!(best.beaten_by(4, 0));
        assert!(best.beaten_by(3, 6));
        assert!(!best.beaten_by(3, 5));
        assert!(!best.beaten_by(2, 100));
    }

    #[test]
    fn offer_keeps_first_of_exact_ties() {
        let hf = HeightField::from_rows(&[[4, 3], [2, 1]]);
        let a = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)];
        let b = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 1)];
        let mut best = BestPath::default();
        assert!(best.offer(&a, &hf));
        assert!(!best.offer(&b, &hf));
        assert_eq!(best.route, a.to_vec());
        assert_eq!((best.length, best.drop), (3, 3));
    }

    #[test]
    fn merge_takes_strictly_better_only() {
        let mut left = BestPath { length: 2, drop: 1, route: vec![Coord::new(0, 0)] };
        left.merge(BestPath { length: 2, drop: 1, route: vec![Coord::new(9, 9)] });
        assert_eq!(left.route, vec![Coord::new(0, 0)]);
        left.merge(BestPath { length: 2, drop: 4, route: vec![Coord::new(1, 1)] });
        assert_eq!(left.drop, 4);
    }

    #[test]
    fn hopeless_band_bound() {
        // Non-negative grids reduce to `elevation < best_length`.
        assert!(band_is_hopeless(2, 0, 3));
        assert!(!band_is_hopeless(3, 0, 3));
        // The floor shifts the bound for negative or raised grids.
        assert!(!band_is_hopeless(-1, -4, 3));
        assert!(band_is_hopeless(-2, -4, 3));
        assert!(band_is_hopeless(i32::MIN, i32::MIN, 1));
        assert!(!band_is_hopeless(i32::MAX, i32::MIN, 1 << 20));
    }

    #[test]
    fn strategy_parses_and_prints() {
        for s in [Strategy::Exhaustive, Strategy::Memoized, Strategy::Parallel] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!("Memoized".parse::<Strategy>().unwrap(), Strategy::Memoized);
        assert!("greedy".parse::<Strategy>().is_err());
    }

    #[test]
    fn options_fill_missing_fields_from_defaults() {
        let opts: SearchOptions = serde_json::from_str(r#"{"strategy":"memoized"}"#).unwrap();
        assert_eq!(opts.strategy, Strategy::Memoized);
        assert!(opts.pruning);
        let opts: SearchOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, SearchOptions::default());
    }

    #[cfg(not(feature = "threading"))]
    #[test]
    fn parallel_without_threading_runs_exhaustive() {
        let hf = HeightField::from_rows(&[[9, 2, 7], [8, 4, 6], [1, 3, 5]]);
        let index = HeightIndex::build(&hf);
        let fallback = run_parallel(&hf, &index, true);
        assert_eq!(fallback, exhaustive::search(&hf, &index, true));
    }
}
