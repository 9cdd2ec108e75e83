use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::coords::Coord;
use crate::heightfield::HeightField;
use crate::search::SearchOutcome;

/// Final summary of one run, printable as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub length: usize,
    pub drop: i64,
    /// Path chains examined.
    pub iterations: u64,
    pub elapsed_ms: u64,
    pub route: Vec<Coord>,
}

impl Report {
    pub fn new(outcome: SearchOutcome, elapsed: Duration) -> Self {
        Self {
            length: outcome.best.length,
            drop: outcome.best.drop,
            iterations: outcome.iterations,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            route: outcome.best.route,
        }
    }

    /// The winning route as `elevation@(row, col)` hops, e.g. `9@(1, 2) -> 5@(1, 1)`.
    pub fn route_line(&self, hf: &HeightField) -> String {
        self.route
            .iter()
            .map(|&c| format!("{}@{}", hf.at(c), c))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "length={}, drop={}", self.length, self.drop)?;
        writeln!(f, "Path chains examined: {}", self.iterations)?;
        write!(f, "Runtime: {}ms", self.elapsed_ms)
    }
}
