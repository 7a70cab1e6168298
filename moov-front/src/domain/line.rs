//! Transit line with upcoming departures.

use serde::{Deserialize, Serialize};

/// Number of departures a line card displays.
pub const DISPLAYED_DEPARTURES: usize = 3;

/// A transit route at a station, with its next scheduled departures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line identifier (e.g. "C1", "a"). Also selects the mode icon.
    pub line: String,

    /// Terminus the vehicles are heading to.
    pub destination: String,

    /// Departure times as displayed, soonest first.
    #[serde(default)]
    pub next_departures: Vec<String>,
}

impl Line {
    pub fn new(
        line: impl Into<String>,
        destination: impl Into<String>,
        next_departures: Vec<String>,
    ) -> Self {
        Self {
            line: line.into(),
            destination: destination.into(),
            next_departures,
        }
    }

    /// The first three departures, with `None` for missing entries.
    pub fn displayed_departures(&self) -> [Option<&str>; DISPLAYED_DEPARTURES] {
        std::array::from_fn(|i| self.next_departures.get(i).map(String::as_str))
    }
}
