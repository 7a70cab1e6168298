//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::components::LineCardView;
use crate::domain::{DISPLAYED_DEPARTURES, Line, Station, Suggestion};

/// Autocomplete request.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Raw text typed into the search box
    #[serde(default)]
    pub q: String,
}

/// A suggestion in autocomplete results.
#[derive(Debug, Serialize)]
pub struct SuggestionResult {
    pub station: String,
    pub network: String,

    /// Text shown to the user; post it back to `/search/select`
    pub label: String,
}

impl From<&Suggestion> for SuggestionResult {
    fn from(s: &Suggestion) -> Self {
        Self {
            station: s.station.clone(),
            network: s.network.clone(),
            label: s.label(),
        }
    }
}

/// Autocomplete response.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub suggestions: Vec<SuggestionResult>,
}

/// Selection of a suggestion.
///
/// Either `label` (the displayed text) or both `station` and `network`.
#[derive(Debug, Deserialize)]
pub struct SelectStationRequest {
    pub label: Option<String>,
    pub station: Option<String>,
    pub network: Option<String>,
}

/// A confirmed station.
#[derive(Debug, Serialize)]
pub struct SelectStationResponse {
    pub station: Station,

    /// Replacement loaded-set for the parent; always empty
    pub loaded: Vec<String>,
}

/// Request to render line cards for a station.
#[derive(Debug, Deserialize)]
pub struct LineCardsRequest {
    pub station: Station,
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// A rendered line card.
#[derive(Debug, Serialize)]
pub struct LineCardResult {
    pub line: String,
    pub destination: String,

    /// Three slots; `null` where the line has fewer departures
    pub departures: [Option<String>; DISPLAYED_DEPARTURES],

    /// Inline image URI, if the decorative image loaded
    pub gif_src: Option<String>,
}

impl From<LineCardView> for LineCardResult {
    fn from(view: LineCardView) -> Self {
        Self {
            line: view.line,
            destination: view.destination,
            departures: view.departures,
            gif_src: view.gif_src,
        }
    }
}

/// Line cards response.
#[derive(Debug, Serialize)]
pub struct LineCardsResponse {
    pub cards: Vec<LineCardResult>,
}

/// A click on a line card.
#[derive(Debug, Deserialize)]
pub struct ToggleCardRequest {
    pub line: Line,
    pub station: Station,

    /// Whether the stats panel is currently shown
    #[serde(default)]
    pub stat_panel: bool,
}

/// Stats panel state after a click.
#[derive(Debug, Serialize)]
pub struct ToggleCardResponse {
    pub stat_panel: bool,
    pub changed: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
