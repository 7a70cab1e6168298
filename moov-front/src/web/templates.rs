//! Askama templates for the web frontend.

use askama::Template;

use crate::components::{FreqChart, LineCard, LineCardView};
use crate::domain::Station;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the search bar.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Autocomplete results fragment.
#[derive(Template)]
#[template(path = "suggestions.html")]
pub struct SuggestionsTemplate {
    pub labels: Vec<String>,
}

/// Confirmed station fragment.
#[derive(Template)]
#[template(path = "station.html")]
pub struct StationTemplate {
    pub station: Station,
    /// The record as received, as JSON, so the page can read any line data
    /// the API attached to it.
    pub record: String,
}

impl StationTemplate {
    pub fn new(station: Station) -> Self {
        let record = serde_json::json!(&station).to_string();
        Self { station, record }
    }
}

/// Line cards fragment.
#[derive(Template)]
#[template(path = "line_cards.html")]
pub struct LineCardsTemplate {
    pub cards: Vec<CardEntry>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A card plus the props the page posts back when it is clicked.
#[derive(Debug, Clone)]
pub struct CardEntry {
    pub view: LineCardView,
    /// JSON `{line, station}` for `/cards/toggle`.
    pub payload: String,
}

impl CardEntry {
    pub fn from_card(card: &LineCard) -> Self {
        let payload = serde_json::json!({
            "line": card.line(),
            "station": card.station(),
        });
        Self {
            view: card.view(),
            payload: payload.to_string(),
        }
    }
}

/// Ridership panel fragment; empty when the panel is hidden.
#[derive(Template)]
#[template(path = "stat_panel.html")]
pub struct StatPanelTemplate {
    pub chart: Option<FreqChart>,
}
