//! Station, suggestion and selection types.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Separator between station name and network in a suggestion label.
pub const LABEL_SEPARATOR: &str = " - ";

/// Parent-owned set of already-loaded keys.
///
/// The search bar never inspects it; it only hands the parent a fresh empty
/// set whenever a new station is confirmed.
pub type LoadedSet = HashSet<String>;

/// A physical stop within a named transit network.
///
/// Fields the API returns beyond `station` and `network` are kept in
/// `extra` so the record handed to listeners is the element as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station name. Called `station` on the wire.
    #[serde(rename = "station")]
    pub name: String,

    /// Network (transit operator) the station belongs to.
    pub network: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Station {
    /// Create a station with no extra fields.
    pub fn new(name: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            network: network.into(),
            extra: serde_json::Map::new(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, LABEL_SEPARATOR, self.network)
    }
}

/// An autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub station: String,
    pub network: String,
}

impl Suggestion {
    pub fn new(station: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            network: network.into(),
        }
    }

    /// The text shown for this suggestion, e.g. `"Gares - SNCF"`.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.station, LABEL_SEPARATOR, self.network)
    }
}

/// A station/network pair the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub station: String,
    pub network: String,
}

impl Selection {
    /// Parse a suggestion label.
    ///
    /// The label is split on `" - "`: the last segment is the network and
    /// the first is the station name. Segments in between are ignored, so
    /// station names containing the separator do not survive the round
    /// trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use moov_front::domain::Selection;
    ///
    /// let sel = Selection::parse_label("Gares - SNCF").unwrap();
    /// assert_eq!(sel.station, "Gares");
    /// assert_eq!(sel.network, "SNCF");
    ///
    /// let sel = Selection::parse_label("A - B - C").unwrap();
    /// assert_eq!(sel.station, "A");
    /// assert_eq!(sel.network, "C");
    ///
    /// assert!(Selection::parse_label("Gares").is_err());
    /// ```
    pub fn parse_label(label: &str) -> Result<Self, DomainError> {
        let mut segments: Vec<&str> = label.split(LABEL_SEPARATOR).collect();
        if segments.len() < 2 {
            return Err(DomainError::MalformedLabel(label.to_string()));
        }

        // len >= 2, so both ends exist
        let network = segments.pop().unwrap_or_default();
        let station = segments[0];

        Ok(Self {
            station: station.to_string(),
            network: network.to_string(),
        })
    }
}

impl From<&Suggestion> for Selection {
    fn from(s: &Suggestion) -> Self {
        Self {
            station: s.station.clone(),
            network: s.network.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_label() {
        let sel = Selection::parse_label("Gares - SNCF").unwrap();
        assert_eq!(sel.station, "Gares");
        assert_eq!(sel.network, "SNCF");
    }

    #[test]
    fn parse_takes_first_and_last_segments() {
        let sel = Selection::parse_label("Saint-Jacques - Gaîté - Rennes").unwrap();
        assert_eq!(sel.station, "Saint-Jacques");
        assert_eq!(sel.network, "Rennes");
    }

    #[test]
    fn hyphen_without_spaces_is_not_a_separator() {
        let sel = Selection::parse_label("Saint-Jacques-Gaîté - Rennes").unwrap();
        assert_eq!(sel.station, "Saint-Jacques-Gaîté");
        assert_eq!(sel.network, "Rennes");
    }

    #[test]
    fn parse_empty_segments() {
        let sel = Selection::parse_label(" - ").unwrap();
        assert_eq!(sel.station, "");
        assert_eq!(sel.network, "");
    }

    #[test]
    fn reject_label_without_separator() {
        assert_eq!(
            Selection::parse_label("Gares"),
            Err(DomainError::MalformedLabel("Gares".to_string()))
        );
        assert!(Selection::parse_label("").is_err());
    }

    #[test]
    fn suggestion_label() {
        let s = Suggestion::new("République", "Rennes");
        assert_eq!(s.label(), "République - Rennes");
    }

    #[test]
    fn station_wire_format() {
        let json = r#"{"station": "Gares", "network": "SNCF", "lines": ["a"]}"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.name, "Gares");
        assert_eq!(station.network, "SNCF");
        assert_eq!(station.extra["lines"], serde_json::json!(["a"]));

        let back = serde_json::to_value(&station).unwrap();
        assert_eq!(back["station"], "Gares");
        assert_eq!(back["lines"], serde_json::json!(["a"]));
    }

    #[test]
    fn station_display_matches_label() {
        let station = Station::new("Gares", "SNCF");
        assert_eq!(station.to_string(), "Gares - SNCF");
    }
}
