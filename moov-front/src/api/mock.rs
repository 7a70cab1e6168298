//! Mock moov API for testing without network access.
//!
//! Serves canned responses, either built in code or loaded from a JSON
//! fixture, and counts the calls it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::domain::{GifImage, Station, Suggestion};

use super::TransportApi;
use super::error::ApiError;

/// Fixture file layout.
///
/// ```json
/// {
///   "suggestions": { "gar": [{"station": "Gares", "network": "SNCF"}] },
///   "stations": [{"station": "Gares", "network": "SNCF"}],
///   "gif": "R0lGODlh"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    suggestions: HashMap<String, Vec<Suggestion>>,
    #[serde(default)]
    stations: Vec<Station>,
    #[serde(default)]
    gif: Option<String>,
}

/// How many times each endpoint was hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MockCalls {
    pub find_stations: usize,
    pub station: usize,
    pub gif: usize,
}

/// Mock API serving canned data.
///
/// Unknown queries return an empty list, like the real autocomplete does.
/// Station lookups return every canned station in the requested network, so
/// tests can exercise the client-side exact-name filter.
#[derive(Clone, Default)]
pub struct MockTransportApi {
    suggestions: Arc<HashMap<String, Vec<Suggestion>>>,
    stations: Arc<Vec<Station>>,
    gif: Option<GifImage>,
    failing: Failing,
    calls: Arc<Mutex<MockCalls>>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Failing {
    find_stations: bool,
    station: bool,
    gif: bool,
}

impl MockTransportApi {
    /// An empty mock: no suggestions, no stations, no image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load canned responses from a JSON fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ApiError::Api {
            status: 0,
            message: format!("failed to read mock data {:?}: {}", path, e),
        })?;
        let fixture: Fixture = serde_json::from_str(&json).map_err(|e| ApiError::Json {
            message: format!("failed to parse mock data {:?}: {}", path, e),
        })?;

        let gif = fixture
            .gif
            .as_deref()
            .map(GifImage::from_base64)
            .transpose()?;

        Ok(Self {
            suggestions: Arc::new(fixture.suggestions),
            stations: Arc::new(fixture.stations),
            gif,
            ..Self::default()
        })
    }

    /// Answer `query` with `suggestions`.
    pub fn with_suggestions(mut self, query: &str, suggestions: Vec<Suggestion>) -> Self {
        Arc::make_mut(&mut self.suggestions).insert(query.to_string(), suggestions);
        self
    }

    /// Add a station record to the lookup table.
    pub fn with_station(mut self, station: Station) -> Self {
        Arc::make_mut(&mut self.stations).push(station);
        self
    }

    pub fn with_gif(mut self, gif: GifImage) -> Self {
        self.gif = Some(gif);
        self
    }

    /// Make the autocomplete endpoint fail.
    pub fn failing_find_stations(mut self) -> Self {
        self.failing.find_stations = true;
        self
    }

    /// Make the station endpoint fail.
    pub fn failing_station(mut self) -> Self {
        self.failing.station = true;
        self
    }

    /// Make the gif endpoint fail.
    pub fn failing_gif(mut self) -> Self {
        self.failing.gif = true;
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> MockCalls {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, f: impl FnOnce(&mut MockCalls)) {
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *calls);
    }

    fn unavailable() -> ApiError {
        ApiError::Api {
            status: 503,
            message: "mock endpoint configured to fail".to_string(),
        }
    }
}

impl TransportApi for MockTransportApi {
    async fn find_stations(&self, query: &str) -> Result<Vec<Suggestion>, ApiError> {
        self.record(|c| c.find_stations += 1);
        if self.failing.find_stations {
            return Err(Self::unavailable());
        }
        Ok(self.suggestions.get(query).cloned().unwrap_or_default())
    }

    async fn station(&self, _station: &str, network: &str) -> Result<Vec<Station>, ApiError> {
        self.record(|c| c.station += 1);
        if self.failing.station {
            return Err(Self::unavailable());
        }
        Ok(self
            .stations
            .iter()
            .filter(|s| s.network == network)
            .cloned()
            .collect())
    }

    async fn gif(&self) -> Result<GifImage, ApiError> {
        self.record(|c| c.gif += 1);
        if self.failing.gif {
            return Err(Self::unavailable());
        }
        self.gif.clone().ok_or_else(|| ApiError::Api {
            status: 404,
            message: "no mock gif configured".to_string(),
        })
    }
}
