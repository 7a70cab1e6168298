//! Card for one line's upcoming departures at a station.
//!
//! The card fetches a decorative image once when mounted, shows the next
//! three departures, and can open a ridership chart panel on networks that
//! have ridership data.

use tracing::{debug, warn};

use crate::api::{ApiError, TransportApi};
use crate::domain::{DISPLAYED_DEPARTURES, GifImage, Line, Station};
use crate::features::NetworkFeatures;

use super::collaborators::{FreqChart, TransportImage};
use super::generation::{RequestGeneration, Ticket};

/// An image request issued on mount.
#[derive(Debug)]
pub struct PendingGif {
    ticket: Ticket,
}

/// View state of a line card.
#[derive(Debug)]
pub struct LineCard {
    line: Line,
    station: Station,
    gif: Option<GifImage>,
    stat_panel: bool,
    mounted: bool,
    gif_requests: RequestGeneration,
}

impl LineCard {
    pub fn new(line: Line, station: Station) -> Self {
        Self {
            line,
            station,
            gif: None,
            stat_panel: false,
            mounted: false,
            gif_requests: RequestGeneration::new(),
        }
    }

    /// Restore a card's stats panel state from a previous render. The panel
    /// stays closed on networks without ridership data.
    pub fn with_stat_panel(mut self, shown: bool, features: &NetworkFeatures) -> Self {
        self.stat_panel = shown && features.supports_ridership_stats(&self.station.network);
        self
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn gif(&self) -> Option<&GifImage> {
        self.gif.as_ref()
    }

    pub fn stat_panel_visible(&self) -> bool {
        self.stat_panel
    }

    /// Mount the card. Returns the image request to issue, or `None` if
    /// the card is already mounted.
    pub fn begin_mount(&mut self) -> Option<PendingGif> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(PendingGif {
            ticket: self.gif_requests.issue(),
        })
    }

    /// Apply the image response. Returns whether an image was set.
    pub fn finish_gif(&mut self, pending: PendingGif, result: Result<GifImage, ApiError>) -> bool {
        if !self.gif_requests.is_current(pending.ticket) {
            debug!(line = %self.line.line, "dropping image for unmounted card");
            return false;
        }

        match result {
            Ok(gif) => {
                self.gif = Some(gif);
                true
            }
            Err(e) => {
                warn!(line = %self.line.line, error = %e, "decorative image unavailable");
                false
            }
        }
    }

    /// Mount the card and fetch its image.
    pub async fn mount<A: TransportApi>(&mut self, api: &A) {
        if let Some(pending) = self.begin_mount() {
            let result = api.gif().await;
            self.finish_gif(pending, result);
        }
    }

    /// The card is going away. A late image response will be dropped, and
    /// mounting again fetches a fresh image.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.gif_requests.invalidate();
    }

    /// New props from the parent. If either differs from the current one,
    /// the stats panel closes.
    pub fn set_props(&mut self, line: Line, station: Station) {
        if line != self.line || station != self.station {
            self.stat_panel = false;
        }
        self.line = line;
        self.station = station;
    }

    /// The card body was clicked. Toggles the stats panel when the
    /// station's network has ridership data; otherwise does nothing.
    /// Returns whether the panel changed.
    pub fn click(&mut self, features: &NetworkFeatures) -> bool {
        if !features.supports_ridership_stats(&self.station.network) {
            return false;
        }
        self.stat_panel = !self.stat_panel;
        true
    }

    /// Ridership chart inputs, if the panel is shown.
    pub fn freq_chart(&self) -> Option<FreqChart> {
        self.stat_panel.then(|| FreqChart {
            station: self.station.name.clone(),
            network: self.station.network.clone(),
            line: self.line.line.clone(),
        })
    }

    /// Everything needed to draw the card.
    pub fn view(&self) -> LineCardView {
        LineCardView {
            line: self.line.line.clone(),
            network: self.station.network.clone(),
            icon: TransportImage::for_card(&self.line.line, &self.station.network),
            destination: self.line.destination.clone(),
            departures: self
                .line
                .displayed_departures()
                .map(|d| d.map(str::to_string)),
            gif_src: self.gif.as_ref().map(GifImage::data_uri),
            freq_chart: self.freq_chart(),
        }
    }
}

/// Render-ready snapshot of a line card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCardView {
    pub line: String,
    pub network: String,
    pub icon: TransportImage,
    pub destination: String,
    /// Always three slots; `None` where the line has fewer departures.
    pub departures: [Option<String>; DISPLAYED_DEPARTURES],
    pub gif_src: Option<String>,
    pub freq_chart: Option<FreqChart>,
}

impl LineCardView {
    /// Departure text for slot `i`, empty when missing.
    pub fn departure_text(&self, i: usize) -> &str {
        self.departures
            .get(i)
            .and_then(|d| d.as_deref())
            .unwrap_or("")
    }
}
