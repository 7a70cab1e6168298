//! Station search box with autocomplete.
//!
//! Every input change queries the autocomplete endpoint; picking a
//! suggestion resolves the exact station record and reports it to the
//! parent through a [`StationListener`].
//!
//! Requests can be driven in one step (`on_input`, `on_select`) or split
//! into `begin_*`/`finish_*` halves so the caller can keep several in
//! flight. Either way only the latest request of each kind is applied.

use tracing::{debug, warn};

use crate::api::{ApiError, TransportApi};
use crate::domain::{DomainError, LoadedSet, Selection, Station, Suggestion};

use super::generation::{RequestGeneration, Ticket};

/// Receives the outcome of a successful station selection.
pub trait StationListener {
    /// A new station was confirmed.
    fn update_station(&mut self, station: Station);

    /// The parent's loaded-set should be replaced; always called with an
    /// empty set.
    fn update_loaded(&mut self, loaded: LoadedSet);
}

/// An autocomplete request that has been issued but not applied.
#[derive(Debug)]
pub struct PendingLookup {
    ticket: Ticket,
    query: String,
}

impl PendingLookup {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// A station resolution that has been issued but not applied.
#[derive(Debug)]
pub struct PendingResolution {
    ticket: Ticket,
    selection: Selection,
}

impl PendingResolution {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// What applying an autocomplete response did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Suggestions replaced with this many entries.
    Updated(usize),
    /// The request failed; suggestions cleared.
    Cleared,
    /// A newer request was issued since; response dropped.
    Stale,
}

/// What applying a resolution response did.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// Listener notified with this station.
    Confirmed(Station),
    /// No returned station matched the requested name exactly.
    NotFound,
    /// The request failed.
    Failed,
    /// The label could not be parsed; nothing was requested.
    Malformed,
    /// A newer selection was made since; response dropped.
    Stale,
}

/// View state of the search bar.
#[derive(Debug, Default)]
pub struct SearchBar {
    station: Option<Station>,
    suggestions: Vec<Suggestion>,
    lookups: RequestGeneration,
    resolutions: RequestGeneration,
}

impl SearchBar {
    /// Create a search bar. `station` is the parent's current station.
    pub fn new(station: Option<Station>) -> Self {
        Self {
            station,
            ..Self::default()
        }
    }

    /// The station the parent currently has selected.
    pub fn station(&self) -> Option<&Station> {
        self.station.as_ref()
    }

    /// The parent's station changed.
    pub fn set_station(&mut self, station: Option<Station>) {
        self.station = station;
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Display labels, one per suggestion, in order.
    pub fn labels(&self) -> Vec<String> {
        self.suggestions.iter().map(Suggestion::label).collect()
    }

    /// Start an autocomplete request for the raw input text.
    pub fn begin_lookup(&mut self, query: &str) -> PendingLookup {
        PendingLookup {
            ticket: self.lookups.issue(),
            query: query.to_string(),
        }
    }

    /// Apply an autocomplete response.
    pub fn finish_lookup(
        &mut self,
        pending: PendingLookup,
        result: Result<Vec<Suggestion>, ApiError>,
    ) -> LookupOutcome {
        if !self.lookups.is_current(pending.ticket) {
            debug!(query = %pending.query, "dropping stale autocomplete response");
            return LookupOutcome::Stale;
        }

        match result {
            Ok(suggestions) => {
                let count = suggestions.len();
                self.suggestions = suggestions;
                LookupOutcome::Updated(count)
            }
            Err(e) => {
                warn!(query = %pending.query, error = %e, "autocomplete failed");
                self.suggestions.clear();
                LookupOutcome::Cleared
            }
        }
    }

    /// Input changed: query the API and apply the result.
    pub async fn on_input<A: TransportApi>(&mut self, api: &A, query: &str) -> LookupOutcome {
        let pending = self.begin_lookup(query);
        let result = api.find_stations(pending.query()).await;
        self.finish_lookup(pending, result)
    }

    /// A suggestion label was clicked.
    ///
    /// Suggestions are cleared and pending lookups dropped whether or not
    /// the label parses.
    pub fn select(&mut self, label: &str) -> Result<PendingResolution, DomainError> {
        self.clear_suggestions();
        let selection = Selection::parse_label(label)?;
        Ok(self.begin_resolution(selection))
    }

    /// A suggestion was picked directly, without going through its label.
    pub fn choose(&mut self, suggestion: &Suggestion) -> PendingResolution {
        self.clear_suggestions();
        self.begin_resolution(Selection::from(suggestion))
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.lookups.invalidate();
    }

    fn begin_resolution(&mut self, selection: Selection) -> PendingResolution {
        PendingResolution {
            ticket: self.resolutions.issue(),
            selection,
        }
    }

    /// Apply a station resolution response.
    ///
    /// The first returned station whose name equals the requested one is
    /// reported: `update_station` with it, then `update_loaded` with an
    /// empty set. Without a match nothing is reported.
    pub fn finish_resolution<L: StationListener + ?Sized>(
        &mut self,
        pending: PendingResolution,
        result: Result<Vec<Station>, ApiError>,
        listener: &mut L,
    ) -> ResolutionOutcome {
        let Selection { station, network } = pending.selection;

        if !self.resolutions.is_current(pending.ticket) {
            debug!(%station, %network, "dropping stale station response");
            return ResolutionOutcome::Stale;
        }

        let candidates = match result {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(%station, %network, error = %e, "station lookup failed");
                return ResolutionOutcome::Failed;
            }
        };

        match candidates.into_iter().find(|s| s.name == station) {
            Some(found) => {
                listener.update_station(found.clone());
                listener.update_loaded(LoadedSet::new());
                ResolutionOutcome::Confirmed(found)
            }
            None => {
                debug!(%station, %network, "no exact station match");
                ResolutionOutcome::NotFound
            }
        }
    }

    /// Resolve `pending` against the API and apply the result.
    pub async fn resolve<A, L>(
        &mut self,
        api: &A,
        pending: PendingResolution,
        listener: &mut L,
    ) -> ResolutionOutcome
    where
        A: TransportApi,
        L: StationListener + ?Sized,
    {
        let result = api
            .station(&pending.selection.station, &pending.selection.network)
            .await;
        self.finish_resolution(pending, result, listener)
    }

    /// A suggestion label was clicked: parse it, resolve it, report it.
    pub async fn on_select<A, L>(
        &mut self,
        api: &A,
        label: &str,
        listener: &mut L,
    ) -> ResolutionOutcome
    where
        A: TransportApi,
        L: StationListener + ?Sized,
    {
        match self.select(label) {
            Ok(pending) => self.resolve(api, pending, listener).await,
            Err(e) => {
                warn!(error = %e, "ignoring selection");
                ResolutionOutcome::Malformed
            }
        }
    }

    /// The search bar is going away: drop everything in flight.
    pub fn unmount(&mut self) {
        self.lookups.invalidate();
        self.resolutions.invalidate();
    }
}
