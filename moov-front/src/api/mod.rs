//! Client side of the moov transport API.
//!
//! Components never talk HTTP directly; they go through [`TransportApi`],
//! implemented by the live [`MoovClient`] and by [`MockTransportApi`] for
//! tests and offline development.

mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::{GifImage, Station, Suggestion};

pub use client::{MoovClient, MoovConfig};
pub use error::ApiError;
pub use mock::{MockCalls, MockTransportApi};
pub use types::{FindStationResponse, GifContext, GifResponse, StationResponse};

/// The three moov API endpoints the components consume.
pub trait TransportApi {
    /// Autocomplete candidates for free text.
    fn find_stations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, ApiError>> + Send;

    /// Stations returned for an exact station/network lookup.
    ///
    /// The API may return several records; callers filter by name.
    fn station(
        &self,
        station: &str,
        network: &str,
    ) -> impl Future<Output = Result<Vec<Station>, ApiError>> + Send;

    /// A decorative GIF.
    fn gif(&self) -> impl Future<Output = Result<GifImage, ApiError>> + Send;
}
