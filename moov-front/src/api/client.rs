//! Moov API HTTP client.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{GifImage, Station, Suggestion};

use super::TransportApi;
use super::error::ApiError;
use super::types::{FindStationResponse, GifResponse, StationResponse};

/// Default base URL for the moov API.
pub const DEFAULT_BASE_URL: &str = "https://moov-api.herokuapp.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the moov API client.
#[derive(Debug, Clone)]
pub struct MoovConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MoovConfig {
    /// Create a config pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted API).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MoovConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the moov transport API.
#[derive(Debug, Clone)]
pub struct MoovClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MoovClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MoovConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            message: format!("{}: {}", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                message: format!("{} cannot be a base URL", config.base_url),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Build `{base}/api/transport/{segments...}` with each segment
    /// percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                message: format!("{} cannot be a base URL", self.base_url),
            })?;
            path.pop_if_empty().extend(["api", "transport"]).extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
        })
    }
}

impl TransportApi for MoovClient {
    async fn find_stations(&self, query: &str) -> Result<Vec<Suggestion>, ApiError> {
        let url = self.endpoint(&["findstation", query])?;
        let response: FindStationResponse = self.get_json(url).await?;
        Ok(response.network)
    }

    async fn station(&self, station: &str, network: &str) -> Result<Vec<Station>, ApiError> {
        let url = self.endpoint(&["station", station, network])?;
        let response: StationResponse = self.get_json(url).await?;
        Ok(response.network)
    }

    async fn gif(&self) -> Result<GifImage, ApiError> {
        // The endpoint is registered with a trailing slash.
        let url = self.endpoint(&["getgif", ""])?;
        let response: GifResponse = self.get_json(url).await?;
        Ok(GifImage::from_base64(&response.ctx.gif)?)
    }
}
