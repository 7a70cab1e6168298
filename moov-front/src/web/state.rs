//! Application state for the web layer.

use std::sync::Arc;

use crate::features::NetworkFeatures;

/// Shared application state.
///
/// Generic over the API so the router can run against the live client or
/// the mock.
pub struct AppState<A> {
    /// moov API client
    pub api: Arc<A>,

    /// Per-network capabilities
    pub features: Arc<NetworkFeatures>,
}

impl<A> AppState<A> {
    /// Create a new app state.
    pub fn new(api: A, features: NetworkFeatures) -> Self {
        Self {
            api: Arc::new(api),
            features: Arc::new(features),
        }
    }
}

// Manual impl: cloning shares the Arcs, so `A` itself need not be Clone.
impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            features: Arc::clone(&self.features),
        }
    }
}
