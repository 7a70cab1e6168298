//! Web layer for the transit companion.
//!
//! Serves the search page and renders the components as HTML fragments
//! (or JSON, depending on `Accept`).

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
