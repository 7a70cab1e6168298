//! Headless view components.
//!
//! Each component owns its view state and changes it only through explicit
//! events: input, selection, prop changes, clicks, mount and unmount.
//! Network responses are applied only while their request is still the
//! latest one the component issued.

mod collaborators;
mod generation;
mod line_card;
mod search_bar;

pub use collaborators::{FreqChart, TransportImage};
pub use generation::{RequestGeneration, Ticket};
pub use line_card::{LineCard, LineCardView, PendingGif};
pub use search_bar::{
    LookupOutcome, PendingLookup, PendingResolution, ResolutionOutcome, SearchBar,
    StationListener,
};
