//! Domain types for the transit companion.
//!
//! Everything here is built from API responses or user input and lives only
//! in component state. Types validate at construction where there is
//! something to validate.

mod error;
mod gif;
mod line;
mod station;

pub use error::DomainError;
pub use gif::GifImage;
pub use line::{DISPLAYED_DEPARTURES, Line};
pub use station::{LABEL_SEPARATOR, LoadedSet, Selection, Station, Suggestion};
