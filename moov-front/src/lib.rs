//! Transit companion frontend.
//!
//! A station search bar with autocomplete and line cards showing upcoming
//! departures, backed by the moov transport API and served as HTML
//! fragments.

pub mod api;
pub mod components;
pub mod config;
pub mod domain;
pub mod features;
pub mod web;
