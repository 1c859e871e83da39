//! Forecast-to-strip pipeline for compact hourly weather displays.
//!
//! The core lives in [`strip`]: resolution detection, condition run-length
//! encoding, temperature labels, daily detection, and the [`strip::build`]
//! pass tying them together. [`colors`] validates user color maps.

pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod format;
pub mod noaa;
pub mod registry;
pub mod source;
pub mod strip;
pub mod weather;
