//! Core library for the `metar` CLI.
//!
//! This crate defines:
//! - Unit-value types (temperature, number-or-sentinel wire fields)
//! - The parsed observation model for a single METAR record
//! - The fetch client for the aviationweather.gov data API
//! - The decoder that renders an observation as a human-readable report
//!
//! It is used by `metar-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod source;
pub mod temperature;

pub use config::Config;
pub use error::MetarError;
pub use model::{CloudCover, CloudLayer, NumberOrText, Observation};
pub use source::{AviationWeather, DEFAULT_ENDPOINT, ObservationSource};
pub use temperature::Temperature;
