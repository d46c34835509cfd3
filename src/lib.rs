//! A typed Rust client for the Open-Meteo weather API.
//!
//! Nine endpoint families (forecast, historical archive, marine, air
//! quality, geocoding, elevation, flood, ensemble, climate) share one
//! dispatch pipeline: client-side hierarchical rate limiting, canonical
//! query-parameter encoding, and strict decode-or-fail response handling.
//!
//! Two flavors expose the same operations: the blocking [`Client`] for
//! thread-based callers and [`AsyncClient`] for cooperative tasks. Both
//! enforce the service's fair-use limits locally (600/min, 5000/h,
//! 10000/day by default) before a request ever reaches the wire.
//!
//! ## Quick start
//! ```no_run
//! use openmeteo::{Client, ForecastParams};
//!
//! fn main() -> Result<(), openmeteo::Error> {
//!     let client = Client::new(None, None)?;
//!     let forecast = client.forecast(&ForecastParams {
//!         latitude: 52.52,
//!         longitude: 13.41,
//!         hourly: Some(vec!["temperature_2m".into(), "rain".into()]),
//!         ..ForecastParams::default()
//!     })?;
//!     println!("site elevation: {} m", forecast.elevation);
//!     Ok(())
//! }
//! ```
//!
//! For full usage and the async flavor, see the crate README.

#![forbid(unsafe_code)]

mod async_client;
mod client;
mod config;
pub mod endpoints;
mod error;
pub mod models;
pub mod params;
mod rate_limit;

pub use async_client::AsyncClient;
pub use client::Client;
pub use config::{Endpoints, default_rate_limits};
pub use endpoints::{
    AirQualityParams, ClimateParams, ElevationParams, EnsembleParams, FloodParams, ForecastParams,
    GeocodingParams, HistoricalParams, MarineParams, RequestDef,
};
pub use error::Error;
pub use rate_limit::{RateLimitRule, RateLimiter};
