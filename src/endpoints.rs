//! Per-endpoint request builders.
//!
//! Each builder is a stateless function from a parameter struct to a
//! [`RequestDef`]: pure data description, no I/O. Parameter structs are
//! `Default`-constructible so call sites spell out only what they need:
//!
//! ```
//! use openmeteo::{Endpoints, ForecastParams, endpoints};
//!
//! let def = endpoints::forecast(&Endpoints::default(), &ForecastParams {
//!     latitude: 52.52,
//!     longitude: 13.41,
//!     hourly: Some(vec!["temperature_2m".into()]),
//!     ..ForecastParams::default()
//! });
//! assert!(def.url.ends_with("/v1/forecast"));
//! ```

use std::marker::PhantomData;

use crate::config::Endpoints;
use crate::models::{
    AirQualityResponse, ClimateResponse, ElevationResponse, EnsembleResponse, FloodResponse,
    ForecastResponse, GeocodingResponse, HistoricalResponse, MarineResponse, PrecipitationUnit,
    TemperatureUnit, TimeFormat, WindSpeedUnit,
};
use crate::params::QueryParams;

/// A fully described API request: target URL, ordered parameters, and the
/// response shape the body decodes into.
///
/// Consumed exactly once by a client's dispatcher.
#[derive(Debug, Clone)]
pub struct RequestDef<T> {
    pub url: String,
    pub params: QueryParams,
    shape: PhantomData<fn() -> T>,
}

impl<T> RequestDef<T> {
    pub fn new(url: impl Into<String>, params: QueryParams) -> Self {
        Self {
            url: url.into(),
            params,
            shape: PhantomData,
        }
    }
}

/// Parameters for the weather forecast endpoint.
#[derive(Debug, Clone, Default)]
pub struct ForecastParams {
    /// WGS84 latitude (-90 to 90).
    pub latitude: f64,
    /// WGS84 longitude (-180 to 180).
    pub longitude: f64,
    /// Hourly variables, e.g. `temperature_2m`, `rain`.
    pub hourly: Option<Vec<String>>,
    /// Daily aggregated variables, e.g. `temperature_2m_max`.
    pub daily: Option<Vec<String>>,
    /// Current-conditions variables.
    pub current: Option<Vec<String>>,
    pub temperature_unit: Option<TemperatureUnit>,
    pub wind_speed_unit: Option<WindSpeedUnit>,
    pub precipitation_unit: Option<PrecipitationUnit>,
    pub timeformat: Option<TimeFormat>,
    /// Timezone identifier, or `auto`.
    pub timezone: Option<String>,
    /// Days of past data to include (0-92).
    pub past_days: Option<u32>,
    /// Days of forecast to return (1-16).
    pub forecast_days: Option<u32>,
    /// Specific weather models to query.
    pub models: Option<Vec<String>>,
}

pub fn forecast(endpoints: &Endpoints, p: &ForecastParams) -> RequestDef<ForecastResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push_opt("hourly", p.hourly.clone());
    q.push_opt("daily", p.daily.clone());
    q.push_opt("current", p.current.clone());
    q.push_opt(
        "temperature_unit",
        p.temperature_unit.map(TemperatureUnit::as_str),
    );
    q.push_opt(
        "wind_speed_unit",
        p.wind_speed_unit.map(WindSpeedUnit::as_str),
    );
    q.push_opt(
        "precipitation_unit",
        p.precipitation_unit.map(PrecipitationUnit::as_str),
    );
    q.push_opt("timeformat", p.timeformat.map(TimeFormat::as_str));
    q.push_opt("timezone", p.timezone.clone());
    q.push_opt("past_days", p.past_days);
    q.push_opt("forecast_days", p.forecast_days);
    q.push_opt("models", p.models.clone());
    RequestDef::new(endpoints.forecast.clone(), q)
}

/// Parameters for the historical weather archive endpoint.
#[derive(Debug, Clone, Default)]
pub struct HistoricalParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// End date, `YYYY-MM-DD`.
    pub end_date: String,
    pub hourly: Option<Vec<String>>,
    pub daily: Option<Vec<String>>,
    /// Reanalysis model selector.
    pub models: Option<String>,
    pub timezone: Option<String>,
}

pub fn historical(endpoints: &Endpoints, p: &HistoricalParams) -> RequestDef<HistoricalResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push("start_date", p.start_date.clone());
    q.push("end_date", p.end_date.clone());
    q.push_opt("hourly", p.hourly.clone());
    q.push_opt("daily", p.daily.clone());
    q.push_opt("models", p.models.clone());
    q.push_opt("timezone", p.timezone.clone());
    RequestDef::new(endpoints.historical.clone(), q)
}

/// Parameters for the marine weather endpoint.
#[derive(Debug, Clone, Default)]
pub struct MarineParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Marine hourly variables, e.g. `wave_height`.
    pub hourly: Option<Vec<String>>,
    pub daily: Option<Vec<String>>,
    pub timezone: Option<String>,
    /// Grid cell preference: `sea`, `land` or `nearest`.
    pub cell_selection: Option<String>,
}

pub fn marine(endpoints: &Endpoints, p: &MarineParams) -> RequestDef<MarineResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push_opt("hourly", p.hourly.clone());
    q.push_opt("daily", p.daily.clone());
    q.push_opt("timezone", p.timezone.clone());
    q.push_opt("cell_selection", p.cell_selection.clone());
    RequestDef::new(endpoints.marine.clone(), q)
}

/// Parameters for the air quality endpoint.
#[derive(Debug, Clone, Default)]
pub struct AirQualityParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Pollutant variables, e.g. `pm10`, `pm2_5`.
    pub hourly: Option<Vec<String>>,
    /// Model domain: `cams_global` or `cams_europe`.
    pub domains: Option<String>,
    pub timezone: Option<String>,
}

pub fn air_quality(endpoints: &Endpoints, p: &AirQualityParams) -> RequestDef<AirQualityResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push_opt("hourly", p.hourly.clone());
    q.push_opt("domains", p.domains.clone());
    q.push_opt("timezone", p.timezone.clone());
    RequestDef::new(endpoints.air_quality.clone(), q)
}

/// Parameters for the geocoding search endpoint.
#[derive(Debug, Clone, Default)]
pub struct GeocodingParams {
    /// Place name to search for (minimum 2 characters).
    pub name: String,
    /// Number of results to return.
    pub count: Option<u32>,
    /// Language for result names.
    pub language: Option<String>,
    /// Response format selector.
    pub format: Option<String>,
}

pub fn search_locations(
    endpoints: &Endpoints,
    p: &GeocodingParams,
) -> RequestDef<GeocodingResponse> {
    let mut q = QueryParams::new();
    q.push("name", p.name.clone());
    q.push_opt("count", p.count);
    q.push_opt("language", p.language.clone());
    q.push_opt("format", p.format.clone());
    RequestDef::new(endpoints.geocoding.clone(), q)
}

/// Parameters for the elevation endpoint. Accepts up to 100 coordinates
/// per request; latitudes and longitudes pair up by index.
#[derive(Debug, Clone, Default)]
pub struct ElevationParams {
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
}

pub fn elevation(endpoints: &Endpoints, p: &ElevationParams) -> RequestDef<ElevationResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude.clone());
    q.push("longitude", p.longitude.clone());
    RequestDef::new(endpoints.elevation.clone(), q)
}

/// Parameters for the flood (river discharge) endpoint.
#[derive(Debug, Clone, Default)]
pub struct FloodParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Flood variables, e.g. `river_discharge`.
    pub daily: Option<Vec<String>>,
    /// Return all 51 ensemble members instead of the median.
    pub ensemble: Option<bool>,
}

pub fn flood(endpoints: &Endpoints, p: &FloodParams) -> RequestDef<FloodResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push_opt("daily", p.daily.clone());
    q.push_opt("ensemble", p.ensemble);
    RequestDef::new(endpoints.flood.clone(), q)
}

/// Parameters for the ensemble forecast endpoint.
#[derive(Debug, Clone, Default)]
pub struct EnsembleParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Target ensemble models, e.g. `icon_seamless`. Required by the API.
    pub models: Vec<String>,
    pub hourly: Option<Vec<String>>,
}

pub fn ensemble(endpoints: &Endpoints, p: &EnsembleParams) -> RequestDef<EnsembleResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push("models", p.models.clone());
    q.push_opt("hourly", p.hourly.clone());
    RequestDef::new(endpoints.ensemble.clone(), q)
}

/// Parameters for the climate projection endpoint.
#[derive(Debug, Clone, Default)]
pub struct ClimateParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Start date, `YYYY-MM-DD` (projections reach back to 1950).
    pub start_date: String,
    /// End date, `YYYY-MM-DD` (projections reach out to 2050).
    pub end_date: String,
    /// CMIP6 models, e.g. `EC_Earth3P_HR`.
    pub models: Option<Vec<String>>,
    pub daily: Option<Vec<String>>,
}

pub fn climate(endpoints: &Endpoints, p: &ClimateParams) -> RequestDef<ClimateResponse> {
    let mut q = QueryParams::new();
    q.push("latitude", p.latitude);
    q.push("longitude", p.longitude);
    q.push("start_date", p.start_date.clone());
    q.push("end_date", p.end_date.clone());
    q.push_opt("models", p.models.clone());
    q.push_opt("daily", p.daily.clone());
    RequestDef::new(endpoints.climate.clone(), q)
}
