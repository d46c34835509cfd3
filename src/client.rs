use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{self, Endpoints};
use crate::endpoints::{
    self, AirQualityParams, ClimateParams, ElevationParams, EnsembleParams, FloodParams,
    ForecastParams, GeocodingParams, HistoricalParams, MarineParams, RequestDef,
};
use crate::error::{self, Error};
use crate::models::{
    AirQualityResponse, ClimateResponse, ElevationResponse, EnsembleResponse, FloodResponse,
    ForecastResponse, GeocodingResponse, HistoricalResponse, MarineResponse,
};
use crate::rate_limit::{RateLimitRule, RateLimiter};

/// Blocking client for the Open-Meteo API family.
///
/// Safe to call from multiple threads; every request passes through the
/// client's own rate limiter before it reaches the wire, and the limiter
/// serializes concurrent admissions.
///
/// ```no_run
/// use openmeteo::{Client, ForecastParams};
///
/// # fn main() -> Result<(), openmeteo::Error> {
/// let client = Client::new(None, None)?;
/// let forecast = client.forecast(&ForecastParams {
///     latitude: 52.52,
///     longitude: 13.41,
///     hourly: Some(vec!["temperature_2m".into()]),
///     ..ForecastParams::default()
/// })?;
/// println!("site elevation: {} m", forecast.elevation);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    limiter: RateLimiter,
    endpoints: Endpoints,
}

impl Client {
    /// Creates a client using (in order of precedence) the given rate
    /// limits and request timeout, or the defaults: the three-tier
    /// fair-use policy and 30 seconds.
    pub fn new(
        rate_limits: Option<Vec<RateLimitRule>>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        Self::with_endpoints(rate_limits, timeout, Endpoints::default())
    }

    /// Creates a client against custom base URLs, e.g. a self-hosted
    /// instance.
    pub fn with_endpoints(
        rate_limits: Option<Vec<RateLimitRule>>,
        timeout: Option<Duration>,
        endpoints: Endpoints,
    ) -> Result<Self, Error> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("openmeteo-rs/", env!("CARGO_PKG_VERSION"))),
        );

        let http = HttpClient::builder()
            .default_headers(default_headers)
            .timeout(timeout.unwrap_or(config::DEFAULT_TIMEOUT))
            .build()?;

        Ok(Self {
            http,
            limiter: RateLimiter::new(&rate_limits.unwrap_or_else(config::default_rate_limits)),
            endpoints,
        })
    }

    /// Shuts the client down, releasing the transport's connection pool.
    pub fn close(self) {
        drop(self.http);
    }

    /// The single dispatch path every endpoint call funnels through:
    /// acquire rate-limit permission, perform the GET, then classify the
    /// outcome or decode the body. One request, one outcome; no retries.
    fn execute<T: DeserializeOwned>(&self, def: RequestDef<T>) -> Result<T, Error> {
        self.limiter.acquire(1, None)?;

        debug!("GET {}", def.url);
        let resp = self.http.get(&def.url).query(&def.params.encode()).send()?;

        let status = resp.status();
        let body = resp.bytes()?;
        if status != StatusCode::OK {
            return Err(error::http_error(status.as_u16(), &body));
        }

        error::decode_body(&body)
    }

    /// Weather forecast for a coordinate.
    pub fn forecast(&self, params: &ForecastParams) -> Result<ForecastResponse, Error> {
        self.execute(endpoints::forecast(&self.endpoints, params))
    }

    /// Historical weather from the reanalysis archive.
    pub fn historical(&self, params: &HistoricalParams) -> Result<HistoricalResponse, Error> {
        self.execute(endpoints::historical(&self.endpoints, params))
    }

    /// Marine and ocean weather.
    pub fn marine(&self, params: &MarineParams) -> Result<MarineResponse, Error> {
        self.execute(endpoints::marine(&self.endpoints, params))
    }

    /// Air quality forecast.
    pub fn air_quality(&self, params: &AirQualityParams) -> Result<AirQualityResponse, Error> {
        self.execute(endpoints::air_quality(&self.endpoints, params))
    }

    /// Forward geocoding: search locations by name.
    pub fn search_locations(&self, params: &GeocodingParams) -> Result<GeocodingResponse, Error> {
        self.execute(endpoints::search_locations(&self.endpoints, params))
    }

    /// Terrain elevation for one or more coordinates.
    pub fn elevation(&self, params: &ElevationParams) -> Result<ElevationResponse, Error> {
        self.execute(endpoints::elevation(&self.endpoints, params))
    }

    /// River discharge and flood forecast.
    pub fn flood(&self, params: &FloodParams) -> Result<FloodResponse, Error> {
        self.execute(endpoints::flood(&self.endpoints, params))
    }

    /// Ensemble forecast across perturbed model runs.
    pub fn ensemble(&self, params: &EnsembleParams) -> Result<EnsembleResponse, Error> {
        self.execute(endpoints::ensemble(&self.endpoints, params))
    }

    /// Long-term climate projections.
    pub fn climate(&self, params: &ClimateParams) -> Result<ClimateResponse, Error> {
        self.execute(endpoints::climate(&self.endpoints, params))
    }
}
