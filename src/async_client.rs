use log::debug;
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
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

/// Cooperative (async) client for the Open-Meteo API family.
///
/// Mirrors [`Client`](crate::Client) operation for operation; the only
/// difference is how it waits. Rate-limit waits suspend the task instead of
/// blocking a thread, and the limiter's cooperative path expects one
/// logical task per client at a time — tasks sharing one instance must
/// serialize their calls externally.
///
/// ```no_run
/// use openmeteo::{AsyncClient, ForecastParams};
///
/// # async fn run() -> Result<(), openmeteo::Error> {
/// let client = AsyncClient::new(None, None)?;
/// let forecast = client
///     .forecast(&ForecastParams {
///         latitude: 52.52,
///         longitude: 13.41,
///         ..ForecastParams::default()
///     })
///     .await?;
/// println!("generated in {} ms", forecast.generationtime_ms);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AsyncClient {
    http: HttpClient,
    limiter: RateLimiter,
    endpoints: Endpoints,
}

impl AsyncClient {
    /// Creates a client using the given rate limits and request timeout,
    /// or the defaults: the three-tier fair-use policy and 30 seconds.
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

    /// The single dispatch path, cooperative flavor. Suspension happens
    /// only at the rate-limit wait and the transport await points; the
    /// decision logic is shared with the blocking client.
    async fn execute<T: DeserializeOwned>(&self, def: RequestDef<T>) -> Result<T, Error> {
        self.limiter.acquire_async(1, None).await?;

        debug!("GET {}", def.url);
        let resp = self
            .http
            .get(&def.url)
            .query(&def.params.encode())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;
        if status != StatusCode::OK {
            return Err(error::http_error(status.as_u16(), &body));
        }

        error::decode_body(&body)
    }

    /// Weather forecast for a coordinate.
    pub async fn forecast(&self, params: &ForecastParams) -> Result<ForecastResponse, Error> {
        self.execute(endpoints::forecast(&self.endpoints, params)).await
    }

    /// Historical weather from the reanalysis archive.
    pub async fn historical(&self, params: &HistoricalParams) -> Result<HistoricalResponse, Error> {
        self.execute(endpoints::historical(&self.endpoints, params)).await
    }

    /// Marine and ocean weather.
    pub async fn marine(&self, params: &MarineParams) -> Result<MarineResponse, Error> {
        self.execute(endpoints::marine(&self.endpoints, params)).await
    }

    /// Air quality forecast.
    pub async fn air_quality(&self, params: &AirQualityParams) -> Result<AirQualityResponse, Error> {
        self.execute(endpoints::air_quality(&self.endpoints, params)).await
    }

    /// Forward geocoding: search locations by name.
    pub async fn search_locations(
        &self,
        params: &GeocodingParams,
    ) -> Result<GeocodingResponse, Error> {
        self.execute(endpoints::search_locations(&self.endpoints, params))
            .await
    }

    /// Terrain elevation for one or more coordinates.
    pub async fn elevation(&self, params: &ElevationParams) -> Result<ElevationResponse, Error> {
        self.execute(endpoints::elevation(&self.endpoints, params)).await
    }

    /// River discharge and flood forecast.
    pub async fn flood(&self, params: &FloodParams) -> Result<FloodResponse, Error> {
        self.execute(endpoints::flood(&self.endpoints, params)).await
    }

    /// Ensemble forecast across perturbed model runs.
    pub async fn ensemble(&self, params: &EnsembleParams) -> Result<EnsembleResponse, Error> {
        self.execute(endpoints::ensemble(&self.endpoints, params)).await
    }

    /// Long-term climate projections.
    pub async fn climate(&self, params: &ClimateParams) -> Result<ClimateResponse, Error> {
        self.execute(endpoints::climate(&self.endpoints, params)).await
    }
}
