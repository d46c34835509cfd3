//! Typed responses and parameter enums for the nine API families.
//!
//! Data responses tolerate unknown top-level fields so new API additions
//! never break decoding; present fields must still match their declared
//! types exactly. Geocoding and elevation keep the strict contract and
//! reject unknown fields.

use serde::Deserialize;
use std::collections::HashMap;

/// Temperature unit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }
}

/// Wind speed unit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindSpeedUnit {
    Kmh,
    Ms,
    Mph,
    Kn,
}

impl WindSpeedUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            WindSpeedUnit::Kmh => "kmh",
            WindSpeedUnit::Ms => "ms",
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Kn => "kn",
        }
    }
}

/// Precipitation unit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationUnit {
    Mm,
    Inch,
}

impl PrecipitationUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            PrecipitationUnit::Mm => "mm",
            PrecipitationUnit::Inch => "inch",
        }
    }
}

/// Timestamp format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    Iso8601,
    Unixtime,
}

impl TimeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFormat::Iso8601 => "iso8601",
            TimeFormat::Unixtime => "unixtime",
        }
    }
}

/// One cell of a variable series: numeric or textual. Nulls in a series
/// decode as `None` at the containing `Vec` level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Number(f64),
    Text(String),
}

impl Sample {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Sample::Number(n) => Some(*n),
            Sample::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sample::Number(_) => None,
            Sample::Text(s) => Some(s),
        }
    }
}

/// Variable name to sampled values, e.g. `"temperature_2m" -> [10.5, 9.8]`.
pub type SeriesMap = HashMap<String, Vec<Option<Sample>>>;

/// Variable name to unit string, e.g. `"temperature_2m" -> "°C"`.
pub type UnitsMap = HashMap<String, String>;

/// Variable name to a single current-conditions value.
pub type CurrentMap = HashMap<String, Sample>;

/// Response from the weather forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub hourly_units: Option<UnitsMap>,
    pub hourly: Option<SeriesMap>,
    pub daily_units: Option<UnitsMap>,
    pub daily: Option<SeriesMap>,
    pub current_units: Option<UnitsMap>,
    pub current: Option<CurrentMap>,
}

/// Response from the historical weather archive endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub hourly_units: Option<UnitsMap>,
    pub hourly: Option<SeriesMap>,
    pub daily_units: Option<UnitsMap>,
    pub daily: Option<SeriesMap>,
}

/// Response from the marine weather endpoint. Marine cells carry no
/// elevation in most grids, so it stays optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct MarineResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: Option<f64>,
    pub hourly_units: Option<UnitsMap>,
    pub hourly: Option<SeriesMap>,
    pub daily_units: Option<UnitsMap>,
    pub daily: Option<SeriesMap>,
}

/// Response from the air quality endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: Option<f64>,
    pub hourly_units: Option<UnitsMap>,
    pub hourly: Option<SeriesMap>,
    pub current_units: Option<UnitsMap>,
    pub current: Option<CurrentMap>,
}

/// A single geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub feature_code: Option<String>,
    pub country_code: Option<String>,
    pub admin1_id: Option<i64>,
    pub admin2_id: Option<i64>,
    pub admin3_id: Option<i64>,
    pub admin4_id: Option<i64>,
    pub timezone: Option<String>,
    pub population: Option<i64>,
    pub postcodes: Option<Vec<String>>,
    pub country_id: Option<i64>,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    pub admin3: Option<String>,
    pub admin4: Option<String>,
}

/// Response from the geocoding search endpoint. `results` is absent when
/// nothing matched.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
    pub generationtime_ms: Option<f64>,
}

/// Response from the elevation endpoint: one value per requested
/// coordinate, in request order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElevationResponse {
    pub elevation: Vec<f64>,
}

/// Response from the flood (river discharge) endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FloodResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: Option<i64>,
    pub timezone: Option<String>,
    pub timezone_abbreviation: Option<String>,
    pub daily_units: Option<UnitsMap>,
    pub daily: Option<SeriesMap>,
}

/// Response from the ensemble forecast endpoint. Each member's series
/// appears as its own variable, e.g. `temperature_2m_member03`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnsembleResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub hourly_units: Option<UnitsMap>,
    pub hourly: Option<SeriesMap>,
}

/// Response from the climate projection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ClimateResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    pub daily_units: Option<UnitsMap>,
    pub daily: Option<SeriesMap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.41,
            "generationtime_ms": 2.2,
            "utc_offset_seconds": 3600,
            "timezone": "Europe/Berlin",
            "timezone_abbreviation": "CET",
            "elevation": 38.0,
            "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
            "hourly": {
                "time": ["2026-01-01T00:00", "2026-01-01T01:00"],
                "temperature_2m": [10.5, null]
            },
            "current_units": {"temperature_2m": "°C"},
            "current": {"time": "2026-01-01T12:00", "temperature_2m": 12.5}
        })
    }

    #[test]
    fn forecast_decodes_fully() {
        let resp: ForecastResponse = serde_json::from_value(forecast_body()).unwrap();
        assert_eq!(resp.latitude, 52.52);
        assert_eq!(resp.utc_offset_seconds, 3600);
        assert_eq!(resp.timezone_abbreviation, "CET");

        let hourly = resp.hourly.unwrap();
        let temps = &hourly["temperature_2m"];
        assert_eq!(temps[0].as_ref().unwrap().as_f64(), Some(10.5));
        assert!(temps[1].is_none());

        let current = resp.current.unwrap();
        assert_eq!(current["temperature_2m"].as_f64(), Some(12.5));
        assert_eq!(current["time"].as_str(), Some("2026-01-01T12:00"));
        assert_eq!(resp.hourly_units.unwrap()["temperature_2m"], "°C");
        assert!(resp.daily.is_none());
    }

    #[test]
    fn data_responses_tolerate_unknown_fields() {
        let mut body = forecast_body();
        body["added_in_a_future_api_version"] = serde_json::json!(true);
        let resp: ForecastResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.elevation, 38.0);
    }

    #[test]
    fn wrongly_typed_fields_fail_decoding() {
        let mut body = forecast_body();
        body["latitude"] = serde_json::json!("52.52");
        assert!(serde_json::from_value::<ForecastResponse>(body).is_err());
    }

    #[test]
    fn missing_required_fields_fail_decoding() {
        let mut body = forecast_body();
        body.as_object_mut().unwrap().remove("timezone");
        assert!(serde_json::from_value::<ForecastResponse>(body).is_err());
    }

    #[test]
    fn elevation_response_is_strict() {
        let ok = serde_json::json!({"elevation": [38.0, 12.5]});
        let resp: ElevationResponse = serde_json::from_value(ok).unwrap();
        assert_eq!(resp.elevation, vec![38.0, 12.5]);

        let unknown = serde_json::json!({"elevation": [38.0], "extra": 1});
        assert!(serde_json::from_value::<ElevationResponse>(unknown).is_err());
    }

    #[test]
    fn geocoding_allows_empty_results() {
        let body = serde_json::json!({"generationtime_ms": 0.5});
        let resp: GeocodingResponse = serde_json::from_value(body).unwrap();
        assert!(resp.results.is_none());
    }

    #[test]
    fn unit_selectors_render_their_wire_names() {
        assert_eq!(TemperatureUnit::Fahrenheit.as_str(), "fahrenheit");
        assert_eq!(WindSpeedUnit::Ms.as_str(), "ms");
        assert_eq!(PrecipitationUnit::Inch.as_str(), "inch");
        assert_eq!(TimeFormat::Unixtime.as_str(), "unixtime");
    }
}
