use std::time::Duration;

use crate::rate_limit::RateLimitRule;

/// Base URLs for the Open-Meteo API family.
///
/// The defaults point at the public hosted service; [`Endpoints::with_base`]
/// roots every path at a single host instead, which is how self-hosted
/// instances (and the integration tests) are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub forecast: String,
    pub historical: String,
    pub marine: String,
    pub air_quality: String,
    pub geocoding: String,
    pub elevation: String,
    pub flood: String,
    pub ensemble: String,
    pub climate: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: "https://api.open-meteo.com/v1/forecast".to_string(),
            historical: "https://archive-api.open-meteo.com/v1/archive".to_string(),
            marine: "https://marine-api.open-meteo.com/v1/marine".to_string(),
            air_quality: "https://air-quality-api.open-meteo.com/v1/air-quality".to_string(),
            geocoding: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            elevation: "https://api.open-meteo.com/v1/elevation".to_string(),
            flood: "https://flood-api.open-meteo.com/v1/flood".to_string(),
            ensemble: "https://ensemble-api.open-meteo.com/v1/ensemble".to_string(),
            climate: "https://climate-api.open-meteo.com/v1/climate".to_string(),
        }
    }
}

impl Endpoints {
    /// All nine endpoints rooted at one base URL.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            forecast: format!("{base}/v1/forecast"),
            historical: format!("{base}/v1/archive"),
            marine: format!("{base}/v1/marine"),
            air_quality: format!("{base}/v1/air-quality"),
            geocoding: format!("{base}/v1/search"),
            elevation: format!("{base}/v1/elevation"),
            flood: format!("{base}/v1/flood"),
            ensemble: format!("{base}/v1/ensemble"),
            climate: format!("{base}/v1/climate"),
        }
    }
}

/// Default rate limits following the service's fair-use policy: 600
/// requests per minute, 5000 per hour and 10000 per day, all applied
/// simultaneously.
pub fn default_rate_limits() -> Vec<RateLimitRule> {
    vec![
        RateLimitRule::new(600, Duration::from_secs(60)),
        RateLimitRule::new(5_000, Duration::from_secs(3_600)),
        RateLimitRule::new(10_000, Duration::from_secs(86_400)),
    ]
}

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
