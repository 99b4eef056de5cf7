//! Request query parameters and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use weather_core::Units;

pub const DEFAULT_CITY: &str = "Nairobi";
pub const SUCCESS_MESSAGE: &str = "Weather data fetched successfully";
pub const FAILURE_MESSAGE: &str = "Error fetching weather data";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

impl CityQuery {
    /// Requested city, or [`DEFAULT_CITY`] when the parameter is absent.
    /// A present but empty value is forwarded as-is.
    pub fn city_or_default(self) -> String {
        self.city.unwrap_or_else(|| DEFAULT_CITY.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoordsQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub units: Units,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub units: Units,
    pub cnt: Option<u8>,
}

/// `200` body of `GET /weather`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEnvelope {
    pub message: String,
    pub city: String,
    pub weather: Value,
}

impl WeatherEnvelope {
    pub fn new(city: String, weather: Value) -> Self {
        Self { message: SUCCESS_MESSAGE.to_string(), city, weather }
    }
}

/// Body of every failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), error: None }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
