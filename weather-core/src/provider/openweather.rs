use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    error::WeatherError,
    model::{Coordinates, Units},
};

use super::{WeatherSource, fetch_json, join_url};

/// Direct client for the OpenWeather 2.5 API. Holds the credential, so only
/// the proxy should construct one.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn weather_url(&self) -> String {
        join_url(&self.base_url, "data/2.5/weather")
    }

    fn forecast_url(&self) -> String {
        join_url(&self.base_url, "data/2.5/forecast")
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherProvider {
    async fn current_by_name(&self, city: &str) -> Result<Value, WeatherError> {
        tracing::debug!(city, "OpenWeather current weather by name");

        let request = self.http.get(self.weather_url()).query(&[
            ("q", city),
            ("appid", self.api_key.as_str()),
            ("units", Units::Metric.as_str()),
        ]);

        fetch_json(request, "OpenWeather current weather").await
    }

    async fn current_by_coords(
        &self,
        coords: Coordinates,
        units: Units,
    ) -> Result<Value, WeatherError> {
        tracing::debug!(%coords, %units, "OpenWeather current weather by coordinates");

        let request = self.http.get(self.weather_url()).query(&[
            ("lat", coords.lat.to_string().as_str()),
            ("lon", coords.lon.to_string().as_str()),
            ("units", units.as_str()),
            ("appid", self.api_key.as_str()),
        ]);

        fetch_json(request, "OpenWeather current weather").await
    }

    async fn forecast_by_coords(
        &self,
        coords: Coordinates,
        units: Units,
        count: u8,
    ) -> Result<Value, WeatherError> {
        tracing::debug!(%coords, %units, count, "OpenWeather forecast by coordinates");

        let request = self.http.get(self.forecast_url()).query(&[
            ("lat", coords.lat.to_string().as_str()),
            ("lon", coords.lon.to_string().as_str()),
            ("units", units.as_str()),
            ("cnt", count.to_string().as_str()),
            ("appid", self.api_key.as_str()),
        ]);

        fetch_json(request, "OpenWeather forecast").await
    }
}
