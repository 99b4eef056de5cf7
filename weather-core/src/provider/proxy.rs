use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    error::WeatherError,
    model::{Coordinates, Units},
};

use super::{WeatherSource, fetch_json, join_url};

/// Client for the `weather-proxy` HTTP routes. Holds no credential.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherSource for ProxyClient {
    async fn current_by_name(&self, city: &str) -> Result<Value, WeatherError> {
        let request = self.http.get(join_url(&self.base_url, "weather")).query(&[("city", city)]);

        let mut envelope = fetch_json(request, "proxy current weather").await?;

        match envelope.get_mut("weather").map(Value::take) {
            Some(body) if !body.is_null() => Ok(body),
            _ => Err(WeatherError::malformed("proxy envelope has no `weather` body")),
        }
    }

    async fn current_by_coords(
        &self,
        coords: Coordinates,
        units: Units,
    ) -> Result<Value, WeatherError> {
        let request = self.http.get(join_url(&self.base_url, "weather/coords")).query(&[
            ("lat", coords.lat.to_string().as_str()),
            ("lon", coords.lon.to_string().as_str()),
            ("units", units.as_str()),
        ]);

        fetch_json(request, "proxy current weather by coordinates").await
    }

    async fn forecast_by_coords(
        &self,
        coords: Coordinates,
        units: Units,
        count: u8,
    ) -> Result<Value, WeatherError> {
        let request = self.http.get(join_url(&self.base_url, "forecast")).query(&[
            ("lat", coords.lat.to_string().as_str()),
            ("lon", coords.lon.to_string().as_str()),
            ("units", units.as_str()),
            ("cnt", count.to_string().as_str()),
        ]);

        fetch_json(request, "proxy forecast").await
    }
}
