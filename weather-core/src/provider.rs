use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, Units},
    provider::{openweather::OpenWeatherProvider, proxy::ProxyClient},
};
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;
pub mod proxy;

/// The three provider resources the aggregator consumes.
///
/// Implementations return the JSON body exactly as received on success.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Current weather by city name. The body carries `coord.{lat,lon}`.
    async fn current_by_name(&self, city: &str) -> Result<Value, WeatherError>;

    async fn current_by_coords(
        &self,
        coords: Coordinates,
        units: Units,
    ) -> Result<Value, WeatherError>;

    async fn forecast_by_coords(
        &self,
        coords: Coordinates,
        units: Units,
        count: u8,
    ) -> Result<Value, WeatherError>;
}

/// Construct the direct provider client. Fails without sending anything when
/// no API key is configured.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.api_key().ok_or(WeatherError::MissingCredential)?;
    Ok(OpenWeatherProvider::new(api_key.to_owned(), &config.provider.base_url))
}

/// Construct the source the client uses: the proxy, never the provider.
pub fn source_from_config(config: &Config) -> Box<dyn WeatherSource> {
    Box::new(ProxyClient::new(&config.proxy.url))
}

/// Send `request` and return the parsed JSON body of a 2xx response.
pub(crate) async fn fetch_json(request: RequestBuilder, what: &str) -> Result<Value, WeatherError> {
    // reqwest errors carry the full URL, which includes `appid`.
    let res = request.send().await.map_err(|e| WeatherError::Network(e.without_url()))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| WeatherError::Network(e.without_url()))?;

    if !status.is_success() {
        tracing::debug!(%status, what, "upstream returned an error status");
        return Err(WeatherError::Upstream { status: status.as_u16(), body });
    }

    serde_json::from_str(&body)
        .map_err(|e| WeatherError::malformed(format!("{what}: body is not JSON: {e}")))
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
