//! Core library for the weather proxy and the `weather` client.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The `WeatherSource` abstraction over the provider and the proxy
//! - Shared domain models (conditions, forecasts, view state)
//! - The sequential search aggregator and date formatting
//!
//! It is used by `weather-proxy` and `weather-cli`.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;

pub use aggregator::{Aggregator, SearchOutcome};
pub use config::{Config, ProviderConfig, ProxyConfig};
pub use error::WeatherError;
pub use model::{
    Condition, Coordinates, CurrentConditions, Forecast, ForecastEntry, Units, ViewState,
    WeatherReport,
};
pub use provider::{WeatherSource, openweather::OpenWeatherProvider, proxy::ProxyClient};
