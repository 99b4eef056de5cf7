use std::sync::Arc;

use weather_core::{Config, WeatherError, WeatherSource, provider::provider_from_config};

use crate::error::ProxyError;

/// Shared handler state. `provider` is `None` when no API key is configured;
/// every weather route then answers 500 without calling out.
#[derive(Debug, Clone)]
pub struct AppState {
    provider: Option<Arc<dyn WeatherSource>>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn WeatherSource>>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Self {
        match provider_from_config(config) {
            Ok(provider) => Self::new(Some(Arc::new(provider))),
            Err(err) => {
                tracing::warn!(error = %err, "starting without a provider credential");
                Self::new(None)
            }
        }
    }

    pub fn has_credential(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Result<&dyn WeatherSource, ProxyError> {
        self.provider.as_deref().ok_or(ProxyError::Source(WeatherError::MissingCredential))
    }
}
