use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Units;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_PROXY_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8000";

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_PROVIDER_URL: &str = "OPENWEATHER_BASE_URL";
pub const ENV_PROXY_BIND: &str = "WEATHER_PROXY_BIND";
pub const ENV_PROXY_URL: &str = "WEATHER_PROXY_URL";

/// Settings for the upstream weather provider. Only the proxy reads the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_PROVIDER_URL.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Address the proxy server listens on.
    pub bind: String,
    /// Base URL the client uses to reach the proxy.
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self { bind: DEFAULT_PROXY_BIND.to_string(), url: DEFAULT_PROXY_URL.to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
///
/// [provider]
/// api_key = "..."
///
/// [proxy]
/// url = "http://weather.internal:8000"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Units used by the client for new searches.
    pub units: Units,
    pub provider: ProviderConfig,
    pub proxy: ProxyConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Load from disk and apply process-environment overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.provider.api_key = Some(key);
        }
        if let Some(url) = get(ENV_PROVIDER_URL) {
            self.provider.base_url = url;
        }
        if let Some(bind) = get(ENV_PROXY_BIND) {
            self.proxy.bind = bind;
        }
        if let Some(url) = get(ENV_PROXY_URL) {
            self.proxy.url = url;
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-app", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace the provider API key. Blank keys clear it.
    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.provider.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Returns the provider API key, if present.
    pub fn api_key(&self) -> Option<&str> {
        self.provider.api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_have_no_api_key() {
        let cfg = Config::default();

        assert!(!cfg.has_api_key());
        assert_eq!(cfg.units, Units::Metric);
        assert_eq!(cfg.provider.base_url, DEFAULT_PROVIDER_URL);
        assert_eq!(cfg.proxy.url, DEFAULT_PROXY_URL);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env(env(&[
            (ENV_API_KEY, "ENV_KEY"),
            (ENV_PROXY_BIND, "0.0.0.0:9000"),
            (ENV_PROXY_URL, "http://proxy:9000"),
        ]));

        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
        assert_eq!(cfg.proxy.bind, "0.0.0.0:9000");
        assert_eq!(cfg.proxy.url, "http://proxy:9000");
        assert_eq!(cfg.provider.base_url, DEFAULT_PROVIDER_URL);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env(env(&[(ENV_API_KEY, "  ")]));

        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_api_key_clears_it() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_api_key("   ".into());

        assert!(!cfg.has_api_key());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("units = \"imperial\"\n[provider]\napi_key = \"K\"\n")
            .expect("partial config must parse");

        assert_eq!(cfg.units, Units::Imperial);
        assert_eq!(cfg.api_key(), Some("K"));
        assert_eq!(cfg.provider.base_url, DEFAULT_PROVIDER_URL);
        assert_eq!(cfg.proxy.bind, DEFAULT_PROXY_BIND);
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.units = Units::Imperial;
        cfg.proxy.url = "http://proxy.test".into();
        cfg.save_to(&path).expect("save must succeed");

        let loaded = Config::load_from(&path).expect("load must succeed");
        assert_eq!(loaded.units, Units::Imperial);
        assert_eq!(loaded.proxy.url, "http://proxy.test");
        assert!(!loaded.has_api_key());
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");

        assert!(!cfg.has_api_key());
    }
}
