//! Weather proxy server.
//!
//! # Environment Variables
//!
//! - `OPENWEATHER_API_KEY`: provider credential (overrides the config file)
//! - `OPENWEATHER_BASE_URL`: provider base URL (default: https://api.openweathermap.org)
//! - `WEATHER_PROXY_BIND`: listen address (default: 127.0.0.1:8000)
//! - `RUST_LOG`: log filter (default: info)

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_core::Config;
use weather_proxy::{AppState, create_router};

#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "Weather API proxy")]
struct Args {
    /// Address to listen on, e.g. 0.0.0.0:8000.
    #[arg(long)]
    bind: Option<String>,

    /// Read configuration from this file instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env(|key| std::env::var(key).ok());

    let bind = args.bind.unwrap_or_else(|| config.proxy.bind.clone());
    let addr: SocketAddr =
        bind.parse().with_context(|| format!("Invalid listen address: {bind}"))?;

    let state = AppState::from_config(&config);
    info!(
        provider = %config.provider.base_url,
        credential = state.has_credential(),
        "starting weather proxy"
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
