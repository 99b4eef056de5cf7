use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use weather_core::{
    Aggregator, Config, SearchOutcome, Units, ViewState, provider::source_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Proxy base URL; overrides the config file and WEATHER_PROXY_URL.
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure proxy URL, default units and the proxy's provider API key.
    Configure,

    /// Show current weather and the next forecast periods for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// "metric" or "imperial"; defaults to the configured units.
        #[arg(long)]
        units: Option<Units>,
    },

    /// Search repeatedly; `:units` toggles units, `:quit` exits.
    Interactive {
        #[arg(long)]
        units: Option<Units>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli { proxy, command, .. } = self;

        match command {
            Command::Configure => configure(),
            Command::Show { city, units } => {
                let config = client_config(proxy)?;
                show(&config, &city, units.unwrap_or(config.units)).await
            }
            Command::Interactive { units } => {
                let config = client_config(proxy)?;
                interactive(&config, units.unwrap_or(config.units)).await
            }
        }
    }
}

fn client_config(proxy: Option<String>) -> Result<Config> {
    let mut config = Config::load_with_env()?;
    if let Some(url) = proxy {
        config.proxy.url = url;
    }
    tracing::debug!(proxy = %config.proxy.url, "using proxy");
    Ok(config)
}

fn aggregator(config: &Config, units: Units) -> Aggregator {
    Aggregator::new(Arc::from(source_from_config(config)), units)
}

async fn show(config: &Config, city: &str, units: Units) -> Result<()> {
    let agg = aggregator(config, units);

    eprintln!("{}", render::view(&ViewState::Loading, units));

    match agg.search(city).await {
        SearchOutcome::Ignored => bail!("Please enter a city name."),
        SearchOutcome::Applied(ViewState::Error(msg)) => bail!(msg),
        SearchOutcome::Applied(state) => {
            println!("{}", render::view(&state, agg.units()));
            Ok(())
        }
        SearchOutcome::Superseded => Ok(()),
    }
}

async fn interactive(config: &Config, units: Units) -> Result<()> {
    let agg = aggregator(config, units);
    println!("{}", render::view(&agg.state(), agg.units()));

    loop {
        let input = match Text::new("City:")
            .with_help_message(":units toggles °C/°F, :quit exits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":units" | ":u" => {
                let units = agg.toggle_units();
                println!("Units: {units} ({})", render::switch_hint(units));
                // Already-fetched data is re-labelled, not re-fetched.
                if agg.state().report().is_some() {
                    println!("{}", render::view(&agg.state(), units));
                }
            }
            "" => continue,
            city => {
                println!("{}", render::view(&ViewState::Loading, agg.units()));
                agg.search(city).await;
                println!("{}", render::view(&agg.state(), agg.units()));
            }
        }
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("Proxy URL:").with_default(&config.proxy.url).prompt()?;
    config.proxy.url = url.trim().to_string();

    let current = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Default units:", Units::all().to_vec())
        .with_starting_cursor(current)
        .prompt()?;

    let api_key = Password::new("Provider API key for weather-proxy on this host (blank keeps current):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
