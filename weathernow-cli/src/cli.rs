use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, Select, Text};
use weathernow_core::{
    Config, ConfiguredLocation, Orchestrator, Phase, TemperatureUnit, provider::provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather and highlights")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, default units and home location.
    Configure,

    /// Show weather for a place, or for your configured location if none is given.
    Show {
        /// City or free-text location.
        location: Option<String>,

        /// "metric" or "imperial"; defaults to the configured unit system.
        #[arg(long)]
        units: Option<TemperatureUnit>,

        /// Print the raw snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start at your location, then search and switch units from a menu.
    Interactive {
        /// "metric" or "imperial"; defaults to the configured unit system.
        #[arg(long)]
        units: Option<TemperatureUnit>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, units, json } => {
                let config = Config::load()?;
                let orch = orchestrator(&config, units)?;
                show(&orch, location.as_deref(), json).await
            }
            Command::Interactive { units } => {
                let config = Config::load()?;
                let orch = orchestrator(&config, units)?;
                interactive(&orch).await
            }
        }
    }
}

fn orchestrator(config: &Config, units: Option<TemperatureUnit>) -> anyhow::Result<Orchestrator> {
    let provider = provider_from_config(config)?;
    let locator = Arc::new(ConfiguredLocation::new(config.location.clone()));
    Ok(Orchestrator::new(provider, locator, units.unwrap_or(config.units)))
}

async fn show(orch: &Orchestrator, location: Option<&str>, json: bool) -> anyhow::Result<()> {
    match location {
        Some(text) if !text.trim().is_empty() => orch.search(text).await,
        _ => orch.mount().await,
    }

    let view = orch.view();
    if let Phase::Error(message) = view.phase() {
        anyhow::bail!(message);
    }

    let snapshot = view.snapshot.context("No weather data was loaded")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    } else {
        print!("{}", render::snapshot(&snapshot, view.unit));
    }

    Ok(())
}

const SEARCH: &str = "Search a city";
const LOCATE: &str = "Use my location";
const TOGGLE: &str = "Switch units";
const DISMISS: &str = "Dismiss error";
const QUIT: &str = "Quit";

async fn interactive(orch: &Orchestrator) -> anyhow::Result<()> {
    orch.mount().await;

    loop {
        let view = orch.view();
        println!("{}", render::view(&view));

        let mut actions = vec![SEARCH, LOCATE, TOGGLE];
        if view.fetch.error_message.is_some() {
            actions.push(DISMISS);
        }
        actions.push(QUIT);

        let prompt = format!("Action ({})", view.unit);
        let choice = Select::new(&prompt, actions).prompt()?;

        match choice {
            SEARCH => {
                let text = Text::new("City:").prompt()?;
                orch.search(&text).await;
            }
            LOCATE => orch.use_my_location().await,
            TOGGLE => orch.set_unit(orch.unit().toggled()).await,
            DISMISS => orch.dismiss_error(),
            _ => return Ok(()),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key (leave empty to keep the current one):")
        .without_confirmation()
        .prompt()?;
    if !key.trim().is_empty() {
        config.api_key = Some(key.trim().to_string());
    }

    let units = TemperatureUnit::all().to_vec();
    let current = units.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Default units:", units).with_starting_cursor(current).prompt()?;

    config.location.enabled = Confirm::new("Allow using your location?")
        .with_default(config.location.enabled)
        .prompt()?;

    if config.location.enabled {
        let mut latitude = CustomType::<f64>::new("Home latitude:");
        if let Some(lat) = config.location.latitude {
            latitude = latitude.with_default(lat);
        }
        config.location.latitude = Some(latitude.prompt()?);

        let mut longitude = CustomType::<f64>::new("Home longitude:");
        if let Some(lon) = config.location.longitude {
            longitude = longitude.with_default(lon);
        }
        config.location.longitude = Some(longitude.prompt()?);
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
