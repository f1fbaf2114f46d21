use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{ApiKey, Config, ForecastClient, PostalCode, config::API_KEY_ENV};
use inquire::{CustomUserError, Password, PasswordDisplayMode, Text, validator::Validation};
use tracing::{debug, info};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "One-day forecast headline for a US zip code")]
pub struct Cli {
    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the AccuWeather API key and an optional default zip code.
    Configure,

    /// Show the forecast headline for a zip code.
    Show {
        /// 5-digit US zip code; falls back to the configured default.
        postal_code: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { postal_code } => show(postal_code),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("AccuWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
            Ok(match ApiKey::new(input) {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()
        .context("Failed to read API key")?;

    let postal_code = Text::new("Default zip code (leave empty for none):")
        .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
            if input.is_empty() {
                return Ok(Validation::Valid);
            }
            Ok(match input.parse::<PostalCode>() {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()
        .context("Failed to read default zip code")?;

    cfg.api_key = Some(api_key);
    cfg.default_postal_code = (!postal_code.is_empty()).then_some(postal_code);

    let path = cfg.save()?;
    info!(path = %path.display(), "saved configuration");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn show(postal_code: Option<String>) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let api_key = cfg.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
    let postal_code = cfg.resolve_postal_code(postal_code)?;

    let client = ForecastClient::new(api_key)?;
    debug!(%postal_code, "requesting forecast");

    let headline = client
        .get_forecast(&postal_code)
        .with_context(|| format!("Could not get the forecast for zip code {postal_code}"))?;

    println!("{headline}");
    Ok(())
}
