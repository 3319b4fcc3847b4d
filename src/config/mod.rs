//! Configuration loading and validation
//!
//! Precedence is CLI arguments over environment variables over compiled-in
//! defaults. Provider keys and the timeout pick up their environment values
//! through clap; color and `.env` handling live here.

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::probe::ProbeTarget;
use crate::providers::{GeoProvider, IpProvider};
use std::path::Path;
use std::time::Duration;

/// Environment variable controlling color when no CLI flag is given
pub const ENV_ENABLE_COLOR: &str = "NETCHECK_ENABLE_COLOR";

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub ip_provider: IpProvider,
    pub geo_provider: GeoProvider,
    pub timeout: Duration,
    pub enable_color: bool,
    pub verbose: bool,
    pub debug: bool,
    pub probe_targets: Vec<ProbeTarget>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip_provider: IpProvider::default(),
            geo_provider: GeoProvider::default(),
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
            verbose: false,
            debug: false,
            probe_targets: crate::default_probe_targets(),
        }
    }
}

/// Load .env file from the current directory if one exists
pub fn load_env_file(debug: bool) -> Result<()> {
    if Path::new(".env").exists() {
        dotenv::from_filename(".env")
            .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

        if debug {
            eprintln!("Loaded configuration from .env file");
        }
    }
    Ok(())
}

/// Build the effective configuration from parsed CLI arguments
pub fn load_config(cli: &Cli) -> Result<Config> {
    cli.validate().map_err(AppError::validation)?;

    let ip_provider = match cli.ip_provider.as_deref() {
        Some(key) => key.parse::<IpProvider>()?,
        None => IpProvider::default(),
    };

    let geo_provider = match cli.geo_provider.as_deref() {
        Some(key) => key.parse::<GeoProvider>()?,
        None => GeoProvider::default(),
    };

    let enable_color = resolve_color(cli, std::env::var(ENV_ENABLE_COLOR).ok().as_deref())?;

    let config = Config {
        ip_provider,
        geo_provider,
        timeout: Duration::from_secs(cli.timeout),
        enable_color,
        verbose: cli.verbose,
        debug: cli.debug,
        probe_targets: crate::default_probe_targets(),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Decide color output: explicit flags win, then the environment variable,
/// then terminal detection
fn resolve_color(cli: &Cli, env_value: Option<&str>) -> Result<bool> {
    if cli.color {
        return Ok(true);
    }
    if cli.no_color {
        return Ok(false);
    }

    match env_value {
        Some(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(AppError::config(format!(
                "Invalid {} value '{}' (expected true or false)",
                ENV_ENABLE_COLOR, other
            ))),
        },
        None => Ok(cli.use_colors()),
    }
}

/// Sanity checks on the assembled configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.timeout.is_zero() || config.timeout > Duration::from_secs(300) {
        return Err(AppError::config(
            "Timeout must be between 1 and 300 seconds",
        ));
    }
    if config.probe_targets.is_empty() {
        return Err(AppError::config("Probe target list must not be empty"));
    }
    for target in &config.probe_targets {
        let parsed = url::Url::parse(&target.url).map_err(|e| {
            AppError::config(format!("Invalid probe URL '{}': {}", target.url, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::config(format!(
                "Probe URL must be http(s): {}",
                target.url
            )));
        }
    }
    Ok(())
}
