//! Application settings loaded from `config.toml` and the environment.
//!
//! Every field has a default, so the file is optional. Environment variables
//! (`DATABASE_URL`, `BIND_ADDRESS`, `PORT`, `SEED_SAMPLE_DATA`) win over the
//! file, which lets `.env` files and container environments override it.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default path of the optional configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Runtime settings of the API server
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Host the HTTP listener binds to
    pub bind_address: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Seed sample rooms, categories and devices into an empty database
    pub seed_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: "0.0.0.0".to_string(),
            port: 5555,
            seed_sample_data: false,
        }
    }
}

impl Settings {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Applies overrides from a variable lookup (normally `std::env::var`).
    ///
    /// # Errors
    /// Returns an error if `PORT` or `SEED_SAMPLE_DATA` cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(address) = lookup("BIND_ADDRESS") {
            self.bind_address = address;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT {port:?}: {e}"),
            })?;
        }
        if let Some(seed) = lookup("SEED_SAMPLE_DATA") {
            self.seed_sample_data = parse_flag(&seed).ok_or_else(|| Error::Config {
                message: format!("Invalid SEED_SAMPLE_DATA {seed:?}"),
            })?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads settings the way the server does at startup.
///
/// Reads the file named by `CONFIG_PATH` (default `config.toml`) if it exists,
/// falls back to defaults otherwise, then applies environment overrides.
///
/// # Errors
/// Returns an error if an existing config file is invalid or an override cannot be parsed.
pub fn load_app_settings() -> Result<Settings> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut settings = if Path::new(&path).exists() {
        load_settings(&path)?
    } else {
        tracing::info!("No config file at {}, using defaults", path);
        Settings::default()
    };

    settings.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(settings)
}
