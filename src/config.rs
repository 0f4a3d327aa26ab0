//! Application configuration.
//!
//! Settings are resolved from, in order of precedence: command-line flags,
//! `COMMIT_TRACKER_*` environment variables, the config file, and built-in
//! defaults.

use crate::consts::cli_consts::refresh::{MAX_REFRESH_INTERVAL_SECS, refresh_interval};
use crate::environment::{DEFAULT_ORIGIN, Environment};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

pub const ENV_ENVIRONMENT: &str = "COMMIT_TRACKER_ENVIRONMENT";
pub const ENV_API_URL: &str = "COMMIT_TRACKER_API_URL";
pub const ENV_ORIGIN: &str = "COMMIT_TRACKER_ORIGIN";

/// Persisted settings. Every field is optional so a partial file is valid.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Like [`Config::load_from_file`], but a missing file yields the empty config.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Path of the config file, `~/.commit-tracker/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(".commit-tracker").join("config.json"))
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub environment: Option<Environment>,
    pub api_url: Option<String>,
    pub refresh_secs: Option<u64>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub environment: Environment,
    /// Explicit base URL; replaces the environment profile when set.
    pub api_url: Option<String>,
    pub origin: String,
    pub refresh_interval: Duration,
}

impl Settings {
    /// Resolves settings; `lookup` reads environment variables.
    pub fn resolve<F>(cli: &CliOverrides, lookup: F, file: &Config) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = cli
            .environment
            .or_else(|| non_empty(ENV_ENVIRONMENT).and_then(|v| v.parse().ok()))
            .or_else(|| {
                file.environment
                    .as_deref()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or_default();

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| non_empty(ENV_API_URL))
            .or_else(|| file.api_url.clone());

        let origin = non_empty(ENV_ORIGIN)
            .or_else(|| file.origin.clone())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        let positive = |secs: Option<u64>| secs.filter(|secs| *secs > 0);
        let refresh_interval = positive(cli.refresh_secs)
            .or(positive(file.refresh_interval_secs))
            .map(|secs| {
                if secs > MAX_REFRESH_INTERVAL_SECS {
                    warn!(
                        "refresh period of {}s capped to {}s",
                        secs, MAX_REFRESH_INTERVAL_SECS
                    );
                }
                Duration::from_secs(secs.min(MAX_REFRESH_INTERVAL_SECS))
            })
            .unwrap_or(refresh_interval());

        Self {
            environment,
            api_url,
            origin,
            refresh_interval,
        }
    }

    /// Resolves settings from the process environment and the config file at `path`.
    pub fn load(cli: &CliOverrides, path: &Path) -> Result<Self, std::io::Error> {
        let file = Config::load_or_default(path)?;
        Ok(Self::resolve(cli, |name| std::env::var(name).ok(), &file))
    }

    /// Base URL every request is built on.
    pub fn base_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.clone(),
            None => self.environment.resolve_base_url(&self.origin),
        }
    }

    /// The settings in their persisted form.
    pub fn to_config(&self) -> Config {
        Config {
            environment: Some(self.environment.to_string()),
            api_url: self.api_url.clone(),
            origin: Some(self.origin.clone()),
            refresh_interval_secs: Some(self.refresh_interval.as_secs()),
        }
    }
}
