use crate::catalog::{self, DEFAULT_BASE_URL};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from `~/.config/fq-playground/config.toml`.
/// The file is never written by the playground.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Example values for path parameters, by placeholder name
    #[serde(default)]
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// API base URL for requests
    pub base_url: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir().ok_or_else(|| eyre!("Could not find home directory"))?;

        Ok(home_dir
            .join(".config")
            .join("fq-playground")
            .join("config.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a file, or return default if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml(&contents)
            .wrap_err_with(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse and validate config text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;

        if let Some(base_url) = &config.server.base_url {
            validate_url(base_url).map_err(|e| eyre!("server.base_url: {e}"))?;
        }

        Ok(config)
    }

    /// Base URL for the session: command line first, then config, then the
    /// built-in default
    pub fn resolve_base_url(&self, cli_base_url: Option<String>) -> String {
        cli_base_url
            .or_else(|| self.server.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Built-in example parameter values, overridden by the config's `[params]`
    pub fn seeded_params(&self) -> HashMap<String, String> {
        let mut params = catalog::example_params();
        params.extend(self.params.clone());
        params
    }
}

/// Check that a base URL is an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<(), String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| format!("Invalid URL: {e}"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!(
            "URL must start with http:// or https:// (got {other}://)"
        )),
    }
}
