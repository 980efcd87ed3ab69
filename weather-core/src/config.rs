use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::provider::Endpoint;

/// Configuration for a single endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Endpoint selected on start, "test" or "live".
    pub default_endpoint: Option<String>,

    /// Example TOML:
    /// [endpoints.live]
    /// url = "https://..."
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointConfig>,

    /// URLs taken from the process environment. Never written back to disk.
    #[serde(skip)]
    overrides: HashMap<Endpoint, String>,
}

impl Config {
    /// Endpoint to select on start. Falls back to [`Endpoint::Test`] when
    /// nothing is configured.
    pub fn initial_endpoint(&self) -> Result<Endpoint> {
        match self.default_endpoint.as_deref() {
            Some(s) => Endpoint::try_from(s).with_context(|| {
                format!("Invalid default_endpoint in {}", Self::display_path())
            }),
            None => Ok(Endpoint::default()),
        }
    }

    pub fn set_default_endpoint(&mut self, endpoint: Endpoint) {
        self.default_endpoint = Some(endpoint.as_str().to_string());
    }

    /// Load config from disk (or start empty), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Load only what is on disk; an absent file is an empty config.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-or-not", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn display_path() -> String {
        Self::config_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "config".to_string())
    }

    /// Set/replace an endpoint URL. The first endpoint configured becomes the default.
    pub fn upsert_endpoint_url(&mut self, endpoint: Endpoint, url: String) {
        self.endpoints.insert(endpoint.as_str().to_string(), EndpointConfig { url });

        if self.default_endpoint.is_none() {
            self.default_endpoint = Some(endpoint.to_string());
        }
    }

    /// Record URLs found in the environment. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for &endpoint in Endpoint::all() {
            if let Some(url) = lookup(endpoint.env_var()).filter(|v| !v.trim().is_empty()) {
                self.overrides.insert(endpoint, url.trim().to_string());
            }
        }
    }

    /// URL for an endpoint: environment first, then the config file, then
    /// whatever was baked in at build time.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Option<&str> {
        self.overrides
            .get(&endpoint)
            .map(String::as_str)
            .or_else(|| self.endpoints.get(endpoint.as_str()).map(|cfg| cfg.url.as_str()))
            .or_else(|| endpoint.baked_url())
    }

    pub fn is_endpoint_configured(&self, endpoint: Endpoint) -> bool {
        self.endpoint_url(endpoint).is_some()
    }
}
