//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `omdb.api_key`.
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

/// Area ID Finnkino uses for its "choose an area" entry.
const DEFAULT_PLACEHOLDER_AREA: &str = "1029";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Finnkino listings API settings.
    #[serde(default)]
    pub finnkino: FinnkinoConfig,
    /// OMDb API settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
    /// Area selection settings.
    #[serde(default)]
    pub areas: AreasConfig,
}

/// Finnkino listings API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinnkinoConfig {
    /// Base URL override (default: `https://www.finnkino.fi/xml/`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Area ID that stands for "no area selected".
    #[serde(default = "default_placeholder_area")]
    pub placeholder_area: String,
}

impl Default for FinnkinoConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            placeholder_area: default_placeholder_area(),
        }
    }
}

/// OMDb API configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// Base URL override (default: `https://www.omdbapi.com/`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key. `OMDB_API_KEY` takes precedence.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Area selection configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AreasConfig {
    /// Area used by `shows` when `--area` is omitted.
    #[serde(default)]
    pub default: Option<String>,
}

fn default_placeholder_area() -> String {
    String::from(DEFAULT_PLACEHOLDER_AREA)
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the OMDb API key, preferring `env_value` over the config file.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source provides a key.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.omdb
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
            .with_context(|| {
                format!("OMDb API key is required: set {OMDB_API_KEY_ENV} or omdb.api_key in config")
            })
    }
}
