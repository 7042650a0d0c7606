//! Application configuration module.
//!
//! Manages the TOML config file holding API endpoints, the OMDb key,
//! the placeholder area and the default area.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, OMDB_API_KEY_ENV};
pub use paths::resolve_config_path;
