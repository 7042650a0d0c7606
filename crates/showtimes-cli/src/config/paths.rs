//! Config file location.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name under the config base.
const APP_DIR: &str = "showtimes";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - `--dir` given: `{dir}/config.toml`.
/// - `XDG_CONFIG_HOME` set to an absolute path: `$XDG_CONFIG_HOME/showtimes/config.toml`.
/// - Otherwise: `$HOME/.config/showtimes/config.toml`.
///
/// # Errors
///
/// Returns an error if no `--dir` is given and neither variable yields a base directory.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Resolves the path from explicit inputs.
///
/// A relative or empty `XDG_CONFIG_HOME` is ignored, as the XDG base
/// directory rules require.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let base = match xdg_config_home.map(PathBuf::from) {
        Some(xdg) if xdg.is_absolute() => xdg,
        _ => home
            .filter(|h| !h.is_empty())
            .map(|h| PathBuf::from(h).join(".config"))
            .context("cannot locate config: set --dir, XDG_CONFIG_HOME or HOME")?,
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}
