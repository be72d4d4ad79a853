//! Loading the TOML configuration file.

use anyhow::{Context, Result};
use jobgeo_core::Config;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a [`Config`] from a TOML file.
///
/// Missing sections and fields keep their defaults.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Config for this run: the given file, or defaults when none is given,
/// with the command-line threshold applied on top.
pub fn resolve_config(path: Option<&Path>, threshold: Option<u8>) -> Result<Config> {
    let mut config = match path {
        Some(p) => load_from_file(p)?,
        None => Config::default(),
    };
    if let Some(t) = threshold {
        config.resolver.match_threshold = t;
    }
    Ok(config)
}
