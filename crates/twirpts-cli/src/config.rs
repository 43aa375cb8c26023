//! Generator configuration loading for the subcommands

use anyhow::{Context, Result};
use std::path::Path;
use twirpts_core::GeneratorConfig;

/// Load the configuration file, if any, apply command-line overrides, and
/// switch logging to the configured level.
pub fn load(path: Option<&Path>, twirp_version: Option<String>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => from_file(path)?,
        None => GeneratorConfig::new(),
    };

    if twirp_version.is_some() {
        config.twirp_version = twirp_version;
    }
    config.validate().context("Invalid generator configuration")?;

    apply_log_level(&config)?;
    Ok(config)
}

/// Load a TOML configuration file
pub fn from_file(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    GeneratorConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Reload the subscriber installed at startup with the configured level
pub fn apply_log_level(config: &GeneratorConfig) -> Result<()> {
    let level = config.log_level()?;
    if let Err(e) = twirpts_logging::set_log_level(level) {
        tracing::debug!(error = %e, "log level not applied");
    }
    Ok(())
}
