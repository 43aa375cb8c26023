//! Generator configuration types

use crate::{CompileError, CompileResult, LogLevel};
use serde::{Deserialize, Serialize};

/// Twirp protocol version whose servers mount routes without a prefix
const UNPREFIXED_TWIRP_VERSION: &str = "v6";

/// Generator configuration
///
/// Built from the protoc parameter string (`version=v6,log_level=debug`) or
/// from a TOML file passed to the `generate` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Twirp version of the target server; selects the route prefix
    #[serde(default, alias = "version")]
    pub twirp_version: Option<String>,

    /// Log level for the generator itself
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            twirp_version: None,
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Keys accepted in the protoc parameter string
    const PARAMETER_KEYS: [&'static str; 3] = ["version", "twirp_version", "log_level"];

    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-separated `key=value` parameter string protoc forwards
    /// from `--twirp_ts_opt`.
    ///
    /// Unknown keys are ignored with a warning so that options meant for
    /// other collaborators do not break generation.
    pub fn from_parameter(parameter: &str) -> CompileResult<Self> {
        let mut values = serde_json::Map::new();

        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                return Err(CompileError::Config(format!(
                    "parameter '{part}' is not of the form key=value"
                )));
            };
            let key = key.trim();

            if !Self::PARAMETER_KEYS.contains(&key) {
                tracing::warn!(key, "ignoring unknown generator parameter");
                continue;
            }

            values.insert(
                key.to_string(),
                serde_json::Value::String(value.trim().to_string()),
            );
        }

        let config: Self = serde_json::from_value(serde_json::Value::Object(values))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> CompileResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field holds a usable value
    pub fn validate(&self) -> CompileResult<()> {
        if let Some(version) = &self.twirp_version {
            if version.is_empty() {
                return Err(CompileError::Config("twirp version cannot be empty".into()));
            }
        }
        self.log_level()?;
        Ok(())
    }

    /// Parsed log level
    pub fn log_level(&self) -> CompileResult<LogLevel> {
        self.log_level.parse()
    }

    /// Route prefix generated clients put in front of `/<package>.<Service>/`
    pub fn route_prefix(&self) -> RoutePrefix {
        match self.twirp_version.as_deref() {
            Some(UNPREFIXED_TWIRP_VERSION) => RoutePrefix::None,
            _ => RoutePrefix::Twirp,
        }
    }
}

/// Route-prefix convention of the target server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePrefix {
    /// Routes are mounted under `/twirp`
    #[default]
    Twirp,
    /// Routes are mounted at the root
    None,
}

impl RoutePrefix {
    /// Literal prefix text
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutePrefix::Twirp => "/twirp",
            RoutePrefix::None => "",
        }
    }
}

impl std::fmt::Display for RoutePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
