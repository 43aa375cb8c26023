//! twirpts-core - Object model and analysis passes for the twirpts compiler
//!
//! This crate holds everything that does not depend on the protobuf descriptor
//! types:
//! - [`ApiContext`] and its entities ([`Model`], [`ModelField`], [`Service`],
//!   [`ServiceMethod`], [`Enum`])
//! - [`naming`] rules turning schema names into TypeScript identifiers
//! - [`apply_flags`], the marshal/unmarshal reachability pass
//! - [`GeneratorConfig`] for generator parameters
//! - [`CompileError`] for error handling

mod config;
mod error;
mod model;
pub mod naming;
mod propagate;

pub use config::{GeneratorConfig, RoutePrefix};
pub use error::{CompileError, CompileResult};
pub use model::{
    ApiContext, Enum, MAP_VALUE_FIELD, Model, ModelField, Service, ServiceMethod,
    TIMESTAMP_SENTINEL,
};
pub use propagate::apply_flags;

/// Log levels understood by the generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(CompileError::Config(format!("unknown log level: {other}"))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiContext, CompileError, CompileResult, Enum, GeneratorConfig, LogLevel, Model,
        ModelField, RoutePrefix, Service, ServiceMethod, apply_flags,
    };
}
