//! Error types for the twirpts compiler

use thiserror::Error;

/// Result type alias for compiler operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Error type for a single compilation unit
///
/// Every variant aborts the whole unit; nothing is emitted for a file that
/// produced one of these.
#[derive(Error, Debug)]
pub enum CompileError {
    /// A referenced type name has no entry in the model lookup table
    #[error("malformed schema: could not find model of type {type_name} for {context}")]
    MalformedSchema { type_name: String, context: String },

    /// The schema uses a construct the compiler does not handle
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// The object model does not satisfy the renderer's expectations
    #[error("render error: {0}")]
    Render(String),

    /// Invalid generator configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing into the output buffer failed
    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl CompileError {
    /// Shorthand for a missing lookup entry
    pub fn missing_model(type_name: impl Into<String>, context: impl Into<String>) -> Self {
        CompileError::MalformedSchema {
            type_name: type_name.into(),
            context: context.into(),
        }
    }

    /// Short machine-readable kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::MalformedSchema { .. } => "malformed_schema",
            CompileError::UnsupportedShape(_) => "unsupported_shape",
            CompileError::Render(_) => "render",
            CompileError::Config(_) => "config",
            CompileError::Fmt(_) => "fmt",
        }
    }
}

impl From<toml::de::Error> for CompileError {
    fn from(err: toml::de::Error) -> Self {
        CompileError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::Config(err.to_string())
    }
}
