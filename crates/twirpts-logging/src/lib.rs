//! twirpts-logging - Diagnostic logging for the twirpts generator
//!
//! This crate provides:
//! - [`init_logging`] installing a `tracing` fmt subscriber on **stderr**
//!   (stdout carries the protoc response)
//! - [`ReloadHandle`] to change the level once the configuration is known
//! - Level filtering that honors `RUST_LOG`

mod filter;
mod reload;

pub use filter::{build_filter, env_filter, level_filter};
pub use reload::{ReloadError, ReloadHandle};
pub use twirpts_core::LogLevel;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload as tracing_reload};

/// Install the global subscriber at `level`.
///
/// Returns `false` when a global subscriber was already set; the existing one
/// is left untouched.
pub fn init_logging(level: LogLevel) -> bool {
    let (filter, handle) = tracing_reload::Layer::new(env_filter(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false),
        )
        .try_init()
        .is_ok();

    if installed {
        ReloadHandle::global().set_handle(handle);
    }
    installed
}

/// Change the level of the subscriber installed by [`init_logging`]
pub fn set_log_level(level: LogLevel) -> Result<(), ReloadError> {
    ReloadHandle::global().reload_level(level)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging, set_log_level};
}
