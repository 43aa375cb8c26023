//! Dynamic log level reloading support
//!
//! Logging is installed before the generator parameters are parsed, so that
//! parameter warnings are visible. The configured level is applied afterwards
//! through this handle.

use crate::filter::env_filter;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::{EnvFilter, Registry, reload};
use twirpts_core::LogLevel;

/// Error type for level changes
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// No subscriber was installed through this handle
    #[error("reload handle not initialized")]
    NotInitialized,

    /// The subscriber owning the filter is gone
    #[error("failed to reload filter: {0}")]
    Reload(#[from] reload::Error),
}

/// Handle for dynamically reloading the log filter
pub struct ReloadHandle {
    handle: Mutex<Option<reload::Handle<EnvFilter, Registry>>>,
}

impl ReloadHandle {
    /// Create a new reload handle
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Set the reload handle (called during initialization)
    pub fn set_handle(&self, handle: reload::Handle<EnvFilter, Registry>) {
        *self.handle.lock() = Some(handle);
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Switch to `level`, still letting `RUST_LOG` take precedence
    pub fn reload_level(&self, level: LogLevel) -> Result<(), ReloadError> {
        self.reload_filter(env_filter(level))
    }

    /// Replace the active filter
    pub fn reload_filter(&self, filter: EnvFilter) -> Result<(), ReloadError> {
        let guard = self.handle.lock();
        let handle = guard.as_ref().ok_or(ReloadError::NotInitialized)?;
        handle.reload(filter)?;
        Ok(())
    }

    /// Directives of the active filter, if a subscriber is installed
    pub fn current_directives(&self) -> Option<String> {
        let guard = self.handle.lock();
        guard
            .as_ref()
            .and_then(|handle| handle.with_current(|filter| filter.to_string()).ok())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
