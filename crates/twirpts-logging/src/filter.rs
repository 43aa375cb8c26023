//! Level filters built from a [`LogLevel`]

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use twirpts_core::LogLevel;

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Filter for `level`, overridden by `RUST_LOG` when that is set
pub fn env_filter(level: LogLevel) -> EnvFilter {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(level, directives.as_deref())
}

/// Filter from explicit directives, falling back to `level` when they are
/// absent or contain nothing usable. Invalid directives are skipped.
pub fn build_filter(level: LogLevel, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .parse_lossy(directives.unwrap_or_default())
}
