//! # Nebula Log
//!
//! Logging setup shared by Nebula tools: an `EnvFilter` plus a fmt layer in
//! pretty, compact or JSON form.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> nebula_log::LogResult<()> {
//!     // Auto-detect best configuration
//!     let _guard = nebula_log::auto_init()?;
//!
//!     nebula_log::info!(types = 3, "registry loaded");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;
mod writer;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, WriterConfig};
pub use error::{LogError, LogResult};

// Re-export tracing macros
pub use tracing::{debug, error, info, instrument, span, trace, warn};

/// Auto-detect and initialize the best logging configuration
///
/// `NEBULA_LOG` or `RUST_LOG` selects [`Config::from_env`]; otherwise debug
/// builds use [`Config::development`] and release builds
/// [`Config::production`]. Returns a no-op guard when a global subscriber is
/// already installed.
pub fn auto_init() -> LogResult<LoggerGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggerGuard::noop());
    }

    if std::env::var("NEBULA_LOG").is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
