//! Optional subscriber installation.
//!
//! The core only emits `tracing` events. Hosts that do not install their own
//! subscriber can call [`init_logging`] once at startup; `RUST_LOG` takes
//! precedence over the configured level.
//!
//! ```no_run
//! use sweeplock_core::logging::{init_logging, LogConfig};
//! use tracing::Level;
//!
//! init_logging(&LogConfig { level: Level::DEBUG, ..LogConfig::default() })?;
//! # Ok::<(), sweeplock_core::error::LoggingError>(())
//! ```

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::LoggingError;

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is unset.
    pub level: Level,
    /// Include the event target (module path).
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// Filter honouring `RUST_LOG`, falling back to [`LogConfig::level`].
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::Filter`] if the fallback directive is invalid.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.level.to_string())?),
        }
    }
}

/// Installs a compact console subscriber as the global default.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    Registry::default()
        .with(config.filter()?)
        .with(fmt::layer().with_target(config.with_target).compact())
        .try_init()?;
    Ok(())
}
