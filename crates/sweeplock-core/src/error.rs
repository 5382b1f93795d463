//! Error types for the perception-and-targeting core.
//!
//! Missing data (no velocity yet, no locked target, an empty history) is never
//! an error here: those are `Option` results. The enums below cover what can
//! genuinely fail:
//!
//! - [`GeometryError`]: normalising a zero-length vector
//! - [`ConfigError`]: a configuration that cannot describe a playable match
//! - [`LoggingError`]: a subscriber that cannot be installed

use thiserror::Error;

/// Errors raised by geometry primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A zero-length vector has no direction.
    #[error("cannot normalize a zero-length vector")]
    DivideByZero,
}

/// Errors raised while loading or validating an [`AgentConfig`](crate::config::AgentConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arena width or height is not strictly positive and finite.
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArena {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },

    /// A speed, rotation, power or radius limit is not strictly positive and
    /// finite.
    #[error("environment limit `{name}` must be positive and finite, got {value}")]
    NonPositiveLimit {
        /// Name of the offending field.
        name: &'static str,
        /// Configured value.
        value: f64,
    },

    /// The fire power range is empty.
    #[error("min_fire_power ({min}) exceeds max_fire_power ({max})")]
    FirePowerRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// History buffers must hold at least one entry.
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by [`init_logging`](crate::logging::init_logging).
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The level directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}
