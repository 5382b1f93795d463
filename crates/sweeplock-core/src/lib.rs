//! # Sweeplock Core
//!
//! Perception and targeting core for a radar-scanning arena combat agent.
//!
//! The host simulation advances the world one tick at a time. Each tick the
//! agent reads a sensor snapshot, attributes radar reflections to persistent
//! entities, steers its radar, and aims and fires using a predicted
//! intercept. Everything runs synchronously inside a single tick call.
//!
//! ## Architecture
//!
//! - **Geometry**: headings measured clockwise from north, vectors, the arena
//! - **Tracking**: bounded tick-indexed histories and identity resolution
//! - **Targeting**: kinematic estimates, firing solutions, selection policies
//! - **Radar**: per-tick heading priority and the three-pass corner sweep
//! - **Agent**: postures tying movement, radar and fire control together
//!
//! ## Usage
//!
//! ```rust
//! use sweeplock_core::agent::Agent;
//! use sweeplock_core::config::AgentConfig;
//! use sweeplock_core::geometry::{Heading, Point};
//! use sweeplock_core::interface::{CommandBundle, Reflection, SensorSnapshot};
//!
//! let mut agent = Agent::new(AgentConfig::default()).unwrap();
//! let snapshot = SensorSnapshot {
//!     tick: 1,
//!     position: Point::new(600.0, 350.0),
//!     health: 100.0,
//!     reflections: vec![Reflection::new("Seeker", Heading::EAST, 200.0)],
//!     ..SensorSnapshot::default()
//! };
//!
//! let mut commands = CommandBundle::new();
//! let report = agent.tick(&snapshot, &snapshot, &mut commands);
//!
//! assert_eq!(report.observed.len(), 1);
//! assert!(commands.radar_heading.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod agent;
pub mod config;
pub mod error;
pub mod fire_control;
pub mod geometry;
pub mod history;
pub mod interface;
pub mod kinematics;
pub mod logging;
pub mod navigation;
pub mod radar;
pub mod selection;
pub mod tracker;

pub use agent::{Agent, Posture, TickReport};
pub use config::{AgentConfig, EnvironmentConstants};
pub use error::{ConfigError, GeometryError, LoggingError};
pub use geometry::{Arena, Heading, Point, Vector};
pub use history::{BoundedHistory, Tick};
pub use interface::{CommandBundle, CommandSink, Reflection, SensorSnapshot, SensorSource, TickClock};
pub use tracker::{EntityId, EntityTracker, TrackedEntity};

#[cfg(test)]
mod tests;
