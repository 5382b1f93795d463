//! Match configuration, passed once when an [`Agent`](crate::agent::Agent) is built.
//!
//! The host's fixed limits (rotation rates, speed, fire power range) and the
//! arena size are immutable for a match. History capacity and the
//! plausibility slack used by the tracker live here too, so nothing in the
//! crate reads ambient global state.
//!
//! # Example
//!
//! ```
//! use sweeplock_core::config::AgentConfig;
//!
//! let config = AgentConfig::from_json_str(
//!     r#"{ "arena": { "width": 1000.0, "height": 1000.0 } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.arena.width, 1000.0);
//! assert_eq!(config.history_capacity, 100);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Arena;
use crate::history::DEFAULT_CAPACITY;

/// Fixed limits enforced by the simulation host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConstants {
    /// Maximum body rotation per tick, radians.
    pub max_bot_rotation: f64,
    /// Maximum turret rotation per tick, radians.
    pub max_turret_rotation: f64,
    /// Maximum radar rotation per tick, radians.
    pub max_radar_rotation: f64,
    /// Maximum distance a bot covers per tick.
    pub max_bot_speed: f64,
    /// Smallest fire power the host accepts.
    pub min_fire_power: f64,
    /// Largest fire power the host accepts.
    pub max_fire_power: f64,
    /// Shell speed per unit of fire power.
    pub shell_speed_factor: f64,
    /// Bot body radius.
    pub bot_radius: f64,
}

impl EnvironmentConstants {
    /// Speed of a full-power shell, in distance per tick.
    #[must_use]
    pub fn bullet_speed(&self) -> f64 {
        self.shell_speed_factor * self.max_fire_power
    }

    /// Clamps `power` into the accepted fire power range.
    #[must_use]
    pub fn clamp_power(&self, power: f64) -> f64 {
        power.clamp(self.min_fire_power, self.max_fire_power)
    }
}

impl Default for EnvironmentConstants {
    fn default() -> Self {
        Self {
            max_bot_rotation: PI / 60.0,
            max_turret_rotation: PI / 30.0,
            max_radar_rotation: PI / 20.0,
            max_bot_speed: 3.0,
            min_fire_power: 1.0,
            max_fire_power: 5.0,
            shell_speed_factor: 4.5,
            bot_radius: 19.0,
        }
    }
}

/// Everything an agent needs to know before the first tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Match arena.
    pub arena: Arena,
    /// Host limits.
    pub limits: EnvironmentConstants,
    /// Live entries per history buffer.
    pub history_capacity: usize,
    /// Distance slack added to the speed bound when matching an observation
    /// to a known entity.
    pub plausibility_epsilon: f64,
    /// Seed for the random target picker.
    pub seed: u64,
}

impl AgentConfig {
    /// Parses a JSON document and validates it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a playable match.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(is_positive(self.arena.width) && is_positive(self.arena.height)) {
            return Err(ConfigError::InvalidArena {
                width: self.arena.width,
                height: self.arena.height,
            });
        }

        let limits = &self.limits;
        let positive = [
            ("max_bot_rotation", limits.max_bot_rotation),
            ("max_turret_rotation", limits.max_turret_rotation),
            ("max_radar_rotation", limits.max_radar_rotation),
            ("max_bot_speed", limits.max_bot_speed),
            ("max_fire_power", limits.max_fire_power),
            ("shell_speed_factor", limits.shell_speed_factor),
            ("bot_radius", limits.bot_radius),
        ];
        for (name, value) in positive {
            if !is_positive(value) {
                return Err(ConfigError::NonPositiveLimit { name, value });
            }
        }

        if limits.min_fire_power > limits.max_fire_power {
            return Err(ConfigError::FirePowerRange {
                min: limits.min_fire_power,
                max: limits.max_fire_power,
            });
        }

        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            limits: EnvironmentConstants::default(),
            history_capacity: DEFAULT_CAPACITY,
            plausibility_epsilon: 1.0,
            seed: 0,
        }
    }
}
