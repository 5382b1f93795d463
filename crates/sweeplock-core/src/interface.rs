//! Boundary between the agent and the simulation host.
//!
//! The host advances the world; the agent only reads a per-tick snapshot and
//! writes one command bundle back. Three narrow traits describe that contract:
//!
//! - [`TickClock`]: the current tick
//! - [`SensorSource`]: the agent's own readings and this tick's radar reflections
//! - [`CommandSink`]: where the agent's decisions go
//!
//! [`SensorSnapshot`] and [`CommandBundle`] are plain-data implementations a
//! host can fill and drain directly.

use serde::{Deserialize, Serialize};

use crate::geometry::{Heading, Point};
use crate::history::Tick;

// =============================================================================
// Reflection
// =============================================================================

/// One radar detection reported by the host for a single tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    /// Name the host reports for the detected bot. Not unique.
    pub name: String,
    /// Bearing relative to the agent's body heading.
    pub bearing: Heading,
    /// Distance from the agent.
    pub distance: f64,
}

impl Reflection {
    /// Creates a reflection.
    #[must_use]
    pub fn new(name: impl Into<String>, bearing: Heading, distance: f64) -> Self {
        Self {
            name: name.into(),
            bearing,
            distance,
        }
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Source of the current tick.
pub trait TickClock {
    /// Current tick.
    fn ticks(&self) -> Tick;
}

/// Read-only per-tick sensor readings.
pub trait SensorSource {
    /// Agent position.
    fn position(&self) -> Point;
    /// Agent body heading.
    fn heading(&self) -> Heading;
    /// Agent health.
    fn health(&self) -> f64;
    /// Remaining gun energy, if the host reports one.
    fn gun_energy(&self) -> Option<f64>;
    /// Current radar heading.
    fn radar_heading(&self) -> Heading;
    /// Current turret heading.
    fn turret_heading(&self) -> Heading;
    /// Reflections detected this tick, in host order.
    fn reflections(&self) -> &[Reflection];
}

/// Receiver for the agent's per-tick decisions.
pub trait CommandSink {
    /// Desired body heading.
    fn set_heading(&mut self, heading: Heading);
    /// Desired signed speed; negative drives in reverse.
    fn set_speed(&mut self, speed: f64);
    /// Desired turret heading.
    fn set_turret_heading(&mut self, heading: Heading);
    /// Desired radar heading.
    fn set_radar_heading(&mut self, heading: Heading);
    /// Fire with the given power.
    fn fire(&mut self, power: f64);
}

// =============================================================================
// Plain-data implementations
// =============================================================================

/// A complete sensor reading for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Tick this snapshot was taken at.
    pub tick: Tick,
    /// Agent position.
    pub position: Point,
    /// Agent body heading.
    pub heading: Heading,
    /// Agent health.
    pub health: f64,
    /// Remaining gun energy.
    pub gun_energy: Option<f64>,
    /// Radar heading.
    pub radar_heading: Heading,
    /// Turret heading.
    pub turret_heading: Heading,
    /// Detections this tick.
    pub reflections: Vec<Reflection>,
}

impl TickClock for SensorSnapshot {
    fn ticks(&self) -> Tick {
        self.tick
    }
}

impl SensorSource for SensorSnapshot {
    fn position(&self) -> Point {
        self.position
    }

    fn heading(&self) -> Heading {
        self.heading
    }

    fn health(&self) -> f64 {
        self.health
    }

    fn gun_energy(&self) -> Option<f64> {
        self.gun_energy
    }

    fn radar_heading(&self) -> Heading {
        self.radar_heading
    }

    fn turret_heading(&self) -> Heading {
        self.turret_heading
    }

    fn reflections(&self) -> &[Reflection] {
        &self.reflections
    }
}

/// The commands issued during one tick. Later writes replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandBundle {
    /// Desired body heading.
    pub heading: Option<Heading>,
    /// Desired signed speed.
    pub speed: Option<f64>,
    /// Desired turret heading.
    pub turret_heading: Option<Heading>,
    /// Desired radar heading.
    pub radar_heading: Option<Heading>,
    /// Fire power, already clamped by the agent.
    pub fire_power: Option<f64>,
}

impl CommandBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommandSink for CommandBundle {
    fn set_heading(&mut self, heading: Heading) {
        self.heading = Some(heading);
    }

    fn set_speed(&mut self, speed: f64) {
        self.speed = Some(speed);
    }

    fn set_turret_heading(&mut self, heading: Heading) {
        self.turret_heading = Some(heading);
    }

    fn set_radar_heading(&mut self, heading: Heading) {
        self.radar_heading = Some(heading);
    }

    fn fire(&mut self, power: f64) {
        self.fire_power = Some(power);
    }
}
