//! Firing solutions and the per-tick fire decision.
//!
//! # Firing solution
//!
//! The target's path is extrapolated for as many ticks as a full-power shell
//! could stay in flight across the arena diagonal. Each simulated tick the
//! target accelerates with the magnitude it showed at the last sample, but the
//! acceleration is re-aimed relative to its evolving velocity, keeping the
//! initial angle between the two. That yields a curving pursuit path rather
//! than straight-line ballistics. Speed is capped at the host's limit and the
//! path is clamped to the arena.
//!
//! The aim point is the simulated position at step `k` minimising
//! `|distance(shooter, position_k) − bullet_speed × k|`, earliest `k` on ties.
//!
//! # Special cases
//!
//! Two host quirks are handled before the solver runs:
//!
//! - **Coincident**: a target reported at exactly our position. Firing away
//!   from the arena centre spawns the shell at the edge, on top of the target.
//! - **Cornered**: a target parked in a corner can jitter between opposite
//!   accelerations without moving, which throws the solver off. Aim straight
//!   at it, one step below full power so the shell does not land just outside
//!   the arena and fail to detonate.

use tracing::trace;

use crate::config::{AgentConfig, EnvironmentConstants};
use crate::error::ConfigError;
use crate::geometry::{Arena, Heading, Point, Vector};
use crate::history::Tick;
use crate::interface::{CommandSink, SensorSource};
use crate::kinematics::{acceleration, has_firing_solution, velocity, PositionHistory};
use crate::tracker::TrackedEntity;

/// Accelerations shorter than this are treated as having no direction.
pub const ACCELERATION_EPSILON: f64 = 0.01;

/// Ticks a target must sit in its corner before it counts as cornered.
pub const CORNERED_TICKS: u64 = 8;

/// How the aim heading was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimKind {
    /// Target shares our position.
    Coincident,
    /// Target has been wedged in a corner.
    Cornered,
    /// Extrapolated firing solution.
    Predicted,
    /// No usable target data; aim along the radar.
    Unresolved,
}

/// A fire decision for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    /// How the heading was chosen.
    pub kind: AimKind,
    /// Turret heading to command.
    pub heading: Heading,
    /// Fire power.
    pub power: f64,
    /// Whether the gun had energy for the shot. Only [`FireControl::attack`]
    /// reads the gun; plain aims leave this `false`.
    pub loaded: bool,
}

/// Aiming logic bound to one match's arena and limits.
#[derive(Debug, Clone, PartialEq)]
pub struct FireControl {
    arena: Arena,
    limits: EnvironmentConstants,
}

impl FireControl {
    /// Creates fire control for the configured arena and limits.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`AgentConfig::validate`]. A
    /// zero fire power or an unbounded arena would make the solver horizon
    /// unbounded.
    pub fn new(config: &AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            arena: config.arena,
            limits: config.limits,
        })
    }

    /// Number of ticks the solver simulates: the longest a full-power shell
    /// can stay inside the arena.
    #[must_use]
    pub fn horizon(&self) -> u64 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ticks = (self.arena.diagonal() / self.limits.bullet_speed()).ceil() as u64;
        ticks
    }

    /// Predicted aim point for `target` as seen from `shooter` at `tick`.
    ///
    /// # Panics
    ///
    /// Panics unless [`has_firing_solution`] holds for `target` at `tick`.
    #[must_use]
    pub fn aim_point<H>(&self, target: &H, tick: Tick, shooter: Point) -> Point
    where
        H: PositionHistory + ?Sized,
    {
        let (Some(start), Some(initial_velocity), Some(initial_acceleration)) = (
            target.position_at(tick),
            velocity(target, tick),
            acceleration(target, tick),
        ) else {
            panic!("no firing solution available at tick {tick}; check has_firing_solution first");
        };

        let bullet_speed = self.limits.bullet_speed();
        let magnitude = initial_acceleration.length();
        let theta = if magnitude > ACCELERATION_EPSILON {
            initial_acceleration.heading().radians() - initial_velocity.heading().radians()
        } else {
            0.0
        };

        let mut location = start;
        let mut v = initial_velocity;
        let mut best = (f64::INFINITY, start);
        for step in 0..self.horizon() {
            #[allow(clippy::cast_precision_loss)]
            let flight = bullet_speed * step as f64;
            let score = (location.distance(shooter) - flight).abs();
            if score < best.0 {
                best = (score, location);
            }

            let a = Vector::from_polar(magnitude, v.heading().radians() + theta);
            v = (v + a).with_max_length(self.limits.max_bot_speed);
            location = self.arena.clamp(location + v);
        }
        best.1
    }

    /// Heading to shoot along now to meet `target` in flight.
    ///
    /// # Panics
    ///
    /// Panics unless [`has_firing_solution`] holds for `target` at `tick`.
    #[must_use]
    pub fn firing_solution<H>(&self, target: &H, tick: Tick, shooter: Point) -> Heading
    where
        H: PositionHistory + ?Sized,
    {
        let aim = self.aim_point(target, tick, shooter);
        trace!(tick, %aim, "firing solution");
        shooter.heading(aim)
    }

    /// True when `target` was reported at exactly our position.
    #[must_use]
    pub fn is_coincident(target: &TrackedEntity, tick: Tick, own: Point) -> bool {
        target.position(tick).is_some_and(|p| p.approx_eq(own))
    }

    /// True when `target` has stayed within one bot radius of its corner for
    /// the last [`CORNERED_TICKS`] ticks.
    #[must_use]
    pub fn is_cornered(&self, target: &TrackedEntity, tick: Tick) -> bool {
        let Some(now) = target.position(tick) else {
            return false;
        };
        let corner = self.arena.closest_corner(now);
        (0..CORNERED_TICKS).all(|back| {
            tick.checked_sub(back)
                .and_then(|t| target.position(t))
                .is_some_and(|p| corner.distance(p) <= self.limits.bot_radius)
        })
    }

    /// Chooses an aim heading and the power to use once the turret is on it.
    #[must_use]
    pub fn aim(
        &self,
        target: Option<&TrackedEntity>,
        tick: Tick,
        own: Point,
        radar_heading: Heading,
    ) -> FireOrder {
        let max = self.limits.max_fire_power;
        match target {
            Some(t) if Self::is_coincident(t, tick, own) => FireOrder {
                kind: AimKind::Coincident,
                heading: own.heading(self.arena.center()) + std::f64::consts::PI,
                power: max,
                loaded: false,
            },
            Some(t) if self.is_cornered(t, tick) => FireOrder {
                kind: AimKind::Cornered,
                heading: own.heading(t.last_position()),
                power: self.limits.clamp_power(max - 1.0),
                loaded: false,
            },
            Some(t) if has_firing_solution(t, tick) => FireOrder {
                kind: AimKind::Predicted,
                heading: self.firing_solution(t, tick, own),
                power: max,
                loaded: false,
            },
            _ => FireOrder {
                kind: AimKind::Unresolved,
                heading: radar_heading,
                power: self.limits.min_fire_power,
                loaded: false,
            },
        }
    }

    /// Aims the turret and fires.
    ///
    /// The chosen power is only used when the turret is already within one
    /// degree of the aim heading; otherwise the shot goes out at minimum power.
    /// Returns the order actually issued, with `loaded` set when the host
    /// reports non-negative gun energy.
    pub fn attack<S, C>(
        &self,
        target: Option<&TrackedEntity>,
        tick: Tick,
        sensors: &S,
        commands: &mut C,
    ) -> FireOrder
    where
        S: SensorSource + ?Sized,
        C: CommandSink + ?Sized,
    {
        let mut order = self.aim(target, tick, sensors.position(), sensors.radar_heading());
        let on_target = sensors.turret_heading().delta(order.heading).abs() < Heading::ONE_DEGREE;
        if !on_target {
            order.power = self.limits.min_fire_power;
        }
        order.power = self.limits.clamp_power(order.power);
        order.loaded = sensors.gun_energy().is_some_and(|energy| energy >= 0.0);
        if !order.loaded {
            trace!(tick, "gun not ready");
        }

        commands.fire(order.power);
        commands.set_turret_heading(order.heading);
        order
    }
}

// =============================================================================
// Tests
// =============================================================================
