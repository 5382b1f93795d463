//! Movement primitives.
//!
//! The [`Helm`] remembers whether the agent is driving forwards or in reverse,
//! so manoeuvres that flip direction (stalking, waltzing) carry that state
//! across ticks. Every manoeuvre writes a body heading and a signed speed.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::config::{AgentConfig, EnvironmentConstants};
use crate::geometry::{Arena, Heading, Point, Vector};
use crate::history::Tick;
use crate::interface::CommandSink;
use crate::tracker::TrackedEntity;

/// Stand-off distance for stalking, in ticks of travel at full speed.
pub const STALK_DISTANCE_TICKS: f64 = 20.0;

/// Drive direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Forwards along the body heading.
    #[default]
    Forward,
    /// Backwards.
    Reverse,
}

impl Direction {
    /// `1.0` forwards, `-1.0` in reverse.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }

    /// The other direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Body steering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helm {
    direction: Direction,
    arena: Arena,
    limits: EnvironmentConstants,
}

impl Helm {
    /// Creates a helm driving forwards.
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            direction: Direction::Forward,
            arena: config.arena,
            limits: config.limits,
        }
    }

    /// Current drive direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn drive<C: CommandSink + ?Sized>(&self, heading: Heading, commands: &mut C) {
        commands.set_heading(heading);
        commands.set_speed(self.limits.max_bot_speed * self.direction.sign());
    }

    /// Drives to `location`, backing up when it lies behind the body.
    pub fn runaway<C>(&mut self, location: Point, position: Point, body: Heading, commands: &mut C)
    where
        C: CommandSink + ?Sized,
    {
        if position.approx_eq(location) {
            commands.set_speed(0.0);
            return;
        }

        let mut heading = position.heading(location);
        let away = Vector::from_points(position, location);
        let facing = Vector::from_polar(1.0, body.radians());
        if away.dot(facing) > 0.0 {
            self.direction = Direction::Reverse;
            heading = heading + PI;
        } else {
            self.direction = Direction::Forward;
        }
        self.drive(heading, commands);
    }

    /// Full speed in a tight circle.
    pub fn spin<C: CommandSink + ?Sized>(&mut self, body: Heading, commands: &mut C) {
        self.direction = Direction::Forward;
        self.drive(body + self.limits.max_bot_rotation, commands);
    }

    /// Circles `target` broadside, flipping direction near the walls and
    /// whenever the agent has reached full speed.
    ///
    /// Returns `false` without commanding anything when the target was not
    /// seen at `tick`.
    pub fn stalk<C>(
        &mut self,
        target: Option<&TrackedEntity>,
        tick: Tick,
        position: Point,
        velocity: Option<Vector>,
        commands: &mut C,
    ) -> bool
    where
        C: CommandSink + ?Sized,
    {
        let Some(target_position) = target.and_then(|t| t.position(tick)) else {
            return false;
        };

        let heading = Heading::between(target_position, position) + FRAC_PI_2;
        let reach = self.limits.max_bot_speed * STALK_DISTANCE_TICKS;
        let ahead = Vector::from_polar(reach, heading.radians()) * self.direction.sign();
        if !self.arena.contains(position + ahead) {
            self.direction = self.direction.reversed();
        }
        if velocity.is_some_and(|v| (v.length() - self.limits.max_bot_speed).abs() < 0.01) {
            self.direction = self.direction.reversed();
        }

        self.drive(heading, commands);
        true
    }

    /// Shuttles north and south across the arena's horizontal bisector.
    pub fn waltz<C: CommandSink + ?Sized>(&mut self, position: Point, commands: &mut C) {
        self.direction = if position.y < self.arena.height / 2.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        self.drive(Heading::NORTH, commands);
    }
}
