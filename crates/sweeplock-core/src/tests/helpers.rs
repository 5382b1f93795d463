//! Scripted host for multi-tick tests.
//!
//! The host holds the agent in place and keeps a fixed set of enemies. Each
//! step it reports the enemies inside the radar beam, runs the agent, then
//! turns the radar and turret toward the commanded headings at the host's
//! maximum rates.

use crate::agent::{Agent, TickReport};
use crate::config::AgentConfig;
use crate::geometry::{Arena, Heading, Point};
use crate::history::Tick;
use crate::interface::{CommandBundle, Reflection, SensorSnapshot};

/// Half-width of the radar beam.
pub const BEAM_HALF_WIDTH: f64 = 10.0 * Heading::ONE_DEGREE;

/// An enemy the host reports while alive.
#[derive(Debug, Clone)]
pub struct ScriptedEnemy {
    /// Reported name.
    pub name: String,
    /// Fixed position.
    pub position: Point,
    /// Last tick the enemy is alive, if it ever dies.
    pub alive_until: Option<Tick>,
}

/// Minimal host driving one [`Agent`].
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    /// Limits the host enforces.
    pub config: AgentConfig,
    /// Snapshot for the next tick.
    pub snapshot: SensorSnapshot,
    /// Enemies in the arena.
    pub enemies: Vec<ScriptedEnemy>,
}

impl ScriptedHost {
    /// Host with the agent at `position`, full health, everything facing north.
    pub fn new(config: AgentConfig, position: Point) -> Self {
        Self {
            config,
            snapshot: snapshot_at(1, position),
            enemies: Vec::new(),
        }
    }

    /// Adds an enemy that never dies.
    pub fn with_enemy(mut self, name: &str, position: Point) -> Self {
        self.enemies.push(ScriptedEnemy {
            name: name.to_owned(),
            position,
            alive_until: None,
        });
        self
    }

    /// Adds an enemy that disappears after `last_tick`.
    pub fn with_doomed_enemy(mut self, name: &str, position: Point, last_tick: Tick) -> Self {
        self.enemies.push(ScriptedEnemy {
            name: name.to_owned(),
            position,
            alive_until: Some(last_tick),
        });
        self
    }

    /// Runs one tick and advances the host.
    pub fn step(&mut self, agent: &mut Agent) -> (TickReport, CommandBundle) {
        self.snapshot.reflections = self.visible_reflections();

        let mut commands = CommandBundle::new();
        let snapshot = self.snapshot.clone();
        let report = agent.tick(&snapshot, &snapshot, &mut commands);

        let limits = self.config.limits;
        if let Some(heading) = commands.radar_heading {
            self.snapshot.radar_heading =
                turn_toward(self.snapshot.radar_heading, heading, limits.max_radar_rotation);
        }
        if let Some(heading) = commands.turret_heading {
            self.snapshot.turret_heading =
                turn_toward(self.snapshot.turret_heading, heading, limits.max_turret_rotation);
        }
        self.snapshot.tick += 1;

        (report, commands)
    }

    /// Runs `ticks` steps, collecting the reports.
    pub fn run(&mut self, agent: &mut Agent, ticks: usize) -> Vec<TickReport> {
        (0..ticks).map(|_| self.step(agent).0).collect()
    }

    fn visible_reflections(&self) -> Vec<Reflection> {
        let tick = self.snapshot.tick;
        let own = self.snapshot.position;
        self.enemies
            .iter()
            .filter(|enemy| enemy.alive_until.map_or(true, |last| tick <= last))
            .filter(|enemy| {
                let bearing = own.heading(enemy.position);
                self.snapshot.radar_heading.delta(bearing).abs() <= BEAM_HALF_WIDTH
            })
            .map(|enemy| {
                let absolute = own.heading(enemy.position);
                Reflection::new(
                    enemy.name.clone(),
                    absolute - self.snapshot.heading,
                    own.distance(enemy.position),
                )
            })
            .collect()
    }
}

/// Rotates `current` toward `target` by at most `max_step`.
pub fn turn_toward(current: Heading, target: Heading, max_step: f64) -> Heading {
    let delta = current.delta(target);
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Full-health snapshot at `position`.
pub fn snapshot_at(tick: Tick, position: Point) -> SensorSnapshot {
    SensorSnapshot {
        tick,
        position,
        health: 100.0,
        ..SensorSnapshot::default()
    }
}

/// A square 1000×1000 arena with default limits.
pub fn square_config() -> AgentConfig {
    AgentConfig {
        arena: Arena::new(1000.0, 1000.0),
        ..AgentConfig::default()
    }
}
