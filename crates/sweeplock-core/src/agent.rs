//! Per-tick orchestration.
//!
//! [`Agent::tick`] runs one decision cycle against the host boundary:
//!
//! 1. Record own health and position.
//! 2. Attribute this tick's reflections to tracked entities.
//! 3. Choose a radar heading.
//! 4. Pick a posture, drive, then aim and fire.
//!
//! # Postures
//!
//! | Posture | When | Movement |
//! |---|---|---|
//! | `Duelist` | one enemy left | low health: spin in a corner, otherwise stalk; moderate: spin; healthy: hold the corner |
//! | `Scared` | no confirmed target, or sweeping | run to the nearest corner |
//! | `Shy` | otherwise | waltz, unless an enemy was recently in the adjacent corner |
//!
//! Every posture finishes by attacking the confirmed target, or the nearest
//! visible entity when there is none.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::error::ConfigError;
use crate::fire_control::{FireControl, FireOrder};
use crate::geometry::Point;
use crate::history::{BoundedHistory, Tick};
use crate::interface::{CommandSink, SensorSource, TickClock};
use crate::kinematics::velocity;
use crate::navigation::Helm;
use crate::radar::{RadarContext, RadarDecision, RadarSource, RadarState};
use crate::selection::{nearest_visible, pick_random};
use crate::tracker::{EntityId, EntityTracker, TrackedEntity};

/// Below this health a duelist stops holding its corner and starts spinning.
pub const MODERATE_HEALTH: f64 = 50.0;

/// Below this health a duelist closes in on its opponent.
pub const LOW_HEALTH: f64 = 30.0;

/// How recently, in ticks, an enemy must have occupied the adjacent corner to
/// keep a shy agent pinned in its own.
pub const RECENT_TICKS: u64 = 100;

/// Distance at which an enemy counts as occupying a corner.
const CORNER_EPSILON: f64 = 0.01;

/// Behaviour chosen for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    /// Last enemy standing.
    Duelist,
    /// Without a target.
    Scared,
    /// Holding a target from a corner.
    Shy,
}

/// What the agent decided during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick the report is for.
    pub tick: Tick,
    /// Entity each reflection was attributed to, in reflection order.
    pub observed: Vec<EntityId>,
    /// Radar decision actually commanded.
    pub radar: RadarDecision,
    /// Behaviour used.
    pub posture: Posture,
    /// Fire order actually commanded.
    pub fire: FireOrder,
}

/// The combat agent: tracker, radar, helm and fire control sharing one match
/// configuration.
#[derive(Debug, Clone)]
pub struct Agent {
    config: AgentConfig,
    tracker: EntityTracker,
    radar: RadarState,
    helm: Helm,
    fire_control: FireControl,
    positions: BoundedHistory<Point>,
    health: BoundedHistory<f64>,
    rng: ChaCha8Rng,
    now: Tick,
    posture: Option<Posture>,
}

impl Agent {
    /// Builds an agent for one match.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`AgentConfig::validate`].
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tracker: EntityTracker::new(&config),
            radar: RadarState::new(),
            helm: Helm::new(&config),
            fire_control: FireControl::new(&config)?,
            positions: BoundedHistory::with_capacity(config.history_capacity),
            health: BoundedHistory::with_capacity(config.history_capacity),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            now: 0,
            posture: None,
            config,
        })
    }

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Known entities.
    #[must_use]
    pub fn tracker(&self) -> &EntityTracker {
        &self.tracker
    }

    /// Radar state.
    #[must_use]
    pub fn radar(&self) -> &RadarState {
        &self.radar
    }

    /// Tick of the last decision cycle.
    #[must_use]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Own recorded position at `tick`.
    #[must_use]
    pub fn position(&self, tick: Tick) -> Option<Point> {
        self.positions.at(tick)
    }

    /// Own recorded health at `tick`.
    #[must_use]
    pub fn health(&self, tick: Tick) -> Option<f64> {
        self.health.at(tick)
    }

    /// Health lost since the previous tick, if any was lost.
    #[must_use]
    pub fn damage_taken(&self) -> Option<f64> {
        if self.now <= 1 {
            return None;
        }
        let now = self.health(self.now)?;
        let before = self.health(self.now - 1)?;
        (now < before).then_some(before - now)
    }

    /// True when health dropped since the previous tick.
    #[must_use]
    pub fn hit(&self) -> bool {
        self.damage_taken().is_some()
    }

    /// Confirmed target: locked by the radar and seen this tick.
    #[must_use]
    pub fn target(&self) -> Option<&TrackedEntity> {
        self.radar.target(&self.tracker, self.now)
    }

    /// Enemy count from the last completed first sweep pass.
    #[must_use]
    pub fn enemies_left(&self) -> Option<usize> {
        self.radar.enemies_left()
    }

    /// A uniformly chosen entity among those seen this tick.
    pub fn random_visible(&mut self) -> Option<EntityId> {
        let visible: Vec<&TrackedEntity> = self.tracker.visible_at(self.now).collect();
        if visible.is_empty() {
            return None;
        }
        Some(pick_random(&visible, &mut self.rng).id())
    }

    /// Runs one decision cycle.
    pub fn tick<C, S, K>(&mut self, clock: &C, sensors: &S, commands: &mut K) -> TickReport
    where
        C: TickClock + ?Sized,
        S: SensorSource + ?Sized,
        K: CommandSink + ?Sized,
    {
        let now = clock.ticks();
        self.now = now;
        self.health.put(now, sensors.health());
        self.positions.put(now, sensors.position());
        let observed = self.tracker.update(clock, sensors);

        if let Some(damage) = self.damage_taken() {
            info!(tick = now, damage, "suffered hit");
        }

        let ctx = RadarContext::from_sensors(now, sensors, &self.config, &self.tracker);
        let mut radar = self.radar.update(&ctx);

        let posture = self.choose_posture();
        if self.posture != Some(posture) {
            debug!(tick = now, ?posture, "posture changed");
            self.posture = Some(posture);
        }

        let fire = match posture {
            Posture::Duelist => self.duelist(sensors, commands),
            Posture::Scared => {
                let (fire, prep) = self.scared(sensors, commands);
                if let Some(decision) = prep {
                    radar = decision;
                }
                fire
            }
            Posture::Shy => self.shy(sensors, commands),
        };
        commands.set_radar_heading(radar.heading);

        TickReport {
            tick: now,
            observed,
            radar,
            posture,
            fire,
        }
    }

    fn choose_posture(&self) -> Posture {
        if self.radar.enemies_left() == Some(1) {
            Posture::Duelist
        } else if self.target().is_none() || self.radar.is_sweeping() {
            Posture::Scared
        } else {
            Posture::Shy
        }
    }

    fn attack<S, K>(&self, sensors: &S, commands: &mut K) -> FireOrder
    where
        S: SensorSource + ?Sized,
        K: CommandSink + ?Sized,
    {
        let target = self
            .target()
            .or_else(|| nearest_visible(&self.tracker, self.now, sensors.position()));
        self.fire_control.attack(target, self.now, sensors, commands)
    }

    fn duelist<S, K>(&mut self, sensors: &S, commands: &mut K) -> FireOrder
    where
        S: SensorSource + ?Sized,
        K: CommandSink + ?Sized,
    {
        let position = sensors.position();
        let health = sensors.health();
        let corner = self.config.arena.closest_corner(position);

        if health < LOW_HEALTH {
            let target = self.radar.target(&self.tracker, self.now);
            let own_velocity = velocity(&self.positions, self.now);
            if position.distance(corner) < self.config.limits.bot_radius
                || !self.helm.stalk(target, self.now, position, own_velocity, commands)
            {
                self.helm.spin(sensors.heading(), commands);
            }
        } else if health < MODERATE_HEALTH {
            self.helm.spin(sensors.heading(), commands);
        } else {
            self.helm.runaway(corner, position, sensors.heading(), commands);
        }
        self.attack(sensors, commands)
    }

    fn scared<S, K>(&mut self, sensors: &S, commands: &mut K) -> (FireOrder, Option<RadarDecision>)
    where
        S: SensorSource + ?Sized,
        K: CommandSink + ?Sized,
    {
        let position = sensors.position();
        let arena = self.config.arena;
        self.helm
            .runaway(arena.closest_corner(position), position, sensors.heading(), commands);

        let enemy_in_sight = self.target().is_some()
            || nearest_visible(&self.tracker, self.now, position).is_some();
        let prep = (!enemy_in_sight && !self.radar.is_sweeping()).then(|| RadarDecision {
            heading: RadarState::sweep_prep(position, &arena),
            source: RadarSource::SweepPrep,
        });
        (self.attack(sensors, commands), prep)
    }

    fn shy<S, K>(&mut self, sensors: &S, commands: &mut K) -> FireOrder
    where
        S: SensorSource + ?Sized,
        K: CommandSink + ?Sized,
    {
        let position = sensors.position();
        let arena = self.config.arena;
        let corner = arena.closest_corner(position);
        let adjacent = arena.vertical_neighbor(corner);
        let now = self.now;
        let neighbour_camped = self.tracker.iter().any(|enemy| {
            adjacent.distance(enemy.last_position()) < CORNER_EPSILON
                && now.abs_diff(enemy.last_time()) < RECENT_TICKS
        });

        if neighbour_camped {
            self.helm.runaway(corner, position, sensors.heading(), commands);
        } else {
            self.helm.waltz(position, commands);
        }
        self.attack(sensors, commands)
    }
}
