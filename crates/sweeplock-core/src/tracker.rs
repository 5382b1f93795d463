//! Identity resolution for radar contacts.
//!
//! Reflections carry a name, but names are not unique, so the tracker matches
//! each observation to a known entity with a speed-bounded nearest-match rule:
//!
//! 1. Convert the reflection to an absolute arena position.
//! 2. Candidates are entities with the same name that have not been updated
//!    this tick and could have travelled to the new position since they were
//!    last seen (`elapsed × max_speed + epsilon`).
//! 3. Update the candidate whose last position is nearest, or start tracking a
//!    new entity when there is none.
//!
//! Entities are never removed. They go stale as their `last_time` falls
//! behind the current tick.
//!
//! # Determinism
//!
//! Entities are stored in a `BTreeMap` keyed by monotonically assigned
//! [`EntityId`]s, so iteration order (and nearest-match tie breaking) is the
//! order in which entities were first seen.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AgentConfig;
use crate::geometry::{Heading, Point, Vector};
use crate::history::{BoundedHistory, Tick};
use crate::interface::{Reflection, SensorSource, TickClock};

// =============================================================================
// EntityId
// =============================================================================

/// Identifier the tracker assigns to each distinct adversary it believes in.
///
/// IDs are assigned in order of first sighting and never reused.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TrackedEntity
// =============================================================================

/// An adversary's identity record and observed positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    id: EntityId,
    name: String,
    positions: BoundedHistory<Point>,
    last_time: Tick,
    last_position: Point,
}

impl TrackedEntity {
    /// Starts tracking an entity seen at `location` on `tick`.
    #[must_use]
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        location: Point,
        tick: Tick,
        capacity: usize,
    ) -> Self {
        let mut positions = BoundedHistory::with_capacity(capacity);
        positions.put(tick, location);
        Self {
            id,
            name: name.into(),
            positions,
            last_time: tick,
            last_position: location,
        }
    }

    /// Tracker-assigned identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Name reported by the host.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest tick this entity was observed.
    #[must_use]
    pub fn last_time(&self) -> Tick {
        self.last_time
    }

    /// Position at [`last_time`](Self::last_time).
    #[must_use]
    pub fn last_position(&self) -> Point {
        self.last_position
    }

    /// Observed position at `tick`, if the entity was seen then.
    #[must_use]
    pub fn position(&self, tick: Tick) -> Option<Point> {
        self.positions.at(tick)
    }

    /// Full position history.
    #[must_use]
    pub fn positions(&self) -> &BoundedHistory<Point> {
        &self.positions
    }

    /// True when the entity was observed at `tick`.
    #[must_use]
    pub fn is_visible_at(&self, tick: Tick) -> bool {
        self.positions.get(tick).is_some()
    }

    /// True when the entity could have reached `location` by `tick`.
    #[must_use]
    pub fn could_be_at(&self, location: Point, tick: Tick, max_speed: f64, epsilon: f64) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let elapsed = tick.saturating_sub(self.last_time) as f64;
        location.distance(self.last_position) <= elapsed * max_speed + epsilon
    }

    /// Records an observation.
    pub fn observe(&mut self, tick: Tick, location: Point) {
        self.positions.put(tick, location);
        if tick >= self.last_time {
            self.last_time = tick;
            self.last_position = location;
        }
    }
}

// =============================================================================
// EntityTracker
// =============================================================================

/// The set of adversaries the agent believes exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTracker {
    /// Monotonically increasing ID counter.
    next_id: u64,
    /// Entities keyed by ID, in order of first sighting.
    entities: BTreeMap<EntityId, TrackedEntity>,
    capacity: usize,
    max_speed: f64,
    epsilon: f64,
}

impl EntityTracker {
    /// Creates an empty tracker using the configured speed bound and history size.
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            next_id: 0,
            entities: BTreeMap::new(),
            capacity: config.history_capacity,
            max_speed: config.limits.max_bot_speed,
            epsilon: config.plausibility_epsilon,
        }
    }

    /// Absolute arena position of a reflection seen from `origin` while the
    /// agent's body points along `heading`.
    #[must_use]
    pub fn absolute_position(origin: Point, heading: Heading, reflection: &Reflection) -> Point {
        let bearing = heading + reflection.bearing;
        origin + Vector::from_polar(reflection.distance, bearing.radians())
    }

    /// Ingests this tick's reflections.
    ///
    /// Returns the entity each reflection was attributed to, in reflection order.
    pub fn update<C, S>(&mut self, clock: &C, sensors: &S) -> Vec<EntityId>
    where
        C: TickClock + ?Sized,
        S: SensorSource + ?Sized,
    {
        let tick = clock.ticks();
        let origin = sensors.position();
        let heading = sensors.heading();
        sensors
            .reflections()
            .iter()
            .map(|reflection| {
                let location = Self::absolute_position(origin, heading, reflection);
                self.observe(tick, &reflection.name, location)
            })
            .collect()
    }

    /// Attributes one observation to an existing entity or a new one.
    pub fn observe(&mut self, tick: Tick, name: &str, location: Point) -> EntityId {
        let best = self
            .entities
            .values()
            .filter(|entity| entity.last_time() != tick)
            .filter(|entity| entity.name() == name)
            .filter(|entity| entity.could_be_at(location, tick, self.max_speed, self.epsilon))
            .min_by(|a, b| {
                a.last_position()
                    .distance(location)
                    .total_cmp(&b.last_position().distance(location))
            })
            .map(TrackedEntity::id);

        if let Some(id) = best {
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.observe(tick, location);
                debug!(%id, %location, tick, "entity updated");
            }
            return id;
        }

        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        debug!(%id, name, %location, tick, "new entity detected");
        self.entities
            .insert(id, TrackedEntity::new(id, name, location, tick, self.capacity));
        id
    }

    /// Looks up an entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&TrackedEntity> {
        self.entities.get(&id)
    }

    /// All entities in order of first sighting.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedEntity> {
        self.entities.values()
    }

    /// Entities observed at `tick`.
    pub fn visible_at(&self, tick: Tick) -> impl Iterator<Item = &TrackedEntity> {
        self.entities.values().filter(move |entity| entity.is_visible_at(tick))
    }

    /// Number of entities ever tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True before the first sighting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
