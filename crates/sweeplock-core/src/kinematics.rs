//! Finite-difference velocity and acceleration over tick-indexed positions.
//!
//! Velocity at `t` needs samples at `t` and `t − 1`; acceleration at `t`
//! needs velocities at `t` and `t − 1`, so three consecutive samples. Missing
//! samples propagate as `None`. Nothing is interpolated and nothing defaults
//! to zero.

use crate::geometry::{Point, Vector};
use crate::history::{BoundedHistory, Tick};
use crate::tracker::TrackedEntity;

/// Anything with a tick-indexed position record.
pub trait PositionHistory {
    /// Position at `tick`, if recorded.
    fn position_at(&self, tick: Tick) -> Option<Point>;
}

impl PositionHistory for TrackedEntity {
    fn position_at(&self, tick: Tick) -> Option<Point> {
        self.position(tick)
    }
}

impl PositionHistory for BoundedHistory<Point> {
    fn position_at(&self, tick: Tick) -> Option<Point> {
        self.at(tick)
    }
}

/// Displacement between `t − 1` and `t`.
#[must_use]
pub fn velocity<H: PositionHistory + ?Sized>(history: &H, tick: Tick) -> Option<Vector> {
    let previous = tick.checked_sub(1)?;
    let now = history.position_at(tick)?;
    let before = history.position_at(previous)?;
    Some(Vector::from_points(now, before))
}

/// Change in velocity between `t − 1` and `t`.
#[must_use]
pub fn acceleration<H: PositionHistory + ?Sized>(history: &H, tick: Tick) -> Option<Vector> {
    let previous = tick.checked_sub(1)?;
    Some(velocity(history, tick)? - velocity(history, previous)?)
}

/// True when a firing solution can be computed at `tick`.
#[must_use]
pub fn has_firing_solution<H: PositionHistory + ?Sized>(history: &H, tick: Tick) -> bool {
    acceleration(history, tick).is_some()
}
