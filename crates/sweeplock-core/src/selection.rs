//! Target selection policies.
//!
//! Every policy compares candidates by their *last known* position, however
//! stale. Callers that need a currently visible target pre-filter with
//! [`EntityTracker::visible_at`] or use [`nearest_visible`].
//!
//! The `pick_*` policies require a non-empty candidate set. Passing an empty
//! one is a caller bug and panics.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::{Arena, Point};
use crate::history::Tick;
use crate::tracker::{EntityTracker, TrackedEntity};

/// Candidate whose last known position is nearest to `from`.
///
/// Absent only when `candidates` is empty. Ties go to the earliest candidate.
pub fn nearest<'a, I>(candidates: I, from: Point) -> Option<&'a TrackedEntity>
where
    I: IntoIterator<Item = &'a TrackedEntity>,
{
    candidates.into_iter().min_by(|a, b| {
        a.last_position()
            .distance(from)
            .total_cmp(&b.last_position().distance(from))
    })
}

/// Nearest entity observed at `tick`.
#[must_use]
pub fn nearest_visible(tracker: &EntityTracker, tick: Tick, from: Point) -> Option<&TrackedEntity> {
    nearest(tracker.visible_at(tick), from)
}

/// Nearest candidate from a curated subset.
///
/// # Panics
///
/// Panics if `candidates` is empty.
#[must_use]
pub fn pick_nearest<'a>(candidates: &[&'a TrackedEntity], from: Point) -> &'a TrackedEntity {
    let Some(choice) = nearest(candidates.iter().copied(), from) else {
        panic!("pick_nearest requires a non-empty candidate set");
    };
    choice
}

/// Uniformly random candidate.
///
/// # Panics
///
/// Panics if `candidates` is empty.
pub fn pick_random<'a, R: Rng + ?Sized>(
    candidates: &[&'a TrackedEntity],
    rng: &mut R,
) -> &'a TrackedEntity {
    let Some(choice) = candidates.choose(rng).copied() else {
        panic!("pick_random requires a non-empty candidate set");
    };
    choice
}

/// Nearest candidate, preferring those wedged into a corner.
///
/// A candidate counts as cornered when its last known position is within
/// `agent_radius / 4` of its closest arena corner. Without any cornered
/// candidate this is [`pick_nearest`] over the full set.
///
/// # Panics
///
/// Panics if `candidates` is empty.
#[must_use]
pub fn pick_cornered<'a>(
    candidates: &[&'a TrackedEntity],
    from: Point,
    arena: &Arena,
    agent_radius: f64,
) -> &'a TrackedEntity {
    let epsilon = agent_radius / 4.0;
    let cornered: Vec<&TrackedEntity> = candidates
        .iter()
        .copied()
        .filter(|entity| {
            let last = entity.last_position();
            arena.closest_corner(last).distance(last) < epsilon
        })
        .collect();

    if cornered.is_empty() {
        pick_nearest(candidates, from)
    } else {
        pick_nearest(&cornered, from)
    }
}
