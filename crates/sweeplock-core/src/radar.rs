//! Radar control: the per-tick heading decision and the corner sweep.
//!
//! # Decision priority
//!
//! Each tick [`RadarState::update`] picks the first rule that applies:
//!
//! 1. An active sweep continues.
//! 2. A confirmed target (locked and seen this tick) is tracked.
//! 3. At a corner with no confirmed target, a sweep begins.
//! 4. The nearest entity visible this tick is tracked.
//! 5. A fallback scan that avoids looking out of the arena.
//!
//! # Sweep
//!
//! A sweep only runs while the agent sits exactly on a corner. From there the
//! radar covers the arena with 90° passes between the two neighbouring
//! corners, each pass starting where the previous one ended:
//!
//! ```text
//!   First   vertical neighbour   -> horizontal neighbour   collect candidates
//!   Second  horizontal neighbour -> vertical neighbour     lock one, look for it
//!   Third   vertical neighbour   -> horizontal neighbour   take anything visible
//! ```
//!
//! Second aborts to Idle when First saw nobody. Third restarts at First after
//! a pass with no contact, clearing the candidate list. Leaving the corner
//! abandons the sweep.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::{AgentConfig, EnvironmentConstants};
use crate::geometry::{Arena, Heading, Point};
use crate::history::Tick;
use crate::interface::SensorSource;
use crate::selection::{nearest_visible, pick_cornered};
use crate::tracker::{EntityId, EntityTracker, TrackedEntity};

/// Sweep progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepPhase {
    /// No sweep in progress.
    #[default]
    Idle,
    /// Collecting candidates.
    First,
    /// Looking for the locked target.
    Second,
    /// Looking for anyone.
    Third,
}

/// Which decision rule produced a radar heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarSource {
    /// Continuing a sweep that was in the given phase.
    Sweep(SweepPhase),
    /// Tracking the confirmed target.
    Target,
    /// Beginning a sweep from a corner.
    SweepStart,
    /// Tracking the nearest visible entity.
    Nearest,
    /// Fallback scan.
    Fallback,
    /// Pre-aimed at the first sweep corner while heading for it.
    SweepPrep,
}

/// Radar heading for one tick and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarDecision {
    /// Heading to command.
    pub heading: Heading,
    /// Rule that chose it.
    pub source: RadarSource,
}

/// Per-tick inputs to the radar.
#[derive(Debug, Clone, Copy)]
pub struct RadarContext<'a> {
    /// Current tick.
    pub tick: Tick,
    /// Agent position.
    pub position: Point,
    /// Current radar heading.
    pub radar_heading: Heading,
    /// Match arena.
    pub arena: Arena,
    /// Host limits.
    pub limits: EnvironmentConstants,
    /// Known entities.
    pub tracker: &'a EntityTracker,
}

impl<'a> RadarContext<'a> {
    /// Builds a context from this tick's sensor readings.
    pub fn from_sensors<S>(
        tick: Tick,
        sensors: &S,
        config: &AgentConfig,
        tracker: &'a EntityTracker,
    ) -> Self
    where
        S: SensorSource + ?Sized,
    {
        Self {
            tick,
            position: sensors.position(),
            radar_heading: sensors.radar_heading(),
            arena: config.arena,
            limits: config.limits,
            tracker,
        }
    }

    fn heading_to(&self, point: Point) -> Heading {
        self.position.heading(point)
    }

    fn aimed_at(&self, point: Point) -> bool {
        self.radar_heading.approx_eq(self.heading_to(point))
    }
}

/// Where the fallback scan's waypoint was chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum ScanAnchor {
    /// Sitting on this corner.
    Corner(Point),
    /// On an edge next to `corner`, toggling `y` when `across_y` and `x`
    /// otherwise.
    Edge { corner: Point, across_y: bool },
}

/// Radar state carried between ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarState {
    phase: SweepPhase,
    target: Option<EntityId>,
    candidates: Vec<EntityId>,
    waypoint: Option<Point>,
    scan: Option<ScanAnchor>,
}

impl RadarState {
    /// Creates an idle radar with no target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sweep phase.
    #[must_use]
    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    /// True while a sweep is in progress.
    #[must_use]
    pub fn is_sweeping(&self) -> bool {
        self.phase != SweepPhase::Idle
    }

    /// Locked target, whether or not it is currently visible.
    #[must_use]
    pub fn locked_target(&self) -> Option<EntityId> {
        self.target
    }

    /// Entities collected by the last first pass.
    #[must_use]
    pub fn candidates(&self) -> &[EntityId] {
        &self.candidates
    }

    /// Point the radar is currently being steered towards, if any.
    #[must_use]
    pub fn waypoint(&self) -> Option<Point> {
        self.waypoint
    }

    /// The locked target, only if it was observed at `tick`.
    #[must_use]
    pub fn target<'t>(&self, tracker: &'t EntityTracker, tick: Tick) -> Option<&'t TrackedEntity> {
        self.target
            .and_then(|id| tracker.get(id))
            .filter(|entity| entity.is_visible_at(tick))
    }

    /// Enemies seen by the last first pass.
    ///
    /// Absent while a sweep is running, since the count is still being built.
    #[must_use]
    pub fn enemies_left(&self) -> Option<usize> {
        (self.phase == SweepPhase::Idle).then_some(self.candidates.len())
    }

    /// Radar heading that lines up the first pass of a sweep from the corner
    /// nearest to `position`.
    #[must_use]
    pub fn sweep_prep(position: Point, arena: &Arena) -> Heading {
        let corner = arena.closest_corner(position);
        position.heading(arena.vertical_neighbor(corner))
    }

    /// Chooses this tick's radar heading.
    pub fn update(&mut self, ctx: &RadarContext<'_>) -> RadarDecision {
        let decision = self.decide(ctx);
        trace!(tick = ctx.tick, heading = %decision.heading, source = ?decision.source, "radar decision");
        decision
    }

    fn decide(&mut self, ctx: &RadarContext<'_>) -> RadarDecision {
        if self.is_sweeping() {
            let phase = self.phase;
            if let Some(heading) = self.sweep(ctx) {
                return RadarDecision {
                    heading,
                    source: RadarSource::Sweep(phase),
                };
            }
        }

        if let Some(target) = self.target(ctx.tracker, ctx.tick) {
            self.waypoint = None;
            return RadarDecision {
                heading: ctx.heading_to(target.last_position()),
                source: RadarSource::Target,
            };
        }

        if ctx.arena.is_corner(ctx.position) {
            if let Some(heading) = self.sweep(ctx) {
                return RadarDecision {
                    heading,
                    source: RadarSource::SweepStart,
                };
            }
        }

        if let Some(entity) = nearest_visible(ctx.tracker, ctx.tick, ctx.position) {
            self.waypoint = None;
            return RadarDecision {
                heading: ctx.heading_to(entity.last_position()),
                source: RadarSource::Nearest,
            };
        }

        RadarDecision {
            heading: self.fallback_scan(ctx),
            source: RadarSource::Fallback,
        }
    }

    // =========================================================================
    // Sweep
    // =========================================================================

    /// Advances the sweep by one tick, starting one if idle.
    ///
    /// Returns `None` when the sweep cannot continue: the agent is off its
    /// corner, or the first pass found no candidates. The phase is `Idle`
    /// afterwards in both cases.
    pub fn sweep(&mut self, ctx: &RadarContext<'_>) -> Option<Heading> {
        let corner = ctx.arena.closest_corner(ctx.position);
        if !ctx.position.approx_eq(corner) {
            if self.is_sweeping() {
                debug!(tick = ctx.tick, phase = ?self.phase, "left corner, sweep abandoned");
            }
            self.finish();
            return None;
        }

        match self.phase {
            SweepPhase::Idle => {
                info!(tick = ctx.tick, %corner, "starting sweep");
                self.begin();
                self.first_pass(ctx, corner)
            }
            SweepPhase::First => self.first_pass(ctx, corner),
            SweepPhase::Second => self.second_pass(ctx, corner),
            SweepPhase::Third => self.third_pass(ctx, corner),
        }
    }

    fn begin(&mut self) {
        self.phase = SweepPhase::First;
        self.target = None;
        self.candidates.clear();
        self.waypoint = None;
    }

    fn finish(&mut self) {
        self.phase = SweepPhase::Idle;
        self.waypoint = None;
    }

    fn enter(&mut self, phase: SweepPhase, tick: Tick) {
        debug!(tick, from = ?self.phase, to = ?phase, "sweep phase transition");
        self.phase = phase;
    }

    fn first_pass(&mut self, ctx: &RadarContext<'_>, corner: Point) -> Option<Heading> {
        let start = ctx.arena.vertical_neighbor(corner);
        let end = ctx.arena.horizontal_neighbor(corner);

        if self.waypoint.is_some() && ctx.aimed_at(end) {
            self.enter(SweepPhase::Second, ctx.tick);
        }
        let mut waypoint = *self.waypoint.get_or_insert(start);
        if ctx.aimed_at(start) {
            waypoint = end;
            self.waypoint = Some(end);
        }

        if waypoint.approx_eq(end) {
            for entity in ctx.tracker.visible_at(ctx.tick) {
                if !self.candidates.contains(&entity.id()) {
                    self.candidates.push(entity.id());
                }
            }
        }

        Some(ctx.heading_to(waypoint))
    }

    fn second_pass(&mut self, ctx: &RadarContext<'_>, corner: Point) -> Option<Heading> {
        let start = ctx.arena.horizontal_neighbor(corner);
        let end = ctx.arena.vertical_neighbor(corner);

        let candidates: Vec<&TrackedEntity> = self
            .candidates
            .iter()
            .filter_map(|&id| ctx.tracker.get(id))
            .collect();
        if candidates.is_empty() {
            debug!(tick = ctx.tick, "no candidates, sweep aborted");
            self.finish();
            return None;
        }

        if self.target.is_none() {
            if !ctx.aimed_at(start) {
                return Some(ctx.heading_to(start));
            }
            let chosen = pick_cornered(&candidates, ctx.position, &ctx.arena, ctx.limits.bot_radius);
            info!(
                tick = ctx.tick,
                target = %chosen.id(),
                name = chosen.name(),
                enemies = candidates.len(),
                "target chosen"
            );
            self.target = Some(chosen.id());
            self.waypoint = Some(end);
        }

        if let Some(found) = self.target(ctx.tracker, ctx.tick) {
            info!(tick = ctx.tick, target = %found.id(), "target reacquired");
            let heading = ctx.heading_to(found.last_position());
            self.finish();
            return Some(heading);
        }

        if ctx.aimed_at(end) {
            self.enter(SweepPhase::Third, ctx.tick);
        }
        Some(ctx.heading_to(end))
    }

    fn third_pass(&mut self, ctx: &RadarContext<'_>, corner: Point) -> Option<Heading> {
        let start = ctx.arena.vertical_neighbor(corner);
        let end = ctx.arena.horizontal_neighbor(corner);

        if self.target.is_some() {
            if !ctx.aimed_at(start) {
                return Some(ctx.heading_to(start));
            }
            self.target = None;
            self.waypoint = Some(end);
        }

        if let Some(found) = nearest_visible(ctx.tracker, ctx.tick, ctx.position) {
            info!(tick = ctx.tick, target = %found.id(), name = found.name(), "target acquired");
            self.target = Some(found.id());
            let heading = ctx.heading_to(found.last_position());
            self.finish();
            return Some(heading);
        }

        if ctx.aimed_at(end) {
            warn!(tick = ctx.tick, %corner, "no contact after a full pass, restarting sweep");
            self.begin();
            return self.first_pass(ctx, corner);
        }
        Some(ctx.heading_to(self.waypoint.unwrap_or(end)))
    }

    // =========================================================================
    // Fallback scan
    // =========================================================================

    /// Scan heading used when nothing better is available.
    ///
    /// On a corner the radar swings between the two neighbouring corners. On
    /// an edge it swings, starting at the closest corner, between the two
    /// boundaries across the edge's normal axis. Elsewhere it keeps turning at
    /// the maximum radar rate.
    pub fn fallback_scan(&mut self, ctx: &RadarContext<'_>) -> Heading {
        let arena = ctx.arena;
        let corner = arena.closest_corner(ctx.position);

        if ctx.position.approx_eq(corner) {
            let mut waypoint = self.anchor(ScanAnchor::Corner(corner), arena.vertical_neighbor(corner));
            if ctx.aimed_at(waypoint) {
                waypoint = arena.opposite(waypoint);
                self.waypoint = Some(waypoint);
            }
            return ctx.heading_to(waypoint);
        }

        if let Some(normal) = arena.inward_normal(ctx.position) {
            // Unit normal: exactly one component is non-zero.
            let across_y = normal.y().abs() > 0.5;
            let mut waypoint = self.anchor(ScanAnchor::Edge { corner, across_y }, corner);
            if ctx.aimed_at(waypoint) {
                waypoint = if across_y {
                    Point::new(waypoint.x, arena.toggle_y(waypoint.y))
                } else {
                    Point::new(arena.toggle_x(waypoint.x), waypoint.y)
                };
                self.waypoint = Some(waypoint);
            }
            return ctx.heading_to(waypoint);
        }

        self.waypoint = None;
        self.scan = None;
        ctx.radar_heading + ctx.limits.max_radar_rotation
    }

    /// Current scan waypoint, restarting at `start` when the waypoint was set
    /// from somewhere else.
    fn anchor(&mut self, anchor: ScanAnchor, start: Point) -> Point {
        match self.waypoint {
            Some(waypoint) if self.scan == Some(anchor) => waypoint,
            _ => {
                if self.scan.is_some_and(|previous| previous != anchor) {
                    debug!(?anchor, %start, "fallback scan re-anchored");
                }
                self.scan = Some(anchor);
                self.waypoint = Some(start);
                start
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Point = Point::new(0.0, 0.0);

    fn config() -> AgentConfig {
        AgentConfig {
            arena: Arena::new(1000.0, 1000.0),
            ..AgentConfig::default()
        }
    }

    fn context<'a>(
        tracker: &'a EntityTracker,
        tick: Tick,
        position: Point,
        radar_heading: Heading,
    ) -> RadarContext<'a> {
        let config = config();
        RadarContext {
            tick,
            position,
            radar_heading,
            arena: config.arena,
            limits: config.limits,
            tracker,
        }
    }

    #[test]
    fn sweep_entry_heads_for_vertical_neighbour() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        let heading = radar
            .sweep(&context(&tracker, 1, ORIGIN, Heading::SOUTH))
            .unwrap();
        assert_eq!(radar.phase(), SweepPhase::First);
        assert!(heading.approx_eq(Heading::NORTH));
        assert_eq!(radar.waypoint(), Some(Point::new(0.0, 1000.0)));
    }

    #[test]
    fn first_pass_rotates_to_end_and_collects_once() {
        let mut tracker = EntityTracker::new(&config());
        let id = tracker.observe(2, "Seeker", Point::new(400.0, 400.0));
        let mut radar = RadarState::new();
        radar.sweep(&context(&tracker, 1, ORIGIN, Heading::SOUTH));
        assert!(radar.candidates().is_empty());

        let heading = radar
            .sweep(&context(&tracker, 2, ORIGIN, Heading::NORTH))
            .unwrap();
        assert!(heading.approx_eq(Heading::EAST));
        assert_eq!(radar.candidates(), &[id]);

        tracker.observe(3, "Seeker", Point::new(401.0, 400.0));
        radar.sweep(&context(&tracker, 3, ORIGIN, Heading::NORTH + 0.2));
        assert_eq!(radar.candidates(), &[id]);
        assert_eq!(radar.phase(), SweepPhase::First);

        radar.sweep(&context(&tracker, 4, ORIGIN, Heading::EAST));
        assert_eq!(radar.phase(), SweepPhase::Second);
    }

    #[test]
    fn second_pass_without_candidates_aborts() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState {
            phase: SweepPhase::Second,
            ..RadarState::default()
        };
        assert_eq!(radar.sweep(&context(&tracker, 5, ORIGIN, Heading::EAST)), None);
        assert_eq!(radar.phase(), SweepPhase::Idle);
    }

    #[test]
    fn second_pass_locks_and_reacquires() {
        let mut tracker = EntityTracker::new(&config());
        let near = tracker.observe(1, "A", Point::new(200.0, 200.0));
        let wedged = tracker.observe(1, "B", Point::new(998.0, 999.0));
        let mut radar = RadarState {
            phase: SweepPhase::Second,
            candidates: vec![near, wedged],
            ..RadarState::default()
        };

        // Not yet at the starting corner: turn there first.
        let heading = radar
            .sweep(&context(&tracker, 5, ORIGIN, Heading::NORTH))
            .unwrap();
        assert!(heading.approx_eq(Heading::EAST));
        assert_eq!(radar.locked_target(), None);

        let heading = radar
            .sweep(&context(&tracker, 6, ORIGIN, Heading::EAST))
            .unwrap();
        assert_eq!(radar.locked_target(), Some(wedged));
        assert!(heading.approx_eq(Heading::NORTH));
        assert_eq!(radar.phase(), SweepPhase::Second);

        tracker.observe(7, "B", Point::new(998.0, 998.0));
        let heading = radar
            .sweep(&context(&tracker, 7, ORIGIN, Heading::EAST - 0.3))
            .unwrap();
        assert_eq!(radar.phase(), SweepPhase::Idle);
        assert!(heading.approx_eq(ORIGIN.heading(Point::new(998.0, 998.0))));
        assert_eq!(radar.target(&tracker, 7).map(TrackedEntity::id), Some(wedged));
        assert_eq!(radar.enemies_left(), Some(2));
    }

    #[test]
    fn second_pass_gives_way_to_third() {
        let mut tracker = EntityTracker::new(&config());
        let id = tracker.observe(1, "A", Point::new(200.0, 200.0));
        let mut radar = RadarState {
            phase: SweepPhase::Second,
            target: Some(id),
            candidates: vec![id],
            waypoint: Some(Point::new(0.0, 1000.0)),
            ..RadarState::default()
        };
        radar.sweep(&context(&tracker, 9, ORIGIN, Heading::NORTH));
        assert_eq!(radar.phase(), SweepPhase::Third);
        assert_eq!(radar.enemies_left(), None);
    }

    #[test]
    fn third_pass_takes_anything_visible() {
        let mut tracker = EntityTracker::new(&config());
        let old = tracker.observe(1, "A", Point::new(200.0, 200.0));
        let mut radar = RadarState {
            phase: SweepPhase::Third,
            target: Some(old),
            candidates: vec![old],
            waypoint: Some(Point::new(0.0, 1000.0)),
            ..RadarState::default()
        };
        radar.sweep(&context(&tracker, 10, ORIGIN, Heading::NORTH));
        assert_eq!(radar.locked_target(), None);
        assert_eq!(radar.phase(), SweepPhase::Third);

        let other = tracker.observe(11, "C", Point::new(600.0, 100.0));
        radar.sweep(&context(&tracker, 11, ORIGIN, Heading::NORTH + 0.3));
        assert_eq!(radar.phase(), SweepPhase::Idle);
        assert_eq!(radar.locked_target(), Some(other));
    }

    #[test]
    fn third_pass_restarts_after_empty_pass() {
        let mut tracker = EntityTracker::new(&config());
        let old = tracker.observe(1, "A", Point::new(200.0, 200.0));
        let mut radar = RadarState {
            phase: SweepPhase::Third,
            candidates: vec![old],
            waypoint: Some(Point::new(1000.0, 0.0)),
            ..RadarState::default()
        };
        let heading = radar
            .sweep(&context(&tracker, 20, ORIGIN, Heading::EAST))
            .unwrap();
        assert_eq!(radar.phase(), SweepPhase::First);
        assert!(radar.candidates().is_empty());
        assert!(heading.approx_eq(Heading::NORTH));
    }

    #[test]
    fn leaving_the_corner_abandons_sweep() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        radar.sweep(&context(&tracker, 1, ORIGIN, Heading::SOUTH));
        assert!(radar.is_sweeping());
        assert_eq!(radar.sweep(&context(&tracker, 2, Point::new(3.0, 0.0), Heading::NORTH)), None);
        assert!(!radar.is_sweeping());
    }

    #[test]
    fn update_tracks_confirmed_target_before_starting_sweep() {
        let mut tracker = EntityTracker::new(&config());
        let id = tracker.observe(4, "A", Point::new(0.0, 500.0));
        let mut radar = RadarState {
            target: Some(id),
            ..RadarState::default()
        };
        let decision = radar.update(&context(&tracker, 4, ORIGIN, Heading::EAST));
        assert_eq!(decision.source, RadarSource::Target);
        assert!(decision.heading.approx_eq(Heading::NORTH));

        // Target not seen this tick: at a corner, a sweep starts.
        let decision = radar.update(&context(&tracker, 5, ORIGIN, Heading::EAST));
        assert_eq!(decision.source, RadarSource::SweepStart);
        assert_eq!(radar.phase(), SweepPhase::First);
        assert_eq!(radar.locked_target(), None);
    }

    #[test]
    fn update_tracks_nearest_visible_away_from_corners() {
        let mut tracker = EntityTracker::new(&config());
        tracker.observe(4, "Far", Point::new(900.0, 500.0));
        tracker.observe(4, "Close", Point::new(500.0, 600.0));
        let mut radar = RadarState::new();
        let decision = radar.update(&context(&tracker, 4, Point::new(500.0, 500.0), Heading::EAST));
        assert_eq!(decision.source, RadarSource::Nearest);
        assert!(decision.heading.approx_eq(Heading::NORTH));
    }

    #[test]
    fn fallback_in_open_field_turns_at_full_rate() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        let decision = radar.update(&context(&tracker, 4, Point::new(500.0, 500.0), Heading::EAST));
        assert_eq!(decision.source, RadarSource::Fallback);
        let expected = Heading::EAST + config().limits.max_radar_rotation;
        assert!(decision.heading.approx_eq(expected));
    }

    #[test]
    fn fallback_on_edge_swings_across_normal_axis() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        let on_left_edge = Point::new(0.0, 300.0);

        let heading = radar.fallback_scan(&context(&tracker, 1, on_left_edge, Heading::NORTH));
        assert!(heading.approx_eq(Heading::SOUTH));
        assert_eq!(radar.waypoint(), Some(ORIGIN));

        radar.fallback_scan(&context(&tracker, 2, on_left_edge, Heading::SOUTH));
        assert_eq!(radar.waypoint(), Some(Point::new(1000.0, 0.0)));

        let toward_far = on_left_edge.heading(Point::new(1000.0, 0.0));
        radar.fallback_scan(&context(&tracker, 3, on_left_edge, toward_far));
        assert_eq!(radar.waypoint(), Some(ORIGIN));
    }

    #[test]
    fn fallback_restarts_at_closest_corner_after_leaving_a_corner() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        radar.fallback_scan(&context(&tracker, 1, ORIGIN, Heading::SOUTH));
        assert_eq!(radar.waypoint(), Some(Point::new(0.0, 1000.0)));

        let on_bottom_edge = Point::new(300.0, 0.0);
        let heading = radar.fallback_scan(&context(&tracker, 2, on_bottom_edge, Heading::NORTH));
        assert_eq!(radar.waypoint(), Some(ORIGIN));
        assert!(heading.approx_eq(Heading::WEST));

        radar.fallback_scan(&context(&tracker, 3, on_bottom_edge, Heading::WEST));
        assert_eq!(radar.waypoint(), Some(Point::new(0.0, 1000.0)));
    }

    #[test]
    fn fallback_re_anchors_when_switching_edges_at_the_same_corner() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        let on_left_edge = Point::new(0.0, 300.0);
        radar.fallback_scan(&context(&tracker, 1, on_left_edge, Heading::SOUTH));
        assert_eq!(radar.waypoint(), Some(Point::new(1000.0, 0.0)));

        radar.fallback_scan(&context(&tracker, 2, Point::new(300.0, 0.0), Heading::NORTH));
        assert_eq!(radar.waypoint(), Some(ORIGIN));
    }

    #[test]
    fn fallback_on_corner_alternates_neighbours() {
        let tracker = EntityTracker::new(&config());
        let mut radar = RadarState::new();
        let heading = radar.fallback_scan(&context(&tracker, 1, ORIGIN, Heading::SOUTH));
        assert!(heading.approx_eq(Heading::NORTH));
        let heading = radar.fallback_scan(&context(&tracker, 2, ORIGIN, Heading::NORTH));
        assert!(heading.approx_eq(Heading::EAST));
        let heading = radar.fallback_scan(&context(&tracker, 3, ORIGIN, Heading::EAST));
        assert!(heading.approx_eq(Heading::NORTH));
    }

    #[test]
    fn sweep_prep_faces_vertical_neighbour() {
        let arena = Arena::new(1000.0, 1000.0);
        let heading = RadarState::sweep_prep(Point::new(980.0, 20.0), &arena);
        assert!(heading.approx_eq(Point::new(980.0, 20.0).heading(Point::new(1000.0, 1000.0))));
    }
}
