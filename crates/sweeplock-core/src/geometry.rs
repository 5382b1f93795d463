//! Planar geometry for the arena: points, displacement vectors, headings.
//!
//! # Heading convention
//!
//! Headings are measured from the vertical axis: heading `0` points along `+y`
//! and heading `π/2` points along `+x`. Polar construction follows the same
//! rule, so `Vector::from_polar(r, θ)` is `(r·sin θ, r·cos θ)`. Every heading
//! computation in the crate depends on this; do not mix in `atan2(y, x)`.
//!
//! # Tolerance
//!
//! Positions and headings are compared with [`TOLERANCE`] rather than exact
//! float equality. The host clamps positions to the arena boundary, so a bot
//! parked in a corner reads back as the corner within rounding.
//!
//! # Example
//!
//! ```
//! use sweeplock_core::geometry::{Heading, Point, Vector};
//!
//! let origin = Point::new(0.0, 0.0);
//! let east = Point::new(10.0, 0.0);
//! assert!(origin.heading(east).approx_eq(Heading::EAST));
//!
//! let v = Vector::from_polar(2.0, Heading::EAST.radians());
//! assert!((v.x() - 2.0).abs() < 1e-9);
//! ```

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Tolerance for position and heading equality.
pub const TOLERANCE: f64 = 1e-6;

// =============================================================================
// Heading
// =============================================================================

/// A circular angle in radians, always stored in `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Heading(f64);

impl Heading {
    /// Pointing along `+y`.
    pub const NORTH: Self = Self(0.0);
    /// Pointing along `+x`.
    pub const EAST: Self = Self(PI / 2.0);
    /// Pointing along `-y`.
    pub const SOUTH: Self = Self(PI);
    /// Pointing along `-x`.
    pub const WEST: Self = Self(3.0 * PI / 2.0);
    /// One degree, in radians.
    pub const ONE_DEGREE: f64 = PI / 180.0;

    /// Creates a heading, wrapping `radians` into `[0, 2π)`.
    #[must_use]
    pub fn new(radians: f64) -> Self {
        let wrapped = radians.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU {
            Self(0.0)
        } else {
            Self(wrapped)
        }
    }

    /// Heading of the displacement from `from` to `to`.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        Vector::from_points(to, from).heading()
    }

    /// Angle in radians, in `[0, 2π)`.
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }

    /// Signed shortest rotation from `self` to `other`, in `(-π, π]`.
    #[must_use]
    pub fn delta(self, other: Self) -> f64 {
        signed_angle(other.0 - self.0)
    }

    /// True when both headings agree within [`TOLERANCE`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        self.delta(other).abs() <= TOLERANCE
    }
}

impl Add<f64> for Heading {
    type Output = Self;

    fn add(self, radians: f64) -> Self::Output {
        Self::new(self.0 + radians)
    }
}

impl Sub<f64> for Heading {
    type Output = Self;

    fn sub(self, radians: f64) -> Self::Output {
        Self::new(self.0 - radians)
    }
}

impl Add for Heading {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.0 + other.0)
    }
}

impl Sub for Heading {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.0 - other.0)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0.to_degrees())
    }
}

/// Wraps an angle into `(-π, π]`.
fn signed_angle(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

// =============================================================================
// Point
// =============================================================================

/// A coordinate in arena space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        DVec2::from(self).distance(DVec2::from(other))
    }

    /// Heading from this point toward `other`.
    #[must_use]
    pub fn heading(self, other: Self) -> Heading {
        Heading::between(self, other)
    }

    /// True when both coordinates agree within [`TOLERANCE`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= TOLERANCE && (self.y - other.y).abs() <= TOLERANCE
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, v: Vector) -> Self::Output {
        Self::new(self.x + v.x(), self.y + v.y())
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// =============================================================================
// Vector
// =============================================================================

/// A 2D displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector(DVec2);

impl Vector {
    /// The zero displacement.
    pub const ZERO: Self = Self(DVec2::ZERO);

    /// Creates a vector from components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Polar construction using the vertical-axis convention:
    /// `x = r·sin θ`, `y = r·cos θ`.
    #[must_use]
    pub fn from_polar(radius: f64, theta: f64) -> Self {
        Self::new(radius * theta.sin(), radius * theta.cos())
    }

    /// Displacement from `tail` to `head`.
    #[must_use]
    pub fn from_points(head: Point, tail: Point) -> Self {
        Self(DVec2::from(head) - DVec2::from(tail))
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.0.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(self) -> f64 {
        self.0.y
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.0.dot(other.0)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DivideByZero`] when the length is exactly zero.
    pub fn normalize(self) -> Result<Self, GeometryError> {
        let length = self.length();
        if length == 0.0 {
            return Err(GeometryError::DivideByZero);
        }
        Ok(Self(self.0 / length))
    }

    /// Rotates by `theta` radians in the heading sense: a vector at heading
    /// `φ` ends up at heading `φ + θ`. With `+y` drawn downward, as the arena
    /// is rendered, this is a counter-clockwise turn.
    #[must_use]
    pub fn rotate(self, theta: f64) -> Self {
        // glam rotates from +x toward +y; headings grow from +y toward +x
        Self(DVec2::from_angle(-theta).rotate(self.0))
    }

    /// Heading this displacement points along. The zero vector reads as north.
    #[must_use]
    pub fn heading(self) -> Heading {
        Heading::new(self.0.x.atan2(self.0.y))
    }

    /// Rescales to `max` when longer than `max`; shorter vectors are returned as-is.
    #[must_use]
    pub fn with_max_length(self, max: f64) -> Self {
        if self.length() > max {
            self.normalize().map_or(self, |unit| unit * max)
        } else {
            self
        }
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self(self.0 - other.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self(self.0 * scalar)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        v.0
    }
}

// =============================================================================
// Arena
// =============================================================================

/// The axis-aligned match area, spanning `(0, 0)` to `(width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Extent along `x`.
    pub width: f64,
    /// Extent along `y`.
    pub height: f64,
}

impl Arena {
    /// Creates an arena of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre of the arena.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Length of the diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// True when `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Projects `point` onto the arena if it lies outside.
    #[must_use]
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    /// The four corners, starting at the origin and going counter-clockwise.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }

    /// The corner nearest to `point`.
    #[must_use]
    pub fn closest_corner(&self, point: Point) -> Point {
        let x = if point.x < self.width / 2.0 { 0.0 } else { self.width };
        let y = if point.y < self.height / 2.0 { 0.0 } else { self.height };
        Point::new(x, y)
    }

    /// True when `point` sits on a corner.
    #[must_use]
    pub fn is_corner(&self, point: Point) -> bool {
        point.approx_eq(self.closest_corner(point))
    }

    /// True when `point` lies on any edge (corners included).
    #[must_use]
    pub fn on_edge(&self, point: Point) -> bool {
        self.inward_normal(point).is_some()
    }

    /// Unit normal pointing into the arena from the edge `point` lies on.
    /// Vertical edges take precedence at corners.
    #[must_use]
    pub fn inward_normal(&self, point: Point) -> Option<Vector> {
        if point.x.abs() <= TOLERANCE {
            Some(Vector::new(1.0, 0.0))
        } else if (point.x - self.width).abs() <= TOLERANCE {
            Some(Vector::new(-1.0, 0.0))
        } else if point.y.abs() <= TOLERANCE {
            Some(Vector::new(0.0, 1.0))
        } else if (point.y - self.height).abs() <= TOLERANCE {
            Some(Vector::new(0.0, -1.0))
        } else {
            None
        }
    }

    /// Swaps an `x` coordinate between the two vertical boundaries:
    /// values in the left half map to `width`, the rest to `0`.
    #[must_use]
    pub fn toggle_x(&self, x: f64) -> f64 {
        if x < self.width / 2.0 {
            self.width
        } else {
            0.0
        }
    }

    /// Swaps a `y` coordinate between the two horizontal boundaries.
    #[must_use]
    pub fn toggle_y(&self, y: f64) -> f64 {
        if y < self.height / 2.0 {
            self.height
        } else {
            0.0
        }
    }

    /// The corner that shares `corner`'s `x` coordinate.
    #[must_use]
    pub fn vertical_neighbor(&self, corner: Point) -> Point {
        Point::new(corner.x, self.toggle_y(corner.y))
    }

    /// The corner that shares `corner`'s `y` coordinate.
    #[must_use]
    pub fn horizontal_neighbor(&self, corner: Point) -> Point {
        Point::new(self.toggle_x(corner.x), corner.y)
    }

    /// The corner diagonally across from `corner`.
    #[must_use]
    pub fn opposite(&self, corner: Point) -> Point {
        Point::new(self.toggle_x(corner.x), self.toggle_y(corner.y))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1200.0, 700.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn heading_wraps_into_full_turn() {
        assert!(close(Heading::new(TAU + 0.5).radians(), 0.5));
        assert!(close(Heading::new(-0.5).radians(), TAU - 0.5));
        assert!(Heading::new(TAU).approx_eq(Heading::NORTH));
    }

    #[test]
    fn heading_delta_is_signed_and_shortest() {
        let a = Heading::new(0.1);
        let b = Heading::new(TAU - 0.1);
        assert!(close(a.delta(b), -0.2));
        assert!(close(b.delta(a), 0.2));
        assert!(close(Heading::NORTH.delta(Heading::SOUTH), PI));
        assert!(close(Heading::SOUTH.delta(Heading::NORTH), PI));
    }

    #[test]
    fn heading_arithmetic_wraps() {
        let h = Heading::WEST + PI;
        assert!(h.approx_eq(Heading::EAST));
        let h = Heading::NORTH - PI / 2.0;
        assert!(h.approx_eq(Heading::WEST));
        assert!((Heading::EAST + Heading::EAST).approx_eq(Heading::SOUTH));
        assert!((Heading::NORTH - Heading::EAST).approx_eq(Heading::WEST));
    }

    #[test]
    fn heading_between_uses_vertical_axis() {
        let o = Point::new(0.0, 0.0);
        assert!(Heading::between(o, Point::new(0.0, 5.0)).approx_eq(Heading::NORTH));
        assert!(Heading::between(o, Point::new(5.0, 0.0)).approx_eq(Heading::EAST));
        assert!(Heading::between(o, Point::new(0.0, -5.0)).approx_eq(Heading::SOUTH));
        assert!(Heading::between(o, Point::new(-5.0, 0.0)).approx_eq(Heading::WEST));
    }

    #[test]
    fn polar_construction_matches_convention() {
        let v = Vector::from_polar(2.0, 0.0);
        assert!(close(v.x(), 0.0) && close(v.y(), 2.0));
        let v = Vector::from_polar(2.0, PI / 2.0);
        assert!(close(v.x(), 2.0) && close(v.y(), 0.0));
        assert!(v.heading().approx_eq(Heading::EAST));
    }

    #[test]
    fn vector_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -1.0);
        assert_eq!(a + b, Vector::new(4.0, 1.0));
        assert_eq!(a - b, Vector::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0));
        assert!(close(a.dot(b), 1.0));
        assert!(close(Vector::new(3.0, 4.0).length(), 5.0));
    }

    #[test]
    fn from_points_is_head_minus_tail() {
        let v = Vector::from_points(Point::new(5.0, 7.0), Point::new(2.0, 3.0));
        assert_eq!(v, Vector::new(3.0, 4.0));
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(Vector::ZERO.normalize(), Err(GeometryError::DivideByZero));
        let unit = Vector::new(0.0, 4.0).normalize().unwrap();
        assert!(close(unit.length(), 1.0));
    }

    #[test]
    fn rotate_advances_heading() {
        let v = Vector::from_polar(1.0, 0.0).rotate(PI / 2.0);
        assert!(close(v.x(), 1.0) && close(v.y(), 0.0));
        let v = Vector::from_polar(3.0, 0.4).rotate(0.3);
        assert!(v.heading().approx_eq(Heading::new(0.7)));
        assert!(close(v.length(), 3.0));
    }

    #[test]
    fn rotate_then_unrotate_is_identity() {
        let v = Vector::new(-12.5, 3.25);
        let back = v.rotate(1.234).rotate(-1.234);
        assert!((back.x() - v.x()).abs() < 1e-6);
        assert!((back.y() - v.y()).abs() < 1e-6);
    }

    #[test]
    fn with_max_length_clamps_only_long_vectors() {
        let v = Vector::new(30.0, 40.0).with_max_length(5.0);
        assert!(close(v.length(), 5.0));
        let short = Vector::new(1.0, 1.0);
        assert_eq!(short.with_max_length(5.0), short);
        assert_eq!(Vector::ZERO.with_max_length(0.0), Vector::ZERO);
    }

    #[test]
    fn arena_corner_helpers() {
        let arena = Arena::new(1000.0, 600.0);
        assert_eq!(arena.closest_corner(Point::new(10.0, 20.0)), Point::new(0.0, 0.0));
        assert_eq!(arena.closest_corner(Point::new(900.0, 500.0)), Point::new(1000.0, 600.0));
        assert!(arena.is_corner(Point::new(1000.0, 0.0)));
        assert!(!arena.is_corner(Point::new(999.0, 0.0)));

        let corner = Point::new(0.0, 0.0);
        assert_eq!(arena.vertical_neighbor(corner), Point::new(0.0, 600.0));
        assert_eq!(arena.horizontal_neighbor(corner), Point::new(1000.0, 0.0));
        assert_eq!(arena.opposite(corner), Point::new(1000.0, 600.0));
        assert_eq!(arena.opposite(Point::new(1000.0, 600.0)), corner);
    }

    #[test]
    fn arena_toggle_is_two_valued() {
        let arena = Arena::new(1000.0, 600.0);
        assert!(close(arena.toggle_x(0.0), 1000.0));
        assert!(close(arena.toggle_x(1000.0), 0.0));
        assert!(close(arena.toggle_x(1.0), 1000.0));
        assert!(close(arena.toggle_y(600.0), 0.0));
    }

    #[test]
    fn arena_clamp_and_contains() {
        let arena = Arena::new(100.0, 50.0);
        assert!(arena.contains(Point::new(100.0, 0.0)));
        assert!(!arena.contains(Point::new(-0.1, 10.0)));
        assert_eq!(arena.clamp(Point::new(-5.0, 80.0)), Point::new(0.0, 50.0));
    }

    #[test]
    fn arena_edges_and_normals() {
        let arena = Arena::new(100.0, 50.0);
        assert_eq!(arena.inward_normal(Point::new(0.0, 20.0)), Some(Vector::new(1.0, 0.0)));
        assert_eq!(arena.inward_normal(Point::new(100.0, 20.0)), Some(Vector::new(-1.0, 0.0)));
        assert_eq!(arena.inward_normal(Point::new(40.0, 0.0)), Some(Vector::new(0.0, 1.0)));
        assert_eq!(arena.inward_normal(Point::new(40.0, 50.0)), Some(Vector::new(0.0, -1.0)));
        assert!(!arena.on_edge(Point::new(40.0, 20.0)));
        assert!(close(arena.diagonal(), 100.0_f64.hypot(50.0)));
    }
}
