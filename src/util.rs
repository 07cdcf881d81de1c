//! Utility types and functions for geometry and colors.
//!
//! This module provides:
//! - [`Point`]: a 2D point/vector in either screen or world space
//! - Rotation helpers used by hit-testing and rendering
//! - Color-name mapping for the configuration file

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

// ============================================================================
// Geometry
// ============================================================================

/// A 2D point (or displacement) with floating-point coordinates.
///
/// The same type is used for screen and world coordinates; which space a value
/// lives in is determined by the API that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    pub const ZERO: Point = Point::new(0.0, 0.0);

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Multiplies both components by `factor`.
    pub fn scaled(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Rotates the vector around the origin by `degrees` (clockwise in screen space).
    pub fn rotated(self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Returns true if both components are within `epsilon` of `other`.
    pub fn approx_eq(self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
/// - "crimson", "rose", "charcoal" (makeup presets)
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "crimson" => Some(CRIMSON),
        "rose" => Some(ROSE),
        "charcoal" => Some(CHARCOAL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_quarter_turn_swaps_axes() {
        let p = Point::new(10.0, 0.0).rotated(90.0);
        assert!(p.approx_eq(Point::new(0.0, 10.0), 1e-9));

        let back = p.rotated(-90.0);
        assert!(back.approx_eq(Point::new(10.0, 0.0), 1e-9));
    }

    #[test]
    fn point_arithmetic_and_distance() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(a + b, Point::new(4.0, 5.0));
        assert_eq!(a.distance(Point::ZERO), 5.0);
        assert_eq!(a.midpoint(b), Point::new(2.0, 2.5));
        assert_eq!(b.scaled(2.5), Point::new(2.5, 2.5));
    }

    #[test]
    fn name_color_mapping() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert_eq!(name_to_color("crimson").unwrap(), CRIMSON);
        assert!(name_to_color("chartreuse").is_none());
    }
}
