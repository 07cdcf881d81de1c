//! Freehand brush strokes.

use crate::draw::Color;
use crate::util::Point;
use std::fmt;

/// Identifier of a committed stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeId(pub(crate) u64);

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stroke-{}", self.0)
    }
}

/// Appearance of a brush stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in world units
    pub width: f64,
    /// Multiplied with the color's own alpha (0.0 - 1.0)
    pub opacity: f64,
}

/// A committed, immutable brush path in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    pub(crate) points: Vec<Point>,
    pub(crate) style: StrokeStyle,
}

impl Stroke {
    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Points in drawing order; never empty.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Returns true if any point lies within `radius` of `center` (inclusive).
    pub fn touches(&self, center: Point, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance(center) <= radius)
    }
}

/// A stroke still being drawn. Always holds at least the starting point.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDraft {
    points: Vec<Point>,
    style: StrokeStyle,
}

impl StrokeDraft {
    pub fn start(at: Point, style: StrokeStyle) -> Self {
        Self {
            points: vec![at],
            style,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub(crate) fn finish(self, id: StrokeId) -> Stroke {
        Stroke {
            id,
            points: self.points,
            style: self.style,
        }
    }
}
