//! Geometry primitives in model coordinates.
//!
//! Bounds are stored as origin plus size (`x`, `y`, `width`, `height`).
//! Comparisons between measured and authored geometry go through
//! [`almost_equals`] so sub-pixel rendering noise does not register as a
//! change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns true when `a` and `b` differ by no more than `epsilon`.
pub fn almost_equals(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// A point (or offset) in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            (1.0 - t) * self.x + t * other.x,
            (1.0 - t) * self.y + t * other.y,
        )
    }

    /// Component-wise tolerance comparison.
    pub fn almost_equals(&self, other: &Point, epsilon: f64) -> bool {
        almost_equals(self.x, other.x, epsilon) && almost_equals(self.y, other.y, epsilon)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    /// Creates a new dimension.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Empty bounds at the origin.
    pub const EMPTY: Bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates new bounds from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns the same size moved by `offset`.
    pub fn translate(&self, offset: Point) -> Bounds {
        Bounds::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Smallest bounds containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// All components finite and the size non-negative.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Tolerance comparison of all four components.
    pub fn almost_equals(&self, other: &Bounds, epsilon: f64) -> bool {
        almost_equals(self.x, other.x, epsilon)
            && almost_equals(self.y, other.y, epsilon)
            && almost_equals(self.width, other.width, epsilon)
            && almost_equals(self.height, other.height, epsilon)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}) {:.1}x{:.1}",
            self.x, self.y, self.width, self.height
        )
    }
}
