//! Geometry helpers shared by the stroke model, renderer and tool.
//!
//! This module provides:
//! - [`Point`]: 2D position (also used for pointer velocity vectors)
//! - [`Bounds`]: floating-point min/max envelope used for stroke bounding boxes
//! - [`Rect`]: integer rectangle used for damage tracking
//! - [`clamp`]: non-panicking range clamp

use serde::{Deserialize, Serialize};

// ============================================================================
// Points and Vectors
// ============================================================================

/// A 2D point in drawing coordinates.
///
/// Pointer velocities are carried in the same type (units per second).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Pointer velocity, in drawing units per second.
pub type Velocity = Point;

impl Point {
    /// The origin, also the "no motion" velocity.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Arithmetic mean of two points.
    pub fn midpoint(a: Point, b: Point) -> Point {
        Point {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
        }
    }
}

// ============================================================================
// Bounding Boxes
// ============================================================================

/// Axis-aligned floating point envelope.
///
/// The empty envelope is the zero-size box at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Builds the smallest envelope containing every point, or the empty box.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        iter.fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |acc, p| Self {
                min_x: acc.min_x.min(p.x),
                min_y: acc.min_y.min(p.y),
                max_x: acc.max_x.max(p.x),
                max_y: acc.max_y.max(p.y),
            },
        )
    }

    /// Converts to an integer rectangle grown by `padding` on every side.
    ///
    /// Returns `None` when the padded area is still empty.
    pub fn to_rect(&self, padding: f64) -> Option<Rect> {
        let padding = padding.max(0.0);
        Rect::from_min_max(
            (self.min_x - padding).floor() as i32,
            (self.min_y - padding).floor() as i32,
            (self.max_x + padding).ceil() as i32,
            (self.max_y + padding).ceil() as i32,
        )
    }
}

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Constrains a value to `[min, max]`.
///
/// Unlike `f64::clamp` this never panics; `min` wins if the range is inverted.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_arithmetic_mean() {
        let mid = Point::midpoint(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        assert_eq!(mid, Point::new(2.0, 1.0));
    }

    #[test]
    fn enclosing_empty_is_zero_box_at_origin() {
        let bounds = Bounds::enclosing(std::iter::empty());
        assert_eq!(bounds, Bounds::default());
        assert!(bounds.to_rect(0.0).is_none());
    }

    #[test]
    fn enclosing_tracks_extremes() {
        let bounds = Bounds::enclosing([
            Point::new(3.0, -1.0),
            Point::new(-2.0, 5.0),
            Point::new(1.0, 1.0),
        ]);
        assert_eq!(bounds.min_x, -2.0);
        assert_eq!(bounds.max_x, 3.0);
        assert_eq!(bounds.min_y, -1.0);
        assert_eq!(bounds.max_y, 5.0);
    }

    #[test]
    fn to_rect_pads_and_rounds_outward() {
        let bounds = Bounds {
            min_x: 10.5,
            min_y: 20.0,
            max_x: 30.2,
            max_y: 20.0,
        };
        let rect = bounds.to_rect(2.0).expect("padded rect");
        assert_eq!(rect, Rect::new(8, 18, 25, 4).unwrap());
        assert!(bounds.to_rect(0.0).is_none());
    }

    #[test]
    fn clamp_handles_both_ends() {
        assert_eq!(clamp(5.0, 1.0, 3.0), 3.0);
        assert_eq!(clamp(-1.0, 1.0, 3.0), 1.0);
        assert_eq!(clamp(2.0, 1.0, 3.0), 2.0);
        assert_eq!(clamp(f64::MAX, 1.0, 3.0), 3.0);
    }
}
