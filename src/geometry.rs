//! geometry — small value types used to parameterize transforms.
//!
//! Purpose
//! -------
//! Provide the fractional points, sizes, rectangles, intervals and vectors
//! that crop, pick, resample and line-profile take as parameters.
//!
//! Conventions
//! -----------
//! - Points and sizes are `(y, x)` / `(height, width)`: axis 0 first.
//! - Positions passed to transforms are fractions of the data extent in
//!   `[0, 1]` unless a function says otherwise.
use serde::{Deserialize, Serialize};

/// A `(y, x)` point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatPoint {
    pub y: f64,
    pub x: f64,
}

impl FloatPoint {
    pub fn new(y: f64, x: f64) -> Self {
        FloatPoint { y, x }
    }
}

/// A `(y, x)` point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntPoint {
    pub y: i64,
    pub x: i64,
}

impl IntPoint {
    pub fn new(y: i64, x: i64) -> Self {
        IntPoint { y, x }
    }

    /// Floor both coordinates of a float point.
    pub fn from_float_point(point: FloatPoint) -> Self {
        IntPoint { y: point.y.floor() as i64, x: point.x.floor() as i64 }
    }
}

/// A `(height, width)` extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatSize {
    pub height: f64,
    pub width: f64,
}

impl FloatSize {
    pub fn new(height: f64, width: f64) -> Self {
        FloatSize { height, width }
    }
}

/// An axis-aligned rectangle given by its top-left origin and its size.
///
/// Examples
/// --------
/// ```rust
/// use calibrated_data::geometry::{FloatPoint, FloatRect, FloatSize};
///
/// let rect = FloatRect::from_center_and_size(
///     FloatPoint::new(0.5, 0.5),
///     FloatSize::new(0.5, 0.25),
/// );
/// assert_eq!(rect.origin, FloatPoint::new(0.25, 0.375));
/// assert_eq!(rect.center(), FloatPoint::new(0.5, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatRect {
    pub origin: FloatPoint,
    pub size: FloatSize,
}

impl FloatRect {
    pub fn from_origin_and_size(origin: FloatPoint, size: FloatSize) -> Self {
        FloatRect { origin, size }
    }

    pub fn from_center_and_size(center: FloatPoint, size: FloatSize) -> Self {
        let origin = FloatPoint::new(center.y - size.height * 0.5, center.x - size.width * 0.5);
        FloatRect { origin, size }
    }

    /// The whole unit square, `(0, 0)` to `(1, 1)`.
    pub fn unit() -> Self {
        FloatRect::from_origin_and_size(FloatPoint::new(0.0, 0.0), FloatSize::new(1.0, 1.0))
    }

    pub fn center(&self) -> FloatPoint {
        FloatPoint::new(
            self.origin.y + self.size.height * 0.5,
            self.origin.x + self.size.width * 0.5,
        )
    }

    pub fn bottom_right(&self) -> FloatPoint {
        FloatPoint::new(self.origin.y + self.size.height, self.origin.x + self.size.width)
    }
}

/// A half-open fractional interval `[start, end)` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatInterval {
    pub start: f64,
    pub end: f64,
}

impl FloatInterval {
    pub fn new(start: f64, end: f64) -> Self {
        FloatInterval { start, end }
    }
}

/// A directed segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatVector {
    pub start: FloatPoint,
    pub end: FloatPoint,
}

impl FloatVector {
    pub fn new(start: FloatPoint, end: FloatPoint) -> Self {
        FloatVector { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end.y - self.start.y).hypot(self.end.x - self.start.x)
    }
}

/// Truncate each component to an axis extent (negative values become 0).
pub fn make_shape(extents: &[f64]) -> Vec<usize> {
    extents.iter().map(|&n| n as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn center_and_origin_constructors_agree() {
        let size = FloatSize::new(0.4, 0.2);
        let from_center = FloatRect::from_center_and_size(FloatPoint::new(0.5, 0.5), size);
        let from_origin = FloatRect::from_origin_and_size(FloatPoint::new(0.3, 0.4), size);
        assert_relative_eq!(from_center.origin.y, from_origin.origin.y);
        assert_relative_eq!(from_center.origin.x, from_origin.origin.x);
        assert_eq!(FloatRect::unit().bottom_right(), FloatPoint::new(1.0, 1.0));
    }

    #[test]
    fn make_shape_truncates() {
        assert_eq!(make_shape(&[4.9, 5.0, -1.0]), vec![4, 5, 0]);
    }

    #[test]
    fn vector_length_and_int_point_floor() {
        let v = FloatVector::new(FloatPoint::new(0.0, 0.0), FloatPoint::new(3.0, 4.0));
        assert_relative_eq!(v.length(), 5.0);
        assert_eq!(IntPoint::from_float_point(FloatPoint::new(-0.5, 2.7)), IntPoint::new(-1, 2));
    }
}
