//! `mathcore::lines` submodule implements two-dimensional parametric lines.
//!

use crate::mathcore::vectors::{Point2, Vector2};
use serde::Serialize;
use std::fmt;

/// [`Line2D`] struct represents two-dimensional line `origin + t * dir`.
///
/// Unlike rays, lines keep their direction as is, so `dir` also defines the line's length
/// (the point at `t = 1` is the end of the line).
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::lines::Line2D;
/// # use rayprim::mathcore::vectors::Vector2;
/// let line: Line2D = Line2D::from_points(Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
/// assert_eq!(line.length(), 5.0);
/// assert_eq!(line.point_at(1.0), Vector2::new(4.0, 5.0));
/// assert_eq!(line.inverted().point_at(1.0), Vector2::new(1.0, 1.0));
/// ```
///
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Line2D {
    /// Start of a line.
    ///
    pub origin: Point2,
    /// Direction (and length) of a line.
    ///
    pub dir: Vector2,
}
impl Line2D {
    /// Initializes line from start point and direction.
    ///
    pub fn new(origin: Point2, dir: Vector2) -> Self {
        Line2D { origin, dir }
    }
    /// Initializes line that goes from `start` to `end`.
    ///
    pub fn from_points(start: Point2, end: Point2) -> Self {
        Line2D::new(start, end - start)
    }

    /// Returns point of a line at given parameter.
    ///
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.dir * t
    }
    /// Returns length of a line.
    ///
    pub fn length(&self) -> f64 {
        self.dir.length()
    }

    /// Returns line with the same origin and direction of unit length.
    ///
    pub fn with_unit_direction(&self) -> Self {
        Line2D::new(self.origin, self.dir.to_unit_length())
    }
    /// Returns line with the same origin and direction, but with new length.
    ///
    pub fn with_length(&self, length: f64) -> Self {
        Line2D::new(self.origin, self.dir.to_unit_length() * length)
    }
    /// Returns line that goes from the end of this line to its start.
    ///
    pub fn inverted(&self) -> Self {
        Line2D::new(self.point_at(1.0), -self.dir)
    }

    /// Rotates line around its start by an angle in degrees.
    ///
    pub fn rotate_around_start(&self, degrees: f64) -> Self {
        Line2D::new(self.origin, self.dir.rotate_around(Vector2::ZERO, degrees))
    }
    /// Rotates line around its end by an angle in degrees.
    ///
    /// Resulting line starts at the end of this line.
    ///
    pub fn rotate_around_end(&self, degrees: f64) -> Self {
        Line2D::new(
            self.point_at(1.0),
            (-self.dir).rotate_around(Vector2::ZERO, degrees),
        )
    }
}
impl fmt::Display for Line2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line:{}/{}]", self.origin, self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::Line2D;
    use crate::mathcore::vectors::Vector2;

    #[test]
    fn line2d() {
        let line: Line2D = Line2D::new(Vector2::new(1.0, 0.0), Vector2::new(3.0, 4.0));
        assert_eq!(line.point_at(2.0), Vector2::new(7.0, 8.0));
        assert_eq!(line.with_unit_direction().length(), 1.0);
        assert_eq!(line.with_length(10.0).dir, Vector2::new(6.0, 8.0));

        let inverted: Line2D = line.inverted();
        assert_eq!(inverted.origin, Vector2::new(4.0, 4.0));
        assert_eq!(inverted.dir, Vector2::new(-3.0, -4.0));

        let degenerate: Line2D = Line2D::new(Vector2::ZERO, Vector2::ZERO);
        assert_eq!(degenerate.with_unit_direction().dir.elements(), [0.0, 0.0]);

        assert_eq!(format!("{}", line), "[line:(1/0)/(3/4)]");
    }

    #[test]
    fn line2d_rotation() {
        let line: Line2D = Line2D::from_points(Vector2::new(1.0, 1.0), Vector2::new(3.0, 1.0));

        let around_start: Line2D = line.rotate_around_start(90.0);
        assert_eq!(around_start.origin, Vector2::new(1.0, 1.0));
        assert_eq!(around_start.point_at(1.0), Vector2::new(1.0, 3.0));

        let around_end: Line2D = line.rotate_around_end(90.0);
        assert_eq!(around_end.origin, Vector2::new(3.0, 1.0));
        assert_eq!(around_end.point_at(1.0), Vector2::new(3.0, -1.0));
    }
}
