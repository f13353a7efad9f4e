use derive_more::{
    Add, AddAssign, Display, Div, From, Into, Mul, Neg, Sub, SubAssign,
};
use serde::{Deserialize, Serialize};
use std::ops;

/// A point in 2D screen space, in pixels.
///
/// ## 2D Coordinates
///
/// The origin is the top-left corner of the viewport. Right is positive x,
/// down is positive y. This matches the coordinate space of SVG, so points
/// can be written into documents without any transformation.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points
    pub fn distance_to(self, other: Point2) -> f64 {
        (self - other).length()
    }

    /// Squared Euclidean distance between two points. Cheaper than
    /// [Self::distance_to], and orders the same way.
    pub fn distance_squared_to(self, other: Point2) -> f64 {
        (self - other).length_squared()
    }

    /// Centroid of a triangle: the average of its three vertices
    pub fn centroid([p0, p1, p2]: &[Point2; 3]) -> Point2 {
        Point2::new((p0.x + p1.x + p2.x) / 3.0, (p0.y + p1.y + p2.y) / 3.0)
    }

    /// Format as `x,y`, the format used by SVG `points` lists
    pub fn to_svg_pair(self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

/// A vector in 2D space. This can represent offsets between two [Point2]s.
/// See [Point2] for a description of the 2D coordinate space.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl From<Vector2> for nalgebra::Vector2<f64> {
    fn from(v: Vector2) -> Self {
        nalgebra::Vector2::new(v.x, v.y)
    }
}

impl ops::Add<Vector2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vector2) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl ops::Sub<Point2> for Point2 {
    type Output = Vector2;

    fn sub(self, rhs: Point2) -> Self::Output {
        Vector2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_point_vector_arithmetic() {
        let p = Point2::new(1.0, 2.0);
        let q = Point2::new(4.0, 6.0);
        let v = q - p;
        assert_eq!(v, Vector2::new(3.0, 4.0));
        assert_eq!(p + v, q);
        assert_eq!(v * 2.0, Vector2::new(6.0, 8.0));
        assert_approx_eq!(p.distance_to(q), 5.0);
        assert_approx_eq!(p.distance_squared_to(q), 25.0);
    }

    #[test]
    fn test_centroid() {
        let c = Point2::centroid(&[
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(0.0, 3.0),
        ]);
        assert_approx_eq!(c.x, 1.0);
        assert_approx_eq!(c.y, 1.0);
    }
}
