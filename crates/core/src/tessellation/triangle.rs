use crate::{
    tessellation::reflect::ReflectionLine,
    util::unit::Point2,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier for a triangle, derived from its centroid rounded to the
/// nearest pixel. Two triangles whose centroids round to the same pixel get
/// the same id, so this is an approximate spatial hash rather than exact
/// identity. Triangles produced by different reflection passes that land on
/// top of each other collapse to one id this way.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}-{}", x, y)]
pub struct TriangleId {
    pub x: i64,
    pub y: i64,
}

impl TriangleId {
    /// Derive the id for a triangle centered at the given point
    pub fn from_center(center: Point2) -> Self {
        Self {
            x: center.x.round() as i64,
            y: center.y.round() as i64,
        }
    }
}

/// A single triangle in the tessellation, in screen space. Triangles are
/// immutable once created. They're built either by the grid generator or by
/// reflecting another triangle, and are thrown away wholesale on redraw.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    id: TriangleId,
    points: [Point2; 3],
    center: Point2,
}

impl Triangle {
    /// Create a triangle from its three vertices. The centroid and id are
    /// derived from the vertices.
    pub fn new(points: [Point2; 3]) -> Self {
        Self::with_center(points, Point2::centroid(&points))
    }

    fn with_center(points: [Point2; 3], center: Point2) -> Self {
        Self {
            id: TriangleId::from_center(center),
            points,
            center,
        }
    }

    pub fn id(&self) -> TriangleId {
        self.id
    }

    pub fn points(&self) -> &[Point2; 3] {
        &self.points
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Mirror this triangle across a line. The vertices and the centroid
    /// are each reflected, and the id is re-derived from the new centroid.
    pub fn reflect(&self, line: &ReflectionLine) -> Self {
        Self::with_center(
            [
                line.reflect_point(self.points[0]),
                line.reflect_point(self.points[1]),
                line.reflect_point(self.points[2]),
            ],
            line.reflect_point(self.center),
        )
    }

    /// Is this triangle's centroid within `epsilon` (exclusive) of the
    /// given point?
    pub fn is_near(&self, point: Point2, epsilon: f64) -> bool {
        self.center.distance_to(point) < epsilon
    }

    /// The three edges of this triangle as vertex pairs, in the order
    /// `p0p1`, `p1p2`, `p2p0`
    pub fn edges(&self) -> [(Point2, Point2); 3] {
        let [p0, p1, p2] = self.points;
        [(p0, p1), (p1, p2), (p2, p0)]
    }
}
