use crate::{
    tessellation::triangle::Triangle,
    util::unit::{Point2, Vector2},
};
use anyhow::{bail, Context};
use derive_more::Display;
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A position in the lattice coordinate system defined by the fundamental
/// alcove. `(0, 0)` is the fundamental alcove itself. Serialized as a
/// 2-element array `[a, b]`.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
#[display(fmt = "[{}, {}]", a, b)]
pub struct AlcoveCoordinate {
    pub a: f64,
    pub b: f64,
}

impl AlcoveCoordinate {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}

impl From<[f64; 2]> for AlcoveCoordinate {
    fn from([a, b]: [f64; 2]) -> Self {
        Self { a, b }
    }
}

impl From<AlcoveCoordinate> for [f64; 2] {
    fn from(coord: AlcoveCoordinate) -> Self {
        [coord.a, coord.b]
    }
}

/// Parse a coordinate from `a,b`, e.g. `-1,2`. Surrounding brackets and
/// whitespace are allowed, so the display format `[a, b]` parses too.
impl FromStr for AlcoveCoordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
        let mut parts = inner.split(',').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => Ok(Self::new(
                a.parse().with_context(|| format!("invalid a in {:?}", s))?,
                b.parse().with_context(|| format!("invalid b in {:?}", s))?,
            )),
            _ => bail!("invalid alcove coordinate {:?}, expected a,b", s),
        }
    }
}

/// The affine frame that maps alcove coordinates onto screen space. The
/// origin is the fundamental alcove's centroid, and the two basis vectors
/// run from that centroid to the alcove's first and second vertex.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeBasis {
    pub origin: Point2,
    pub v1: Vector2,
    pub v2: Vector2,
}

impl LatticeBasis {
    /// Derive the basis from a fundamental alcove
    pub fn from_triangle(triangle: &Triangle) -> Self {
        let center = triangle.center();
        let [p0, p1, _] = *triangle.points();
        Self {
            origin: center,
            v1: p0 - center,
            v2: p1 - center,
        }
    }

    /// Map a lattice coordinate to its screen position:
    /// `origin + a*v1 + b*v2`
    pub fn to_pixel(&self, coord: AlcoveCoordinate) -> Point2 {
        self.origin + self.v1 * coord.a + self.v2 * coord.b
    }

    /// Map a screen position back into lattice coordinates. Returns `None`
    /// if the basis vectors are parallel, in which case the mapping has no
    /// inverse.
    pub fn to_alcove(&self, point: Point2) -> Option<AlcoveCoordinate> {
        let matrix = Matrix2::from_columns(&[
            nalgebra::Vector2::from(self.v1),
            nalgebra::Vector2::from(self.v2),
        ]);
        let inverse = matrix.try_inverse()?;
        let solved = inverse * nalgebra::Vector2::from(point - self.origin);
        Some(AlcoveCoordinate::new(solved.x, solved.y))
    }
}
