//! Generation of the base triangular grid. Triangles are addressed by axial
//! coordinates `(q, r)` and laid out with a fixed axial-to-pixel transform.
//! See https://www.redblobgames.com/grids/hexagons/#coordinates-axial for
//! background on the axial system.

use crate::{
    tessellation::{triangle::Triangle, Viewport},
    util::unit::Point2,
};
use anyhow::bail;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Largest axial radius a scan may cover. The scan visits `(2r + 1)²`
/// positions, so this caps a single build at roughly 16.8 million.
pub const MAX_GRID_RADIUS: i32 = 2048;

/// A position on the axial grid that the base triangles are generated from
#[derive(
    Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", q, r)]
pub struct AxialPoint {
    pub q: i32,
    pub r: i32,
}

impl AxialPoint {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Which way the triangle at this position points. Orientation follows a
    /// checkerboard: even `q + r` points up, odd points down.
    pub fn orientation(self) -> Orientation {
        if (self.q + self.r).rem_euclid(2) == 0 {
            Orientation::Up
        } else {
            Orientation::Down
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Up,
    Down,
}

/// The fixed transform from axial positions to screen space, anchored on the
/// viewport center
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Screen position of axial `(0, 0)`
    origin: Point2,
    /// Side length of one triangle, in pixels
    grid_size: f64,
}

impl GridLayout {
    pub fn new(origin: Point2, grid_size: f64) -> Self {
        Self { origin, grid_size }
    }

    /// Height of one triangle, in pixels
    pub fn triangle_height(&self) -> f64 {
        self.grid_size * SQRT_3 / 2.0
    }

    /// Convert an axial position to its anchor point in screen space
    pub fn axial_to_pixel(&self, pos: AxialPoint) -> Point2 {
        let q = f64::from(pos.q);
        let r = f64::from(pos.r);
        Point2::new(
            self.origin.x + self.grid_size * (q + r / 2.0),
            self.origin.y + self.grid_size * SQRT_3 / 2.0 * r,
        )
    }

    /// Get the three vertices of the triangle at an axial position. The
    /// apex comes first, then the two base corners from left to right.
    pub fn vertices(&self, pos: AxialPoint) -> [Point2; 3] {
        let p = self.axial_to_pixel(pos);
        let h = self.triangle_height();
        let half = self.grid_size / 2.0;
        match pos.orientation() {
            Orientation::Up => [
                Point2::new(p.x, p.y - h * 2.0 / 3.0),
                Point2::new(p.x - half, p.y + h / 3.0),
                Point2::new(p.x + half, p.y + h / 3.0),
            ],
            Orientation::Down => [
                Point2::new(p.x, p.y + h * 2.0 / 3.0),
                Point2::new(p.x - half, p.y - h / 3.0),
                Point2::new(p.x + half, p.y - h / 3.0),
            ],
        }
    }
}

/// A lazy iterator over the base triangles covering a viewport. Positions
/// are scanned with `q` in the outer loop and `r` in the inner loop, each
/// over `[-radius, radius]`. Triangles whose centroid lands outside the
/// viewport are skipped. The scan order is fixed, so two iterators built
/// from the same inputs yield identical sequences.
///
/// Iterators are consumed by iteration. To scan again, build a new one.
#[derive(Clone, Debug)]
pub struct GridIter {
    layout: GridLayout,
    viewport: Viewport,
    radius: i32,
    /// Next position to check. `None` once the scan is done.
    next: Option<AxialPoint>,
}

impl GridIter {
    /// Start a scan over the given viewport. The axial radius is sized to
    /// cover the viewport's longer side, plus `margin_cells` extra steps.
    /// Returns an error if that radius is negative, not a number, or above
    /// [MAX_GRID_RADIUS].
    pub fn new(
        viewport: Viewport,
        grid_size: f64,
        margin_cells: u16,
    ) -> anyhow::Result<Self> {
        let max = viewport.width.max(viewport.height);
        let radius = (max / grid_size).ceil() + f64::from(margin_cells);
        if !(0.0..=f64::from(MAX_GRID_RADIUS)).contains(&radius) {
            bail!(
                "viewport {}x{} needs a grid radius of {} at grid size {}, \
                 the limit is {}",
                viewport.width,
                viewport.height,
                radius,
                grid_size,
                MAX_GRID_RADIUS
            );
        }
        // In [0, MAX_GRID_RADIUS], so the cast is exact
        let radius = radius as i32;
        Ok(Self {
            layout: GridLayout::new(viewport.center(), grid_size),
            viewport,
            radius,
            next: Some(AxialPoint::new(-radius, -radius)),
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Distance from the axial origin to the edge of the scanned range
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Step the cursor forward one position, returning the current one
    fn advance(&mut self) -> Option<AxialPoint> {
        let current = self.next?;
        self.next = if current.r < self.radius {
            Some(AxialPoint::new(current.q, current.r + 1))
        } else if current.q < self.radius {
            Some(AxialPoint::new(current.q + 1, -self.radius))
        } else {
            None
        };
        Some(current)
    }
}

impl Iterator for GridIter {
    type Item = Triangle;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pos) = self.advance() {
            let triangle = Triangle::new(self.layout.vertices(pos));
            if self.viewport.contains(triangle.center()) {
                return Some(triangle);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let side = (2 * self.radius + 1) as usize;
        (0, Some(side * side))
    }
}

impl FusedIterator for GridIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_orientation_checkerboard() {
        assert_eq!(AxialPoint::new(0, 0).orientation(), Orientation::Up);
        assert_eq!(AxialPoint::new(1, 0).orientation(), Orientation::Down);
        assert_eq!(AxialPoint::new(-1, 0).orientation(), Orientation::Down);
        assert_eq!(AxialPoint::new(-1, -1).orientation(), Orientation::Up);
    }

    #[test]
    fn test_axial_to_pixel() {
        let layout = GridLayout::new(Point2::new(100.0, 100.0), 80.0);
        let p = layout.axial_to_pixel(AxialPoint::new(1, 2));
        assert_approx_eq!(p.x, 100.0 + 80.0 * 2.0);
        assert_approx_eq!(p.y, 100.0 + 80.0 * SQRT_3);
    }

    #[test]
    fn test_vertices_centroid_matches_anchor() {
        // The vertex offsets are 2h/3 and h/3, so the centroid lands on the
        // anchor for both orientations
        let layout = GridLayout::new(Point2::new(0.0, 0.0), 80.0);
        for pos in &[AxialPoint::new(0, 0), AxialPoint::new(1, 0)] {
            let triangle = Triangle::new(layout.vertices(*pos));
            let anchor = layout.axial_to_pixel(*pos);
            assert_approx_eq!(triangle.center().x, anchor.x, 1e-9);
            assert_approx_eq!(triangle.center().y, anchor.y, 1e-9);
        }
    }

    #[test]
    fn test_scan_order_and_bounds() {
        let viewport = Viewport::new(400.0, 300.0);
        let triangles: Vec<_> =
            GridIter::new(viewport, 80.0, 2).unwrap().collect();
        assert!(!triangles.is_empty());
        for triangle in &triangles {
            assert!(viewport.contains(triangle.center()));
        }

        // A fresh iterator yields the exact same sequence
        let again: Vec<_> =
            GridIter::new(viewport, 80.0, 2).unwrap().collect();
        assert_eq!(triangles, again);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut iter =
            GridIter::new(Viewport::new(100.0, 100.0), 80.0, 0).unwrap();
        while iter.next().is_some() {}
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_radius_covers_viewport() {
        let iter =
            GridIter::new(Viewport::new(1000.0, 600.0), 80.0, 2).unwrap();
        // ceil(1000 / 80) + 2
        assert_eq!(iter.radius(), 15);
    }

    #[test]
    fn test_radius_limit() {
        // Right at the limit is fine
        let iter =
            GridIter::new(Viewport::new(2046.0, 10.0), 1.0, 2).unwrap();
        assert_eq!(iter.radius(), MAX_GRID_RADIUS);
        assert_eq!(iter.size_hint(), (0, Some(4097 * 4097)));

        assert!(GridIter::new(Viewport::new(2047.0, 10.0), 1.0, 2).is_err());
        assert!(GridIter::new(Viewport::new(1e12, 10.0), 80.0, 0).is_err());
        assert!(
            GridIter::new(Viewport::new(f64::INFINITY, 10.0), 80.0, 0)
                .is_err()
        );
        assert!(
            GridIter::new(Viewport::new(f64::NAN, f64::NAN), 80.0, 0).is_err()
        );
        assert!(GridIter::new(
            Viewport::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            80.0,
            0
        )
        .is_err());
    }
}
