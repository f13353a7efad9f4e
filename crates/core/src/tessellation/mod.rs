//! The alcove tessellation engine. A [Tessellation] is built in a single
//! synchronous pass:
//!
//! 1. Generate the base triangle grid covering the viewport ([GridIter])
//! 2. Pick the fundamental alcove, the triangle closest to the viewport
//!    center
//! 3. Reflect the entire base grid across each of the fundamental alcove's
//!    three edges, and union the results into the collection
//! 4. Derive the lattice basis from the fundamental alcove
//!
//! Once built, a tessellation never changes. A new layout (e.g. after a
//! resize) means a new tessellation.
//!
//! ## Screen Space
//! All geometry here lives in screen space, in pixels. See
//! [Point2](crate::Point2) for a description of the coordinate system.

mod basis;
mod grid;
mod reflect;
mod triangle;

pub use basis::{AlcoveCoordinate, LatticeBasis};
pub use grid::{
    AxialPoint, GridIter, GridLayout, Orientation, MAX_GRID_RADIUS,
};
pub use reflect::ReflectionLine;
pub use triangle::{Triangle, TriangleId};

use crate::{
    config::TessellationConfig,
    timed,
    util::{cmp_unwrap, unit::Point2},
};
use anyhow::{anyhow, Context};
use fnv::{FnvBuildHasher, FnvHashSet};
use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pixel dimensions of the area being drawn into
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Viewport {
    #[validate(range(min = 1.0))]
    pub width: f64,
    #[validate(range(min = 1.0))]
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2 {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Is the point inside the viewport? Edges count as inside.
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width
            && point.y <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// A fully built tessellation: the base grid, its three reflections, the
/// fundamental alcove, and the lattice basis anchored on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tessellation {
    viewport: Viewport,
    config: TessellationConfig,

    /// Every known triangle, keyed by id, in insertion order: the base grid
    /// in scan order, then each reflection pass in edge order. When two
    /// triangles share an id, the first one inserted wins.
    #[serde(with = "crate::util::triangle_map_to_vec_serde")]
    triangles: IndexMap<TriangleId, Triangle, FnvBuildHasher>,

    /// Number of triangles generated by the grid, before reflection
    base_len: usize,

    fundamental: Triangle,

    /// The lines through the fundamental alcove's edges, in edge order
    reflection_lines: [ReflectionLine; 3],

    basis: LatticeBasis,
}

impl Tessellation {
    /// Build a tessellation covering the given viewport. Returns an error if
    /// the config or viewport is invalid, if the viewport is too large for
    /// the grid size (see [MAX_GRID_RADIUS]), or if the viewport is
    /// too small to contain any triangles.
    pub fn build(
        viewport: Viewport,
        config: TessellationConfig,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid tessellation config")?;
        viewport.validate().context("invalid viewport")?;

        timed!("Tessellation", {
            let base: Vec<Triangle> = timed!(
                "Grid generation",
                GridIter::new(viewport, config.grid_size, config.margin_cells)?
                    .collect()
            );
            debug!("Generated {} base triangles", base.len());

            let fundamental = select_fundamental(&base, viewport.center())
                .ok_or_else(|| {
                    anyhow!(
                        "no triangles fit in viewport {}x{}",
                        viewport.width,
                        viewport.height
                    )
                })?;

            let [e1, e2, e3] = fundamental.edges();
            let reflection_lines = [
                ReflectionLine::through(e1.0, e1.1)?,
                ReflectionLine::through(e2.0, e2.1)?,
                ReflectionLine::through(e3.0, e3.1)?,
            ];

            let base_len = base.len();
            let mut triangles: IndexMap<TriangleId, Triangle, FnvBuildHasher> =
                IndexMap::with_capacity_and_hasher(
                    base_len * 4,
                    FnvBuildHasher::default(),
                );
            let reflected = timed!("Reflection", {
                reflection_lines
                    .iter()
                    .flat_map(|line| base.iter().map(move |t| t.reflect(line)))
                    .collect::<Vec<_>>()
            });
            for triangle in base.into_iter().chain(reflected) {
                triangles.entry(triangle.id()).or_insert(triangle);
            }
            debug!(
                "Tessellation has {} unique triangles ({} from reflection)",
                triangles.len(),
                triangles.len() - base_len.min(triangles.len())
            );

            Ok(Self {
                viewport,
                config,
                triangles,
                base_len,
                basis: LatticeBasis::from_triangle(&fundamental),
                fundamental,
                reflection_lines,
            })
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &TessellationConfig {
        &self.config
    }

    /// The triangle that anchors the lattice coordinate system
    pub fn fundamental(&self) -> &Triangle {
        &self.fundamental
    }

    pub fn basis(&self) -> &LatticeBasis {
        &self.basis
    }

    pub fn reflection_lines(&self) -> &[ReflectionLine; 3] {
        &self.reflection_lines
    }

    /// Number of triangles generated by the grid, before reflection. The
    /// first `base_len` triangles in [Self::triangles] are the base grid.
    pub fn base_len(&self) -> usize {
        self.base_len
    }

    /// All known triangles, in insertion order
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.values()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(&id)
    }

    /// Is the given triangle the fundamental alcove? Compared by
    /// proximity, the same way lattice points are matched.
    pub fn is_fundamental(&self, triangle: &Triangle) -> bool {
        triangle.is_near(self.fundamental.center(), self.config.epsilon)
    }

    /// Get the screen position of a lattice coordinate
    pub fn alcove_center(&self, coord: AlcoveCoordinate) -> Point2 {
        self.basis.to_pixel(coord)
    }

    /// Find the triangle at a lattice coordinate. See [Self::resolve_point].
    pub fn resolve(&self, coord: AlcoveCoordinate) -> Option<&Triangle> {
        let target = self.alcove_center(coord);
        let found = self.resolve_point(target);
        if found.is_none() {
            trace!("No triangle at alcove {} (pixel {})", coord, target);
        }
        found
    }

    /// Find the first triangle, in insertion order, whose centroid is within
    /// epsilon of the given point. This is a linear scan, which is fine for
    /// the few thousand triangles a viewport holds.
    pub fn resolve_point(&self, point: Point2) -> Option<&Triangle> {
        let epsilon = self.config.epsilon;
        self.triangles().find(|t| t.is_near(point, epsilon))
    }

    /// Every distinct vertex across all triangles, in first-seen order.
    /// Vertices are deduplicated by exact value.
    pub fn unique_vertices(&self) -> Vec<Point2> {
        let mut seen = FnvHashSet::default();
        self.triangles()
            .flat_map(|t| t.points().iter().copied())
            .filter(|p| seen.insert((p.x.to_bits(), p.y.to_bits())))
            .collect()
    }
}

/// Pick the triangle whose centroid is closest to `center`, by squared
/// distance. Ties go to whichever triangle comes first. Returns `None` only
/// for an empty slice.
pub fn select_fundamental(
    triangles: &[Triangle],
    center: Point2,
) -> Option<Triangle> {
    // min_by keeps the first of several equal minimums
    triangles
        .iter()
        .min_by(|a, b| {
            cmp_unwrap(
                &a.center().distance_squared_to(center),
                &b.center().distance_squared_to(center),
            )
        })
        .copied()
}
