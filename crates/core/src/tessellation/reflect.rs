use crate::util::unit::Point2;
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Tolerance for deciding that two points share an x coordinate, in which
/// case the line through them has no finite slope.
const VERTICAL_TOLERANCE: f64 = 1e-9;

/// A line that triangles can be mirrored across. Lines are normally stored
/// in slope/intercept form, `y = m*x + b`. That form can't express a
/// vertical line, so those get their own variant instead of an infinite
/// slope.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ReflectionLine {
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl ReflectionLine {
    /// Build the line that passes through two points. Returns an error if
    /// the points coincide, because they don't define a line.
    pub fn through(p1: Point2, p2: Point2) -> anyhow::Result<Self> {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        if dx.abs() < VERTICAL_TOLERANCE {
            if dy.abs() < VERTICAL_TOLERANCE {
                bail!("cannot build a reflection line through {} twice", p1);
            }
            // Average the two x values so tiny float noise doesn't skew
            // the line towards either point
            return Ok(Self::Vertical {
                x: (p1.x + p2.x) / 2.0,
            });
        }

        let slope = dy / dx;
        Ok(Self::Sloped {
            slope,
            intercept: p1.y - slope * p1.x,
        })
    }

    /// Mirror a point across this line
    pub fn reflect_point(&self, point: Point2) -> Point2 {
        match *self {
            Self::Sloped { slope: m, intercept: b } => {
                let d = (point.x + (point.y - b) * m) / (1.0 + m * m);
                Point2::new(2.0 * d - point.x, 2.0 * d * m - point.y + 2.0 * b)
            }
            Self::Vertical { x } => Point2::new(2.0 * x - point.x, point.y),
        }
    }
}
