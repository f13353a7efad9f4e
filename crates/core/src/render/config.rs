use crate::render::unit::Color3;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Configuration specific to visually rendering a session. These options
/// have absolutely no bearing on the tessellation geometry, only on its
/// visual presentation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// Stroke width of the border overlay drawn around triangles of a
    /// selected class
    #[validate(range(min = 0.0))]
    pub border_stroke_width: f64,

    /// Radius of the dot drawn on each triangle vertex
    #[validate(range(min = 0.0))]
    pub vertex_dot_radius: f64,

    /// Should a dot be drawn on every unique triangle vertex?
    pub show_vertices: bool,

    /// Opacity of the fill on highlighted triangles
    #[validate(range(min = 0.0, max = 1.0))]
    pub highlight_opacity: f64,

    // Tables go after plain values so the config can be written as TOML
    /// Fill and stroke colors
    pub colors: ColorConfig,

    /// Bounds on the zoom scale
    #[validate]
    pub zoom: ZoomConfig,
}

/// Palette used when drawing triangles
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Fill for highlighted triangles whose record is not a cluster
    /// variable
    pub default: Color3,
    /// Fill for highlighted triangles whose record is a cluster variable
    pub cluster: Color3,
    /// Fill for the fundamental alcove
    pub fundamental: Color3,
    /// Stroke for class border overlays
    pub border: Color3,
}

/// Allowed range for the zoom scale. Zoom requests outside this range are
/// clamped into it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_zoom_bounds"))]
pub struct ZoomConfig {
    #[validate(range(min = 0.0001))]
    pub min_scale: f64,
    #[validate(range(min = 0.0001))]
    pub max_scale: f64,
}

impl ZoomConfig {
    /// Clamp a scale factor into the allowed range. A NaN scale maps to 1.
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            1.0_f64.max(self.min_scale).min(self.max_scale)
        } else {
            scale.max(self.min_scale).min(self.max_scale)
        }
    }
}

fn validate_zoom_bounds(zoom: &ZoomConfig) -> Result<(), ValidationError> {
    if zoom.min_scale > zoom.max_scale {
        return Err(ValidationError::new("min_scale_above_max_scale"));
    }
    Ok(())
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            border_stroke_width: 3.0,
            vertex_dot_radius: 2.5,
            show_vertices: true,
            highlight_opacity: 0.8,
            colors: ColorConfig::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            default: Color3::new_int(255, 51, 102),
            cluster: Color3::new_int(51, 170, 255),
            fundamental: Color3::GREY,
            border: Color3::new_int(255, 51, 102),
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}
