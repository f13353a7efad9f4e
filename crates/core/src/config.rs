use crate::render::config::RenderConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines how a tessellation is laid out. Two
/// tessellations built from the same config and the same viewport will
/// always be identical, down to triangle ids and ordering.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TessellationConfig {
    /// Side length of one triangle, in pixels. Also the distance between
    /// two horizontally adjacent cells of the axial grid.
    #[validate(range(min = 1.0))]
    pub grid_size: f64,

    /// Number of extra axial steps generated beyond what is needed to cover
    /// the viewport. Triangles are still discarded if their centroid falls
    /// outside the viewport, so this only matters for grids whose edges
    /// would otherwise be cut short.
    #[validate(range(max = 1000))]
    pub margin_cells: u16,

    /// Distance threshold, in pixels, used when matching a lattice point to
    /// a triangle centroid. Matching is always by this tolerance, never by
    /// exact equality.
    #[validate(range(min = 0.001))]
    pub epsilon: f64,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            grid_size: 80.0,
            margin_cells: 2,
            epsilon: 10.0,
        }
    }
}

/// Full configuration for a session: how the tessellation is built, plus
/// how it is presented. This is the shape of a config file loaded by the
/// CLI, where each half lives under its own table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SessionConfig {
    #[validate]
    pub tessellation: TessellationConfig,

    /// **This is different from the tessellation config.** The tessellation
    /// config controls the geometry, the render config only controls how it
    /// is visually presented afterwards.
    #[validate]
    pub render: RenderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, Token};

    #[test]
    fn test_default_config_is_valid() {
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        assert_de_tokens(
            &TessellationConfig {
                grid_size: 40.0,
                ..Default::default()
            },
            &[
                Token::Struct {
                    name: "TessellationConfig",
                    len: 1,
                },
                Token::Str("grid_size"),
                Token::F64(40.0),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_invalid_tessellation_config() {
        let config = TessellationConfig {
            grid_size: 0.5, // invalid (too small)
            margin_cells: 2,
            epsilon: 0.0, // invalid
        };
        let errors = config.validate().unwrap_err();
        let mut fields = errors.errors().keys().copied().collect::<Vec<_>>();
        fields.sort_unstable();
        assert_eq!(fields, vec!["epsilon", "grid_size"]);
    }
}
