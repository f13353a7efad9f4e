use crate::{
    data::TableauRecord,
    tessellation::Viewport,
    util::unit::Point2,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gap between the anchor point and the panel, and between the panel and
/// the viewport edge when it gets pushed back inside
pub const PANEL_PADDING: f64 = 15.0;

/// How long the panel lingers after the pointer leaves a triangle. Avoids
/// flicker when moving between neighboring triangles.
pub const HIDE_DELAY: Duration = Duration::from_millis(200);

/// Pixel dimensions of the info panel
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    /// Used when nothing better is known about the panel's size
    pub const FALLBACK: Self = Self {
        width: 200.0,
        height: 150.0,
    };

    /// Size of one tableau cell, matching the HTML table styling
    const CELL: f64 = 30.0;
    /// Space taken up by the text lines above the table
    const HEADER_HEIGHT: f64 = 90.0;

    /// Estimate the rendered size of the panel for a record. The panel is
    /// never assumed to be smaller than [Self::FALLBACK].
    pub fn estimate(record: &TableauRecord) -> Self {
        let rows = record.tableau.len() as f64;
        let cols =
            record.tableau.iter().map(Vec::len).max().unwrap_or(0) as f64;
        Self {
            width: Self::FALLBACK
                .width
                .max(cols * Self::CELL + 2.0 * PANEL_PADDING),
            height: Self::FALLBACK
                .height
                .max(rows * Self::CELL + Self::HEADER_HEIGHT),
        }
    }
}

/// The floating panel that shows details for a hovered triangle
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfoPanel {
    /// Index of the record being shown
    pub record: usize,
    /// The point the panel is attached to (the triangle's centroid)
    pub anchor: Point2,
    /// Top-left corner of the panel
    pub position: Point2,
    pub size: PanelSize,
}

impl InfoPanel {
    pub fn new(
        record_index: usize,
        record: &TableauRecord,
        anchor: Point2,
        viewport: Viewport,
    ) -> Self {
        let size = PanelSize::estimate(record);
        Self {
            record: record_index,
            anchor,
            position: place_panel(anchor, size, viewport),
            size,
        }
    }
}

/// Decide where the panel's top-left corner goes. By default it sits to the
/// right of the anchor. If that would run off the right edge it flips to
/// the left side, and if it would run off the bottom it's pushed up.
pub fn place_panel(anchor: Point2, size: PanelSize, viewport: Viewport) -> Point2 {
    let mut x = anchor.x + PANEL_PADDING;
    let mut y = anchor.y;
    if x + size.width > viewport.width {
        x = anchor.x - size.width - PANEL_PADDING;
    }
    if y + size.height > viewport.height {
        y = viewport.height - size.height - PANEL_PADDING;
    }
    Point2::new(x, y)
}
