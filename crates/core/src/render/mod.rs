pub mod config;
#[cfg(feature = "svg")]
pub mod html;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

use crate::{
    render::{config::RenderConfig, unit::Color3},
    session::{HighlightKind, Session},
};

/// A session renderer converts a session into visual output formats. It
/// borrows the session for the duration of the render and draws using the
/// session's own [RenderConfig], so a render always reflects the config the
/// session was validated against.
///
/// Aside from complete rendering, the renderer also provides the color and
/// styling decisions that any other presentation layer would need.
///
/// ## Supported Formats
/// - SVG (the tiling, highlights and borders)
/// - HTML (a full page with the SVG inlined, plus legend, class controls and
///   the info panel)
#[derive(Copy, Clone, Debug)]
pub struct SessionRenderer<'a> {
    session: &'a Session,
}

impl<'a> SessionRenderer<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    /// Get a reference to the config that this renderer uses
    pub fn render_config(&self) -> &'a RenderConfig {
        &self.session.config().render
    }

    /// Fill color for a highlighted triangle
    pub fn highlight_color(&self, kind: HighlightKind) -> Color3 {
        let colors = &self.render_config().colors;
        match kind {
            HighlightKind::Standard => colors.default,
            HighlightKind::Cluster => colors.cluster,
        }
    }

    /// Render the session as an SVG document. Returns the SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self) -> String {
        svg::session_to_svg(self).to_string()
    }

    /// Render the session as a standalone HTML page
    #[cfg(feature = "svg")]
    pub fn render_as_html(&self) -> String {
        html::session_to_html(self)
    }
}
