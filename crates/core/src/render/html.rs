//! A standalone HTML page for a session. The page is a static snapshot: it
//! shows the current highlights, borders, checkbox states and info panel,
//! with the SVG canvas inlined.

use crate::{
    render::{svg::session_to_svg, SessionRenderer},
    session::{panel::InfoPanel, LoadState, Session},
};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "A₂ Affine Group Tessellation";
const ZOOM_HINT: &str = "Use mouse wheel to zoom, drag to pan";
const CONTROLS_HEADING: &str = "Select Classes to Highlight";

const STYLE: &str = "
body { margin: 0; font-family: sans-serif; overflow: hidden; }
.visualization-title { position: absolute; top: 10px; left: 50%;
  transform: translateX(-50%); font-size: 24px; font-weight: bold; }
.visualization-legend { position: absolute; top: 10px; right: 10px;
  background: white; padding: 10px; border: 1px solid black;
  border-radius: 4px; }
.legend-item { display: flex; align-items: center; margin-bottom: 5px; }
.legend-color { width: 20px; height: 20px; margin-right: 8px;
  border: 1px solid black; }
.zoom-indicator { position: absolute; bottom: 10px; left: 10px;
  background: white; padding: 5px; border: 1px solid black; }
.class-controls { position: absolute; top: 10px; left: 10px;
  background: white; padding: 10px; border: 1px solid black;
  border-radius: 4px; max-height: 60vh; overflow-y: auto; }
.class-controls.collapsed ul { display: none; }
.class-controls ul { list-style: none; padding: 0; margin: 0; }
.loading { position: absolute; top: 50%; left: 50%; }
#tableauInfo { position: absolute; background: white; padding: 10px;
  border: 1px solid black; border-radius: 4px;
  box-shadow: 0 0 10px rgba(0,0,0,0.3); z-index: 1000;
  pointer-events: none; }
";

/// Escape text for use in HTML content or a quoted attribute
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a full page for a session
pub fn session_to_html(renderer: &SessionRenderer) -> String {
    let session = renderer.session();
    let mut body = String::new();

    // Writing to a String can't fail, so the results are ignored throughout
    let _ = writeln!(
        body,
        "<div class=\"visualization-title\">{}</div>",
        escape(PAGE_TITLE)
    );
    body.push_str(&legend(renderer));
    let _ = writeln!(body, "<div class=\"zoom-indicator\">{}</div>", ZOOM_HINT);
    body.push_str(&class_controls(session));

    match session.load_state() {
        LoadState::Loaded => {}
        LoadState::Pending { .. } | LoadState::Failed { .. } => {
            body.push_str("<div class=\"loading\">Loading...</div>\n");
        }
    }

    let _ = writeln!(body, "{}", session_to_svg(renderer));
    if let Some(panel) = session.panel() {
        body.push_str(&info_panel(session, panel));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n\
         </html>\n",
        escape(PAGE_TITLE),
        STYLE,
        body
    )
}

fn legend(renderer: &SessionRenderer) -> String {
    let colors = &renderer.render_config().colors;
    let mut html = String::from(
        "<div class=\"visualization-legend\">\n\
         <h3 style=\"margin-top: 0; margin-bottom: 10px;\">Legend</h3>\n",
    );
    for (color, label) in &[
        (colors.default, "Standard Triangle"),
        (colors.cluster, "Cluster Triangle"),
        (colors.fundamental, "Fundamental Alcove"),
    ] {
        let _ = writeln!(
            html,
            "<div class=\"legend-item\"><div class=\"legend-color\" \
             style=\"background-color: {};\"></div><div>{}</div></div>",
            color, label
        );
    }
    html.push_str("</div>\n");
    html
}

/// The collapsible checkbox list, one entry per class
fn class_controls(session: &Session) -> String {
    let mut html = format!(
        "<div class=\"class-controls{}\">\n<h3>{}</h3>\n<ul>\n",
        if session.controls_collapsed() {
            " collapsed"
        } else {
            ""
        },
        CONTROLS_HEADING
    );
    for control in session.controls() {
        let _ = writeln!(
            html,
            "<li><label class=\"checkbox-label\"><input type=\"checkbox\" \
             value=\"{}\"{}> {}</label></li>",
            control.class_id,
            if session.is_class_selected(control.class_id) {
                " checked"
            } else {
                ""
            },
            escape(&control.label)
        );
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn info_panel(session: &Session, panel: &InfoPanel) -> String {
    let record = match session.records().get(panel.record) {
        Some(record) => record,
        None => return String::new(),
    };
    format!(
        "<div id=\"tableauInfo\" style=\"left: {}px; top: {}px;\">\n\
         <div style=\"margin-bottom: 8px;\"><strong>Cluster Variable:</strong> \
         {}</div>\n\
         <div style=\"margin-bottom: 8px;\"><strong>Weight Vector:</strong> \
         {}</div>\n\
         <div style=\"margin-bottom: 4px;\"><strong>SSYT:</strong></div>\n\
         {}</div>\n",
        panel.position.x,
        panel.position.y,
        if record.is_cluster { "Yes" } else { "No" },
        escape(&record.weight_label()),
        tableau_table(&record.tableau)
    )
}

/// Render a tableau as an HTML table, one cell per entry
pub fn tableau_table(tableau: &[Vec<u32>]) -> String {
    let mut html =
        String::from("<table style=\"border-collapse: collapse; margin-top: 8px;\">\n");
    for row in tableau {
        html.push_str("<tr>");
        for entry in row {
            let _ = write!(
                html,
                "<td style=\"border: 1px solid #000; width: 30px; \
                 height: 30px; text-align: center; vertical-align: middle; \
                 font-size: 16px; font-family: serif;\">{}</td>",
                entry
            );
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}
