use crate::{
    render::SessionRenderer,
    session::{LoadState, Session},
    tessellation::Triangle,
};
use svg::{
    node::{
        element::{Circle, Group, Path, Polygon},
        Comment,
    },
    Document,
};

/// Style applied to a hovered highlight
const HOVER_FILTER: &str = "filter: drop-shadow(0px 0px 6px gray)";

/// Render a session as an SVG. Everything is drawn into a single group that
/// carries the zoom transform, in this order: the base tiling, the
/// fundamental alcove, vertex dots, highlights, then class borders.
pub fn session_to_svg(renderer: &SessionRenderer) -> Document {
    let session = renderer.session();
    let tessellation = session.tessellation();
    let viewport = tessellation.viewport();
    let zoom = session.zoom();

    let mut container = Group::new()
        .set("class", "zoom-container")
        .set(
            "transform",
            format!(
                "translate({} {}) scale({})",
                zoom.translate.x, zoom.translate.y, zoom.scale
            ),
        )
        .add(draw_grid(session))
        .add(draw_fundamental(renderer));

    if renderer.render_config().show_vertices {
        container = container.add(draw_vertices(renderer));
    }
    container = container
        .add(draw_highlights(renderer))
        .add(draw_borders(renderer));

    let mut document = Document::new()
        .set("width", viewport.width)
        .set("height", viewport.height)
        .set("viewBox", (0.0, 0.0, viewport.width, viewport.height))
        .add(Comment::new(format!("\n{:#?}\n", session.config())));
    match session.load_state() {
        LoadState::Pending { .. } => {
            document = document.add(Comment::new("loading"));
        }
        LoadState::Failed { error } => {
            document =
                document.add(Comment::new(format!("load failed: {}", error)));
        }
        LoadState::Loaded => {}
    }
    document.add(container)
}

/// SVG path data for a closed triangle outline
fn triangle_path_data(triangle: &Triangle) -> String {
    let [p0, p1, p2] = *triangle.points();
    format!(
        "M{},{} L{},{} L{},{} Z",
        p0.x, p0.y, p1.x, p1.y, p2.x, p2.y
    )
}

/// Vertex list for a polygon's `points` attribute
fn polygon_points(triangle: &Triangle) -> String {
    triangle
        .points()
        .iter()
        .map(|point| point.to_svg_pair())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outline every triangle in the tessellation
fn draw_grid(session: &Session) -> Group {
    session.tessellation().triangles().fold(
        Group::new().set("class", "grid"),
        |group, triangle| {
            group.add(
                Path::new()
                    .set("d", triangle_path_data(triangle))
                    .set("stroke", "black")
                    .set("fill", "none")
                    .set("stroke-width", 1.0),
            )
        },
    )
}

fn draw_fundamental(renderer: &SessionRenderer) -> Polygon {
    let fundamental = renderer.session().tessellation().fundamental();
    Polygon::new()
        .set("class", "fundamental-alcove")
        .set("points", polygon_points(fundamental))
        .set("fill", renderer.render_config().colors.fundamental.to_html())
        .set("stroke", "black")
        .set("stroke-width", 1.0)
}

fn draw_vertices(renderer: &SessionRenderer) -> Group {
    let radius = renderer.render_config().vertex_dot_radius;
    renderer
        .session()
        .tessellation()
        .unique_vertices()
        .into_iter()
        .fold(Group::new().set("class", "vertices"), |group, vertex| {
            group.add(
                Circle::new()
                    .set("class", "vertex-dot")
                    .set("cx", vertex.x)
                    .set("cy", vertex.y)
                    .set("r", radius)
                    .set("fill", "#000"),
            )
        })
}

fn draw_highlights(renderer: &SessionRenderer) -> Group {
    let session = renderer.session();
    let tessellation = session.tessellation();
    let mut group = Group::new().set("class", "highlights");

    for highlight in session.highlights() {
        // Every highlight was resolved from this tessellation
        let triangle = match tessellation.get(highlight.triangle) {
            Some(triangle) => triangle,
            None => continue,
        };
        let hovered = session.hovered() == Some(highlight.triangle);
        let mut polygon = Polygon::new()
            .set("class", "highlight")
            .set("data-triangle-id", highlight.triangle.to_string())
            .set("data-class-id", highlight.class_id.to_string())
            .set("data-kind", highlight.kind.to_string())
            .set("points", polygon_points(triangle))
            .set("fill", renderer.highlight_color(highlight.kind).to_html())
            .set("stroke", "black")
            .set("opacity", renderer.render_config().highlight_opacity)
            .set("stroke-width", if hovered { 2.0 } else { 1.0 });
        if hovered {
            polygon = polygon.set("style", HOVER_FILTER);
        }
        group = group.add(polygon);
    }
    group
}

fn draw_borders(renderer: &SessionRenderer) -> Group {
    let session = renderer.session();
    let tessellation = session.tessellation();
    let config = renderer.render_config();
    let mut group = Group::new().set("class", "borders");

    for border in session.borders() {
        let triangle = match tessellation.get(border.triangle) {
            Some(triangle) => triangle,
            None => continue,
        };
        group = group.add(
            Path::new()
                .set("class", "triangle-border")
                .set("id", border.element_id())
                .set("d", triangle_path_data(triangle))
                .set("fill", "none")
                .set("stroke", config.colors.border.to_html())
                .set("stroke-width", config.border_stroke_width),
        );
    }
    group
}
