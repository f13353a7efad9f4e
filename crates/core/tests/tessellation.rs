use alcove::{
    tessellation::{GridIter, Triangle},
    AlcoveCoordinate, Tessellation, TessellationConfig, Viewport,
};
use assert_approx_eq::assert_approx_eq;

fn build(width: f64, height: f64) -> Tessellation {
    Tessellation::build(
        Viewport::new(width, height),
        TessellationConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_build_is_deterministic() {
    let first = build(1280.0, 800.0);
    let second = build(1280.0, 800.0);
    let first_ids: Vec<_> = first.triangles().map(Triangle::id).collect();
    let second_ids: Vec<_> = second.triangles().map(Triangle::id).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first.fundamental(), second.fundamental());
}

#[test]
fn test_base_grid_comes_first() {
    let tessellation = build(640.0, 480.0);
    let viewport = tessellation.viewport();
    let config = tessellation.config();
    let base: Vec<_> =
        GridIter::new(viewport, config.grid_size, config.margin_cells)
            .unwrap()
            .map(|t| t.id())
            .collect();
    let stored: Vec<_> = tessellation
        .triangles()
        .take(tessellation.base_len())
        .map(Triangle::id)
        .collect();
    assert_eq!(base.len(), tessellation.base_len());
    assert_eq!(stored, base);
    // Every base triangle's centroid lands inside the viewport
    for triangle in tessellation.triangles().take(tessellation.base_len()) {
        assert!(viewport.contains(triangle.center()));
    }
}

#[test]
fn test_fundamental_is_closest_to_center() {
    let tessellation = build(1000.0, 700.0);
    let center = tessellation.viewport().center();
    let best = tessellation.fundamental().center().distance_to(center);
    for triangle in tessellation.triangles() {
        assert!(triangle.center().distance_to(center) >= best);
    }
}

#[test]
fn test_resolve_origin_is_fundamental() {
    let tessellation = build(1280.0, 800.0);
    let resolved = tessellation.resolve(AlcoveCoordinate::ORIGIN).unwrap();
    assert_eq!(resolved.id(), tessellation.fundamental().id());
    assert!(tessellation.is_fundamental(resolved));
}

#[test]
fn test_resolve_neighbors() {
    let tessellation = build(1280.0, 800.0);
    let fundamental = *tessellation.fundamental();
    // Stepping back along a basis vector crosses the opposite edge
    for coord in &[
        AlcoveCoordinate::new(-1.0, 0.0),
        AlcoveCoordinate::new(0.0, -1.0),
        AlcoveCoordinate::new(1.0, 1.0),
    ] {
        let neighbor = tessellation.resolve(*coord).unwrap();
        assert_ne!(neighbor.id(), fundamental.id());
        assert_approx_eq!(
            neighbor.center().distance_to(fundamental.center()),
            2.0 * 80.0 / (2.0 * 3.0_f64.sqrt()),
            1e-6
        );
    }
    // Basis vectors point at vertices, which aren't centroids
    assert!(tessellation.resolve(AlcoveCoordinate::new(1.0, 0.0)).is_none());
    assert!(tessellation
        .resolve(AlcoveCoordinate::new(1000.0, 1000.0))
        .is_none());
}

#[test]
fn test_inverse_basis() {
    let tessellation = build(800.0, 600.0);
    let basis = tessellation.basis();
    let coord = AlcoveCoordinate::new(2.0, -3.0);
    let back = basis.to_alcove(basis.to_pixel(coord)).unwrap();
    assert_approx_eq!(back.a, coord.a, 1e-9);
    assert_approx_eq!(back.b, coord.b, 1e-9);
}

#[test]
fn test_reflection_lines_contain_fundamental_edges() {
    let tessellation = build(800.0, 600.0);
    let edges = tessellation.fundamental().edges();
    for (line, (a, b)) in tessellation.reflection_lines().iter().zip(&edges) {
        // Points on the line are fixed under reflection
        for point in &[*a, *b] {
            let reflected = line.reflect_point(*point);
            assert_approx_eq!(reflected.x, point.x, 1e-6);
            assert_approx_eq!(reflected.y, point.y, 1e-6);
        }
    }
}

#[test]
fn test_ids_are_unique_and_rounded() {
    let tessellation = build(800.0, 600.0);
    let mut ids: Vec<_> = tessellation.triangles().map(Triangle::id).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    for triangle in tessellation.triangles() {
        let center = triangle.center();
        assert_eq!(triangle.id().x, center.x.round() as i64);
        assert_eq!(triangle.id().y, center.y.round() as i64);
    }
}

#[test]
fn test_tiny_viewport() {
    // Axial (0, 0) always sits on the viewport center, so even the smallest
    // viewport holds the fundamental alcove and its three reflections
    let tessellation = Tessellation::build(
        Viewport::new(1.0, 1.0),
        TessellationConfig {
            grid_size: 500.0,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(tessellation.base_len(), 1);
    assert_eq!(tessellation.len(), 4);
    let center = tessellation.fundamental().center();
    assert_approx_eq!(center.x, 0.5, 1e-9);
    assert_approx_eq!(center.y, 0.5, 1e-9);
}

#[test]
fn test_json_round_trip_keeps_order() {
    let tessellation = build(400.0, 300.0);
    let json = serde_json::to_string(&tessellation).unwrap();
    let loaded: Tessellation = serde_json::from_str(&json).unwrap();
    let before: Vec<_> = tessellation.triangles().map(Triangle::id).collect();
    let after: Vec<_> = loaded.triangles().map(Triangle::id).collect();
    assert_eq!(before, after);
    assert_eq!(loaded.base_len(), tessellation.base_len());
    assert_eq!(loaded.fundamental().id(), tessellation.fundamental().id());
}

#[test]
fn test_huge_viewport_is_rejected() {
    let result = Tessellation::build(
        Viewport::new(1e12, 10.0),
        TessellationConfig::default(),
    );
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("grid radius"));

    // Small grid cells hit the limit at much smaller sizes
    let result = Tessellation::build(
        Viewport::new(10_000.0, 10_000.0),
        TessellationConfig {
            grid_size: 1.0,
            ..Default::default()
        },
    );
    assert!(result.is_err());
}
