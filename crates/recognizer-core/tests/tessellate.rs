use recognizer_core::catalog::Catalog;
use recognizer_core::error::TessellationError;
use recognizer_core::geom::Vec3;
use recognizer_core::tessellate::{tessellate_cap, CapTessellator, Triangle};

fn xy_area(triangles: &[Triangle]) -> f32 {
    triangles
        .iter()
        .map(|t| {
            let [a, b, c] = t.0;
            ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
        })
        .sum()
}

fn shoelace(outline: &[Vec3]) -> f32 {
    let n = outline.len();
    let twice: f32 = (0..n)
        .map(|i| {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}

fn flat(points: &[(f32, f32)]) -> Vec<Vec3> {
    points.iter().map(|&(x, y)| Vec3::new(x, y, 0.0)).collect()
}

#[test]
fn square_becomes_two_triangles() {
    let square = flat(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let triangles = tessellate_cap(&square).unwrap();
    assert_eq!(2, triangles.len());
    assert!((xy_area(&triangles) - 1.0).abs() < 1e-5);
    assert!(triangles.iter().all(|t| t.area() > 0.0));
}

#[test]
fn convex_hexagon_covers_its_area() {
    let hexagon: Vec<Vec3> = (0..6)
        .map(|i| {
            let a = i as f32 * std::f32::consts::PI / 3.0;
            Vec3::new(a.cos(), a.sin(), 0.5)
        })
        .collect();
    let triangles = tessellate_cap(&hexagon).unwrap();
    assert_eq!(4, triangles.len());
    assert!((xy_area(&triangles) - shoelace(&hexagon)).abs() < 1e-4);
    for v in triangles.iter().flat_map(|t| t.0) {
        assert!((v.z - 0.5).abs() < 1e-5, "depth lost: {v:?}");
    }
}

#[test]
fn convex_polygons_split_into_n_minus_two_triangles() {
    for n in 3..=11usize {
        let polygon: Vec<Vec3> = (0..n)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / n as f32;
                Vec3::new(2.0 * a.cos(), 2.0 * a.sin(), -0.25)
            })
            .collect();
        let triangles = tessellate_cap(&polygon).unwrap();
        assert_eq!(n - 2, triangles.len(), "{n}-gon");
        assert!((xy_area(&triangles) - shoelace(&polygon)).abs() < 1e-4, "{n}-gon");
    }
}

#[test]
fn winding_of_the_outline_does_not_matter() {
    let mut outline = flat(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
    let forward = xy_area(&tessellate_cap(&outline).unwrap());
    outline.reverse();
    let backward = xy_area(&tessellate_cap(&outline).unwrap());
    assert!((forward - 2.0).abs() < 1e-5);
    assert!((backward - 2.0).abs() < 1e-5);
}

#[test]
fn concave_wing_cap_is_filled_exactly() {
    let catalog = Catalog::recognizer().unwrap();
    let wing = catalog.get("left_wing").unwrap();
    let front = wing.front_points();

    let triangles = tessellate_cap(&front).unwrap();
    let expected = shoelace(&front);
    assert!(
        (xy_area(&triangles) - expected).abs() < 1e-4,
        "{} vs {expected}",
        xy_area(&triangles)
    );
}

#[test]
fn bowtie_is_split_at_its_crossing() {
    // Depth follows z = x so the crossing's depth can be checked.
    let bowtie = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let triangles = tessellate_cap(&bowtie).unwrap();
    assert!((xy_area(&triangles) - 0.5).abs() < 1e-4);

    let crossing = triangles
        .iter()
        .flat_map(|t| t.0)
        .find(|v| (v.x - 0.5).abs() < 1e-3 && (v.y - 0.5).abs() < 1e-3)
        .expect("intersection vertex");
    assert!((crossing.z - 0.5).abs() < 1e-3, "{crossing:?}");
}

#[test]
fn contours_of_one_polygon_combine_under_nonzero() {
    let outer = flat(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    // Opposite winding: the inner square is a hole.
    let inner = flat(&[(0.5, 0.5), (0.5, 1.5), (1.5, 1.5), (1.5, 0.5)]);

    let mut tess = CapTessellator::new();
    tess.begin_polygon().unwrap();
    for contour in [&outer, &inner] {
        tess.begin_contour().unwrap();
        for &v in contour.iter() {
            tess.vertex(v).unwrap();
        }
        tess.end_contour().unwrap();
    }
    let triangles = tess.end_polygon().unwrap();
    assert!((xy_area(&triangles) - 3.0).abs() < 1e-4);
}

#[test]
fn too_few_vertices_yield_nothing() {
    assert!(tessellate_cap(&[]).unwrap().is_empty());
    assert!(tessellate_cap(&flat(&[(0.0, 0.0), (1.0, 0.0)])).unwrap().is_empty());
}

#[test]
fn collinear_outline_yields_nothing() {
    let line = flat(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert!(tessellate_cap(&line).unwrap().is_empty());
}

#[test]
fn protocol_misuse_is_rejected() {
    let mut tess = CapTessellator::new();
    assert!(matches!(
        tess.vertex(Vec3::ZERO),
        Err(TessellationError::Protocol(_))
    ));
    assert!(matches!(tess.begin_contour(), Err(TessellationError::Protocol(_))));
    assert!(matches!(tess.end_polygon(), Err(TessellationError::Protocol(_))));

    tess.begin_polygon().unwrap();
    assert!(matches!(tess.begin_polygon(), Err(TessellationError::Protocol(_))));
    assert!(matches!(tess.end_contour(), Err(TessellationError::Protocol(_))));
    tess.begin_contour().unwrap();
    assert!(matches!(tess.begin_contour(), Err(TessellationError::Protocol(_))));
    assert!(matches!(tess.end_polygon(), Err(TessellationError::Protocol(_))));
}

#[test]
fn tessellator_is_reusable_between_polygons() {
    let mut tess = CapTessellator::new();
    let square = flat(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let first = tess.tessellate(&square).unwrap();
    let second = tess.tessellate(&square).unwrap();
    assert_eq!(first.len(), second.len());
    assert!((xy_area(&second) - 1.0).abs() < 1e-5);
}
