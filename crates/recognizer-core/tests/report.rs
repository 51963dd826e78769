use recognizer_core::catalog::Catalog;
use recognizer_core::extrude::FaceKind;
use recognizer_core::face::{FaceDescriptor, FaceVertex, FlipMask};
use recognizer_core::geom::Vec3;
use recognizer_core::report::{catalog_summary, normal_report};

#[test]
fn summary_of_built_in_model() {
    let catalog = Catalog::recognizer().unwrap();
    let summary = catalog_summary(&catalog);
    assert_eq!(21, summary.shapes.len());
    assert_eq!(summary.vertices_total, summary.side_walls_total);
    assert!(summary.warnings.iter().all(|w| w.code != "no_caps"));
    assert!(summary.warnings.iter().all(|w| w.code != "empty_catalog"));

    let wing = summary.shapes.iter().find(|s| s.name == "left_wing").unwrap();
    assert_eq!(10, wing.vertices);
    assert_eq!(vec![1, 5, 7], wing.flipped_walls);
}

#[test]
fn summary_warns_about_thin_and_empty_catalogs() {
    let strip = FaceDescriptor::new(
        "strip",
        vec![
            FaceVertex::new(0.0, 0.0, 0.5, -0.5),
            FaceVertex::new(1.0, 0.0, 0.5, -0.5),
        ],
        FlipMask::EMPTY,
    )
    .unwrap();
    let summary = catalog_summary(&Catalog::new(vec![strip]).unwrap());
    assert!(summary.warnings.iter().any(|w| w.code == "no_caps"));

    let summary = catalog_summary(&Catalog::new(Vec::new()).unwrap());
    assert_eq!(1, summary.warnings.len());
    assert_eq!("empty_catalog", summary.warnings[0].code);
}

#[test]
fn normal_report_lists_every_face() {
    let catalog = Catalog::recognizer().unwrap();
    let rows = normal_report(&catalog, Vec3::new(0.0, 0.0, 1.0));
    let vertices: usize = catalog.shapes().iter().map(FaceDescriptor::len).sum();
    assert_eq!(42 + vertices, rows.len());

    // Front caps face the viewer.
    for row in rows.iter().filter(|r| r.face == FaceKind::Front) {
        assert!(row.normal.z > 0.0, "{}", row.shape);
        assert!(row.lit, "{}", row.shape);
    }
    let flipped = rows.iter().filter(|r| r.flipped).count();
    assert_eq!(3 + 3 + 1 + 1, flipped);
}
