use recognizer_core::catalog::Catalog;
use recognizer_core::error::CatalogError;
use recognizer_core::face::{FaceDescriptor, FaceVertex, FlipMask};

fn triangle(name: &str) -> FaceDescriptor {
    FaceDescriptor::new(
        name,
        vec![
            FaceVertex::new(0.0, 0.0, 0.1, -0.1),
            FaceVertex::new(1.0, 0.0, 0.1, -0.1),
            FaceVertex::new(0.0, 1.0, 0.1, -0.1),
        ],
        FlipMask::EMPTY,
    )
    .unwrap()
}

#[test]
fn built_in_model_has_every_part() {
    let catalog = Catalog::recognizer().unwrap();
    assert_eq!(21, catalog.len());
    assert_eq!("left_ear", catalog.shapes()[0].name());
    assert_eq!("right_foot", catalog.shapes()[20].name());
    assert!(catalog.shapes().iter().all(FaceDescriptor::has_caps));

    let wing = catalog.get("left_wing").unwrap();
    assert_eq!(10, wing.len());
    assert_eq!(vec![1, 5, 7], wing.flip_mask().indices());
    assert_eq!(vec![1, 5, 7], catalog.get("right_wing").unwrap().flip_mask().indices());
    assert_eq!(vec![2], catalog.get("left_foot").unwrap().flip_mask().indices());
    assert_eq!(vec![2], catalog.get("right_foot").unwrap().flip_mask().indices());
    assert!(catalog.get("mid_bar").unwrap().flip_mask().is_empty());
    assert!(catalog.get("no_such_part").is_none());
}

#[test]
fn empty_face_is_rejected() {
    let err = FaceDescriptor::new("nothing", Vec::new(), FlipMask::EMPTY).unwrap_err();
    assert!(matches!(err, CatalogError::EmptyFace { .. }));
}

#[test]
fn flip_past_last_side_is_rejected() {
    let err = FaceDescriptor::new(
        "tri",
        vec![
            FaceVertex::new(0.0, 0.0, 0.0, 0.0),
            FaceVertex::new(1.0, 0.0, 0.0, 0.0),
            FaceVertex::new(0.0, 1.0, 0.0, 0.0),
        ],
        FlipMask::from_indices(&[3]).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::FlipOutOfRange { index: 3, sides: 3, .. }));

    let err = FlipMask::from_indices(&[64]).unwrap_err();
    assert!(matches!(err, CatalogError::FlipIndexTooLarge { index: 64, .. }));
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let err = FaceDescriptor::new(
        "nan",
        vec![FaceVertex::new(0.0, 0.0, 0.0, 0.0), FaceVertex::new(f32::NAN, 0.0, 0.0, 0.0)],
        FlipMask::EMPTY,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::NonFinite { vertex: 1, .. }));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = Catalog::new(vec![triangle("a"), triangle("a")]).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateName { .. }));
    assert_eq!(2, Catalog::new(vec![triangle("a"), triangle("b")]).unwrap().len());
}

#[test]
fn json_catalog_survives_a_round_trip() {
    let catalog = Catalog::recognizer().unwrap();
    let json = catalog.to_json_string().unwrap();
    assert!(json.contains("\"left_wing\""));
    let reloaded = Catalog::from_json_str(&json).unwrap();
    assert_eq!(catalog, reloaded);
}

#[test]
fn json_catalog_is_validated() {
    let json = r#"{"shapes":[{"name":"quad","vertices":[[0,0,1,-1],[1,0,1,-1],[1,1,1,-1],[0,1,1,-1]],"flip":[4]}]}"#;
    let err = Catalog::from_json_str(json).unwrap_err();
    assert!(matches!(err, CatalogError::FlipOutOfRange { index: 4, sides: 4, .. }));

    let err = Catalog::from_json_str("{\"shapes\": 3}").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));

    let json = r#"{"shapes":[{"name":"quad","vertices":[[0,0,1,-1],[1,0,1,-1],[1,1,1,-1]]}]}"#;
    let catalog = Catalog::from_json_str(json).unwrap();
    assert!(catalog.get("quad").unwrap().flip_mask().is_empty());
}

#[test]
fn reversing_keeps_flips_on_their_edges() {
    let catalog = Catalog::recognizer().unwrap();
    let foot = catalog.get("left_foot").unwrap();
    let reversed = foot.reversed().unwrap();
    // Edge 2 -> 3 of a 5-gon is edge 1 once reversed.
    assert_eq!(vec![1], reversed.flip_mask().indices());
    assert_eq!(foot.vertices()[2], reversed.vertices()[2]);
    assert_eq!(foot.vertices()[3], reversed.vertices()[1]);
}
