use recognizer_core::face::{FaceDescriptor, FaceVertex, FlipMask};
use recognizer_core::geom::Vec3;
use recognizer_core::normal::{is_degenerate, resolve_centroid, resolve_outward_normal};

#[test]
fn centroid_uses_mid_depth() {
    let face = FaceDescriptor::new(
        "tri",
        vec![
            FaceVertex::new(0.0, 0.0, 1.0, -1.0),
            FaceVertex::new(3.0, 0.0, 2.0, 0.0),
            FaceVertex::new(0.0, 3.0, 0.0, 0.0),
        ],
        FlipMask::EMPTY,
    )
    .unwrap();
    let c = resolve_centroid(&face);
    assert!((c - Vec3::new(1.0, 1.0, 1.0 / 3.0)).length() < 1e-6, "{c:?}");
}

#[test]
fn normal_points_away_from_centroid_for_either_winding() {
    let a = Vec3::new(0.0, 0.0, 1.0);
    let b = Vec3::new(1.0, 0.0, 1.0);
    let c = Vec3::new(0.0, 1.0, 1.0);
    let centroid = Vec3::ZERO;
    let center = Vec3::new(0.3, 0.3, 1.0);

    let ccw = resolve_outward_normal(a, b, c, centroid, center);
    let cw = resolve_outward_normal(a, c, b, centroid, center);
    assert_eq!(Vec3::new(0.0, 0.0, 1.0), ccw);
    assert_eq!(ccw, cw);
    assert!(ccw.dot(&(center - centroid)) >= 0.0);
}

#[test]
fn center_on_centroid_keeps_winding_normal() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(1.0, 0.0, 0.0);
    let c = Vec3::new(0.0, 1.0, 0.0);
    let at = Vec3::new(0.5, 0.5, 0.0);

    assert_eq!(Vec3::new(0.0, 0.0, 1.0), resolve_outward_normal(a, b, c, at, at));
    assert_eq!(Vec3::new(0.0, 0.0, -1.0), resolve_outward_normal(a, c, b, at, at));
}

#[test]
fn collinear_samples_give_a_degenerate_normal() {
    let n = resolve_outward_normal(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(2.0, 2.0, 0.0),
        Vec3::ZERO,
        Vec3::new(5.0, 0.0, 0.0),
    );
    assert!(n.is_finite());
    assert!(is_degenerate(&n));
    assert!(!is_degenerate(&Vec3::new(0.0, 1.0, 0.0)));
}
