use recognizer_core::geom::Vec3;
use recognizer_core::lighting::{
    is_lit, shade, RenderMode, LIT_THRESHOLD, SOLID_COLOR, UNLIT_COLOR, WIRE_COLOR,
};

#[test]
fn threshold_is_strict() {
    let normal = Vec3::new(1.0, 0.0, 0.0);
    assert!(!is_lit(normal, Vec3::new(LIT_THRESHOLD, 0.0, 0.0)));
    assert_eq!(UNLIT_COLOR, shade(RenderMode::Filled, normal, Vec3::new(0.2, 0.0, 0.0)));
    assert_eq!(SOLID_COLOR, shade(RenderMode::Filled, normal, Vec3::new(0.21, 0.0, 0.0)));
}

#[test]
fn light_length_scales_the_test() {
    let normal = Vec3::new(0.0, 1.0, 0.0);
    // cos ≈ 0.15: unlit against a unit light, lit against a long one.
    let dir = Vec3::new(0.988_7, 0.15, 0.0);
    assert!(!is_lit(normal, dir));
    assert!(is_lit(normal, dir * 2.0));
}

#[test]
fn wireframe_ignores_light() {
    for light in [Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Vec3::new(-5.0, 0.0, 0.0)] {
        assert_eq!(WIRE_COLOR, shade(RenderMode::Wireframe, Vec3::new(1.0, 0.0, 0.0), light));
    }
}

#[test]
fn solid_color_is_dark_green() {
    assert_eq!([34, 70, 6], SOLID_COLOR.to_rgb8());
    assert_eq!([255, 0, 0], WIRE_COLOR.to_rgb8());
}
