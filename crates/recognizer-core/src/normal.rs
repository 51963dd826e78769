use crate::face::{FaceDescriptor, FaceVertex};
use crate::geom::Vec3;

/// Mean of every outline vertex, taking each vertex halfway between its front
/// and back depth.
///
/// The same value is reused for the outward check of both caps and every side
/// wall of the part.
pub fn resolve_centroid(face: &FaceDescriptor) -> Vec3 {
    let mids: Vec<Vec3> = face.vertices().iter().map(FaceVertex::mid).collect();
    Vec3::mean(&mids)
}

/// Unit normal of the plane through `p1`, `p2`, `p3`, turned to point away
/// from `centroid`.
///
/// The sign is decided by `faceCenter - centroid` alone, so the result does not
/// depend on the winding of the sample points. Two cases fall through without
/// a flip: collinear samples (the near-zero cross product is returned as is)
/// and a face centre sitting exactly on the centroid.
pub fn resolve_outward_normal(p1: Vec3, p2: Vec3, p3: Vec3, centroid: Vec3, face_center: Vec3) -> Vec3 {
    let u = p2 - p1;
    let v = p3 - p1;
    let n = u.cross(&v).normalized();

    let outward = face_center - centroid;
    if n.dot(&outward) < 0.0 {
        -n
    } else {
        n
    }
}

/// Whether a resolved normal came out of collinear samples.
pub fn is_degenerate(normal: &Vec3) -> bool {
    normal.length() <= crate::geom::NORMALIZE_EPSILON
}
