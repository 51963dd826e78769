use crate::draw::DrawCommand;
use crate::face::FaceDescriptor;
use crate::geom::Vec3;
use crate::lighting::{is_lit, shade, RenderMode, NORMAL_MARKER_COLOR};
use crate::normal::{is_degenerate, resolve_centroid, resolve_outward_normal};
use crate::render::PassParams;
use crate::report::RenderStats;
use crate::tessellate::CapTessellator;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Length of a debug normal marker in model units.
pub const NORMAL_MARKER_LENGTH: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "face", content = "index", rename_all = "snake_case")]
pub enum FaceKind {
    Front,
    Back,
    Side(usize),
}

impl FaceKind {
    pub fn is_cap(&self) -> bool {
        matches!(self, FaceKind::Front | FaceKind::Back)
    }
}

/// One generated face of an extruded part.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidFace {
    pub kind: FaceKind,
    /// Vertices in draw order. The back cap is stored reversed.
    pub outline: Vec<Vec3>,
    pub center: Vec3,
    /// Resolved outward normal.
    pub normal: Vec3,
    /// Set when the part's flip mask inverts this side wall for shading.
    pub flipped: bool,
}

impl SolidFace {
    /// The normal lighting sees. Geometry never uses it.
    pub fn shading_normal(&self) -> Vec3 {
        if self.flipped {
            -self.normal
        } else {
            self.normal
        }
    }
}

/// A part extruded into caps and side walls, with every normal resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedSolid {
    pub name: String,
    pub centroid: Vec3,
    /// Front cap, back cap, then side walls `0..n`. Parts with fewer than three
    /// vertices have no caps.
    pub faces: Vec<SolidFace>,
}

impl ExtrudedSolid {
    pub fn build(face: &FaceDescriptor) -> Self {
        let centroid = resolve_centroid(face);
        let mut faces = Vec::with_capacity(face.len() + 2);

        if face.has_caps() {
            let front = face.front_points();
            let center = Vec3::mean(&front);
            let normal = resolve_outward_normal(front[0], front[1], front[2], centroid, center);
            faces.push(SolidFace {
                kind: FaceKind::Front,
                outline: front,
                center,
                normal,
                flipped: false,
            });

            // Sampled in outline order, drawn reversed.
            let mut back = face.back_points();
            let center = Vec3::mean(&back);
            let normal = resolve_outward_normal(back[0], back[1], back[2], centroid, center);
            back.reverse();
            faces.push(SolidFace {
                kind: FaceKind::Back,
                outline: back,
                center,
                normal,
                flipped: false,
            });
        }

        let flips = face.flip_mask();
        for (i, (cur, next)) in face.vertices().iter().circular_tuple_windows().enumerate() {
            let corners = [cur.front(), cur.back(), next.back(), next.front()];
            let center = Vec3::mean(&corners);
            let normal = resolve_outward_normal(corners[0], corners[1], corners[3], centroid, center);
            faces.push(SolidFace {
                kind: FaceKind::Side(i),
                outline: corners.to_vec(),
                center,
                normal,
                flipped: flips.contains(i),
            });
        }

        Self {
            name: face.name().to_string(),
            centroid,
            faces,
        }
    }

    /// Appends this part's primitives for one pass. A cap the tessellator
    /// rejects is left out and counted in `stats.skipped_caps`.
    pub fn emit(
        &self,
        params: &PassParams,
        tessellator: &mut CapTessellator,
        out: &mut Vec<DrawCommand>,
        stats: &mut RenderStats,
    ) {
        for face in &self.faces {
            let shading = face.shading_normal();
            if is_degenerate(&face.normal) {
                stats.degenerate_normals += 1;
                tracing::warn!(shape = %self.name, face = ?face.kind, "degenerate face normal");
            }
            if face.kind.is_cap() {
                stats.caps += 1;
            } else {
                stats.side_walls += 1;
            }

            let color = shade(params.mode, shading, params.light);
            match params.mode {
                RenderMode::Filled => {
                    if is_lit(shading, params.light) {
                        stats.lit_faces += 1;
                    } else {
                        stats.unlit_faces += 1;
                    }
                    if face.kind.is_cap() {
                        match tessellator.tessellate(&face.outline) {
                            Ok(triangles) => {
                                stats.cap_triangles += triangles.len();
                                if !triangles.is_empty() {
                                    out.push(DrawCommand::Triangles { color, triangles });
                                }
                            }
                            Err(e) => {
                                tessellator.reset();
                                stats.skipped_caps += 1;
                                tracing::warn!(shape = %self.name, face = ?face.kind, "cap skipped: {e}");
                            }
                        }
                    } else {
                        out.push(DrawCommand::Quad {
                            color,
                            corners: [face.outline[0], face.outline[1], face.outline[2], face.outline[3]],
                        });
                    }
                }
                RenderMode::Wireframe => {
                    out.push(DrawCommand::LineLoop {
                        color,
                        vertices: face.outline.clone(),
                    });
                    if params.overlay.show_normals {
                        out.push(DrawCommand::Segment {
                            color: NORMAL_MARKER_COLOR,
                            from: face.center,
                            to: face.center + shading * NORMAL_MARKER_LENGTH,
                            width: 1.0,
                        });
                    }
                }
            }
        }
    }
}
