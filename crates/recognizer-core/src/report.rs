use crate::catalog::Catalog;
use crate::extrude::{ExtrudedSolid, FaceKind};
use crate::geom::Vec3;
use crate::lighting::is_lit;
use crate::normal::is_degenerate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

/// Counters for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    pub shapes: usize,
    pub caps: usize,
    pub side_walls: usize,
    pub cap_triangles: usize,
    /// Caps left out because tessellation failed.
    pub skipped_caps: usize,
    /// Filled pass only.
    pub lit_faces: usize,
    /// Filled pass only.
    pub unlit_faces: usize,
    pub degenerate_normals: usize,
    pub commands: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    pub filled: RenderStats,
    pub wireframe: RenderStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceNormalReport {
    pub shape: String,
    pub face: FaceKind,
    pub center: Vec3,
    pub normal: Vec3,
    pub shading_normal: Vec3,
    pub flipped: bool,
    pub lit: bool,
}

/// Every resolved normal in the catalog, with its lit/unlit verdict against
/// `light` (model space).
pub fn normal_report(catalog: &Catalog, light: Vec3) -> Vec<FaceNormalReport> {
    let mut rows = Vec::new();
    for shape in catalog.shapes() {
        let solid = ExtrudedSolid::build(shape);
        for face in &solid.faces {
            let shading_normal = face.shading_normal();
            rows.push(FaceNormalReport {
                shape: solid.name.clone(),
                face: face.kind,
                center: face.center,
                normal: face.normal,
                shading_normal,
                flipped: face.flipped,
                lit: is_lit(shading_normal, light),
            });
        }
    }
    rows
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSummary {
    pub name: String,
    pub vertices: usize,
    pub flipped_walls: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub shapes: Vec<ShapeSummary>,
    pub vertices_total: usize,
    pub side_walls_total: usize,
    pub warnings: Vec<Warning>,
}

pub fn catalog_summary(catalog: &Catalog) -> CatalogSummary {
    let mut warnings = Vec::new();
    let mut shapes = Vec::with_capacity(catalog.len());
    let mut vertices_total = 0;

    for shape in catalog.shapes() {
        vertices_total += shape.len();
        shapes.push(ShapeSummary {
            name: shape.name().to_string(),
            vertices: shape.len(),
            flipped_walls: shape.flip_mask().indices(),
        });

        if !shape.has_caps() {
            warnings.push(Warning {
                code: "no_caps".to_string(),
                message: format!(
                    "Shape `{}` has {} vertices; only side walls will be drawn.",
                    shape.name(),
                    shape.len()
                ),
            });
        }

        let solid = ExtrudedSolid::build(shape);
        for face in solid.faces.iter().filter(|f| is_degenerate(&f.normal)) {
            warnings.push(Warning {
                code: "degenerate_normal".to_string(),
                message: format!(
                    "Shape `{}` face {:?} has collinear samples; it will always shade unlit.",
                    shape.name(),
                    face.kind
                ),
            });
        }
    }

    if catalog.is_empty() {
        warnings.push(Warning {
            code: "empty_catalog".to_string(),
            message: "Catalog has no shapes; nothing will be drawn.".to_string(),
        });
    }

    CatalogSummary {
        shapes,
        vertices_total,
        side_walls_total: vertices_total,
        warnings,
    }
}
