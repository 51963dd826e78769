use crate::error::CatalogError;
use crate::face::{FaceDescriptor, FaceVertex, FlipMask};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// On-disk form of one shape: `[x, y, z_front, z_back]` rows plus the side
/// walls whose shading normal is inverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDef {
    pub name: String,
    pub vertices: Vec<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flip: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub shapes: Vec<ShapeDef>,
}

/// The ordered set of parts that make up a model.
///
/// Every shape has been validated, so rendering never meets an empty outline
/// or a flip flag past the last side wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    shapes: Vec<FaceDescriptor>,
}

impl Catalog {
    pub fn new(shapes: Vec<FaceDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for shape in &shapes {
            if !seen.insert(shape.name()) {
                return Err(CatalogError::DuplicateName {
                    name: shape.name().to_string(),
                });
            }
        }
        Ok(Self { shapes })
    }

    pub fn from_file(file: &CatalogFile) -> Result<Self, CatalogError> {
        let shapes = file
            .shapes
            .iter()
            .map(ShapeDef::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Self::new(shapes)?;
        tracing::debug!(shapes = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(&file)
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            shapes: self.shapes.iter().map(ShapeDef::from_descriptor).collect(),
        }
    }

    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    pub fn shapes(&self) -> &[FaceDescriptor] {
        &self.shapes
    }

    pub fn get(&self, name: &str) -> Option<&FaceDescriptor> {
        self.shapes.iter().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The built-in Recognizer model.
    pub fn recognizer() -> Result<Self, CatalogError> {
        let shapes = RECOGNIZER
            .iter()
            .map(|&(name, rows, flips)| {
                let vertices = rows.iter().map(row_to_vertex).collect();
                FaceDescriptor::new(name, vertices, FlipMask::from_bits(flips))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(shapes)
    }
}

impl ShapeDef {
    fn to_descriptor(&self) -> Result<FaceDescriptor, CatalogError> {
        let vertices = self.vertices.iter().map(row_to_vertex).collect();
        FaceDescriptor::new(self.name.clone(), vertices, FlipMask::from_indices(&self.flip)?)
    }

    fn from_descriptor(face: &FaceDescriptor) -> Self {
        Self {
            name: face.name().to_string(),
            vertices: face
                .vertices()
                .iter()
                .map(|v| [v.x, v.y, v.z_front, v.z_back])
                .collect(),
            flip: face.flip_mask().indices(),
        }
    }
}

fn row_to_vertex(row: &[f32; 4]) -> FaceVertex {
    FaceVertex::new(row[0], row[1], row[2], row[3])
}

const fn flip(sides: &[usize]) -> u64 {
    let mut bits = 0u64;
    let mut i = 0;
    while i < sides.len() {
        bits |= 1u64 << sides[i];
        i += 1;
    }
    bits
}

type ShapeRow = (&'static str, &'static [[f32; 4]], u64);

const WING_FLIPS: u64 = flip(&[1, 5, 7]);
const FOOT_FLIPS: u64 = flip(&[2]);

#[rustfmt::skip]
const RECOGNIZER: &[ShapeRow] = &[
    ("left_ear", &[[-0.6000, 0.6000, 0.1545, -0.1717], [-0.1932, 0.6000, 0.1545, -0.1717], [-0.0861, 0.8484, 0.0034, -0.1394]], 0),
    ("left_chin", &[[-0.1932, 0.6000, 0.1545, -0.1717], [-0.0852, 0.6000, 0.1545, -0.1717], [-0.1492, 0.7020, 0.0925, -0.1584]], 0),
    ("bot_chin", &[[-0.0852, 0.6000, 0.1545, -0.1717], [0.0852, 0.6000, 0.1545, -0.1717], [0.1048, 0.6312, 0.1355, -0.1676], [-0.1048, 0.6312, 0.1355, -0.1676]], 0),
    ("bot_head", &[[-0.1176, 0.6516, 0.1231, -0.1400], [0.1176, 0.6516, 0.1231, -0.1400], [0.1492, 0.7020, 0.1600, -0.1434], [-0.1492, 0.7020, 0.1600, -0.1434]], 0),
    ("mid_head", &[[-0.1492, 0.7020, 0.1600, -0.1434], [0.1492, 0.7020, 0.1600, -0.1434], [0.0861, 0.8484, 0.0319, -0.1244], [-0.0861, 0.8484, 0.0319, -0.1244]], 0),
    ("low_eyes", &[[-0.0861, 0.8484, 0.0319, -0.1244], [0.0861, 0.8484, 0.0319, -0.1244], [0.0938, 0.8808, 0.0560, -0.1301], [-0.0938, 0.8808, 0.0560, -0.1301]], 0),
    ("up_eyes", &[[-0.0938, 0.8808, 0.0560, -0.1301], [0.0938, 0.8808, 0.0560, -0.1301], [0.0861, 0.9144, 0.0319, -0.1054], [-0.0861, 0.9144, 0.0319, -0.1054]], 0),
    ("right_chin", &[[0.6000, 0.6000, 0.1545, -0.1717], [0.1932, 0.6000, 0.1545, -0.1717], [0.0861, 0.8484, 0.0034, -0.1394]], 0),
    ("right_ear", &[[0.1932, 0.6000, 0.1545, -0.1717], [0.0852, 0.6000, 0.1545, -0.1717], [0.1492, 0.7020, 0.0925, -0.1584]], 0),
    ("left_wing", &[[-1.20, 0.56, 0.216, -0.206], [-1.20, 0.50, 0.223, -0.206], [-0.72, 0.50, 0.223, -0.206], [-0.53, 0.27, 0.251, -0.206], [-0.03, 0.27, 0.251, -0.206], [-0.03, 0.34, 0.242, -0.206], [-0.27, 0.34, 0.242, -0.206], [-0.40, 0.50, 0.223, -0.206], [-0.03, 0.50, 0.223, -0.206], [-0.03, 0.56, 0.216, -0.206]], WING_FLIPS),
    ("right_wing", &[[1.20, 0.56, 0.216, -0.206], [1.20, 0.50, 0.223, -0.206], [0.72, 0.50, 0.223, -0.206], [0.53, 0.27, 0.251, -0.206], [0.03, 0.27, 0.251, -0.206], [0.03, 0.34, 0.242, -0.206], [0.27, 0.34, 0.242, -0.206], [0.40, 0.50, 0.223, -0.206], [0.03, 0.50, 0.223, -0.206], [0.03, 0.56, 0.216, -0.206]], WING_FLIPS),
    ("enc_block", &[[-0.30, 0.46, 0.228, -0.206], [-0.23, 0.38, 0.238, -0.206], [0.23, 0.38, 0.238, -0.206], [0.30, 0.46, 0.228, -0.206]], 0),
    ("left_block", &[[-1.10, 0.46, 0.172, -0.172], [-1.10, 0.24, 0.172, -0.172], [-0.90, 0.24, 0.172, -0.172], [-0.90, 0.46, 0.172, -0.172]], 0),
    ("right_block", &[[1.10, 0.46, 0.172, -0.172], [1.10, 0.24, 0.172, -0.172], [0.90, 0.24, 0.172, -0.172], [0.90, 0.46, 0.172, -0.172]], 0),
    ("float_left", &[[-0.87, 0.40, 0.172, -0.172], [-0.87, 0.32, 0.172, -0.172], [-0.70, 0.32, 0.172, -0.172], [-0.70, 0.40, 0.172, -0.172]], 0),
    ("float_right", &[[0.87, 0.40, 0.172, -0.172], [0.87, 0.32, 0.172, -0.172], [0.70, 0.32, 0.172, -0.172], [0.70, 0.40, 0.172, -0.172]], 0),
    ("mid_block", &[[-0.23, 0.25, 0.206, -0.137], [-0.23, 0.21, 0.172, -0.172], [0.23, 0.21, 0.172, -0.172], [0.23, 0.25, 0.206, -0.137]], 0),
    ("mid_bar", &[[-1.10, 0.19, 0.216, -0.216], [-1.10, 0.12, 0.172, -0.216], [1.10, 0.12, 0.172, -0.216], [1.10, 0.19, 0.216, -0.216]], 0),
    ("bot_block", &[[-0.23, 0.09, 0.134, -0.161], [-0.18, 0.05, 0.110, -0.137], [0.18, 0.05, 0.110, -0.137], [0.23, 0.09, 0.134, -0.161]], 0),
    ("left_foot", &[[-1.10, 0.07, 0.172, -0.172], [-1.10, -0.90, 0.172, -0.172], [-0.60, -0.90, 0.172, -0.172], [-0.90, -0.73, 0.172, -0.172], [-0.90, 0.07, 0.172, -0.172]], FOOT_FLIPS),
    ("right_foot", &[[1.10, 0.07, 0.172, -0.172], [1.10, -0.90, 0.172, -0.172], [0.60, -0.90, 0.172, -0.172], [0.90, -0.73, 0.172, -0.172], [0.90, 0.07, 0.172, -0.172]], FOOT_FLIPS),
];
