use crate::geom::Vec3;
use crate::lighting::Color;
use crate::tessellate::Triangle;
use serde::{Deserialize, Serialize};

/// One primitive handed to the graphics backend, in model space.
///
/// Commands are emitted in draw order; a backend that honours that order and
/// draws filled commands with a small depth offset reproduces the intended
/// look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// A tessellated cap.
    Triangles { color: Color, triangles: Vec<Triangle> },
    /// A filled side wall.
    Quad { color: Color, corners: [Vec3; 4] },
    /// A closed outline in wireframe mode.
    LineLoop { color: Color, vertices: Vec<Vec3> },
    /// A single overlay line, e.g. a debug normal.
    Segment {
        color: Color,
        from: Vec3,
        to: Vec3,
        width: f32,
    },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Triangles { color, .. }
            | DrawCommand::Quad { color, .. }
            | DrawCommand::LineLoop { color, .. }
            | DrawCommand::Segment { color, .. } => *color,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, DrawCommand::Triangles { .. } | DrawCommand::Quad { .. })
    }

    /// Every vertex the command touches, in emission order.
    pub fn points(&self) -> Vec<Vec3> {
        match self {
            DrawCommand::Triangles { triangles, .. } => triangles.iter().flat_map(|t| t.0).collect(),
            DrawCommand::Quad { corners, .. } => corners.to_vec(),
            DrawCommand::LineLoop { vertices, .. } => vertices.clone(),
            DrawCommand::Segment { from, to, .. } => vec![*from, *to],
        }
    }
}
