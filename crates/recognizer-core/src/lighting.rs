use crate::geom::Vec3;
use serde::{Deserialize, Serialize};

/// A face is lit only when `normal · light` is strictly above this.
pub const LIT_THRESHOLD: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Every wireframe edge.
pub const WIRE_COLOR: Color = Color::rgb(1.0, 0.0, 0.0);
/// Lit filled faces, #224606.
pub const SOLID_COLOR: Color = Color::rgb(0.133, 0.275, 0.024);
pub const UNLIT_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
/// Debug normal markers.
pub const NORMAL_MARKER_COLOR: Color = Color::rgb(1.0, 1.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Filled,
    Wireframe,
}

/// Two-level shading: wireframe is never shaded, filled faces are either the
/// solid colour or black.
///
/// `light` is used exactly as given. It is expected to already be expressed in
/// the frame the normals live in, and it is not normalised, so its length
/// scales the threshold test.
pub fn shade(mode: RenderMode, normal: Vec3, light: Vec3) -> Color {
    match mode {
        RenderMode::Wireframe => WIRE_COLOR,
        RenderMode::Filled => {
            if is_lit(normal, light) {
                SOLID_COLOR
            } else {
                UNLIT_COLOR
            }
        }
    }
}

pub fn is_lit(normal: Vec3, light: Vec3) -> bool {
    normal.dot(&light) > LIT_THRESHOLD
}
