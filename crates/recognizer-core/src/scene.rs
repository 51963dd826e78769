//! Per-redraw scene description, built by the host and read by the renderer.

use crate::geom::{lerp, EulerRotation, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugOverlay {
    /// Draw every face normal as a short marker in the wireframe pass.
    pub show_normals: bool,
}

/// Which frame the light direction is given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightFrame {
    /// The light stays put in world space while the model turns under it.
    #[default]
    Fixed,
    /// The light turns with the model; it is used as given in model space.
    FollowModel,
}

/// Where the model sits in the world for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPose {
    pub translation: Vec3,
    pub rotation: EulerRotation,
}

impl ModelPose {
    pub fn transform(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p) + self.translation
    }
}

/// The scripted fly-past: the model swings along a half circle while
/// descending and straightening out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPath {
    pub fps: u32,
    pub seconds: u32,
    pub radius: f32,
    pub start_y: f32,
    pub end_y: f32,
    pub start: EulerRotation,
    pub end: EulerRotation,
    pub eye: Vec3,
    pub light: Vec3,
}

impl Default for FlightPath {
    fn default() -> Self {
        Self {
            fps: 24,
            seconds: 4,
            radius: 5.0,
            start_y: 4.0,
            end_y: -3.0,
            start: EulerRotation::new(PI / 3.0, PI / 2.0, PI / 6.0),
            end: EulerRotation::new(-PI / 8.0, 0.0, 0.0),
            eye: Vec3::new(0.0, 5.0, 15.0),
            light: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl FlightPath {
    pub fn frame_count(&self) -> u32 {
        self.fps * self.seconds
    }

    pub fn last_frame(&self) -> u32 {
        self.frame_count().saturating_sub(1)
    }

    pub fn clamp_frame(&self, frame: u32) -> u32 {
        frame.min(self.last_frame())
    }

    /// One frame forward or back, held at either end.
    pub fn step(&self, frame: u32, forward: bool) -> u32 {
        if forward {
            self.clamp_frame(frame.saturating_add(1))
        } else {
            frame.saturating_sub(1).min(self.last_frame())
        }
    }

    pub fn pose_at(&self, frame: u32) -> ModelPose {
        let last = self.last_frame();
        let t = if last == 0 {
            0.0
        } else {
            self.clamp_frame(frame) as f32 / last as f32
        };
        let theta = lerp(PI, 0.0, t);
        ModelPose {
            translation: Vec3::new(
                self.radius * theta.cos(),
                lerp(self.start_y, self.end_y, t),
                self.radius * (-theta).sin(),
            ),
            rotation: EulerRotation::new(
                lerp(self.start.pitch, self.end.pitch, t),
                lerp(self.start.yaw, self.end.yaw, t),
                lerp(self.start.roll, self.end.roll, t),
            ),
        }
    }
}

/// Mouse-driven inspection view: the model spins in place at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitView {
    pub rot_x_deg: f32,
    pub rot_y_deg: f32,
    pub degrees_per_pixel: f32,
    pub eye: Vec3,
    pub light: Vec3,
}

impl Default for OrbitView {
    fn default() -> Self {
        Self {
            rot_x_deg: 0.0,
            rot_y_deg: 0.0,
            degrees_per_pixel: 0.5,
            eye: Vec3::new(0.0, 0.0, 10.0),
            light: Vec3::new(1.0, 1.0, 0.0),
        }
    }
}

impl OrbitView {
    /// Horizontal drag turns about Y, vertical drag about X.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.rot_y_deg += dx * self.degrees_per_pixel;
        self.rot_x_deg += dy * self.degrees_per_pixel;
    }

    pub fn pose(&self) -> ModelPose {
        ModelPose {
            translation: Vec3::ZERO,
            rotation: EulerRotation::from_degrees(self.rot_x_deg, self.rot_y_deg, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CameraPolicy {
    Static { view: OrbitView },
    FlyThrough { path: FlightPath, frame: u32 },
}

impl CameraPolicy {
    pub fn pose(&self) -> ModelPose {
        match self {
            CameraPolicy::Static { view } => view.pose(),
            CameraPolicy::FlyThrough { path, frame } => path.pose_at(*frame),
        }
    }

    pub fn eye(&self) -> Vec3 {
        match self {
            CameraPolicy::Static { view } => view.eye,
            CameraPolicy::FlyThrough { path, .. } => path.eye,
        }
    }

    pub fn frame(&self) -> Option<u32> {
        match self {
            CameraPolicy::Static { .. } => None,
            CameraPolicy::FlyThrough { frame, .. } => Some(*frame),
        }
    }
}

/// Everything one redraw needs besides the catalog. The renderer never
/// mutates it; the host builds a new one whenever input changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    pub camera: CameraPolicy,
    pub light: Vec3,
    pub light_frame: LightFrame,
    pub overlay: DebugOverlay,
}

impl SceneState {
    pub fn fly_through(path: FlightPath, frame: u32) -> Self {
        Self {
            camera: CameraPolicy::FlyThrough {
                frame: path.clamp_frame(frame),
                path,
            },
            light: path.light,
            light_frame: LightFrame::Fixed,
            overlay: DebugOverlay::default(),
        }
    }

    pub fn orbit(view: OrbitView) -> Self {
        Self {
            camera: CameraPolicy::Static { view },
            light: view.light,
            light_frame: LightFrame::Fixed,
            overlay: DebugOverlay::default(),
        }
    }

    pub fn with_light(self, light: Vec3) -> Self {
        Self { light, ..self }
    }

    pub fn with_light_frame(self, light_frame: LightFrame) -> Self {
        Self { light_frame, ..self }
    }

    pub fn with_overlay(self, overlay: DebugOverlay) -> Self {
        Self { overlay, ..self }
    }

    pub fn pose(&self) -> ModelPose {
        self.camera.pose()
    }

    /// The light expressed in model space, ready for [`crate::lighting::shade`].
    ///
    /// Shading a model-space normal against this gives the same answer as
    /// rotating the normal into world space and shading it against `light`.
    pub fn shading_light(&self) -> Vec3 {
        match self.light_frame {
            LightFrame::Fixed => self.pose().rotation.inverse_rotate(self.light),
            LightFrame::FollowModel => self.light,
        }
    }
}
