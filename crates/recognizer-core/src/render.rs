use crate::catalog::Catalog;
use crate::draw::DrawCommand;
use crate::extrude::ExtrudedSolid;
use crate::geom::Vec3;
use crate::lighting::RenderMode;
use crate::report::{FrameStats, RenderStats};
use crate::scene::{DebugOverlay, ModelPose, SceneState};
use crate::tessellate::CapTessellator;
use serde::{Deserialize, Serialize};

/// Inputs that hold for a whole pass over the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassParams {
    pub mode: RenderMode,
    /// Light direction in model space.
    pub light: Vec3,
    pub overlay: DebugOverlay,
}

/// Draws every shape of `catalog` once in the given mode.
pub fn render_pass(catalog: &Catalog, params: &PassParams) -> (Vec<DrawCommand>, RenderStats) {
    let mut commands = Vec::new();
    let mut stats = RenderStats::default();
    let mut tessellator = CapTessellator::new();

    for shape in catalog.shapes() {
        tracing::trace!(shape = shape.name(), vertices = shape.len(), mode = ?params.mode, "extruding");
        let solid = ExtrudedSolid::build(shape);
        solid.emit(params, &mut tessellator, &mut commands, &mut stats);
        stats.shapes += 1;
    }
    stats.commands = commands.len();

    tracing::debug!(mode = ?params.mode, commands = stats.commands, "pass rendered");
    (commands, stats)
}

/// The result of one redraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Fly-through frame index, when animating.
    pub frame: Option<u32>,
    pub pose: ModelPose,
    pub eye: Vec3,
    /// Light as the host supplied it.
    pub light: Vec3,
    /// Light as the shading saw it, in model space.
    pub shading_light: Vec3,
    /// Filled pass first, then wireframe, in model space.
    pub commands: Vec<DrawCommand>,
    pub stats: FrameStats,
}

/// Runs the filled pass and then the wireframe pass, so wire edges end up on
/// top of the offset fill.
pub fn render_frame(catalog: &Catalog, scene: &SceneState) -> Frame {
    let shading_light = scene.shading_light();

    let (mut commands, filled) = render_pass(
        catalog,
        &PassParams {
            mode: RenderMode::Filled,
            light: shading_light,
            overlay: scene.overlay,
        },
    );
    let (wire_commands, wireframe) = render_pass(
        catalog,
        &PassParams {
            mode: RenderMode::Wireframe,
            light: shading_light,
            overlay: scene.overlay,
        },
    );
    commands.extend(wire_commands);

    Frame {
        frame: scene.camera.frame(),
        pose: scene.pose(),
        eye: scene.camera.eye(),
        light: scene.light,
        shading_light,
        commands,
        stats: FrameStats { filled, wireframe },
    }
}
