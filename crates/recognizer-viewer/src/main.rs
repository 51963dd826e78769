use anyhow::{Context, Result};
use eframe::egui;
use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};
use recognizer_core::catalog::Catalog;
use recognizer_core::draw::DrawCommand;
use recognizer_core::geom::Vec3;
use recognizer_core::lighting::Color;
use recognizer_core::render::{render_frame, Frame};
use recognizer_core::scene::{DebugOverlay, FlightPath, LightFrame, OrbitView, SceneState};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const FOV_Y_DEG: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
const GRID_Y: f32 = -3.0;
const GRID_HALF_EXTENT: i32 = 10;
const LIGHT_VECTOR_SCALE: f32 = 8.0;
const LIGHT_VECTOR_COLOR: Color = Color::rgb(0.0, 0.5, 1.0);
/// Pulls wire edges in front of the fill they outline.
const WIRE_DEPTH_BIAS: f32 = 1e-3;
const WIRE_WIDTH: f32 = 2.0;
/// Clear colours of the fly-through and the inspection view.
const ANIMATION_BACKGROUND: egui::Color32 = egui::Color32::BLACK;
const INSPECT_BACKGROUND: egui::Color32 = egui::Color32::from_gray(51);

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "recognizer",
        native_options,
        Box::new(|cc| Ok(Box::new(RecognizerApp::new(cc)))),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Animation,
    Orbit,
}

struct RecognizerApp {
    catalog: Option<Catalog>,
    catalog_path: Option<PathBuf>,

    mode: ViewMode,
    path: FlightPath,
    frame: u32,
    orbit: OrbitView,
    show_normals: bool,
    light_follows_model: bool,

    status: String,
}

impl RecognizerApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (catalog, status) = match Catalog::recognizer() {
            Ok(c) => (Some(c), "Built-in model loaded. ←/→ step frames.".to_string()),
            Err(e) => (None, format!("Built-in model is invalid: {e}")),
        };
        Self {
            catalog,
            catalog_path: None,
            mode: ViewMode::Animation,
            path: FlightPath::default(),
            frame: 0,
            orbit: OrbitView::default(),
            show_normals: false,
            light_follows_model: false,
            status,
        }
    }

    fn scene(&self) -> SceneState {
        let scene = match self.mode {
            ViewMode::Animation => SceneState::fly_through(self.path, self.frame),
            ViewMode::Orbit => SceneState::orbit(self.orbit),
        };
        let light_frame = if self.light_follows_model {
            LightFrame::FollowModel
        } else {
            LightFrame::Fixed
        };
        scene.with_light_frame(light_frame).with_overlay(DebugOverlay {
            show_normals: self.show_normals,
        })
    }

    fn pick_catalog(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("Shape catalog", &["json"])
            .pick_file();
        if let Some(path) = file {
            self.load_catalog(&path);
        }
    }

    fn load_catalog(&mut self, path: &Path) {
        match read_catalog(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), shapes = catalog.len(), "catalog loaded");
                self.status = format!("Loaded {} ({} shapes)", path.display(), catalog.len());
                self.catalog = Some(catalog);
                self.catalog_path = Some(path.to_path_buf());
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "catalog rejected: {e:#}");
                self.status = format!("Failed to load {}: {e:#}", path.display());
            }
        }
    }

    fn use_built_in(&mut self) {
        match Catalog::recognizer() {
            Ok(c) => {
                self.catalog = Some(c);
                self.catalog_path = None;
                self.status = "Built-in model loaded.".to_string();
            }
            Err(e) => self.status = format!("Built-in model is invalid: {e}"),
        }
    }

    /// Dumps the frame on screen as JSON, the same document `recognizer render` writes.
    fn save_frame(&mut self) {
        let Some(catalog) = &self.catalog else {
            self.status = "No catalog loaded.".to_string();
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Frame JSON", &["json"])
            .set_file_name("frame.json")
            .save_file()
        else {
            return;
        };

        let frame = render_frame(catalog, &self.scene());
        self.status = match write_json(&path, &frame) {
            Ok(()) => format!("Wrote frame: {}", path.display()),
            Err(e) => format!("Failed to write frame: {e:#}"),
        };
    }

    fn handle_file_drop(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().find(|f| f.path.is_some()) else {
            return;
        };
        if let Some(path) = file.path {
            self.load_catalog(&path);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.mode != ViewMode::Animation {
            return;
        }
        let (right, left) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if right {
            self.frame = self.path.step(self.frame, true);
        }
        if left {
            self.frame = self.path.step(self.frame, false);
        }
    }
}

impl eframe::App for RecognizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_file_drop(ctx);
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open catalog…").clicked() {
                    self.pick_catalog();
                }
                if ui.button("Built-in model").clicked() {
                    self.use_built_in();
                }
                let can_save = self.catalog.is_some();
                if ui
                    .add_enabled(can_save, egui::Button::new("Save frame JSON…"))
                    .clicked()
                {
                    self.save_frame();
                }
                ui.separator();
                ui.selectable_value(&mut self.mode, ViewMode::Animation, "Fly-through");
                ui.selectable_value(&mut self.mode, ViewMode::Orbit, "Inspect");
                ui.separator();
                ui.checkbox(&mut self.show_normals, "Normals");
                ui.checkbox(&mut self.light_follows_model, "Light follows model");
            });

            match self.mode {
                ViewMode::Animation => {
                    let last = self.path.last_frame();
                    ui.add(egui::Slider::new(&mut self.frame, 0..=last).text("frame"));
                }
                ViewMode::Orbit => {
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "rotX {:.1}°  rotY {:.1}°",
                            self.orbit.rot_x_deg, self.orbit.rot_y_deg
                        ));
                        if ui.button("Reset").clicked() {
                            self.orbit = OrbitView::default();
                        }
                    });
                }
            }
            if let Some(p) = &self.catalog_path {
                ui.label(format!("Catalog: {}", p.display()));
            }
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        let background = match self.mode {
            ViewMode::Animation => ANIMATION_BACKGROUND,
            ViewMode::Orbit => INSPECT_BACKGROUND,
        };
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(background))
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::drag());
                if self.mode == ViewMode::Orbit && response.dragged() {
                    let delta = response.drag_delta();
                    self.orbit.drag(delta.x, delta.y);
                }

                let Some(catalog) = &self.catalog else {
                    return;
                };
                let frame = render_frame(catalog, &self.scene());
                if frame.stats.filled.skipped_caps > 0 {
                    self.status = format!("{} caps could not be filled.", frame.stats.filled.skipped_caps);
                }
                paint_frame(&ui.painter_at(rect), rect, &frame, self.mode);
            });
    }
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Catalog::from_json_str(&json).context("parse catalog")
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// World to screen through a right-handed look-at camera and a perspective
/// projection.
struct Projector {
    view: Matrix4<f32>,
    view_proj: Matrix4<f32>,
    rect: egui::Rect,
}

impl Projector {
    fn new(rect: egui::Rect, eye: Vec3) -> Self {
        let view = Matrix4::look_at_rh(
            &Point3::new(eye.x, eye.y, eye.z),
            &Point3::origin(),
            &Vector3::y(),
        );
        let aspect = rect.width().max(1.0) / rect.height().max(1.0);
        let proj = Perspective3::new(aspect, FOV_Y_DEG.to_radians(), Z_NEAR, Z_FAR);
        Self {
            view,
            view_proj: proj.to_homogeneous() * view,
            rect,
        }
    }

    fn point(&self, p: Vec3) -> Option<egui::Pos2> {
        let clip = self.view_proj * Vector4::new(p.x, p.y, p.z, 1.0);
        if clip.w <= Z_NEAR {
            return None;
        }
        let (x, y) = (clip.x / clip.w, clip.y / clip.w);
        let center = self.rect.center();
        Some(egui::pos2(
            center.x + x * self.rect.width() / 2.0,
            center.y - y * self.rect.height() / 2.0,
        ))
    }

    fn points(&self, ps: impl IntoIterator<Item = Vec3>) -> Option<Vec<egui::Pos2>> {
        ps.into_iter().map(|p| self.point(p)).collect()
    }

    /// View-space depth; larger is nearer the eye.
    fn depth(&self, ps: &[Vec3]) -> f32 {
        let sum: f32 = ps
            .iter()
            .map(|p| (self.view * Vector4::new(p.x, p.y, p.z, 1.0)).z)
            .sum();
        sum / ps.len().max(1) as f32
    }
}

fn color32(c: Color) -> egui::Color32 {
    let [r, g, b] = c.to_rgb8();
    egui::Color32::from_rgb(r, g, b)
}

fn paint_frame(painter: &egui::Painter, rect: egui::Rect, frame: &Frame, mode: ViewMode) {
    let tx = Projector::new(rect, frame.eye);

    // The light vector sits under everything, as if drawn without depth test.
    let tip = frame.light * LIGHT_VECTOR_SCALE;
    if let (Some(a), Some(b)) = (tx.point(Vec3::ZERO), tx.point(tip)) {
        painter.line_segment([a, b], egui::Stroke::new(3.0, color32(LIGHT_VECTOR_COLOR)));
    }
    if mode == ViewMode::Animation {
        paint_grid(painter, &tx);
    }

    // Painter's algorithm over both passes: far first, wire just ahead of fill.
    let mut items: Vec<(f32, egui::Shape)> = Vec::with_capacity(frame.commands.len());
    for command in &frame.commands {
        let world: Vec<Vec3> = command.points().into_iter().map(|p| frame.pose.transform(p)).collect();
        let Some(screen) = tx.points(world.iter().copied()) else {
            continue;
        };
        let mut depth = tx.depth(&world);
        let color = color32(command.color());
        let shape = match command {
            DrawCommand::Triangles { .. } => {
                let mut mesh = egui::Mesh::default();
                for p in &screen {
                    mesh.colored_vertex(*p, color);
                }
                for i in (0..screen.len() as u32).step_by(3) {
                    mesh.add_triangle(i, i + 1, i + 2);
                }
                egui::Shape::mesh(mesh)
            }
            DrawCommand::Quad { .. } => egui::Shape::convex_polygon(screen, color, egui::Stroke::NONE),
            DrawCommand::LineLoop { .. } => {
                depth += WIRE_DEPTH_BIAS;
                egui::Shape::closed_line(screen, egui::Stroke::new(WIRE_WIDTH, color))
            }
            DrawCommand::Segment { width, .. } => {
                depth += WIRE_DEPTH_BIAS;
                egui::Shape::line_segment([screen[0], screen[1]], egui::Stroke::new(*width, color))
            }
        };
        items.push((depth, shape));
    }
    items.sort_by(|a, b| a.0.total_cmp(&b.0));
    painter.extend(items.into_iter().map(|(_, shape)| shape));

    if let Some(n) = frame.frame {
        painter.text(
            rect.min + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            format!("{n:03}"),
            egui::FontId::monospace(14.0),
            egui::Color32::WHITE,
        );
    }
}

fn paint_grid(painter: &egui::Painter, tx: &Projector) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(38));
    let extent = GRID_HALF_EXTENT as f32;
    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        let k = i as f32;
        let lines = [
            (Vec3::new(k, GRID_Y, -extent), Vec3::new(k, GRID_Y, extent)),
            (Vec3::new(-extent, GRID_Y, k), Vec3::new(extent, GRID_Y, k)),
        ];
        for (a, b) in lines {
            if let (Some(a), Some(b)) = (tx.point(a), tx.point(b)) {
                painter.line_segment([a, b], stroke);
            }
        }
    }
}
