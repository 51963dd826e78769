use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use recognizer_core::catalog::Catalog;
use recognizer_core::geom::Vec3;
use recognizer_core::render::render_frame;
use recognizer_core::report::{catalog_summary, normal_report};
use recognizer_core::scene::{DebugOverlay, FlightPath, LightFrame, OrbitView, SceneState};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "recognizer")]
#[command(about = "Extrude, shade and tessellate the Recognizer model without a window.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one frame and dump its draw commands as JSON.
    Render {
        #[command(flatten)]
        catalog: CatalogArg,
        #[command(flatten)]
        scene: SceneArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Validate a catalog and print a summary.
    Check {
        #[command(flatten)]
        catalog: CatalogArg,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List every resolved face normal and whether it is lit.
    Normals {
        #[command(flatten)]
        catalog: CatalogArg,
        #[command(flatten)]
        scene: SceneArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write the built-in catalog as JSON, ready for editing.
    Catalog {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct CatalogArg {
    /// Catalog JSON; the built-in Recognizer is used when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SceneArgs {
    /// Fly-through frame index (0-based).
    #[arg(long, conflicts_with_all = ["orbit_x", "orbit_y"])]
    frame: Option<u32>,
    /// Orbit view rotation about X, in degrees.
    #[arg(long, allow_hyphen_values = true)]
    orbit_x: Option<f32>,
    /// Orbit view rotation about Y, in degrees.
    #[arg(long, allow_hyphen_values = true)]
    orbit_y: Option<f32>,
    /// Light direction as `x,y,z`; defaults to the view's own light.
    #[arg(long, allow_hyphen_values = true)]
    light: Option<String>,
    #[arg(long, value_enum, default_value_t = LightFrameArg::Fixed)]
    light_frame: LightFrameArg,
    /// Emit debug normal markers in the wireframe pass.
    #[arg(long)]
    normals: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LightFrameArg {
    Fixed,
    Follow,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Pretty-print JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render {
            catalog,
            scene,
            output,
        } => {
            let catalog = load_catalog(catalog.catalog.as_deref())?;
            let scene = scene.to_scene()?;
            let frame = render_frame(&catalog, &scene);
            tracing::info!(
                commands = frame.commands.len(),
                triangles = frame.stats.filled.cap_triangles,
                lit = frame.stats.filled.lit_faces,
                unlit = frame.stats.filled.unlit_faces,
                skipped_caps = frame.stats.filled.skipped_caps,
                "frame rendered"
            );
            write_json(&output, &frame)
        }
        Command::Check { catalog, output } => {
            let catalog = load_catalog(catalog.catalog.as_deref())?;
            let summary = catalog_summary(&catalog);
            for warning in &summary.warnings {
                tracing::warn!(code = %warning.code, "{}", warning.message);
            }
            write_json(&output, &summary)
        }
        Command::Normals {
            catalog,
            scene,
            output,
        } => {
            let catalog = load_catalog(catalog.catalog.as_deref())?;
            let scene = scene.to_scene()?;
            let rows = normal_report(&catalog, scene.shading_light());
            write_json(&output, &rows)
        }
        Command::Catalog { output } => {
            let catalog = Catalog::recognizer().context("build built-in catalog")?;
            write_json(&output, &catalog.to_file())
        }
    }
}

impl SceneArgs {
    fn to_scene(&self) -> Result<SceneState> {
        let scene = match (self.frame, self.orbit_x, self.orbit_y) {
            (Some(frame), _, _) => {
                let path = FlightPath::default();
                if frame > path.last_frame() {
                    bail!("frame {frame} is past the last frame ({})", path.last_frame());
                }
                SceneState::fly_through(path, frame)
            }
            (None, None, None) => SceneState::fly_through(FlightPath::default(), 0),
            (None, x, y) => SceneState::orbit(OrbitView {
                rot_x_deg: x.unwrap_or(0.0),
                rot_y_deg: y.unwrap_or(0.0),
                ..OrbitView::default()
            }),
        };

        let scene = match &self.light {
            Some(text) => scene.with_light(parse_vec3(text)?),
            None => scene,
        };
        let light_frame = match self.light_frame {
            LightFrameArg::Fixed => LightFrame::Fixed,
            LightFrameArg::Follow => LightFrame::FollowModel,
        };
        Ok(scene
            .with_light_frame(light_frame)
            .with_overlay(DebugOverlay {
                show_normals: self.normals,
            }))
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Catalog::recognizer().context("build built-in catalog");
    };
    ensure_input_file(path)?;
    let json = std::fs::read_to_string(path).with_context(|| format!("read catalog: {path:?}"))?;
    let catalog = Catalog::from_json_str(&json).with_context(|| format!("load catalog: {path:?}"))?;
    tracing::info!(path = %path.display(), shapes = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn parse_vec3(text: &str) -> Result<Vec3> {
    let parts = text
        .split(',')
        .map(|s| s.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parse vector `{text}`"))?;
    let [x, y, z] = parts[..] else {
        bail!("expected three comma-separated numbers, got `{text}`");
    };
    Ok(Vec3::new(x, y, z))
}

fn write_json<T: serde::Serialize>(output: &OutputArgs, value: &T) -> Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize json")?;

    match &output.output {
        Some(path) => {
            ensure_parent(path);
            std::fs::write(path, &json).with_context(|| format!("write json: {path:?}"))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
}

fn ensure_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input file does not exist: {}", path.display());
    }
    if !path.is_file() {
        bail!("Input path is not a file: {}", path.display());
    }
    Ok(())
}
