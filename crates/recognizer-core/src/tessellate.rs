//! Cap tessellation.
//!
//! Caps are arbitrary outlines: concave wings, touching edges, the odd
//! self-intersection. They are filled under the nonzero winding rule by
//! projecting onto their dominant plane and running lyon's sweep-line fill
//! tessellator. The input 3D coordinates ride along as custom vertex
//! attributes, so any vertex lyon introduces at an intersection comes back as
//! an interpolation of the input vertices that produced it.

use crate::error::TessellationError;
use crate::geom::Vec3;
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};
use serde::{Deserialize, Serialize};

const AREA_EPSILON: f32 = 1e-12;

/// A filled triangle in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Triangle(pub [Vec3; 3]);

impl Triangle {
    pub fn area(&self) -> f32 {
        let [a, b, c] = self.0;
        (b - a).cross(&(c - a)).length() / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Polygon,
    Contour,
}

/// Strictly nested polygon submission: one polygon open at a time, one contour
/// open at a time inside it, vertices only while a contour is open.
///
/// Contours of the same polygon are combined under the nonzero rule. Nothing is
/// retained between polygons.
pub struct CapTessellator {
    stage: Stage,
    contours: Vec<Vec<Vec3>>,
    fill: FillTessellator,
}

impl std::fmt::Debug for CapTessellator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapTessellator")
            .field("stage", &self.stage)
            .field("contours", &self.contours.len())
            .finish()
    }
}

impl Default for CapTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl CapTessellator {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            contours: Vec::new(),
            fill: FillTessellator::new(),
        }
    }

    pub fn begin_polygon(&mut self) -> Result<(), TessellationError> {
        if self.stage != Stage::Idle {
            return Err(TessellationError::Protocol("polygon already open"));
        }
        self.stage = Stage::Polygon;
        Ok(())
    }

    pub fn begin_contour(&mut self) -> Result<(), TessellationError> {
        match self.stage {
            Stage::Polygon => {
                self.contours.push(Vec::new());
                self.stage = Stage::Contour;
                Ok(())
            }
            Stage::Contour => Err(TessellationError::Protocol("contour already open")),
            Stage::Idle => Err(TessellationError::Protocol("contour begun outside a polygon")),
        }
    }

    pub fn vertex(&mut self, v: Vec3) -> Result<(), TessellationError> {
        if self.stage != Stage::Contour {
            return Err(TessellationError::Protocol("vertex submitted outside a contour"));
        }
        if let Some(contour) = self.contours.last_mut() {
            contour.push(v);
        }
        Ok(())
    }

    pub fn end_contour(&mut self) -> Result<(), TessellationError> {
        if self.stage != Stage::Contour {
            return Err(TessellationError::Protocol("no contour to end"));
        }
        self.stage = Stage::Polygon;
        Ok(())
    }

    /// Closes the polygon and returns its triangles. Submission buffers are
    /// released whether or not the fill succeeds.
    pub fn end_polygon(&mut self) -> Result<Vec<Triangle>, TessellationError> {
        match self.stage {
            Stage::Polygon => {}
            Stage::Contour => return Err(TessellationError::Protocol("contour still open")),
            Stage::Idle => return Err(TessellationError::Protocol("no polygon to end")),
        }
        self.stage = Stage::Idle;
        let contours = std::mem::take(&mut self.contours);
        fill_contours(&mut self.fill, &contours)
    }

    /// Drops any half-finished submission and returns to the idle stage.
    pub fn reset(&mut self) {
        self.stage = Stage::Idle;
        self.contours.clear();
    }

    /// Single-contour shorthand for a whole submission.
    pub fn tessellate(&mut self, outline: &[Vec3]) -> Result<Vec<Triangle>, TessellationError> {
        self.begin_polygon()?;
        self.begin_contour()?;
        for &v in outline {
            self.vertex(v)?;
        }
        self.end_contour()?;
        self.end_polygon()
    }
}

/// Fills one closed outline under the nonzero rule.
pub fn tessellate_cap(outline: &[Vec3]) -> Result<Vec<Triangle>, TessellationError> {
    CapTessellator::new().tessellate(outline)
}

fn fill_contours(fill: &mut FillTessellator, contours: &[Vec<Vec3>]) -> Result<Vec<Triangle>, TessellationError> {
    let usable: Vec<&Vec<Vec3>> = contours.iter().filter(|c| c.len() >= 3).collect();
    if usable.is_empty() {
        return Ok(Vec::new());
    }

    let Some(plane) = ProjectionPlane::for_contours(&usable) else {
        return Ok(Vec::new());
    };

    let mut builder = Path::builder_with_attributes(3);
    for contour in &usable {
        let first = contour[0];
        builder.begin(plane.project(first), &[first.x, first.y, first.z]);
        for v in contour.iter().skip(1) {
            builder.line_to(plane.project(*v), &[v.x, v.y, v.z]);
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut geometry: VertexBuffers<Vec3, u32> = VertexBuffers::new();
    let options = FillOptions::default().with_fill_rule(FillRule::NonZero);
    fill.tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut geometry, |mut vertex: FillVertex| {
            let attrs = vertex.interpolated_attributes();
            Vec3::new(attrs[0], attrs[1], attrs[2])
        }),
    )
    .map_err(|e| TessellationError::Fill(format!("{e:?}")))?;

    let triangles = geometry
        .indices
        .chunks_exact(3)
        .map(|tri| {
            Triangle([
                geometry.vertices[tri[0] as usize],
                geometry.vertices[tri[1] as usize],
                geometry.vertices[tri[2] as usize],
            ])
        })
        .collect();
    Ok(triangles)
}

/// Which pair of axes a cap is flattened onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectionPlane {
    Xy,
    Yz,
    Zx,
}

impl ProjectionPlane {
    /// Drops the axis the Newell normal leans on most. Outlines whose signed
    /// areas cancel out (a figure eight) fall back to the two widest extents.
    fn for_contours(contours: &[&Vec<Vec3>]) -> Option<Self> {
        let mut newell = Vec3::ZERO;
        for contour in contours {
            for (i, a) in contour.iter().enumerate() {
                let b = contour[(i + 1) % contour.len()];
                newell.x += (a.y - b.y) * (a.z + b.z);
                newell.y += (a.z - b.z) * (a.x + b.x);
                newell.z += (a.x - b.x) * (a.y + b.y);
            }
        }

        let (nx, ny, nz) = (newell.x.abs(), newell.y.abs(), newell.z.abs());
        if nx.max(ny).max(nz) > AREA_EPSILON {
            return Some(if nz >= nx && nz >= ny {
                ProjectionPlane::Xy
            } else if nx >= ny {
                ProjectionPlane::Yz
            } else {
                ProjectionPlane::Zx
            });
        }

        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in contours.iter().flat_map(|c| c.iter()) {
            min = Vec3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
            max = Vec3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
        }
        let extent = max - min;
        let widest = [extent.x, extent.y, extent.z];
        let flat = widest.iter().filter(|e| **e <= AREA_EPSILON).count();
        if flat >= 2 {
            return None;
        }
        Some(if extent.z <= extent.x && extent.z <= extent.y {
            ProjectionPlane::Xy
        } else if extent.x <= extent.y {
            ProjectionPlane::Yz
        } else {
            ProjectionPlane::Zx
        })
    }

    fn project(&self, v: Vec3) -> lyon_tessellation::math::Point {
        match self {
            ProjectionPlane::Xy => point(v.x, v.y),
            ProjectionPlane::Yz => point(v.y, v.z),
            ProjectionPlane::Zx => point(v.z, v.x),
        }
    }
}
