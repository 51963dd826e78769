use crate::error::CatalogError;
use crate::geom::Vec3;
use serde::{Deserialize, Serialize};

/// One outline point of a part, with its own front and back depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceVertex {
    pub x: f32,
    pub y: f32,
    pub z_front: f32,
    pub z_back: f32,
}

impl FaceVertex {
    pub const fn new(x: f32, y: f32, z_front: f32, z_back: f32) -> Self {
        Self {
            x,
            y,
            z_front,
            z_back,
        }
    }

    pub fn front(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z_front)
    }

    pub fn back(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z_back)
    }

    /// The point halfway between the two caps.
    pub fn mid(&self) -> Vec3 {
        Vec3::new(self.x, self.y, (self.z_front + self.z_back) / 2.0)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z_front.is_finite() && self.z_back.is_finite()
    }
}

/// Side walls whose resolved normal is inverted before shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlipMask(u64);

impl FlipMask {
    pub const EMPTY: FlipMask = FlipMask(0);
    pub const MAX_SIDES: usize = u64::BITS as usize;

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn from_indices(indices: &[usize]) -> Result<Self, CatalogError> {
        let mut bits = 0u64;
        for &index in indices {
            if index >= Self::MAX_SIDES {
                return Err(CatalogError::FlipIndexTooLarge {
                    index,
                    max: Self::MAX_SIDES,
                });
            }
            bits |= 1u64 << index;
        }
        Ok(Self(bits))
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, side: usize) -> bool {
        side < Self::MAX_SIDES && (self.0 >> side) & 1 == 1
    }

    pub fn indices(&self) -> Vec<usize> {
        (0..Self::MAX_SIDES).filter(|&i| self.contains(i)).collect()
    }

    /// Index of the highest flipped side, if any.
    fn highest(&self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(Self::MAX_SIDES - 1 - self.0.leading_zeros() as usize)
        }
    }
}

/// A planar part of the model: an ordered outline extruded between per-vertex
/// front and back depths.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDescriptor {
    name: String,
    vertices: Vec<FaceVertex>,
    flip_mask: FlipMask,
}

impl FaceDescriptor {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<FaceVertex>,
        flip_mask: FlipMask,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if vertices.is_empty() {
            return Err(CatalogError::EmptyFace { name });
        }
        if let Some(vertex) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(CatalogError::NonFinite { name, vertex });
        }
        if let Some(index) = flip_mask.highest() {
            if index >= vertices.len() {
                return Err(CatalogError::FlipOutOfRange {
                    name,
                    index,
                    sides: vertices.len(),
                });
            }
        }
        Ok(Self {
            name,
            vertices,
            flip_mask,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[FaceVertex] {
        &self.vertices
    }

    pub fn flip_mask(&self) -> FlipMask {
        self.flip_mask
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the part has enough vertices to carry front and back caps.
    pub fn has_caps(&self) -> bool {
        self.vertices.len() >= 3
    }

    pub fn front_points(&self) -> Vec<Vec3> {
        self.vertices.iter().map(FaceVertex::front).collect()
    }

    pub fn back_points(&self) -> Vec<Vec3> {
        self.vertices.iter().map(FaceVertex::back).collect()
    }

    /// The same part with its outline walked the other way round.
    ///
    /// Flip flags follow their physical edge: edge `i -> i+1` becomes edge
    /// `n-2-i` of the reversed outline.
    pub fn reversed(&self) -> Result<Self, CatalogError> {
        let n = self.vertices.len();
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        let flipped: Vec<usize> = self
            .flip_mask
            .indices()
            .into_iter()
            .map(|i| (2 * n - 2 - i) % n)
            .collect();
        Self::new(self.name.clone(), vertices, FlipMask::from_indices(&flipped)?)
    }
}
