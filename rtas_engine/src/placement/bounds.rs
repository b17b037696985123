/// Bounding volumes for procedural (AABB) instances.
///
/// Each placement gets a cube of fixed half extent centred on its position.
/// The boxes are stored as a packed `Aabb` array so a backend can upload
/// them as-is into a GPU buffer.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use super::placement::Placement;

/// Half extent of the default per-placement box, per axis.
pub const DEFAULT_HALF_EXTENT: f32 = 0.3;

/// Axis-aligned bounding box (min/max corners).
///
/// Layout matches the six-float AABB record ray tracing APIs expect
/// for procedural geometry.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Aabb {
    /// Box from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of `half_extent` per axis centred on `center`.
    pub fn from_center(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Box centre.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis (`max - min`).
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Same box moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Transform this box by a matrix, returning a new axis-aligned box.
    ///
    /// Arvo method: projects each matrix axis onto the box extents for a
    /// tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Aabb { min: new_min, max: new_max }
    }

    /// Test if the two boxes overlap or touch.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

/// Build one box per placement with the default half extent.
pub fn build_bounding_volumes(placements: &[Placement]) -> Vec<Aabb> {
    build_bounding_volumes_with(placements, DEFAULT_HALF_EXTENT)
}

/// Build one box per placement, `half_extent` per axis. Order-preserving.
pub fn build_bounding_volumes_with(placements: &[Placement], half_extent: f32) -> Vec<Aabb> {
    let half = Vec3::splat(half_extent);
    placements
        .iter()
        .map(|placement| Aabb::from_center(placement.position(), half))
        .collect()
}

/// Immutable, packed set of boxes submitted as one procedural geometry.
///
/// Stands in for the GPU-side AABB buffer; backends read the raw bytes
/// or the typed boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct AabbBuffer {
    aabbs: Vec<Aabb>,
}

impl AabbBuffer {
    /// Wrap a box list.
    pub fn new(aabbs: Vec<Aabb>) -> Self {
        Self { aabbs }
    }

    /// Typed view of the boxes.
    pub fn aabbs(&self) -> &[Aabb] {
        &self.aabbs
    }

    /// Raw bytes, ready for upload (24 bytes per box).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.aabbs)
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.aabbs.len()
    }

    /// Whether the buffer holds no boxes.
    pub fn is_empty(&self) -> bool {
        self.aabbs.is_empty()
    }

    /// Union of all boxes, or `None` for an empty buffer.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.aabbs.split_first()?;
        Some(rest.iter().fold(*first, |acc, aabb| acc.union(aabb)))
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
