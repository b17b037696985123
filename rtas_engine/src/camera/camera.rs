/// Camera - low-level passive data container.
///
/// Holds the world-space position the acceleration structure is built
/// around, and the slot the frame's built structure is published into.
/// The Camera computes nothing.

use glam::Vec3;
use crate::backend::StructureHandle;

/// Camera seen by the ray tracing pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Camera {
    position: Vec3,
    acceleration_structure: Option<StructureHandle>,
}

impl Camera {
    /// Create a camera at `position` with no structure bound.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            acceleration_structure: None,
        }
    }

    // ===== GETTERS =====

    /// World-space position (build origin for the structure).
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Structure traced by this camera, if one was published.
    pub fn acceleration_structure(&self) -> Option<StructureHandle> {
        self.acceleration_structure
    }

    // ===== SETTERS - store, compute nothing =====

    /// Move the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Bind a structure (or unbind with `None`).
    pub fn set_acceleration_structure(&mut self, handle: Option<StructureHandle>) {
        self.acceleration_structure = handle;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
