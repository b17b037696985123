/// Placement - one instance transform.
///
/// Only the translation column is ever populated: rotation is identity and
/// scale is one. The transform is kept as a full `Mat4` because that is what
/// ray tracing backends consume per instance.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Instance transform with identity rotation and unit scale.
///
/// `repr(transparent)` over `Mat4` so a placement slice can be handed to a
/// backend as raw instance data.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(transparent)]
pub struct Placement(Mat4);

impl Placement {
    /// Placement at `position` (identity rotation, unit scale).
    pub fn at(position: Vec3) -> Self {
        Self(Mat4::from_scale_rotation_translation(Vec3::ONE, Quat::IDENTITY, position))
    }

    /// World-space position (translation column).
    pub fn position(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    /// Full instance transform.
    pub fn transform(&self) -> &Mat4 {
        &self.0
    }

    /// View a placement slice as raw transforms.
    pub fn as_transforms(placements: &[Placement]) -> &[Mat4] {
        bytemuck::cast_slice(placements)
    }
}
