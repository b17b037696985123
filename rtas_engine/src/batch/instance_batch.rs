/// Instance batches - placements sharing one rendering descriptor.
///
/// A batch is built once at activation. Its membership never changes
/// piecemeal: `regenerate` swaps the whole placement set (and, for
/// procedural batches, the AABB buffer derived from it).

use std::sync::Arc;
use glam::Vec3;
use crate::placement::{AabbBuffer, Placement, build_bounding_volumes_with};
use super::descriptor::{
    MaterialId, MaterialProperties, MeshInstanceConfig, ProceduralInstanceConfig,
    RenderDescriptor,
};

/// How a batch is submitted to the structure.
///
/// Both modes produce the same membership; they differ in call count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstancingMode {
    /// One bulk call per batch
    #[default]
    Batched,
    /// One call per placement
    PerInstance,
}

impl InstancingMode {
    /// Mode selected by an optional on/off toggle.
    ///
    /// No toggle means batched.
    pub fn from_toggle(toggle: Option<bool>) -> Self {
        match toggle {
            None | Some(true) => InstancingMode::Batched,
            Some(false) => InstancingMode::PerInstance,
        }
    }
}

/// A fixed set of placements and the descriptor they are rendered with.
///
/// A batch without a descriptor (mesh or material unset) contributes
/// nothing and is skipped by the session.
#[derive(Debug, Clone)]
pub struct InstanceBatch {
    name: String,
    descriptor: Option<RenderDescriptor>,
    placements: Vec<Placement>,
    /// Half extent of the generated boxes, procedural batches only
    aabb_half_extent: Option<f32>,
}

impl InstanceBatch {
    /// Mesh batch: one instance per placement.
    pub fn mesh(
        name: &str,
        config: Option<MeshInstanceConfig>,
        placements: Vec<Placement>,
    ) -> Self {
        Self {
            name: name.to_string(),
            descriptor: config.map(RenderDescriptor::Mesh),
            placements,
            aabb_half_extent: None,
        }
    }

    /// Procedural batch: one box per placement, all in a single AABB buffer,
    /// registered as one instance with an identity transform.
    pub fn procedural(
        name: &str,
        material: Option<MaterialId>,
        properties: MaterialProperties,
        placements: &[Placement],
        half_extent: f32,
    ) -> Self {
        let aabbs = Arc::new(AabbBuffer::new(build_bounding_volumes_with(placements, half_extent)));
        let descriptor = material.map(|material| {
            let mut config = ProceduralInstanceConfig::new(aabbs, material);
            config.properties = properties;
            RenderDescriptor::Procedural(config)
        });

        Self {
            name: name.to_string(),
            descriptor,
            placements: vec![Placement::at(Vec3::ZERO)],
            aabb_half_extent: Some(half_extent),
        }
    }

    /// Batch name, used in logs and reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptor, or `None` when the batch has nothing to contribute.
    pub fn descriptor(&self) -> Option<&RenderDescriptor> {
        self.descriptor.as_ref()
    }

    /// Instance transforms submitted for this batch.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of instances this batch registers.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Replace the whole placement set.
    ///
    /// Mesh batches take the placements as instances; procedural batches
    /// rebuild their AABB buffer from them.
    pub fn regenerate(&mut self, placements: Vec<Placement>) {
        match (&mut self.descriptor, self.aabb_half_extent) {
            (Some(RenderDescriptor::Procedural(config)), Some(half_extent)) => {
                config.aabbs = Arc::new(AabbBuffer::new(
                    build_bounding_volumes_with(&placements, half_extent),
                ));
            }
            (None, Some(_)) => {}
            _ => self.placements = placements,
        }
    }
}

#[cfg(test)]
#[path = "instance_batch_tests.rs"]
mod tests;
