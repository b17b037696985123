/// Frame driver - activation, per-frame advance, teardown.
///
/// `activate` generates every batch once. `advance_frame` is called once
/// per displayed frame: it updates the FPS readout, then, only when the
/// pipeline supports hardware ray tracing, runs one session frame and
/// publishes the structure to the camera. `teardown` disposes the
/// structure.

use std::sync::{Arc, Mutex};
use glam::Vec3;
use crate::error::Error;
use crate::{engine_error, engine_info, engine_trace};
use crate::backend::RayTracingBackend;
use crate::batch::{
    CullingPolicy, InstanceBatch, InstancingMode, MaterialId, MaterialProperties,
    MeshId, MeshInstanceConfig,
};
use crate::camera::Camera;
use crate::placement::{LatticeConfig, DEFAULT_HALF_EXTENT, generate_placements_with};
use crate::session::{AccelerationStructureSession, FrameReport};
use super::fps_counter::{FpsConfig, FpsCounter};
use super::ui::{TextSink, Toggle};

const SOURCE: &str = "rtas::FrameDriver";

/// What the active render pipeline can do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineCapability {
    /// Hardware ray tracing pipeline active
    HardwareRayTracing,
    /// Anything else; acceleration work is skipped
    Unsupported,
}

/// Geometry submitted for each lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryVariant {
    /// One mesh instance per placement
    #[default]
    Mesh,
    /// One AABB per placement, all in one procedural instance
    Procedural,
}

/// Activation settings
#[derive(Debug, Clone)]
pub struct ActivationConfig {
    /// One lattice (and one batch) per origin
    pub origins: Vec<Vec3>,
    pub lattice: LatticeConfig,
    pub variant: GeometryVariant,
    /// Half extent of the procedural boxes
    pub aabb_half_extent: f32,
    pub culling: CullingPolicy,
    pub fps: FpsConfig,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            origins: vec![
                Vec3::new(-55.0, 0.0, -50.0),
                Vec3::new(55.0, 0.0, -50.0),
                Vec3::new(0.0, 0.0, 50.0),
            ],
            lattice: LatticeConfig::default(),
            variant: GeometryVariant::Mesh,
            aabb_half_extent: DEFAULT_HALF_EXTENT,
            culling: CullingPolicy::default(),
            fps: FpsConfig::default(),
        }
    }
}

/// Host-supplied rendering resources
///
/// `materials[i]` is used for the lattice at `origins[i]`. Unset entries
/// (or a missing mesh for the mesh variant) leave that batch empty.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSource {
    pub mesh: Option<MeshId>,
    pub submesh_index: u32,
    pub materials: Vec<Option<MaterialId>>,
    /// Custom properties attached to procedural instances
    pub properties: MaterialProperties,
}

impl DescriptorSource {
    fn material(&self, index: usize) -> Option<MaterialId> {
        self.materials.get(index).copied().flatten()
    }
}

/// What happened during one frame
#[derive(Debug, Clone)]
pub enum FrameOutcome {
    /// Structure rebuilt and published
    Traced(FrameReport),
    /// Pipeline without hardware ray tracing; no backend call made
    Skipped,
    /// The session could not complete the frame (logged)
    Failed(Error),
}

/// Per-frame orchestrator
pub struct FrameDriver {
    session: AccelerationStructureSession,
    batches: Vec<InstanceBatch>,
    culling: CullingPolicy,
    fps: FpsCounter,
    fps_text: Option<Box<dyn TextSink>>,
    instancing_toggle: Option<Box<dyn Toggle>>,
    frame_index: u64,
}

impl FrameDriver {
    /// Generate all batches. No backend call happens until the first
    /// ray traced frame.
    pub fn activate(
        backend: Arc<Mutex<dyn RayTracingBackend>>,
        config: ActivationConfig,
        source: DescriptorSource,
    ) -> Self {
        let batches: Vec<InstanceBatch> = config
            .origins
            .iter()
            .enumerate()
            .map(|(index, origin)| {
                let name = format!("lattice_{}", index);
                let placements = generate_placements_with(*origin, &config.lattice);
                let material = source.material(index);

                match config.variant {
                    GeometryVariant::Mesh => {
                        let mesh_config = source
                            .mesh
                            .zip(material)
                            .map(|(mesh, material)| MeshInstanceConfig::new(mesh, source.submesh_index, material));
                        InstanceBatch::mesh(&name, mesh_config, placements)
                    }
                    GeometryVariant::Procedural => InstanceBatch::procedural(
                        &name,
                        material,
                        source.properties.clone(),
                        &placements,
                        config.aabb_half_extent,
                    ),
                }
            })
            .collect();

        engine_info!(
            SOURCE,
            "Activated {:?} variant: {} batches, {} with descriptors",
            config.variant,
            batches.len(),
            batches.iter().filter(|b| b.descriptor().is_some()).count()
        );

        Self {
            session: AccelerationStructureSession::new(backend),
            batches,
            culling: config.culling,
            fps: FpsCounter::new(config.fps),
            fps_text: None,
            instancing_toggle: None,
            frame_index: 0,
        }
    }

    /// Attach the FPS output; without one the counter does not run.
    pub fn with_fps_text<S: TextSink + 'static>(mut self, sink: S) -> Self {
        self.fps_text = Some(Box::new(sink));
        self
    }

    /// Attach the instancing toggle; without one instancing stays on.
    pub fn with_instancing_toggle<T: Toggle + 'static>(mut self, toggle: T) -> Self {
        self.instancing_toggle = Some(Box::new(toggle));
        self
    }

    /// Instancing mode for the next frame
    pub fn instancing_mode(&self) -> InstancingMode {
        InstancingMode::from_toggle(self.instancing_toggle.as_ref().map(|toggle| toggle.is_on()))
    }

    pub fn batches(&self) -> &[InstanceBatch] {
        &self.batches
    }

    pub fn session(&self) -> &AccelerationStructureSession {
        &self.session
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    /// Number of frames advanced so far (ray traced or not)
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advance one displayed frame.
    ///
    /// Never fails: session errors are logged and returned as
    /// `FrameOutcome::Failed`, and the next frame starts over.
    pub fn advance_frame(
        &mut self,
        capability: PipelineCapability,
        realtime_since_startup: f32,
        camera: &mut Camera,
    ) -> FrameOutcome {
        self.frame_index += 1;

        if let Some(sink) = self.fps_text.as_mut() {
            if let Some(fps) = self.fps.update(realtime_since_startup) {
                sink.set_text(&FpsCounter::format(fps));
            }
        }

        if capability != PipelineCapability::HardwareRayTracing {
            engine_trace!(SOURCE, "Frame {}: no hardware ray tracing, skipped", self.frame_index);
            return FrameOutcome::Skipped;
        }

        let mode = self.instancing_mode();
        match self.session.run_frame(&self.culling, &self.batches, mode, camera) {
            Ok(report) => {
                engine_trace!(
                    SOURCE,
                    "Frame {}: {} instances submitted ({:?})",
                    self.frame_index, report.populate.submitted_instances, mode
                );
                FrameOutcome::Traced(report)
            }
            Err(error) => {
                engine_error!(SOURCE, "Frame {}: {}", self.frame_index, error);
                FrameOutcome::Failed(error)
            }
        }
    }

    /// End the session, releasing the structure.
    pub fn teardown(mut self) {
        self.session.dispose();
        engine_info!(SOURCE, "Torn down after {} frames", self.frame_index);
    }
}

#[cfg(test)]
#[path = "frame_driver_tests.rs"]
mod tests;
