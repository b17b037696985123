/// Acceleration structure session - the per-frame state machine.
///
/// ```text
/// Uninitialized ─┐
///                ├─ clear ─> Cleared ─ cull ─> Culled ─ populate ─> Populated ─ build ─> Built ─ publish ─> Ready
/// Ready / Built ─┘
/// any ─ dispose ─> Disposed
/// ```
///
/// The backend structure is created lazily on the first `clear`. Calls out
/// of order are rejected with `Error::InvalidState` and leave the state
/// unchanged. A backend failure in any step ends the frame and puts the
/// session back in `Ready`. Using a disposed session panics.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::Vec3;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error, engine_info, engine_trace};
use crate::backend::{RayTracingBackend, StructureHandle};
use crate::batch::{CullingPolicy, InstanceBatch, InstancingMode, RenderDescriptor};
use crate::camera::Camera;
use crate::placement::Placement;

const SOURCE: &str = "rtas::Session";

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No backend structure yet
    Uninitialized,
    /// Structure exists; a new frame may start
    Ready,
    /// Instances removed this frame
    Cleared,
    /// Culling configured this frame
    Culled,
    /// Batches submitted this frame
    Populated,
    /// Structure rebuilt this frame, not yet published
    Built,
    /// Structure released; terminal
    Disposed,
}

/// Outcome of one populate step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Batches fully registered
    pub registered_batches: usize,
    /// Batches with no descriptor (nothing to contribute)
    pub skipped_batches: usize,
    /// Names of batches whose registration failed
    pub failed_batches: Vec<String>,
    /// Instances the backend accepted
    pub submitted_instances: usize,
}

/// Outcome of one full frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// Structure published to the camera
    pub handle: StructureHandle,
    pub populate: PopulateReport,
}

/// Owns one backend acceleration structure across frames
pub struct AccelerationStructureSession {
    backend: Arc<Mutex<dyn RayTracingBackend>>,
    handle: Option<StructureHandle>,
    state: SessionState,
}

impl AccelerationStructureSession {
    /// Create a session; no backend call happens until the first frame.
    pub fn new(backend: Arc<Mutex<dyn RayTracingBackend>>) -> Self {
        Self {
            backend,
            handle: None,
            state: SessionState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Backend structure, once created
    pub fn handle(&self) -> Option<StructureHandle> {
        self.handle
    }

    /// Whether `dispose` already ran
    pub fn is_disposed(&self) -> bool {
        self.state == SessionState::Disposed
    }

    fn backend(&self) -> Result<MutexGuard<'_, dyn RayTracingBackend + 'static>> {
        self.backend
            .lock()
            .map_err(|_| Error::BackendError("Ray tracing backend lock poisoned".to_string()))
    }

    fn assert_live(&self, operation: &str) {
        assert!(
            self.state != SessionState::Disposed,
            "{}() called on a disposed acceleration structure session",
            operation
        );
    }

    fn require(&self, operation: &str, allowed: &[SessionState]) -> Result<()> {
        self.assert_live(operation);
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "{}() not allowed in state {:?}",
                operation, self.state
            )))
        }
    }

    fn live_handle(&self) -> Result<StructureHandle> {
        self.handle
            .ok_or_else(|| Error::InvalidState("No acceleration structure created".to_string()))
    }

    /// Create the backend structure if not already held. Idempotent.
    pub fn ensure_ready(&mut self) -> Result<StructureHandle> {
        self.assert_live("ensure_ready");
        if let Some(handle) = self.handle {
            return Ok(handle);
        }

        let handle = self.backend()?.create_structure()?;
        self.handle = Some(handle);
        self.state = SessionState::Ready;
        engine_info!(SOURCE, "Acceleration structure {:?} created", handle);
        Ok(handle)
    }

    /// Remove every instance registered during the previous frame.
    pub fn clear(&mut self) -> Result<()> {
        self.require(
            "clear",
            &[SessionState::Uninitialized, SessionState::Ready, SessionState::Built],
        )?;
        let handle = self.ensure_ready()?;

        if let Err(error) = self.backend().and_then(|mut backend| backend.clear(handle)) {
            return self.abandon_frame(error);
        }
        self.state = SessionState::Cleared;
        engine_trace!(SOURCE, "Cleared {:?}", handle);
        Ok(())
    }

    /// Hand the culling policy to the backend for this frame.
    pub fn cull(&mut self, policy: &CullingPolicy) -> Result<()> {
        self.require("cull", &[SessionState::Cleared])?;
        let handle = self.live_handle()?;

        if let Err(error) = self.backend().and_then(|mut backend| backend.configure_culling(handle, policy)) {
            return self.abandon_frame(error);
        }
        self.state = SessionState::Culled;
        Ok(())
    }

    /// Register every batch that has a descriptor.
    ///
    /// A registration failure abandons only that batch: it is logged and
    /// reported, and the remaining batches are still submitted.
    pub fn populate(
        &mut self,
        batches: &[InstanceBatch],
        mode: InstancingMode,
    ) -> Result<PopulateReport> {
        self.require("populate", &[SessionState::Culled])?;
        let handle = self.live_handle()?;

        let submitted = self.backend().map(|mut backend| {
            let mut report = PopulateReport::default();

            for batch in batches {
                let descriptor = match batch.descriptor() {
                    Some(descriptor) => descriptor,
                    None => {
                        engine_trace!(SOURCE, "Batch '{}' has no descriptor, skipped", batch.name());
                        report.skipped_batches += 1;
                        continue;
                    }
                };

                match submit(&mut *backend, handle, descriptor, batch.placements(), mode) {
                    Ok(count) => {
                        report.registered_batches += 1;
                        report.submitted_instances += count;
                    }
                    Err((count, error)) => {
                        engine_error!(
                            SOURCE,
                            "Registration of batch '{}' ({}) failed: {}",
                            batch.name(), descriptor.label(), error
                        );
                        report.submitted_instances += count;
                        report.failed_batches.push(batch.name().to_string());
                    }
                }
            }

            report
        });
        let report = match submitted {
            Ok(report) => report,
            Err(error) => return self.abandon_frame(error),
        };

        self.state = SessionState::Populated;
        engine_trace!(
            SOURCE,
            "Populated {:?}: {} registered, {} skipped, {} failed, {} instances",
            handle,
            report.registered_batches,
            report.skipped_batches,
            report.failed_batches.len(),
            report.submitted_instances
        );
        Ok(report)
    }

    /// Rebuild the structure around `origin` with this frame's membership.
    ///
    /// On backend failure the frame is over (see `abandon_frame`).
    pub fn build(&mut self, origin: Vec3) -> Result<StructureHandle> {
        self.require("build", &[SessionState::Populated])?;
        let handle = self.live_handle()?;

        match self.backend().and_then(|mut backend| backend.build(handle, origin)) {
            Ok(()) => {
                self.state = SessionState::Built;
                Ok(handle)
            }
            Err(error) => self.abandon_frame(error),
        }
    }

    /// End the current frame after a backend failure. The structure stays
    /// alive; the next frame starts again with `clear`.
    fn abandon_frame<T>(&mut self, error: Error) -> Result<T> {
        self.state = if self.handle.is_some() {
            SessionState::Ready
        } else {
            SessionState::Uninitialized
        };
        Err(error)
    }

    /// Bind the built structure to `camera`.
    pub fn publish(&mut self, camera: &mut Camera) -> Result<()> {
        self.require("publish", &[SessionState::Built])?;
        let handle = self.live_handle()?;

        camera.set_acceleration_structure(Some(handle));
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Run the whole frame sequence: clear, cull, populate, build around
    /// the camera position, publish to the camera.
    pub fn run_frame(
        &mut self,
        policy: &CullingPolicy,
        batches: &[InstanceBatch],
        mode: InstancingMode,
        camera: &mut Camera,
    ) -> Result<FrameReport> {
        self.clear()?;
        self.cull(policy)?;
        let populate = self.populate(batches, mode)?;
        let handle = self.build(camera.position())?;
        self.publish(camera)?;

        Ok(FrameReport { handle, populate })
    }

    /// Release the backend structure. Later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.state == SessionState::Disposed {
            return;
        }
        self.state = SessionState::Disposed;

        let Some(handle) = self.handle.take() else {
            return;
        };

        let result = match self.backend.lock() {
            Ok(mut backend) => backend.dispose(handle),
            Err(_) => Err(Error::BackendError("Ray tracing backend lock poisoned".to_string())),
        };
        match result {
            Ok(()) => engine_debug!(SOURCE, "Acceleration structure {:?} disposed", handle),
            Err(error) => engine_error!(SOURCE, "Failed to dispose {:?}: {}", handle, error),
        }
    }
}

impl Drop for AccelerationStructureSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Submit one batch. On failure, returns how many instances were accepted
/// before the error.
fn submit(
    backend: &mut dyn RayTracingBackend,
    handle: StructureHandle,
    descriptor: &RenderDescriptor,
    placements: &[Placement],
    mode: InstancingMode,
) -> std::result::Result<usize, (usize, Error)> {
    match mode {
        InstancingMode::Batched => backend
            .add_instances(handle, descriptor, placements)
            .map(|()| placements.len())
            .map_err(|error| (0, error)),
        InstancingMode::PerInstance => {
            for (index, placement) in placements.iter().enumerate() {
                backend
                    .add_instance(handle, descriptor, placement)
                    .map_err(|error| (index, error))?;
            }
            Ok(placements.len())
        }
    }
}

#[cfg(test)]
#[path = "acceleration_structure_session_tests.rs"]
mod tests;
