/// Ray tracing backend trait
///
/// This is the narrow contract the acceleration structure session drives.
/// Implemented by API-specific backends and by the CPU reference backend.

use glam::Vec3;
use slotmap::new_key_type;
use crate::error::Result;
use crate::batch::{CullingPolicy, RenderDescriptor};
use crate::placement::Placement;

new_key_type! {
    /// Handle to a backend acceleration structure.
    ///
    /// Stays valid until the structure is disposed; a disposed handle is
    /// never reused for a different structure.
    pub struct StructureHandle;
}

/// Backend-side acceleration structure operations
///
/// All calls are synchronous and happen on the frame thread.
pub trait RayTracingBackend: Send + Sync {
    /// Create an empty acceleration structure
    fn create_structure(&mut self) -> Result<StructureHandle>;

    /// Remove every instance from the structure
    fn clear(&mut self, handle: StructureHandle) -> Result<()>;

    /// Set the inclusion rules evaluated for instances added afterwards
    fn configure_culling(&mut self, handle: StructureHandle, policy: &CullingPolicy) -> Result<()>;

    /// Register one instance per placement in a single call
    ///
    /// Either every placement is registered or none is.
    fn add_instances(
        &mut self,
        handle: StructureHandle,
        descriptor: &RenderDescriptor,
        placements: &[Placement],
    ) -> Result<()>;

    /// Register a single instance
    fn add_instance(
        &mut self,
        handle: StructureHandle,
        descriptor: &RenderDescriptor,
        placement: &Placement,
    ) -> Result<()>;

    /// Rebuild the traversal representation around `origin`
    fn build(&mut self, handle: StructureHandle, origin: Vec3) -> Result<()>;

    /// Release the structure; the handle is invalid afterwards
    fn dispose(&mut self, handle: StructureHandle) -> Result<()>;

    /// Number of instances currently registered (before culling)
    fn instance_count(&self, handle: StructureHandle) -> Result<usize>;
}
