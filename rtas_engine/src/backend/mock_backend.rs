/// Mock ray tracing backend for unit tests (no ray tracing API required)
///
/// Records every call in a shared log and can be told to fail
/// registrations for one material, or to fail builds.

#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use glam::Vec3;
#[cfg(test)]
use rustc_hash::FxHashMap;
#[cfg(test)]
use slotmap::SlotMap;
#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use crate::batch::{CullingPolicy, MaterialId, RenderDescriptor};
#[cfg(test)]
use crate::placement::Placement;
#[cfg(test)]
use super::ray_tracing_backend::{RayTracingBackend, StructureHandle};

// ============================================================================
// Recorded calls
// ============================================================================

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateStructure,
    Clear,
    ConfigureCulling,
    AddInstances { material: MaterialId, count: usize },
    AddInstance { material: MaterialId },
    Build { origin: Vec3 },
    Dispose,
}

// ============================================================================
// Mock Backend
// ============================================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockBackend {
    /// Every call, in order
    pub calls: Arc<Mutex<Vec<BackendCall>>>,
    /// Registrations using this material fail with a backend error
    pub fail_material: Option<MaterialId>,
    /// `clear` fails with a backend error
    pub fail_clear: bool,
    /// `configure_culling` fails with a backend error
    pub fail_culling: bool,
    /// `build` fails with a backend error
    pub fail_build: bool,
    structures: SlotMap<StructureHandle, usize>,
    built_counts: FxHashMap<StructureHandle, usize>,
}

#[cfg(test)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose registrations fail for `material`
    pub fn failing_for(material: MaterialId) -> Self {
        Self {
            fail_material: Some(material),
            ..Self::default()
        }
    }

    /// Snapshot of the recorded calls
    pub fn get_calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count_calls(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| predicate(call)).count()
    }

    /// Instance count captured by the last build of `handle`
    pub fn built_count(&self, handle: StructureHandle) -> Option<usize> {
        self.built_counts.get(&handle).copied()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_material(&self, descriptor: &RenderDescriptor) -> Result<()> {
        if self.fail_material == Some(descriptor.material()) {
            return Err(Error::BackendError(format!(
                "mock: registration refused for material {}",
                descriptor.material().0
            )));
        }
        Ok(())
    }

    fn count_mut(&mut self, handle: StructureHandle) -> Result<&mut usize> {
        self.structures
            .get_mut(handle)
            .ok_or_else(|| Error::BackendError(format!("mock: unknown structure {:?}", handle)))
    }
}

#[cfg(test)]
impl RayTracingBackend for MockBackend {
    fn create_structure(&mut self) -> Result<StructureHandle> {
        self.record(BackendCall::CreateStructure);
        Ok(self.structures.insert(0))
    }

    fn clear(&mut self, handle: StructureHandle) -> Result<()> {
        self.record(BackendCall::Clear);
        if self.fail_clear {
            return Err(Error::BackendError("mock: clear refused".to_string()));
        }
        *self.count_mut(handle)? = 0;
        Ok(())
    }

    fn configure_culling(&mut self, handle: StructureHandle, _policy: &CullingPolicy) -> Result<()> {
        self.record(BackendCall::ConfigureCulling);
        if self.fail_culling {
            return Err(Error::BackendError("mock: culling refused".to_string()));
        }
        self.count_mut(handle)?;
        Ok(())
    }

    fn add_instances(
        &mut self,
        handle: StructureHandle,
        descriptor: &RenderDescriptor,
        placements: &[Placement],
    ) -> Result<()> {
        self.record(BackendCall::AddInstances {
            material: descriptor.material(),
            count: placements.len(),
        });
        self.check_material(descriptor)?;
        *self.count_mut(handle)? += placements.len();
        Ok(())
    }

    fn add_instance(
        &mut self,
        handle: StructureHandle,
        descriptor: &RenderDescriptor,
        _placement: &Placement,
    ) -> Result<()> {
        self.record(BackendCall::AddInstance { material: descriptor.material() });
        self.check_material(descriptor)?;
        *self.count_mut(handle)? += 1;
        Ok(())
    }

    fn build(&mut self, handle: StructureHandle, origin: Vec3) -> Result<()> {
        self.record(BackendCall::Build { origin });
        if self.fail_build {
            return Err(Error::BackendError("mock: build refused".to_string()));
        }
        let count = *self.count_mut(handle)?;
        self.built_counts.insert(handle, count);
        Ok(())
    }

    fn dispose(&mut self, handle: StructureHandle) -> Result<()> {
        self.record(BackendCall::Dispose);
        self.structures
            .remove(handle)
            .map(|_| ())
            .ok_or_else(|| Error::BackendError(format!("mock: double dispose of {:?}", handle)))
    }

    fn instance_count(&self, handle: StructureHandle) -> Result<usize> {
        self.structures
            .get(handle)
            .copied()
            .ok_or_else(|| Error::BackendError(format!("mock: unknown structure {:?}", handle)))
    }
}
