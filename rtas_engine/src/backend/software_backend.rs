/// CPU reference backend.
///
/// Keeps acceleration structures in a SlotMap, validates descriptors
/// against registered meshes and materials, and on build evaluates the
/// culling policy per instance and computes the world bounds of what
/// survived, relative to the build origin. No traversal structure is
/// produced; the result is what a GPU backend would have been asked to
/// trace.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug, engine_trace};
use crate::batch::{
    CullingPolicy, MaterialClass, MaterialId, MeshId, RenderDescriptor,
    ShadowCastingMode, SubMeshFlags, INSTANCE_MASK_ALL,
};
use crate::placement::{Aabb, Placement};
use super::ray_tracing_backend::{RayTracingBackend, StructureHandle};

const SOURCE: &str = "rtas::SoftwareBackend";

/// Registered mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInfo {
    /// Number of submeshes; descriptors must index below this
    pub submesh_count: u32,
    /// Object-space bounds of the whole mesh
    pub local_bounds: Aabb,
}

/// Registered material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialInfo {
    pub class: MaterialClass,
    /// Layer index (0..32) of the renderers using this material
    pub layer: u32,
    pub shadow_casting_mode: ShadowCastingMode,
    pub instance_mask: u8,
}

impl MaterialInfo {
    /// Material on layer 0, casting shadows, full instance mask.
    pub fn new(class: MaterialClass) -> Self {
        Self {
            class,
            layer: 0,
            shadow_casting_mode: ShadowCastingMode::On,
            instance_mask: INSTANCE_MASK_ALL,
        }
    }
}

/// Result of the last build of a structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltStructure {
    /// World-space origin the structure was built around
    pub origin: Vec3,
    /// Instances that passed culling
    pub instance_count: usize,
    /// Instances rejected by the culling policy or their sub-mesh flags
    pub culled_count: usize,
    /// Bounds of the traced instances, relative to `origin`
    pub bounds: Option<Aabb>,
}

/// Counters over the backend lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftwareBackendStats {
    pub structures_created: u32,
    pub structures_disposed: u32,
    pub builds: u32,
}

#[derive(Debug, Clone, Copy)]
struct SoftwareInstance {
    material: MaterialId,
    sub_mesh_flags: SubMeshFlags,
    local_bounds: Aabb,
    transform: Mat4,
}

#[derive(Debug, Default)]
struct SoftwareStructure {
    instances: Vec<SoftwareInstance>,
    culling: Option<CullingPolicy>,
    built: Option<BuiltStructure>,
}

/// CPU implementation of `RayTracingBackend`
#[derive(Debug, Default)]
pub struct SoftwareBackend {
    structures: SlotMap<StructureHandle, SoftwareStructure>,
    meshes: FxHashMap<MeshId, MeshInfo>,
    materials: FxHashMap<MaterialId, MaterialInfo>,
    next_mesh_id: u32,
    next_material_id: u32,
    stats: SoftwareBackendStats,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh and return its id
    pub fn register_mesh(&mut self, info: MeshInfo) -> MeshId {
        let id = MeshId(self.next_mesh_id);
        self.next_mesh_id += 1;
        self.meshes.insert(id, info);
        id
    }

    /// Register a material and return its id
    pub fn register_material(&mut self, info: MaterialInfo) -> MaterialId {
        let id = MaterialId(self.next_material_id);
        self.next_material_id += 1;
        self.materials.insert(id, info);
        id
    }

    /// Result of the last build, or `None` if never built since creation/clear
    pub fn built(&self, handle: StructureHandle) -> Option<&BuiltStructure> {
        self.structures.get(handle).and_then(|s| s.built.as_ref())
    }

    /// Culling policy currently configured on a structure
    pub fn culling_policy(&self, handle: StructureHandle) -> Option<&CullingPolicy> {
        self.structures.get(handle).and_then(|s| s.culling.as_ref())
    }

    /// Number of live structures
    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }

    pub fn stats(&self) -> SoftwareBackendStats {
        self.stats
    }

    fn structure_mut(&mut self, handle: StructureHandle) -> Result<&mut SoftwareStructure> {
        match self.structures.get_mut(handle) {
            Some(structure) => Ok(structure),
            None => engine_bail!(SOURCE, "Unknown or disposed structure {:?}", handle),
        }
    }

    fn invalid(message: String) -> Error {
        engine_debug!(SOURCE, "{}", message);
        Error::InvalidResource(message)
    }

    /// Validate a descriptor and resolve the per-instance template
    fn resolve(&self, descriptor: &RenderDescriptor) -> Result<SoftwareInstance> {
        let material = descriptor.material();
        if !self.materials.contains_key(&material) {
            return Err(Self::invalid(format!("Material {} is not registered", material.0)));
        }

        match descriptor {
            RenderDescriptor::Mesh(config) => {
                let mesh = self.meshes.get(&config.mesh).ok_or_else(|| {
                    Self::invalid(format!("Mesh {} is not registered", config.mesh.0))
                })?;
                if config.submesh_index >= mesh.submesh_count {
                    return Err(Self::invalid(format!(
                        "Submesh {} out of range for mesh {} ({} submeshes)",
                        config.submesh_index, config.mesh.0, mesh.submesh_count
                    )));
                }
                Ok(SoftwareInstance {
                    material,
                    sub_mesh_flags: config.sub_mesh_flags,
                    local_bounds: mesh.local_bounds,
                    transform: Mat4::IDENTITY,
                })
            }
            RenderDescriptor::Procedural(config) => {
                let bounds = config.aabbs.bounds().ok_or_else(|| {
                    Self::invalid("Procedural instance with an empty AABB buffer".to_string())
                })?;
                Ok(SoftwareInstance {
                    material,
                    sub_mesh_flags: SubMeshFlags::ENABLED,
                    local_bounds: bounds,
                    transform: Mat4::IDENTITY,
                })
            }
        }
    }
}

impl RayTracingBackend for SoftwareBackend {
    fn create_structure(&mut self) -> Result<StructureHandle> {
        let handle = self.structures.insert(SoftwareStructure::default());
        self.stats.structures_created += 1;
        engine_debug!(SOURCE, "Created structure {:?}", handle);
        Ok(handle)
    }

    fn clear(&mut self, handle: StructureHandle) -> Result<()> {
        let structure = self.structure_mut(handle)?;
        structure.instances.clear();
        structure.built = None;
        Ok(())
    }

    fn configure_culling(&mut self, handle: StructureHandle, policy: &CullingPolicy) -> Result<()> {
        self.structure_mut(handle)?.culling = Some(*policy);
        Ok(())
    }

    fn add_instances(
        &mut self,
        handle: StructureHandle,
        descriptor: &RenderDescriptor,
        placements: &[Placement],
    ) -> Result<()> {
        self.structure_mut(handle)?;
        let template = self.resolve(descriptor)?;

        let structure = self.structure_mut(handle)?;
        structure.instances.reserve(placements.len());
        structure.instances.extend(placements.iter().map(|placement| SoftwareInstance {
            transform: *placement.transform(),
            ..template
        }));
        Ok(())
    }

    fn add_instance(
        &mut self,
        handle: StructureHandle,
        descriptor: &RenderDescriptor,
        placement: &Placement,
    ) -> Result<()> {
        self.add_instances(handle, descriptor, std::slice::from_ref(placement))
    }

    fn build(&mut self, handle: StructureHandle, origin: Vec3) -> Result<()> {
        let materials = &self.materials;
        let structure = match self.structures.get_mut(handle) {
            Some(structure) => structure,
            None => engine_bail!(SOURCE, "Cannot build unknown structure {:?}", handle),
        };

        let mut instance_count = 0;
        let mut culled_count = 0;
        let mut bounds: Option<Aabb> = None;

        for instance in &structure.instances {
            let admitted = match (materials.get(&instance.material), &structure.culling) {
                (Some(info), Some(policy)) => {
                    policy.admits(info.class, info.layer, info.shadow_casting_mode, info.instance_mask)
                        && instance.sub_mesh_flags.is_enabled()
                }
                (Some(_), None) => instance.sub_mesh_flags.is_enabled(),
                (None, _) => false,
            };

            if !admitted {
                culled_count += 1;
                continue;
            }

            let world = instance.local_bounds.transformed(&instance.transform).translated(-origin);
            bounds = Some(match bounds {
                Some(acc) => acc.union(&world),
                None => world,
            });
            instance_count += 1;
        }

        structure.built = Some(BuiltStructure { origin, instance_count, culled_count, bounds });
        self.stats.builds += 1;
        engine_trace!(SOURCE, "Built {:?}: {} traced, {} culled", handle, instance_count, culled_count);
        Ok(())
    }

    fn dispose(&mut self, handle: StructureHandle) -> Result<()> {
        if self.structures.remove(handle).is_none() {
            engine_bail!(SOURCE, "Structure {:?} disposed twice or never created", handle);
        }
        self.stats.structures_disposed += 1;
        engine_debug!(SOURCE, "Disposed structure {:?}", handle);
        Ok(())
    }

    fn instance_count(&self, handle: StructureHandle) -> Result<usize> {
        match self.structures.get(handle) {
            Some(structure) => Ok(structure.instances.len()),
            None => engine_bail!(SOURCE, "Unknown or disposed structure {:?}", handle),
        }
    }
}

#[cfg(test)]
#[path = "software_backend_tests.rs"]
mod tests;
