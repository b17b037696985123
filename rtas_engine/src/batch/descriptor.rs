/// Rendering descriptors - the geometry + material an instance is drawn with.
///
/// Two shapes exist: a mesh submesh with a material, or a buffer of
/// procedural AABBs with a material and custom shader properties.

use std::sync::Arc;
use glam::Vec4;
use rustc_hash::FxHashMap;
use crate::placement::AabbBuffer;
use super::culling::SubMeshFlags;

/// Backend-side mesh identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Backend-side material identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

/// How per-instance light probe data is supplied to the shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightProbeUsage {
    /// No light probe data
    Off,
    /// Interpolated from the scene probes
    #[default]
    BlendProbes,
    /// Supplied by the caller (none are supplied here)
    CustomProvided,
}

/// One mesh submesh drawn with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstanceConfig {
    pub mesh: MeshId,
    pub submesh_index: u32,
    pub material: MaterialId,
    pub sub_mesh_flags: SubMeshFlags,
    pub light_probe_usage: LightProbeUsage,
}

impl MeshInstanceConfig {
    /// Opaque, closest-hit-only instance with no spherical harmonics supplied.
    pub fn new(mesh: MeshId, submesh_index: u32, material: MaterialId) -> Self {
        Self {
            mesh,
            submesh_index,
            material,
            sub_mesh_flags: SubMeshFlags::ENABLED | SubMeshFlags::CLOSEST_HIT_ONLY,
            light_probe_usage: LightProbeUsage::CustomProvided,
        }
    }
}

/// Custom shader property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Vector(Vec4),
}

/// Named shader properties attached to procedural instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialProperties {
    values: FxHashMap<String, PropertyValue>,
}

impl MaterialProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), PropertyValue::Float(value));
    }

    pub fn set_vector(&mut self, name: &str, value: Vec4) {
        self.values.insert(name.to_string(), PropertyValue::Vector(value));
    }

    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Procedural geometry: a buffer of AABBs intersected by a custom shader.
#[derive(Debug, Clone, PartialEq)]
pub struct ProceduralInstanceConfig {
    pub aabbs: Arc<AabbBuffer>,
    pub material: MaterialId,
    pub properties: MaterialProperties,
    /// Whether the backend should expect the AABB buffer to change between builds
    pub dynamic_geometry: bool,
}

impl ProceduralInstanceConfig {
    pub fn new(aabbs: Arc<AabbBuffer>, material: MaterialId) -> Self {
        Self {
            aabbs,
            material,
            properties: MaterialProperties::new(),
            dynamic_geometry: false,
        }
    }
}

/// What an instance is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderDescriptor {
    Mesh(MeshInstanceConfig),
    Procedural(ProceduralInstanceConfig),
}

impl RenderDescriptor {
    /// Material shared by every instance using this descriptor.
    pub fn material(&self) -> MaterialId {
        match self {
            RenderDescriptor::Mesh(config) => config.material,
            RenderDescriptor::Procedural(config) => config.material,
        }
    }

    /// Short human-readable description for logs.
    pub fn label(&self) -> String {
        match self {
            RenderDescriptor::Mesh(config) => format!(
                "mesh {} submesh {} material {}",
                config.mesh.0, config.submesh_index, config.material.0
            ),
            RenderDescriptor::Procedural(config) => format!(
                "{} aabbs material {}",
                config.aabbs.len(), config.material.0
            ),
        }
    }
}
