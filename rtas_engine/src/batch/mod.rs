//! Batch module - what gets submitted to the acceleration structure.
//!
//! An InstanceBatch pairs a fixed placement set with one rendering
//! descriptor. The CullingPolicy is the static inclusion configuration
//! applied to the structure every frame.

mod descriptor;
mod instance_batch;
mod culling;

pub use descriptor::{
    MeshId, MaterialId, RenderDescriptor, MeshInstanceConfig,
    ProceduralInstanceConfig, LightProbeUsage, MaterialProperties, PropertyValue,
};
pub use instance_batch::{InstanceBatch, InstancingMode};
pub use culling::{
    CullingPolicy, MaterialClass, SubMeshFlags, SubMeshFlagsConfig,
    ShadowCastingMode, ShadowCastingModes, LAYER_MASK_ALL, INSTANCE_MASK_ALL,
};
