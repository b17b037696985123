/// Tests for InstanceBatch and InstancingMode

use glam::Vec3;
use super::*;
use crate::batch::{LightProbeUsage, MeshId, PropertyValue, SubMeshFlags};
use crate::placement::{generate_placements, generate_placements_with, LatticeConfig, DEFAULT_HALF_EXTENT};

fn small_lattice(origin: Vec3) -> Vec<Placement> {
    generate_placements_with(
        origin,
        &LatticeConfig { rings: 2, layers: 2, slots: 4, ..LatticeConfig::default() },
    )
}

// ============================================================================
// InstancingMode
// ============================================================================

#[test]
fn test_instancing_mode_from_toggle() {
    assert_eq!(InstancingMode::from_toggle(None), InstancingMode::Batched);
    assert_eq!(InstancingMode::from_toggle(Some(true)), InstancingMode::Batched);
    assert_eq!(InstancingMode::from_toggle(Some(false)), InstancingMode::PerInstance);
    assert_eq!(InstancingMode::default(), InstancingMode::Batched);
}

// ============================================================================
// Mesh batches
// ============================================================================

#[test]
fn test_mesh_batch_holds_placements() {
    let config = MeshInstanceConfig::new(MeshId(1), 0, MaterialId(2));
    let batch = InstanceBatch::mesh("left", Some(config), generate_placements(Vec3::ZERO));

    assert_eq!(batch.name(), "left");
    assert_eq!(batch.len(), 32768);
    assert!(matches!(batch.descriptor(), Some(RenderDescriptor::Mesh(_))));
}

#[test]
fn test_mesh_instance_config_defaults() {
    let config = MeshInstanceConfig::new(MeshId(0), 0, MaterialId(0));

    assert_eq!(config.sub_mesh_flags, SubMeshFlags::ENABLED | SubMeshFlags::CLOSEST_HIT_ONLY);
    assert_eq!(config.light_probe_usage, LightProbeUsage::CustomProvided);
}

#[test]
fn test_mesh_batch_without_descriptor() {
    let batch = InstanceBatch::mesh("unset", None, small_lattice(Vec3::ZERO));
    assert!(batch.descriptor().is_none());
    assert_eq!(batch.len(), 16);
}

#[test]
fn test_mesh_batch_regenerate_replaces_everything() {
    let config = MeshInstanceConfig::new(MeshId(1), 0, MaterialId(2));
    let mut batch = InstanceBatch::mesh("left", Some(config), small_lattice(Vec3::ZERO));

    let replacement = small_lattice(Vec3::new(10.0, 0.0, 0.0));
    batch.regenerate(replacement.clone());

    assert_eq!(batch.placements(), replacement.as_slice());
}

// ============================================================================
// Procedural batches
// ============================================================================

#[test]
fn test_procedural_batch_is_single_instance() {
    let placements = small_lattice(Vec3::ZERO);
    let batch = InstanceBatch::procedural(
        "boxes",
        Some(MaterialId(4)),
        MaterialProperties::new(),
        &placements,
        DEFAULT_HALF_EXTENT,
    );

    assert_eq!(batch.len(), 1);
    assert_eq!(batch.placements()[0].position(), Vec3::ZERO);

    match batch.descriptor() {
        Some(RenderDescriptor::Procedural(config)) => {
            assert_eq!(config.aabbs.len(), placements.len());
            assert_eq!(config.material, MaterialId(4));
        }
        other => panic!("unexpected descriptor: {:?}", other),
    }
}

#[test]
fn test_procedural_batch_keeps_properties() {
    let mut properties = MaterialProperties::new();
    properties.set_float("_Radius", 0.3);

    let batch = InstanceBatch::procedural(
        "boxes", Some(MaterialId(1)), properties, &small_lattice(Vec3::ZERO), 0.3,
    );

    match batch.descriptor() {
        Some(RenderDescriptor::Procedural(config)) => {
            assert_eq!(config.properties.get("_Radius"), Some(PropertyValue::Float(0.3)));
        }
        other => panic!("unexpected descriptor: {:?}", other),
    }
}

#[test]
fn test_procedural_batch_without_material() {
    let batch = InstanceBatch::procedural(
        "boxes", None, MaterialProperties::new(), &small_lattice(Vec3::ZERO), 0.3,
    );
    assert!(batch.descriptor().is_none());
}

#[test]
fn test_procedural_regenerate_rebuilds_boxes() {
    let mut batch = InstanceBatch::procedural(
        "boxes", Some(MaterialId(1)), MaterialProperties::new(), &small_lattice(Vec3::ZERO), 0.3,
    );

    let moved = small_lattice(Vec3::new(0.0, 100.0, 0.0));
    batch.regenerate(moved.clone());

    assert_eq!(batch.len(), 1);
    match batch.descriptor() {
        Some(RenderDescriptor::Procedural(config)) => {
            assert_eq!(config.aabbs.len(), moved.len());
            assert!(config.aabbs.aabbs()[0].min.y >= 99.0);
        }
        other => panic!("unexpected descriptor: {:?}", other),
    }
}

#[test]
fn test_descriptor_material_and_label() {
    let descriptor = RenderDescriptor::Mesh(MeshInstanceConfig::new(MeshId(3), 1, MaterialId(9)));
    assert_eq!(descriptor.material(), MaterialId(9));
    assert_eq!(descriptor.label(), "mesh 3 submesh 1 material 9");
}
