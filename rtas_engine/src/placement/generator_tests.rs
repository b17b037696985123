/// Tests for the placement generator
///
/// These tests validate lattice size, ordering, the closed-form position
/// formula, determinism, and the identity rotation / unit scale contract.

use std::f32::consts::PI;
use glam::{Mat4, Vec3};
use super::*;

fn expected_position(origin: Vec3, i: u32, j: u32, k: u32) -> Vec3 {
    let (fi, fj, fk) = (i as f32, j as f32, k as f32);
    let angle = fj * (fk * 0.004f32).powf(2.0) + 2.0 * PI * fi / 31.0;
    let radius = 5.0 + fk * (1.0 + (fj * 0.02f32).powf(1.6));
    Vec3::new(radius * angle.cos(), fj, radius * angle.sin()) + origin
}

// ============================================================================
// Size and ordering
// ============================================================================

#[test]
fn test_default_lattice_size() {
    let placements = generate_placements(Vec3::ZERO);
    assert_eq!(placements.len(), 32 * 32 * 32);
    assert_eq!(LatticeConfig::default().placement_count(), 32768);
}

#[test]
fn test_index_of_matches_loop_order() {
    let config = LatticeConfig::default();
    assert_eq!(config.index_of(0, 0, 0), 0);
    assert_eq!(config.index_of(1, 0, 0), 1);
    assert_eq!(config.index_of(0, 1, 0), 32);
    assert_eq!(config.index_of(0, 0, 1), 1024);
    assert_eq!(config.index_of(31, 31, 31), 32767);
}

#[test]
fn test_custom_lattice_size() {
    let config = LatticeConfig { rings: 2, layers: 3, slots: 4, ..LatticeConfig::default() };
    let placements = generate_placements_with(Vec3::ZERO, &config);
    assert_eq!(placements.len(), 24);
}

// ============================================================================
// Closed-form positions
// ============================================================================

#[test]
fn test_positions_match_closed_form() {
    let origin = Vec3::new(-55.0, 0.0, -50.0);
    let config = LatticeConfig::default();
    let placements = generate_placements(origin);

    for &(i, j, k) in &[(0, 0, 0), (5, 0, 0), (0, 7, 0), (0, 0, 9), (13, 21, 17), (31, 31, 31)] {
        let placement = placements[config.index_of(i, j, k)];
        assert_eq!(placement.position(), expected_position(origin, i, j, k), "({}, {}, {})", i, j, k);
    }
}

#[test]
fn test_first_placement_is_on_base_radius() {
    let placements = generate_placements(Vec3::ZERO);
    assert_eq!(placements[0].position(), Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn test_layer_sets_height() {
    let origin = Vec3::new(0.0, 2.0, 50.0);
    let config = LatticeConfig::default();
    let placements = generate_placements(origin);

    for j in 0..32 {
        let y = placements[config.index_of(3, j, 4)].position().y;
        assert_eq!(y, 2.0 + j as f32);
    }
}

#[test]
fn test_last_slot_wraps_onto_first() {
    let placements = generate_placements(Vec3::ZERO);
    let config = LatticeConfig::default();

    let first = placements[config.index_of(0, 0, 0)].position();
    let last = placements[config.index_of(31, 0, 0)].position();
    assert!((first - last).length() < 1e-4);
}

// ============================================================================
// Determinism and transform shape
// ============================================================================

#[test]
fn test_generation_is_bit_identical() {
    let origin = Vec3::new(55.0, 0.0, -50.0);
    let a = generate_placements(origin);
    let b = generate_placements(origin);

    assert_eq!(a.len(), b.len());
    for (pa, pb) in a.iter().zip(b.iter()) {
        let ca = pa.transform().to_cols_array();
        let cb = pb.transform().to_cols_array();
        for (x, y) in ca.iter().zip(cb.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}

#[test]
fn test_transforms_are_translation_only() {
    let placements = generate_placements(Vec3::new(1.0, 2.0, 3.0));
    for placement in placements.iter().step_by(97) {
        let expected = Mat4::from_translation(placement.position());
        assert_eq!(*placement.transform(), expected);
    }
}

#[test]
fn test_as_transforms_preserves_order() {
    let placements = generate_placements_with(
        Vec3::ZERO,
        &LatticeConfig { rings: 1, layers: 2, slots: 3, ..LatticeConfig::default() },
    );
    let transforms = Placement::as_transforms(&placements);

    assert_eq!(transforms.len(), placements.len());
    for (transform, placement) in transforms.iter().zip(placements.iter()) {
        assert_eq!(transform, placement.transform());
    }
}
