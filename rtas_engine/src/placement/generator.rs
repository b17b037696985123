/// Procedural placement generator.
///
/// Lays instances out on a deformed cylindrical lattice: rings expand
/// outward (`k`), layers stack upward (`j`) and slots wrap around the axis
/// (`i`). Outer rings twist with height and upper layers flare outward.

use std::f32::consts::PI;
use glam::Vec3;
use super::placement::Placement;

/// Lattice parameters.
///
/// The default reproduces the reference layout (32×32×32 instances).
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeConfig {
    /// Number of radial rings (`k`)
    pub rings: u32,
    /// Number of vertical layers (`j`), one unit apart
    pub layers: u32,
    /// Number of angular slots per ring (`i`)
    pub slots: u32,
    /// Radius of the innermost ring
    pub base_radius: f32,
    /// Per-ring twist factor, squared and scaled by the layer index
    pub twist: f32,
    /// Per-layer flare factor
    pub flare: f32,
    /// Exponent applied to the flare term
    pub flare_exponent: f32,
    /// Divisor of the full turn between slots.
    ///
    /// One less than `slots` in the reference layout, so the last slot of a
    /// ring lands on the first one.
    pub angular_divisor: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            rings: 32,
            layers: 32,
            slots: 32,
            base_radius: 5.0,
            twist: 0.004,
            flare: 0.02,
            flare_exponent: 1.6,
            angular_divisor: 31.0,
        }
    }
}

impl LatticeConfig {
    /// Total number of placements this lattice produces.
    pub fn placement_count(&self) -> usize {
        self.rings as usize * self.layers as usize * self.slots as usize
    }

    /// Output index of the placement at (slot, layer, ring).
    pub fn index_of(&self, slot: u32, layer: u32, ring: u32) -> usize {
        (ring as usize * self.layers as usize + layer as usize) * self.slots as usize + slot as usize
    }
}

/// Lattice offset (relative to the origin) of slot `i`, layer `j`, ring `k`.
pub fn lattice_position(config: &LatticeConfig, i: u32, j: u32, k: u32) -> Vec3 {
    let (i, j, k) = (i as f32, j as f32, k as f32);

    let angle = j * (k * config.twist).powf(2.0) + 2.0 * PI * i / config.angular_divisor;
    let radius = config.base_radius + k * (1.0 + (j * config.flare).powf(config.flare_exponent));

    Vec3::new(radius * angle.cos(), j, radius * angle.sin())
}

/// Generate the default 32×32×32 lattice around `origin`.
pub fn generate_placements(origin: Vec3) -> Vec<Placement> {
    generate_placements_with(origin, &LatticeConfig::default())
}

/// Generate a lattice around `origin`.
///
/// Order: ring outermost, then layer, then slot. Deterministic.
pub fn generate_placements_with(origin: Vec3, config: &LatticeConfig) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(config.placement_count());

    for k in 0..config.rings {
        for j in 0..config.layers {
            for i in 0..config.slots {
                placements.push(Placement::at(lattice_position(config, i, j, k) + origin));
            }
        }
    }

    placements
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
