//! Placement module - procedural instance layout.
//!
//! Produces the instance transforms consumed by instance batches, and the
//! per-placement bounding volumes used by the procedural (AABB) variant.
//! Everything here is pure computation, run once at activation.

mod placement;
mod generator;
mod bounds;

pub use placement::Placement;
pub use generator::{
    LatticeConfig, generate_placements, generate_placements_with,
    lattice_position,
};
pub use bounds::{
    Aabb, AabbBuffer, DEFAULT_HALF_EXTENT,
    build_bounding_volumes, build_bounding_volumes_with,
};
