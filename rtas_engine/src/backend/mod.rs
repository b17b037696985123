/// Backend module - ray tracing API abstraction and implementations

// Module declarations
pub mod ray_tracing_backend;
pub mod software_backend;

// Re-export the backend trait and handle
pub use ray_tracing_backend::*;

// Re-export the CPU reference backend
pub use software_backend::{
    SoftwareBackend, MeshInfo, MaterialInfo, BuiltStructure, SoftwareBackendStats,
};

// Mock backend for tests (no ray tracing API required)
#[cfg(test)]
pub mod mock_backend;
