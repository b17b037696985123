/*!
# RTAS Engine

Manual ray tracing acceleration structure (RTAS) pipeline.

Every frame, one acceleration structure is cleared, given a culling policy,
populated with batches of instances, rebuilt around the camera, and bound to
that camera for ray traced rendering. The ray tracing API sits behind the
`RayTracingBackend` trait; a CPU `SoftwareBackend` is provided.

## Architecture

- **Placement**: procedural lattice of instance transforms and their AABBs
- **InstanceBatch**: one placement set paired with one render descriptor
- **CullingPolicy**: static inclusion configuration applied every frame
- **AccelerationStructureSession**: per-frame state machine over one structure
- **FrameDriver**: activation, per-frame advance, FPS readout, teardown

Everything public is reachable through the `rtas` namespace module.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod placement;
pub mod batch;
pub mod backend;
pub mod camera;
pub mod session;
pub mod frame;

// Main rtas namespace module
pub mod rtas {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Instance layout
    pub mod placement {
        pub use crate::placement::*;
    }

    // Batches, descriptors and culling
    pub mod batch {
        pub use crate::batch::*;
    }

    // Ray tracing backends
    pub mod backend {
        pub use crate::backend::{
            RayTracingBackend, StructureHandle, SoftwareBackend, MeshInfo,
            MaterialInfo, BuiltStructure, SoftwareBackendStats,
        };
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    // Per-frame state machine
    pub mod session {
        pub use crate::session::*;
    }

    // Frame driver and UI collaborators
    pub mod frame {
        pub use crate::frame::*;
    }
}

// Re-export math library at crate root
pub use glam;
