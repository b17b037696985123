//! Camera module - the ray tracing binding point.
//!
//! The engine does NOT store or manage cameras - they are owned and moved
//! by the caller. The session only writes the built structure into them.

mod camera;

pub use camera::Camera;
