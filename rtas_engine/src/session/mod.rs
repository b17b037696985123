//! Session module - per-frame ownership of one acceleration structure.
//!
//! The session drives a backend structure through a fixed sequence every
//! frame (clear, cull, populate, build, publish) and releases it exactly
//! once when the session ends.

mod acceleration_structure_session;

pub use acceleration_structure_session::{
    AccelerationStructureSession, SessionState, PopulateReport, FrameReport,
};
