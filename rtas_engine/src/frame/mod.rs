//! Frame module - the per-frame entry point.
//!
//! The FrameDriver owns the batches and the session, advances them once
//! per displayed frame when hardware ray tracing is available, and keeps
//! the FPS readout up to date regardless.

mod ui;
mod fps_counter;
mod frame_driver;

pub use ui::{TextSink, Toggle, TextLabel};
pub use fps_counter::{FpsCounter, FpsConfig};
pub use frame_driver::{
    FrameDriver, FrameOutcome, ActivationConfig, DescriptorSource,
    GeometryVariant, PipelineCapability,
};
