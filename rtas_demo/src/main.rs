/// RTAS demo - headless frame loop over the software backend
///
/// Activates the three default lattices in each geometry variant and
/// instancing mode, runs a few frames with an orbiting camera, and prints
/// what the backend was asked to trace.
///
/// Usage: rtas_demo [frames]

use std::sync::{Arc, Mutex};
use std::time::Instant;
use colored::*;
use glam::Vec3;
use rtas_engine::rtas::{Engine, Error, Result};
use rtas_engine::rtas::log::{DefaultLogger, LogSeverity};
use rtas_engine::rtas::backend::{MaterialInfo, MeshInfo, SoftwareBackend};
use rtas_engine::rtas::batch::{MaterialClass, MaterialProperties};
use rtas_engine::rtas::camera::Camera;
use rtas_engine::rtas::frame::{
    ActivationConfig, DescriptorSource, FrameDriver, FrameOutcome, GeometryVariant,
    PipelineCapability, TextSink,
};
use rtas_engine::rtas::placement::Aabb;

const DEFAULT_FRAMES: u32 = 8;
const ORBIT_RADIUS: f32 = 20.0;

/// Prints each FPS update on its own line
struct ConsoleText {
    prefix: String,
}

impl TextSink for ConsoleText {
    fn set_text(&mut self, text: &str) {
        println!("  {} {}", self.prefix.dimmed(), text.bright_yellow());
    }
}

fn scene() -> (Arc<Mutex<SoftwareBackend>>, DescriptorSource) {
    let mut backend = SoftwareBackend::new();
    let mesh = backend.register_mesh(MeshInfo {
        submesh_count: 1,
        local_bounds: Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5)),
    });
    let materials = [MaterialClass::Opaque, MaterialClass::AlphaTested, MaterialClass::Opaque]
        .into_iter()
        .map(|class| Some(backend.register_material(MaterialInfo::new(class))))
        .collect();

    let mut properties = MaterialProperties::new();
    properties.set_float("_Radius", 0.3);

    let source = DescriptorSource {
        mesh: Some(mesh),
        submesh_index: 0,
        materials,
        properties,
    };
    (Arc::new(Mutex::new(backend)), source)
}

fn run(variant: GeometryVariant, instancing: bool, frames: u32) -> Result<()> {
    println!(
        "{} {:?} variant, instancing {}",
        "==>".bright_green().bold(),
        variant,
        if instancing { "on" } else { "off" }
    );

    let (backend, source) = scene();
    let config = ActivationConfig { variant, ..ActivationConfig::default() };
    let mut driver = FrameDriver::activate(backend.clone(), config, source)
        .with_fps_text(ConsoleText { prefix: format!("{:?}", variant) })
        .with_instancing_toggle(instancing);
    let mut camera = Camera::default();
    let started = Instant::now();

    for frame in 0..frames {
        let angle = frame as f32 / frames as f32 * std::f32::consts::TAU;
        camera.set_position(Vec3::new(angle.cos() * ORBIT_RADIUS, 5.0, angle.sin() * ORBIT_RADIUS));

        let realtime = started.elapsed().as_secs_f32();
        match driver.advance_frame(PipelineCapability::HardwareRayTracing, realtime, &mut camera) {
            FrameOutcome::Traced(report) => {
                let backend = backend
                    .lock()
                    .map_err(|_| Error::BackendError("Software backend lock poisoned".to_string()))?;
                if let Some(built) = backend.built(report.handle) {
                    println!(
                        "  frame {:>3}: {} submitted, {} traced, {} culled",
                        frame,
                        report.populate.submitted_instances,
                        built.instance_count,
                        built.culled_count
                    );
                }
            }
            FrameOutcome::Skipped => println!("  frame {:>3}: skipped", frame),
            FrameOutcome::Failed(error) => return Err(error),
        }
    }

    driver.teardown();
    println!(
        "  {} frames in {:.2}s",
        frames,
        started.elapsed().as_secs_f32()
    );
    Ok(())
}

fn main() {
    Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Info));

    let frames = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    for variant in [GeometryVariant::Mesh, GeometryVariant::Procedural] {
        for instancing in [true, false] {
            if let Err(error) = run(variant, instancing, frames) {
                eprintln!("{} {}", "error:".bright_red().bold(), error);
                std::process::exit(1);
            }
        }
    }
}
