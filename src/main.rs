//! Headless fly-through: builds the scene, then dollies the orbit camera from
//! the city into the hills and back out, logging the blend as it goes.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Scene config JSON (default: built-in scene)
//!   --frames <N>      Frames to simulate (default: 600)
//!   --dt <SECONDS>    Fixed frame step (default: 1/60)

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use memories::core::camera::Camera;
use memories::core::camera_controller::OrbitCameraController;
use memories::core::time::FrameTimer;
use memories::core::{Result, logging};
use memories::scene::{Scene, SceneConfig};

/// Zoom steps applied per frame; the sign flips halfway through
const ZOOM_PER_FRAME: f32 = 0.3;
/// Azimuth drift per frame (radians)
const ORBIT_PER_FRAME: f32 = 0.004;
/// Log a snapshot every this many frames
const LOG_INTERVAL: u64 = 30;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_path_arg(&args, "--config");
    let frames = parse_u64_arg(&args, "--frames").unwrap_or(600);
    let dt = parse_f32_arg(&args, "--dt").unwrap_or(1.0 / 60.0);

    match run(config_path, frames, dt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<PathBuf>, frames: u64, dt: f32) -> Result<()> {
    let config = match config_path {
        Some(path) => SceneConfig::load(&path)?,
        None => SceneConfig::default(),
    };

    let mut camera = Camera::look_at(config.camera.position, config.orbit.target, config.camera.fov_degrees);
    let mut controller = OrbitCameraController::new(config.orbit.clone(), &camera);
    let mut scene = Scene::new(config)?;
    let mut timer = FrameTimer::new();
    let step = Duration::from_secs_f32(dt.max(0.0));

    log::info!("Flying through {} frames at dt={:.4}s", frames, dt);

    for frame in 0..frames {
        timer.tick_fixed(step);

        let zoom = if frame < frames / 2 { ZOOM_PER_FRAME } else { -ZOOM_PER_FRAME };
        controller.zoom(zoom);
        controller.rotate(ORBIT_PER_FRAME, 0.0);
        controller.update(&mut camera);

        let snapshot = scene.update(camera.position, timer.elapsed_secs());

        if frame % LOG_INTERVAL == 0 {
            let stats = scene.draw_stats();
            log::info!(
                "frame {:4}: distance {:5.1} t {:.3} | hills {:6} lines {:3} | city {:4} spread {:5.1} | dust {:3} | floor {:.2} | bg {}",
                frame,
                snapshot.distance,
                snapshot.t,
                stats.hill_instances,
                stats.contour_loops,
                stats.city_instances,
                snapshot.city_spread,
                stats.dust_instances,
                snapshot.floor_opacity,
                snapshot.background.to_hex_string(),
            );
        }
    }

    log::info!(
        "Done: {} frames, {:.1}s simulated, final camera distance {:.1}",
        timer.frame_count(),
        timer.elapsed_secs(),
        camera.distance_from_origin()
    );
    Ok(())
}

fn parse_path_arg(args: &[String], flag: &str) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}
