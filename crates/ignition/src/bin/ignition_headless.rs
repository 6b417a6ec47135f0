//! # IGNITION Headless
//!
//! Drives the full frame loop with no window and no GPU: loads the rocket
//! model on a worker thread, steps the animation at a fixed 60 Hz and logs
//! what a renderer would draw.
//!
//! ```bash
//! # Defaults: ./ignition.toml if present, 600 frames
//! ./ignition_headless
//!
//! # Explicit config and frame count, with per-frame logging
//! RUST_LOG=debug ./ignition_headless ignition.toml 120
//! ```

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use ignition::core::{FixedStepClock, ViewportUpdate};
use ignition::loader::spawn_model_loader;
use ignition::shared::IgnitionConfig;
use ignition::ui::ParamPanel;
use ignition::{CanvasSize, EventBus, FrameLoop, FrameRenderer, RenderView, StaticCanvas};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Config file read when no path is given.
const DEFAULT_CONFIG: &str = "ignition.toml";

/// Frames run when no count is given: ten seconds at 60 Hz.
const DEFAULT_FRAMES: u64 = 600;

/// Simulated frame rate.
const TICK_HZ: u32 = 60;

/// Directory asset paths are relative to, under the asset root.
const ASSET_DIR: &str = "assets";

/// Same lookup the Bevy client uses: `BEVY_ASSET_ROOT`, then the package
/// directory under `cargo run`, then the working directory.
fn asset_root() -> PathBuf {
    env::var_os("BEVY_ASSET_ROOT")
        .or_else(|| env::var_os("CARGO_MANIFEST_DIR"))
        .map_or_else(PathBuf::new, PathBuf::from)
        .join(ASSET_DIR)
}

/// Renderer that logs instead of drawing.
struct LogRenderer {
    every: u64,
}

impl FrameRenderer for LogRenderer {
    fn resize(&mut self, update: &ViewportUpdate) {
        info!(
            "Surface {}x{} -> buffer {}x{}",
            update.width, update.height, update.physical_width, update.physical_height
        );
    }

    fn render(&mut self, view: &RenderView<'_>) -> Result<(), String> {
        if view.frame % self.every != 0 {
            return Ok(());
        }
        debug!(
            "frame {:>5} | rocket {} parts, rot {:.3} | flame x {:.2} | stars y {:.3} | eye ({:.2}, {:.2}, {:.2})",
            view.frame,
            view.scene.rocket.parts().len(),
            view.advance.rotation_y,
            view.scene.flame.window.offset.x,
            view.scene.starfield.window.offset.y,
            view.camera.position.x,
            view.camera.position.y,
            view.camera.position.z,
        );
        Ok(())
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_owned());
    let frames = match args.next() {
        Some(count) => count.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    let config = IgnitionConfig::load_or_default(&config_path)?;

    let bus = EventBus::default();
    let model_path = asset_root().join(&config.assets.model);
    let loader = spawn_model_loader(model_path, bus.sender())?;

    let canvas = StaticCanvas {
        selector: config.viewport.canvas_selector.clone(),
        size: CanvasSize {
            width: config.viewport.width,
            height: config.viewport.height,
            device_pixel_ratio: 1.0,
        },
    };
    let mut panel = ParamPanel::new(&config.flame);

    let mut frame_loop = FrameLoop::start(
        config,
        &canvas,
        LogRenderer {
            every: u64::from(TICK_HZ),
        },
        Box::new(FixedStepClock::from_hz(TICK_HZ)),
        bus.receiver(),
    )?;

    let ran = frame_loop.run_frames(frames)?;

    if loader.join().is_err() {
        warn!("Model loader thread panicked");
    }
    if let Some(err) = frame_loop.scene_error() {
        warn!("Scene incomplete: {}", err);
    }

    panel.sync(frame_loop.animation());
    for control in panel.controls() {
        info!("{} = {}", control.label(), control.value());
    }
    info!(
        "Ran {} frames, rocket parts attached: {}",
        ran,
        frame_loop.scene().rocket.parts().len()
    );
    frame_loop.stats().log_summary();
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("IGNITION headless v{}", env!("CARGO_PKG_VERSION"));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
