//! # IGNITION Frame Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. DISPATCH EVENTS                                                  │
//! │    ├─ Param edits     → AnimationContext                            │
//! │    ├─ Model loaded    → RocketGroup (attach, paint, place)          │
//! │    └─ Resized         → Viewport → camera aspect → renderer         │
//! │                                                                     │
//! │ 2. ADVANCE                                                          │
//! │    ├─ delta = clock.delta_seconds()                                 │
//! │    ├─ AnimationContext::advance(delta)                              │
//! │    └─ copy rotation and texture windows into the scene              │
//! │                                                                     │
//! │ 3. CONTROLS                                                         │
//! │    └─ damping integration → camera pose                             │
//! │                                                                     │
//! │ 4. RENDER                                                           │
//! │                                                                     │
//! │ 5. STATS                                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A controls or render failure ends the loop. Nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ignition_core::{
    AnimationContext, CameraPose, FrameAdvance, FrameClock, OrbitControls, Viewport,
    ViewportUpdate,
};
use ignition_shared::{IgnitionConfig, Vec3};
use ignition_ui::ParamListener;
use tracing::{debug, error, info, warn};

use crate::error::{FrameError, FrameResult, SceneError, StartupError, StartupResult};
use crate::events::{EventReceiver, SceneEvent};
use crate::scene::{MeshId, SceneGraph};
use crate::stats::{FrameStats, FrameStatsAccumulator};

// =============================================================================
// HOST SEAMS
// =============================================================================

/// Size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    /// Device pixel ratio.
    pub device_pixel_ratio: f32,
}

/// Finds the drawing surface at startup.
pub trait CanvasLookup {
    /// Size of the surface matching `selector`, or `None` if there is none.
    fn find_canvas(&self, selector: &str) -> Option<CanvasSize>;
}

/// A single surface known by selector. Used where there is no document.
#[derive(Debug, Clone)]
pub struct StaticCanvas {
    /// Selector the surface answers to.
    pub selector: String,
    /// Its size.
    pub size: CanvasSize,
}

impl CanvasLookup for StaticCanvas {
    fn find_canvas(&self, selector: &str) -> Option<CanvasSize> {
        (self.selector == selector).then_some(self.size)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug)]
pub struct RenderView<'a, M = MeshId> {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// The scene.
    pub scene: &'a SceneGraph<M>,
    /// Camera placement.
    pub camera: CameraPose,
    /// Current surface size.
    pub viewport: ViewportUpdate,
    /// What this frame's advance produced.
    pub advance: FrameAdvance,
}

/// Draws frames.
pub trait FrameRenderer<M = MeshId> {
    /// Applies a new surface size.
    fn resize(&mut self, update: &ViewportUpdate);

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure; the loop halts.
    fn render(&mut self, view: &RenderView<'_, M>) -> Result<(), String>;
}

/// Moves the camera once per frame.
pub trait CameraController {
    /// Integrates pending input.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure; the loop halts.
    fn update(&mut self) -> Result<CameraPose, String>;
}

impl CameraController for OrbitControls {
    fn update(&mut self) -> Result<CameraPose, String> {
        Ok(OrbitControls::update(self))
    }
}

/// Stops a running loop from another thread.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Asks the loop to stop after the current frame.
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// True until the loop is stopped or halts.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// =============================================================================
// FRAME LOOP
// =============================================================================

/// The frame loop orchestrator.
///
/// Owns the animation state, the scene and the camera. One per process.
pub struct FrameLoop<R, M = MeshId> {
    config: IgnitionConfig,
    animation: AnimationContext,
    scene: SceneGraph<M>,
    viewport: Viewport,
    controls: Box<dyn CameraController>,
    clock: Box<dyn FrameClock>,
    renderer: R,
    events: EventReceiver<M>,
    running: Arc<AtomicBool>,
    frame: u64,
    stats: FrameStatsAccumulator,
    scene_error: Option<SceneError>,
}

impl<R, M> FrameLoop<R, M>
where
    R: FrameRenderer<M>,
    M: Clone,
{
    /// Validates the configuration, finds the drawing surface and assembles
    /// the scene.
    ///
    /// # Errors
    ///
    /// [`StartupError::MissingMountPoint`] if no surface matches the
    /// configured selector; [`StartupError::Config`] if the configuration
    /// is invalid. No frame runs in either case.
    pub fn start(
        config: IgnitionConfig,
        lookup: &dyn CanvasLookup,
        mut renderer: R,
        clock: Box<dyn FrameClock>,
        events: EventReceiver<M>,
    ) -> StartupResult<Self> {
        config.validate()?;

        let selector = &config.viewport.canvas_selector;
        let canvas = lookup
            .find_canvas(selector)
            .ok_or_else(|| StartupError::MissingMountPoint {
                selector: selector.clone(),
            })?;

        let mut viewport = Viewport::new(&config.viewport);
        let update = viewport.resize(canvas.width, canvas.height, canvas.device_pixel_ratio);
        renderer.resize(&update);

        let mut scene = SceneGraph::assemble(&config);
        scene.camera.aspect = update.aspect;

        let controls = OrbitControls::new(
            Vec3::from_array(config.camera.position),
            Vec3::ZERO,
            config.controls.clone(),
        );

        info!(
            "Frame loop ready: {}x{} (pixel ratio {}), {} fps flame",
            update.width, update.height, update.pixel_ratio, config.flame.frames_per_second
        );

        Ok(Self {
            animation: AnimationContext::from_config(&config),
            scene,
            viewport,
            controls: Box::new(controls),
            clock,
            renderer,
            events,
            running: Arc::new(AtomicBool::new(true)),
            frame: 0,
            stats: FrameStatsAccumulator::new(),
            scene_error: None,
            config,
        })
    }

    /// Replaces the camera controller.
    #[must_use]
    pub fn with_controls(mut self, controls: Box<dyn CameraController>) -> Self {
        self.controls = controls;
        self
    }

    /// Runs one frame.
    ///
    /// # Errors
    ///
    /// [`FrameError::Controls`] or [`FrameError::Render`]; the frame is not
    /// counted.
    #[allow(clippy::cast_possible_truncation)]
    pub fn run_frame(&mut self) -> FrameResult<FrameStats> {
        let frame_start = Instant::now();
        let frame = self.frame + 1;

        let events_processed = self.dispatch_events();

        let delta = self.clock.delta_seconds();
        let animation_start = Instant::now();
        let advance = self.animation.advance(delta);
        self.scene.apply_animation(&self.animation);
        let animation_us = animation_start.elapsed().as_micros() as u64;

        let camera = self
            .controls
            .update()
            .map_err(|reason| FrameError::Controls { frame, reason })?;

        let render_start = Instant::now();
        let view = RenderView {
            frame,
            scene: &self.scene,
            camera,
            viewport: self.viewport.current(),
            advance,
        };
        self.renderer
            .render(&view)
            .map_err(|reason| FrameError::Render { frame, reason })?;
        let render_us = render_start.elapsed().as_micros() as u64;

        let stats = FrameStats {
            frame,
            total_us: frame_start.elapsed().as_micros() as u64,
            animation_us,
            render_us,
            events_processed,
            delta,
        };
        self.frame = frame;
        self.stats.record(stats);
        Ok(stats)
    }

    /// Runs frames until stopped or a frame fails.
    ///
    /// # Errors
    ///
    /// The first frame error. The loop is stopped when it returns.
    pub fn run(&mut self) -> FrameResult<()> {
        while self.is_running() {
            self.step()?;
        }
        info!("Frame loop stopped after {} frames", self.frame);
        Ok(())
    }

    /// Runs at most `count` frames. Returns how many ran.
    ///
    /// # Errors
    ///
    /// The first frame error. The loop is stopped when it returns.
    pub fn run_frames(&mut self, count: u64) -> FrameResult<u64> {
        let mut ran = 0;
        while ran < count && self.is_running() {
            self.step()?;
            ran += 1;
        }
        Ok(ran)
    }

    fn step(&mut self) -> FrameResult<FrameStats> {
        self.run_frame().map_err(|err| {
            self.running.store(false, Ordering::Release);
            error!("Frame loop halted: {}", err);
            err
        })
    }

    fn dispatch_events(&mut self) -> u32 {
        let mut processed = 0;
        for event in self.events.drain() {
            processed += 1;
            match event {
                SceneEvent::Param(param) => self.animation.on_param_change(&param),
                SceneEvent::ModelLoaded(model) => {
                    if let Err(err) = self.scene.rocket.attach_model(&model, &self.config.rocket) {
                        warn!("Rocket model incomplete: {}", err);
                        self.scene_error = Some(err);
                    }
                }
                SceneEvent::ModelFailed { reason } => {
                    warn!("Rocket model failed to load: {}", reason);
                }
                SceneEvent::Resized {
                    width,
                    height,
                    device_pixel_ratio,
                } => {
                    let update = self.viewport.resize(width, height, device_pixel_ratio);
                    self.scene.camera.aspect = update.aspect;
                    self.renderer.resize(&update);
                    debug!(
                        "Resized to {}x{} (aspect {:.3}, pixel ratio {})",
                        update.width, update.height, update.aspect, update.pixel_ratio
                    );
                }
            }
        }
        processed
    }

    /// Handle that stops the loop from elsewhere.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    /// True until stopped or halted.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Frames completed.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Animation state.
    #[must_use]
    pub fn animation(&self) -> &AnimationContext {
        &self.animation
    }

    /// The scene as last rendered.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph<M> {
        &self.scene
    }

    /// Surface size tracking.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// Last error from attaching the rocket model, if any.
    #[must_use]
    pub fn scene_error(&self) -> Option<&SceneError> {
        self.scene_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use ignition_core::FixedStepClock;

    #[derive(Default)]
    struct CountingRenderer {
        renders: u64,
        resizes: u64,
    }

    impl FrameRenderer for CountingRenderer {
        fn resize(&mut self, _update: &ViewportUpdate) {
            self.resizes += 1;
        }

        fn render(&mut self, _view: &RenderView<'_>) -> Result<(), String> {
            self.renders += 1;
            Ok(())
        }
    }

    fn canvas() -> StaticCanvas {
        StaticCanvas {
            selector: "canvas#webgl".into(),
            size: CanvasSize {
                width: 1280,
                height: 720,
                device_pixel_ratio: 1.0,
            },
        }
    }

    fn start() -> FrameLoop<CountingRenderer> {
        let bus = EventBus::default();
        FrameLoop::start(
            IgnitionConfig::default(),
            &canvas(),
            CountingRenderer::default(),
            Box::new(FixedStepClock::new(0.1)),
            bus.receiver(),
        )
        .unwrap()
    }

    #[test]
    fn test_start_sizes_renderer_once() {
        let frame_loop = start();
        assert_eq!(frame_loop.renderer().resizes, 1);
        assert_eq!(frame_loop.renderer().renders, 0);
        assert!((frame_loop.scene().camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_frames_counts() {
        let mut frame_loop = start();
        assert_eq!(frame_loop.run_frames(3).unwrap(), 3);
        assert_eq!(frame_loop.frame_count(), 3);
        assert_eq!(frame_loop.renderer().renders, 3);
        assert_eq!(frame_loop.stats().frames_recorded, 3);
    }

    #[test]
    fn test_stop_handle_ends_run() {
        let mut frame_loop = start();
        let handle = frame_loop.stop_handle();
        handle.stop();

        frame_loop.run().unwrap();
        assert_eq!(frame_loop.frame_count(), 0);
        assert!(!handle.is_running());
    }

    #[test]
    fn test_static_canvas_matches_exact_selector() {
        assert!(canvas().find_canvas("canvas#webgl").is_some());
        assert!(canvas().find_canvas("#webgl").is_none());
    }
}
