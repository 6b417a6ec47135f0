//! Shared fixtures for the frame loop tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ignition::core::{ScriptedClock, ViewportUpdate};
use ignition::shared::IgnitionConfig;
use ignition::{
    CanvasSize, EventBus, EventSender, FrameLoop, FrameRenderer, LoadedModel, MeshId, ModelNode,
    RenderView, RocketPart, StartupResult, StaticCanvas,
};

/// What the renderer saw on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub frame: u64,
    pub rocket_parts: usize,
    pub painted_parts: usize,
    pub rocket_scale: f32,
    pub rotation_y: f32,
    pub sprite_steps: u32,
    pub flame_offset_x: f32,
    pub starfield_offset_y: f32,
    pub camera_aspect: f32,
}

#[derive(Debug, Default)]
pub struct RenderLog {
    pub frames: Vec<Snapshot>,
    pub resizes: Vec<ViewportUpdate>,
}

/// Renderer that records every call into a shared log.
pub struct Recorder {
    pub log: Rc<RefCell<RenderLog>>,
    pub fail_on_frame: Option<u64>,
}

impl FrameRenderer for Recorder {
    fn resize(&mut self, update: &ViewportUpdate) {
        self.log.borrow_mut().resizes.push(*update);
    }

    fn render(&mut self, view: &RenderView<'_>) -> Result<(), String> {
        if self.fail_on_frame == Some(view.frame) {
            return Err("device lost".to_string());
        }
        let rocket = &view.scene.rocket;
        self.log.borrow_mut().frames.push(Snapshot {
            frame: view.frame,
            rocket_parts: rocket.parts().len(),
            painted_parts: rocket.parts().iter().filter(|p| p.material.is_some()).count(),
            rocket_scale: rocket.scale,
            rotation_y: rocket.rotation_y,
            sprite_steps: view.advance.sprite_steps,
            flame_offset_x: view.scene.flame.window.offset.x,
            starfield_offset_y: view.scene.starfield.window.offset.y,
            camera_aspect: view.scene.camera.aspect,
        });
        Ok(())
    }
}

pub struct Harness {
    pub frame_loop: FrameLoop<Recorder>,
    pub events: EventSender,
    pub log: Rc<RefCell<RenderLog>>,
}

pub fn canvas(selector: &str) -> StaticCanvas {
    StaticCanvas {
        selector: selector.to_string(),
        size: CanvasSize {
            width: 1280,
            height: 720,
            device_pixel_ratio: 1.0,
        },
    }
}

pub fn try_start(
    config: IgnitionConfig,
    canvas: &StaticCanvas,
    deltas: &[f32],
    fail_on_frame: Option<u64>,
) -> (StartupResult<FrameLoop<Recorder>>, EventSender, Rc<RefCell<RenderLog>>) {
    let bus = EventBus::default();
    let log = Rc::new(RefCell::new(RenderLog::default()));
    let recorder = Recorder {
        log: Rc::clone(&log),
        fail_on_frame,
    };
    let result = FrameLoop::start(
        config,
        canvas,
        recorder,
        Box::new(ScriptedClock::new(deltas.iter().copied())),
        bus.receiver(),
    );
    (result, bus.sender(), log)
}

pub fn start(deltas: &[f32]) -> Harness {
    start_failing(deltas, None)
}

pub fn start_failing(deltas: &[f32], fail_on_frame: Option<u64>) -> Harness {
    let (result, events, log) = try_start(
        IgnitionConfig::default(),
        &canvas("canvas#webgl"),
        deltas,
        fail_on_frame,
    );
    Harness {
        frame_loop: result.expect("default startup succeeds"),
        events,
        log,
    }
}

pub fn model_with(parts: &[RocketPart]) -> LoadedModel<MeshId> {
    let mut nodes = vec![ModelNode::new("Camera", None)];
    nodes.extend(
        parts
            .iter()
            .enumerate()
            .map(|(i, part)| ModelNode::new(part.node_name(), Some(MeshId(i)))),
    );
    LoadedModel::new(nodes)
}

pub fn full_model() -> LoadedModel<MeshId> {
    model_with(&RocketPart::ALL)
}
