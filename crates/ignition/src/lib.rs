//! # IGNITION
//!
//! The rocket scene, integrating the animation core, the parameter panel
//! and a renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            IGNITION                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐            │
//! │  │ Model loader │   │ Param panel  │   │ Window       │            │
//! │  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘            │
//! │         └──────────────────┼──────────────────┘                    │
//! │                            v  SceneEvent                           │
//! │                    ┌───────────────┐                               │
//! │                    │  Frame loop   │── AnimationContext (core)     │
//! │                    │               │── OrbitControls (core)        │
//! │                    └───────┬───────┘                               │
//! │                            v  RenderView                           │
//! │                    ┌───────────────┐                               │
//! │                    │   Renderer    │  Bevy client / headless log   │
//! │                    └───────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `error`: Startup, scene, frame and load errors
//! - `events`: Scene event bus
//! - `frame_loop`: Frame orchestration
//! - `loader`: Model reading for the headless runner
//! - `scene`: Scene assembly
//! - `stats`: Frame timing

pub mod error;
pub mod events;
pub mod frame_loop;
pub mod loader;
pub mod scene;
pub mod stats;

// Re-export the layers
pub use ignition_core as core;
pub use ignition_shared as shared;
pub use ignition_ui as ui;

// Re-export commonly used types
pub use error::{
    FrameError, FrameResult, LoadError, LoadResult, SceneError, SceneResult, StartupError,
    StartupResult,
};
pub use events::{EventBus, EventReceiver, EventSender, SceneEvent};
pub use frame_loop::{
    CameraController, CanvasLookup, CanvasSize, FrameLoop, FrameRenderer, RenderView,
    StaticCanvas, StopHandle,
};
pub use scene::{
    AttachedPart, CameraSpec, FlameSprite, LightSpec, LoadedModel, MaterialSpec, MeshId,
    ModelNode, NodeTransform, RocketGroup, RocketMeshes, RocketPart, SceneGraph, StarfieldPlane,
};
pub use stats::{FrameStats, FrameStatsAccumulator};
