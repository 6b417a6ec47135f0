//! # IGNITION Core
//!
//! The per-frame animation state machine, separated from every renderer.
//!
//! ## Frame Step
//!
//! ```text
//! ┌──────────────┐   delta    ┌──────────────────────────────────────────┐
//! │  FrameClock  │──────────> │ AnimationContext::advance(delta)          │
//! └──────────────┘            │  ├─ FlameAnimation  → SpriteOffset.x      │
//!                             │  ├─ StarfieldScroll → offset.y            │
//!                             │  └─ RocketSpin      → rotation_y          │
//!                             └──────────────────┬───────────────────────┘
//!                                                │ FrameAdvance
//!                                                v
//!                              OrbitControls::update → Renderer (host)
//! ```
//!
//! ## Rules
//!
//! 1. **Rate x elapsed time** - visual speed never depends on frame rate
//! 2. **No engine types** - hosts convert at the edge
//! 3. **No globals** - all state lives in an [`AnimationContext`]

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod context;
pub mod controls;
pub mod flame;
pub mod motion;
pub mod texture;
pub mod viewport;

pub use clock::{sanitize_delta, FixedStepClock, FrameClock, ScriptedClock, SystemClock};
pub use context::{AnimationContext, FrameAdvance};
pub use controls::{CameraPose, OrbitControls};
pub use flame::{FlameAnimation, SpriteOffset};
pub use motion::{RocketSpin, StarfieldScroll};
pub use texture::UvWindow;
pub use viewport::{Viewport, ViewportUpdate};
