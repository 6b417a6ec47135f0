//! # IGNITION Shared
//!
//! Common types used by the animation core, the parameter panel and both
//! binaries.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `bevy`
//! - `wgpu`
//! - Any GPU or window-related crate
//!
//! If you need engine types, put them in the `ignition` client binary.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod constants;
pub mod math;

pub use color::Rgb;
pub use config::{
    AssetConfig, CameraConfig, ConfigError, ConfigResult, ControlsConfig, FlameConfig,
    IgnitionConfig, RocketConfig, StarfieldConfig, ViewportConfig,
};
pub use constants::{BASELINE_FPS, ROCKET_PART_NAMES, SPRITE_TILES};
pub use math::{Vec2, Vec3};
