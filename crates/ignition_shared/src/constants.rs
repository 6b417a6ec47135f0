//! # Scene Constants
//!
//! Values baked into the scene. Everything a user might want to tune lives in
//! [`crate::config`] instead; these are the fixed facts of the assets.

// =============================================================================
// ANIMATION
// =============================================================================

/// Frames-per-second the scene was authored at.
///
/// Starfield scroll and rocket spin are scaled by `fps / BASELINE_FPS`, so at
/// the default setting both run at their authored speed.
pub const BASELINE_FPS: f32 = 9.0;

/// Horizontal tiles in the flame sprite strip.
pub const SPRITE_TILES: u32 = 4;

// =============================================================================
// MODEL
// =============================================================================

/// Names of the rocket sub-meshes, in attachment order.
pub const ROCKET_PART_NAMES: [&str; 5] = ["body", "wings", "bottom", "window_glass", "window_frame"];

// =============================================================================
// PALETTE
// =============================================================================

/// Hull white.
pub const HULL_WHITE: u32 = 0x00ff_ffff;

/// Fin and trim red.
pub const TRIM_RED: u32 = 0x00ce_4221;

/// Window glass, also the clear colour.
pub const GLASS_VIOLET: u32 = 0x0031_2f4c;

/// Ambient and area light tint.
pub const DUSK_VIOLET: u32 = 0x005b_4269;

/// Engine glow.
pub const FLAME_ORANGE: u32 = 0x00f2_9b05;
