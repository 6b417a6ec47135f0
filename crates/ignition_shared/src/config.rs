//! # Scene Configuration
//!
//! Loaded once at startup from an optional `ignition.toml`. Every field has a
//! default matching the authored scene, so an empty (or missing) file gives
//! the reference look.
//!
//! ```toml
//! [flame]
//! frames_per_second = 12
//!
//! [controls]
//! enable_damping = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BASELINE_FPS, SPRITE_TILES};

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`IgnitionConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but make no sense together.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Flame sprite settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlameConfig {
    /// Initial sprite frames per second.
    pub frames_per_second: u32,
    /// Lowest value the panel accepts.
    pub min_fps: u32,
    /// Highest value the panel accepts.
    pub max_fps: u32,
    /// Horizontal tiles in the sprite strip.
    pub tiles: u32,
    /// Vertical position of the sprite below the rocket.
    pub position_y: f32,
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 9,
            min_fps: 1,
            max_fps: 30,
            tiles: SPRITE_TILES,
            position_y: -1.0,
        }
    }
}

impl FlameConfig {
    /// Offset advanced per sprite frame (one tile).
    #[must_use]
    pub fn tile_step(&self) -> f32 {
        1.0 / self.tiles.max(1) as f32
    }
}

/// Rocket group settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    /// Spin speed in half-turns per second at the baseline fps.
    pub base_rotation_speed: f32,
    /// Frames-per-second at which spin and scroll run at authored speed.
    pub baseline_fps: f32,
    /// Uniform scale applied once the model is attached.
    pub scale: f32,
    /// Group position applied once the model is attached.
    pub position: [f32; 3],
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            base_rotation_speed: 1.0,
            baseline_fps: BASELINE_FPS,
            scale: 0.3,
            position: [0.0, 0.35, 0.0],
        }
    }
}

/// Starfield backdrop settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Uniform scale of the unit backdrop plane.
    pub scale: f32,
    /// Depth of the backdrop plane.
    pub z: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self { scale: 8.0, z: -3.0 }
    }
}

/// Perspective camera settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Initial camera position.
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 0.0, 3.0],
        }
    }
}

/// Output surface settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Initial logical width.
    pub width: u32,
    /// Initial logical height.
    pub height: u32,
    /// Cap applied to the device pixel ratio.
    pub max_pixel_ratio: f32,
    /// Selector of the canvas the browser build mounts into.
    pub canvas_selector: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            max_pixel_ratio: 2.0,
            canvas_selector: "canvas#webgl".to_owned(),
        }
    }
}

/// Orbit camera control settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Ease camera motion out over several frames.
    pub enable_damping: bool,
    /// Share of the pending motion applied per update when damping.
    pub damping_factor: f32,
    /// Rotation speed multiplier.
    pub rotate_speed: f32,
    /// Zoom speed multiplier.
    pub zoom_speed: f32,
    /// Closest the camera may get to its target.
    pub min_distance: f32,
    /// Farthest the camera may get from its target.
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}

/// Asset paths, relative to the asset root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// The rocket glTF binary.
    pub model: String,
    /// The 4-tile flame sprite strip.
    pub flame_strip: String,
    /// The starfield backdrop.
    pub stars: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model: "rocket.glb".to_owned(),
            flame_strip: "flame_strip.png".to_owned(),
            stars: "stars.png".to_owned(),
        }
    }
}

/// Complete scene configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnitionConfig {
    /// Flame sprite.
    pub flame: FlameConfig,
    /// Rocket group.
    pub rocket: RocketConfig,
    /// Starfield backdrop.
    pub starfield: StarfieldConfig,
    /// Perspective camera.
    pub camera: CameraConfig,
    /// Output surface.
    pub viewport: ViewportConfig,
    /// Orbit controls.
    pub controls: ControlsConfig,
    /// Asset paths.
    pub assets: AssetConfig,
}

impl IgnitionConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for values that fail [`Self::validate`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise
    /// whatever [`Self::from_toml_str`] returns.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads a config file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// A file that exists but is unreadable or invalid is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> ConfigResult<()> {
        let flame = &self.flame;
        if flame.min_fps == 0 || flame.min_fps > flame.max_fps {
            return Err(ConfigError::Invalid(format!(
                "fps range {}..={} must be non-empty and start above zero",
                flame.min_fps, flame.max_fps
            )));
        }
        if !(flame.min_fps..=flame.max_fps).contains(&flame.frames_per_second) {
            return Err(ConfigError::Invalid(format!(
                "frames_per_second {} outside {}..={}",
                flame.frames_per_second, flame.min_fps, flame.max_fps
            )));
        }
        if flame.tiles == 0 {
            return Err(ConfigError::Invalid("flame.tiles must be at least 1".to_owned()));
        }
        if self.rocket.baseline_fps <= 0.0 {
            return Err(ConfigError::Invalid("rocket.baseline_fps must be positive".to_owned()));
        }
        if self.rocket.scale <= 0.0 {
            return Err(ConfigError::Invalid("rocket.scale must be positive".to_owned()));
        }
        if self.viewport.max_pixel_ratio <= 0.0 {
            return Err(ConfigError::Invalid(
                "viewport.max_pixel_ratio must be positive".to_owned(),
            ));
        }
        let controls = &self.controls;
        if !(0.0..=1.0).contains(&controls.damping_factor) {
            return Err(ConfigError::Invalid(format!(
                "controls.damping_factor {} outside 0..=1",
                controls.damping_factor
            )));
        }
        if controls.min_distance <= 0.0 || controls.min_distance > controls.max_distance {
            return Err(ConfigError::Invalid(format!(
                "controls distance range {}..={} is empty",
                controls.min_distance, controls.max_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_authored_scene() {
        let config = IgnitionConfig::default();
        assert_eq!(config.flame.frames_per_second, 9);
        assert_eq!(config.flame.tile_step(), 0.25);
        assert_eq!(config.rocket.scale, 0.3);
        assert_eq!(config.viewport.max_pixel_ratio, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = IgnitionConfig::from_toml_str(
            r#"
            [flame]
            frames_per_second = 12

            [controls]
            enable_damping = false
            "#,
        )
        .unwrap();

        assert_eq!(config.flame.frames_per_second, 12);
        assert_eq!(config.flame.max_fps, 30);
        assert!(!config.controls.enable_damping);
        assert_eq!(config.assets.model, "rocket.glb");
    }

    #[test]
    fn test_fps_outside_range_is_rejected() {
        let err = IgnitionConfig::from_toml_str("[flame]\nframes_per_second = 31\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = IgnitionConfig::from_toml_str("[flame\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = IgnitionConfig::load_or_default("definitely/not/here/ignition.toml").unwrap();
        assert_eq!(config, IgnitionConfig::default());
    }
}
