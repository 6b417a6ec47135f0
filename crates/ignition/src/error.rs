//! # Error Types
//!
//! Everything that can stop the scene from starting or a frame from
//! completing. Configuration errors live in `ignition_shared`.

use std::path::PathBuf;

use thiserror::Error;

pub use ignition_shared::{ConfigError, ConfigResult};

/// Fatal errors before the first frame.
#[derive(Error, Debug)]
pub enum StartupError {
    /// No drawing surface matches the selector.
    #[error(
        "no element matches `{selector}`: you need a canvas element with the id \"webgl\" in your html document"
    )]
    MissingMountPoint {
        /// The selector that was looked up.
        selector: String,
    },

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors while attaching the rocket model to the scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A named part was not among the model's top-level nodes.
    #[error("rocket model has no mesh named `{name}`")]
    MissingMesh {
        /// Node name that was looked for.
        name: &'static str,
    },
}

/// Errors that halt the frame loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The renderer failed to draw a frame.
    #[error("render failed on frame {frame}: {reason}")]
    Render {
        /// Frame number that failed.
        frame: u64,
        /// Renderer's description.
        reason: String,
    },

    /// The camera controls failed to update.
    #[error("camera controls failed on frame {frame}: {reason}")]
    Controls {
        /// Frame number that failed.
        frame: u64,
        /// Controller's description.
        reason: String,
    },
}

/// Errors reading the model file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file is not a readable glTF document.
    #[error("failed to read model {path}: {source}")]
    Gltf {
        /// Model path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: gltf::Error,
    },

    /// The document has no scene to take nodes from.
    #[error("model {path} has no scene")]
    NoScene {
        /// Model path.
        path: PathBuf,
    },
}

/// Result type for startup.
pub type StartupResult<T> = Result<T, StartupError>;

/// Result type for scene assembly.
pub type SceneResult<T> = Result<T, SceneError>;

/// Result type for a frame.
pub type FrameResult<T> = Result<T, FrameError>;

/// Result type for model loading.
pub type LoadResult<T> = Result<T, LoadError>;
