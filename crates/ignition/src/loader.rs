//! Rocket model loading without a GPU.
//!
//! Only the document is parsed: node names, mesh indices and local transforms
//! of the default scene's top-level nodes. Buffers and images are never read.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use ignition_shared::Vec3;
use tracing::{info, warn};

use crate::error::{LoadError, LoadResult};
use crate::events::{EventSender, SceneEvent};
use crate::scene::{LoadedModel, MeshId, ModelNode, NodeTransform};

/// Reads the top-level nodes of a glTF or GLB file.
///
/// Uses the default scene, or the first scene when none is marked default.
///
/// # Errors
///
/// [`LoadError::Gltf`] if the file cannot be parsed, [`LoadError::NoScene`]
/// if it has no scene.
pub fn read_top_level_nodes(path: &Path) -> LoadResult<LoadedModel<MeshId>> {
    let document = gltf::Gltf::open(path).map_err(|source| LoadError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| LoadError::NoScene {
            path: path.to_path_buf(),
        })?;

    let nodes = scene
        .nodes()
        .map(|node| {
            let (translation, rotation, scale) = node.transform().decomposed();
            ModelNode::new(
                node.name().unwrap_or_default(),
                node.mesh().map(|mesh| MeshId(mesh.index())),
            )
            .with_transform(NodeTransform {
                translation: Vec3::from_array(translation),
                rotation,
                scale: Vec3::from_array(scale),
            })
        })
        .collect();

    Ok(LoadedModel::new(nodes))
}

/// Loads the model on its own thread and reports the result on the bus.
///
/// # Errors
///
/// Fails only if the thread cannot be spawned.
pub fn spawn_model_loader(path: PathBuf, sender: EventSender) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("model-loader".into())
        .spawn(move || {
            let event = match read_top_level_nodes(&path) {
                Ok(model) => {
                    info!("Loaded {} ({} top-level nodes)", path.display(), model.nodes.len());
                    SceneEvent::ModelLoaded(model)
                }
                Err(err) => {
                    warn!("{}", err);
                    SceneEvent::ModelFailed {
                        reason: err.to_string(),
                    }
                }
            };
            sender.send(event);
        })
}
