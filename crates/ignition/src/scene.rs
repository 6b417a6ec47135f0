//! # Scene Assembly
//!
//! Engine-neutral description of everything the renderer draws:
//!
//! ```text
//! SceneGraph
//! ├─ RocketGroup      five named meshes, materials, scale/position, spin
//! ├─ FlameSprite      billboard sampling one tile of the flame strip
//! ├─ StarfieldPlane   backdrop with a scrolling texture
//! ├─ LightSpec × 4    ambient, directional, point, rectangular area
//! └─ CameraSpec       perspective projection
//! ```
//!
//! Mesh handles are generic (`M`): the headless runner uses [`MeshId`], the
//! Bevy client uses asset handles.

use ignition_core::{AnimationContext, UvWindow};
use ignition_shared::constants::{
    DUSK_VIOLET, FLAME_ORANGE, GLASS_VIOLET, HULL_WHITE, ROCKET_PART_NAMES, TRIM_RED,
};
use ignition_shared::{IgnitionConfig, Rgb, RocketConfig, Vec3};
use tracing::{debug, info};

use crate::error::{SceneError, SceneResult};

/// Index of a mesh inside a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

// =============================================================================
// MODEL
// =============================================================================

/// Local placement of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Translation.
    pub translation: Vec3,
    /// Unit quaternion, `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// Per-axis scale.
    pub scale: Vec3,
}

impl NodeTransform {
    /// No offset, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: Vec3::ONE,
    };
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One top-level node of a loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode<M> {
    /// Node name as authored.
    pub name: String,
    /// Mesh carried by the node, if any.
    pub mesh: Option<M>,
    /// Authored placement under the model root.
    pub transform: NodeTransform,
}

impl<M> ModelNode<M> {
    /// A node at the identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: Option<M>) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: NodeTransform::IDENTITY,
        }
    }

    /// Same node placed at `transform`.
    #[must_use]
    pub fn with_transform(self, transform: NodeTransform) -> Self {
        Self { transform, ..self }
    }
}

/// Top-level nodes of a loaded model, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel<M> {
    /// The nodes.
    pub nodes: Vec<ModelNode<M>>,
}

impl<M> LoadedModel<M> {
    /// Wraps a node list.
    #[must_use]
    pub fn new(nodes: Vec<ModelNode<M>>) -> Self {
        Self { nodes }
    }

    /// First node with exactly this name that carries a mesh.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<&ModelNode<M>> {
        self.nodes
            .iter()
            .find(|node| node.name == name && node.mesh.is_some())
    }

    /// Mesh of [`LoadedModel::find_node`].
    #[must_use]
    pub fn find_mesh(&self, name: &str) -> Option<&M> {
        self.find_node(name).and_then(|node| node.mesh.as_ref())
    }
}

/// The named rocket parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RocketPart {
    /// Hull.
    Body,
    /// Fins.
    Wings,
    /// Engine skirt.
    Bottom,
    /// Porthole glass.
    WindowGlass,
    /// Porthole rim.
    WindowFrame,
}

impl RocketPart {
    /// All parts, in attach order.
    pub const ALL: [Self; 5] = [
        Self::Body,
        Self::Wings,
        Self::Bottom,
        Self::WindowGlass,
        Self::WindowFrame,
    ];

    /// Node name in the model file.
    #[must_use]
    pub const fn node_name(self) -> &'static str {
        ROCKET_PART_NAMES[self.index()]
    }

    const fn index(self) -> usize {
        match self {
            Self::Body => 0,
            Self::Wings => 1,
            Self::Bottom => 2,
            Self::WindowGlass => 3,
            Self::WindowFrame => 4,
        }
    }
}

/// The five part slots after lookup. Missing names stay empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketMeshes<M> {
    slots: [Option<(M, NodeTransform)>; 5],
}

impl<M: Clone> RocketMeshes<M> {
    /// Looks each part up by exact name among the model's top-level nodes.
    #[must_use]
    pub fn locate(model: &LoadedModel<M>) -> Self {
        Self {
            slots: RocketPart::ALL.map(|part| {
                model
                    .find_node(part.node_name())
                    .and_then(|node| Some((node.mesh.clone()?, node.transform)))
            }),
        }
    }
}

impl<M> RocketMeshes<M> {
    /// Mesh for a part, if the model had it.
    #[must_use]
    pub fn get(&self, part: RocketPart) -> Option<&M> {
        self.slots[part.index()].as_ref().map(|(mesh, _)| mesh)
    }

    /// Authored placement of a part, if the model had it.
    #[must_use]
    pub fn transform(&self, part: RocketPart) -> Option<NodeTransform> {
        self.slots[part.index()].as_ref().map(|(_, transform)| *transform)
    }

    /// Number of parts found.
    #[must_use]
    pub fn found_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

// =============================================================================
// MATERIALS
// =============================================================================

/// Surface description for a lit mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    /// Base colour.
    pub color: Rgb,
    /// Perceptual roughness.
    pub roughness: f32,
}

impl MaterialSpec {
    /// Default roughness of a standard material.
    pub const DEFAULT_ROUGHNESS: f32 = 1.0;

    /// White hull paint.
    #[must_use]
    pub fn hull() -> Self {
        Self {
            color: Rgb::from_hex(HULL_WHITE),
            roughness: Self::DEFAULT_ROUGHNESS,
        }
    }

    /// Red trim, slightly glossy.
    #[must_use]
    pub fn trim() -> Self {
        Self {
            color: Rgb::from_hex(TRIM_RED),
            roughness: 0.5,
        }
    }

    /// Dark violet window glass.
    #[must_use]
    pub fn glass() -> Self {
        Self {
            color: Rgb::from_hex(GLASS_VIOLET),
            roughness: Self::DEFAULT_ROUGHNESS,
        }
    }
}

/// Material writes in the order they are made. Wings are painted twice;
/// the second coat wins.
fn paint_order() -> [(RocketPart, MaterialSpec); 6] {
    [
        (RocketPart::Wings, MaterialSpec::hull()),
        (RocketPart::Body, MaterialSpec::hull()),
        (RocketPart::Bottom, MaterialSpec::trim()),
        (RocketPart::WindowGlass, MaterialSpec::glass()),
        (RocketPart::WindowFrame, MaterialSpec::trim()),
        (RocketPart::Wings, MaterialSpec::trim()),
    ]
}

// =============================================================================
// ROCKET GROUP
// =============================================================================

/// A rocket mesh attached to the group.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedPart<M> {
    /// Which part.
    pub part: RocketPart,
    /// Mesh handle.
    pub mesh: M,
    /// Placement inside the group, as authored in the model.
    pub transform: NodeTransform,
    /// Assigned material, once painted.
    pub material: Option<MaterialSpec>,
}

/// The spinning group holding the rocket meshes.
///
/// Empty until a model arrives. Renders fine empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RocketGroup<M> {
    parts: Vec<AttachedPart<M>>,
    /// Uniform scale.
    pub scale: f32,
    /// Group position.
    pub position: Vec3,
    /// Spin around +Y in radians.
    pub rotation_y: f32,
}

impl<M> RocketGroup<M> {
    /// An empty group at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            scale: 1.0,
            position: Vec3::ZERO,
            rotation_y: 0.0,
        }
    }

    /// Attached parts in attach order.
    #[must_use]
    pub fn parts(&self) -> &[AttachedPart<M>] {
        &self.parts
    }

    /// True once any mesh is attached.
    #[must_use]
    pub fn has_meshes(&self) -> bool {
        !self.parts.is_empty()
    }

    /// Material of an attached part.
    #[must_use]
    pub fn material(&self, part: RocketPart) -> Option<MaterialSpec> {
        self.parts
            .iter()
            .find(|attached| attached.part == part)
            .and_then(|attached| attached.material)
    }
}

impl<M: Clone> RocketGroup<M> {
    /// Attaches a loaded model.
    ///
    /// Replaces whatever an earlier model attached. Every part found is
    /// attached first, at its authored node transform. Materials are then
    /// written part by part; the first part the model lacks fails with
    /// [`SceneError::MissingMesh`], leaving earlier writes in place and the
    /// group unscaled at the origin. Scale and position are applied last.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingMesh`] naming the first absent part in
    /// paint order.
    pub fn attach_model(&mut self, model: &LoadedModel<M>, rocket: &RocketConfig) -> SceneResult<()> {
        let meshes = RocketMeshes::locate(model);
        debug!("Rocket model: {}/5 parts found", meshes.found_count());

        if self.has_meshes() {
            debug!("Replacing {} attached rocket parts", self.parts.len());
        }
        self.parts.clear();
        self.scale = 1.0;
        self.position = Vec3::ZERO;

        for part in RocketPart::ALL {
            if let (Some(mesh), Some(transform)) = (meshes.get(part), meshes.transform(part)) {
                self.parts.push(AttachedPart {
                    part,
                    mesh: mesh.clone(),
                    transform,
                    material: None,
                });
            }
        }

        for (part, material) in paint_order() {
            if meshes.get(part).is_none() {
                return Err(SceneError::MissingMesh {
                    name: part.node_name(),
                });
            }
            if let Some(attached) = self.parts.iter_mut().find(|a| a.part == part) {
                attached.material = Some(material);
            }
        }

        self.scale = rocket.scale;
        self.position = Vec3::from_array(rocket.position);
        info!(
            "Rocket attached: {} parts, scale {}, position {:?}",
            self.parts.len(),
            self.scale,
            rocket.position
        );
        Ok(())
    }
}

impl<M> Default for RocketGroup<M> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SPRITES, LIGHTS, CAMERA
// =============================================================================

/// Billboarded flame below the rocket.
#[derive(Debug, Clone, PartialEq)]
pub struct FlameSprite {
    /// Sprite strip image.
    pub texture: String,
    /// Sampled window of the strip.
    pub window: UvWindow,
    /// Sprite position.
    pub position: Vec3,
}

/// Textured backdrop plane.
#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldPlane {
    /// Star image.
    pub texture: String,
    /// Sampled window; `offset.y` scrolls.
    pub window: UvWindow,
    /// Uniform scale of the unit plane.
    pub scale: f32,
    /// Plane position.
    pub position: Vec3,
}

/// A light in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSpec {
    /// Uniform fill.
    Ambient {
        /// Colour.
        color: Rgb,
        /// Intensity.
        intensity: f32,
    },
    /// Sun-like light shining from `position` toward the origin.
    Directional {
        /// Colour.
        color: Rgb,
        /// Intensity.
        intensity: f32,
        /// Position.
        position: Vec3,
        /// Shadows on.
        casts_shadows: bool,
    },
    /// Omnidirectional light with a falloff range.
    Point {
        /// Colour.
        color: Rgb,
        /// Intensity.
        intensity: f32,
        /// Falloff distance.
        range: f32,
        /// Position.
        position: Vec3,
        /// Shadows on.
        casts_shadows: bool,
    },
    /// Rectangular emitter facing `look_at`.
    RectArea {
        /// Colour.
        color: Rgb,
        /// Intensity.
        intensity: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Position.
        position: Vec3,
        /// Point the rectangle faces.
        look_at: Vec3,
    },
}

/// The four scene lights. The area light is aimed while the rocket group
/// still sits at the origin, before any model places it.
#[must_use]
pub fn scene_lights() -> [LightSpec; 4] {
    [
        LightSpec::Ambient {
            color: Rgb::from_hex(DUSK_VIOLET),
            intensity: 1.0,
        },
        LightSpec::Directional {
            color: Rgb::WHITE,
            intensity: 0.8,
            position: Vec3::new(3.0, 3.0, 3.0),
            casts_shadows: true,
        },
        LightSpec::Point {
            color: Rgb::from_hex(FLAME_ORANGE),
            intensity: 0.8,
            range: 10.0,
            position: Vec3::new(0.0, -1.3, 0.0),
            casts_shadows: true,
        },
        LightSpec::RectArea {
            color: Rgb::from_hex(DUSK_VIOLET),
            intensity: 1.0,
            width: 10.0,
            height: 10.0,
            position: Vec3::new(-4.5, -0.8, 0.0),
            look_at: Vec3::ZERO,
        },
    ]
}

/// Perspective camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSpec {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width over height.
    pub aspect: f32,
    /// Near plane.
    pub near: f32,
    /// Far plane.
    pub far: f32,
    /// Initial eye position.
    pub position: Vec3,
}

// =============================================================================
// SCENE GRAPH
// =============================================================================

/// Everything the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph<M = MeshId> {
    /// The rocket.
    pub rocket: RocketGroup<M>,
    /// The flame.
    pub flame: FlameSprite,
    /// The backdrop.
    pub starfield: StarfieldPlane,
    /// Lights, in creation order.
    pub lights: [LightSpec; 4],
    /// Camera.
    pub camera: CameraSpec,
    /// Background colour.
    pub clear_color: Rgb,
}

impl<M> SceneGraph<M> {
    /// Assembles the scene from configuration. The rocket starts empty.
    #[must_use]
    pub fn assemble(config: &IgnitionConfig) -> Self {
        Self {
            rocket: RocketGroup::new(),
            flame: FlameSprite {
                texture: config.assets.flame_strip.clone(),
                window: UvWindow::strip(config.flame.tiles),
                position: Vec3::new(0.0, config.flame.position_y, 0.0),
            },
            starfield: StarfieldPlane {
                texture: config.assets.stars.clone(),
                window: UvWindow::FULL,
                scale: config.starfield.scale,
                position: Vec3::new(0.0, 0.0, config.starfield.z),
            },
            lights: scene_lights(),
            camera: CameraSpec {
                fov_degrees: config.camera.fov_degrees,
                aspect: config.viewport.width as f32 / config.viewport.height.max(1) as f32,
                near: config.camera.near,
                far: config.camera.far,
                position: Vec3::from_array(config.camera.position),
            },
            clear_color: Rgb::from_hex(GLASS_VIOLET),
        }
    }

    /// Copies animated values into the scene.
    pub fn apply_animation(&mut self, context: &AnimationContext) {
        self.rocket.rotation_y = context.spin().rotation_y;
        self.flame.window = context.flame_window();
        self.starfield.window = context.starfield_window();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(names: &[&str]) -> LoadedModel<MeshId> {
        LoadedModel::new(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| ModelNode::new(*name, Some(MeshId(i))))
                .collect(),
        )
    }

    fn full_model() -> LoadedModel<MeshId> {
        model(&["window_frame", "body", "camera", "wings", "bottom", "window_glass"])
    }

    #[test]
    fn test_locate_matches_exact_names() {
        let meshes = RocketMeshes::locate(&model(&["Body", "body.001", "wings"]));
        assert_eq!(meshes.found_count(), 1);
        assert_eq!(meshes.get(RocketPart::Wings), Some(&MeshId(2)));
        assert!(meshes.get(RocketPart::Body).is_none());
    }

    #[test]
    fn test_nodes_without_mesh_are_skipped() {
        let loaded = LoadedModel::new(vec![
            ModelNode::new("body", None),
            ModelNode::new("body", Some(MeshId(7))),
        ]);
        assert_eq!(loaded.find_mesh("body"), Some(&MeshId(7)));
    }

    #[test]
    fn test_attach_paints_and_places() {
        let mut group = RocketGroup::new();
        group
            .attach_model(&full_model(), &RocketConfig::default())
            .unwrap();

        let order: Vec<_> = group.parts().iter().map(|p| p.part).collect();
        assert_eq!(order, RocketPart::ALL.to_vec());

        assert_eq!(group.material(RocketPart::Body), Some(MaterialSpec::hull()));
        assert_eq!(group.material(RocketPart::Wings), Some(MaterialSpec::trim()));
        assert_eq!(group.material(RocketPart::Bottom), Some(MaterialSpec::trim()));
        assert_eq!(group.material(RocketPart::WindowGlass), Some(MaterialSpec::glass()));
        assert_eq!(group.material(RocketPart::WindowFrame), Some(MaterialSpec::trim()));
        assert_eq!(MaterialSpec::trim().roughness, 0.5);

        assert_eq!(group.scale, 0.3);
        assert_eq!(group.position, Vec3::new(0.0, 0.35, 0.0));
    }

    #[test]
    fn test_missing_part_fails_at_its_paint_step() {
        let mut group = RocketGroup::new();
        let partial = model(&["body", "wings", "bottom", "window_frame"]);

        let err = group
            .attach_model(&partial, &RocketConfig::default())
            .unwrap_err();
        assert_eq!(err, SceneError::MissingMesh { name: "window_glass" });

        // Found parts are attached, earlier coats stay, no transform.
        assert_eq!(group.parts().len(), 4);
        assert_eq!(group.material(RocketPart::Bottom), Some(MaterialSpec::trim()));
        assert_eq!(group.material(RocketPart::Wings), Some(MaterialSpec::hull()));
        assert_eq!(group.material(RocketPart::WindowFrame), None);
        assert_eq!(group.scale, 1.0);
    }

    #[test]
    fn test_parts_keep_node_transforms() {
        let fin = NodeTransform {
            translation: Vec3::new(0.4, -0.2, 0.0),
            rotation: [0.0, 0.707_106_8, 0.0, 0.707_106_8],
            scale: Vec3::splat(1.5),
        };
        let mut nodes = full_model().nodes;
        for node in &mut nodes {
            if node.name == "wings" {
                node.transform = fin;
            }
        }

        let mut group = RocketGroup::new();
        group
            .attach_model(&LoadedModel::new(nodes), &RocketConfig::default())
            .unwrap();

        let transform_of = |part| {
            group
                .parts()
                .iter()
                .find(|p| p.part == part)
                .map(|p| p.transform)
        };
        assert_eq!(transform_of(RocketPart::Wings), Some(fin));
        assert_eq!(transform_of(RocketPart::Body), Some(NodeTransform::IDENTITY));
    }

    #[test]
    fn test_second_model_replaces_first() {
        let mut group = RocketGroup::new();
        group
            .attach_model(&full_model(), &RocketConfig::default())
            .unwrap();
        group
            .attach_model(&full_model(), &RocketConfig::default())
            .unwrap();
        assert_eq!(group.parts().len(), 5);

        // A later incomplete model leaves only its own parts, unplaced.
        let err = group
            .attach_model(&model(&["body", "wings"]), &RocketConfig::default())
            .unwrap_err();
        assert_eq!(err, SceneError::MissingMesh { name: "bottom" });
        assert_eq!(group.parts().len(), 2);
        assert_eq!(group.scale, 1.0);
        assert_eq!(group.position, Vec3::ZERO);
    }

    #[test]
    fn test_missing_wings_fails_first() {
        let mut group = RocketGroup::new();
        let err = group
            .attach_model(&model(&["body"]), &RocketConfig::default())
            .unwrap_err();
        assert_eq!(err, SceneError::MissingMesh { name: "wings" });
        assert_eq!(group.material(RocketPart::Body), None);
    }

    #[test]
    fn test_assemble_defaults() {
        let scene: SceneGraph = SceneGraph::assemble(&IgnitionConfig::default());

        assert!(!scene.rocket.has_meshes());
        assert_eq!(scene.flame.window.repeat.x, 0.25);
        assert_eq!(scene.flame.position, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(scene.starfield.scale, 8.0);
        assert_eq!(scene.starfield.position.z, -3.0);
        assert_eq!(scene.camera.fov_degrees, 75.0);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(scene.clear_color, Rgb::from_hex(0x312f4c));

        match scene.lights[3] {
            LightSpec::RectArea { look_at, .. } => assert_eq!(look_at, Vec3::ZERO),
            other => panic!("expected area light, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_animation_copies_state() {
        let mut scene: SceneGraph = SceneGraph::assemble(&IgnitionConfig::default());
        let mut ctx = AnimationContext::default();
        ctx.advance(0.5);
        scene.apply_animation(&ctx);

        assert_eq!(scene.rocket.rotation_y, ctx.spin().rotation_y);
        assert_eq!(scene.flame.window, ctx.flame_window());
        assert_eq!(scene.starfield.window.offset.y, ctx.starfield().folded());
    }
}
