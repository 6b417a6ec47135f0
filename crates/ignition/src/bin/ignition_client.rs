//! # IGNITION Client
//!
//! A spinning rocket over a scrolling starfield, with a sprite-strip flame
//! under its engine and a panel to tune the flame rate.
//!
//! PLATFORM: WASM/WebGL2 (bound to `canvas#webgl`) + Native
//!
//! All animated state lives in the `ignition_core` [`AnimationContext`];
//! the systems here only copy it onto Bevy entities.

use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::texture::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::window::{PrimaryWindow, WindowResized};
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use ignition::core::{AnimationContext, OrbitControls, UvWindow, Viewport};
use ignition::shared::{IgnitionConfig, Rgb};
use ignition::ui::ParamPanel;
use ignition::{
    CanvasLookup, FrameStats, FrameStatsAccumulator, LightSpec, LoadedModel, MaterialSpec,
    ModelNode, NodeTransform, SceneGraph, StartupError,
};

/// Config file read at startup (native only; the browser uses defaults).
const CONFIG_PATH: &str = "ignition.toml";

// =============================================================================
// LIGHT UNITS
// =============================================================================
// The scene's light intensities are authored for a renderer with unitless
// lights. Bevy uses photometric units; these map one onto the other.

/// Ambient brightness per unit intensity.
const AMBIENT_BRIGHTNESS: f32 = 150.0;
/// Directional illuminance (lux) per unit intensity.
const DIRECTIONAL_LUX: f32 = 10_000.0;
/// Point light power (lumens) per unit intensity.
const POINT_LUMENS: f32 = 200_000.0;
/// Area lights become spot lights; power per unit intensity per square unit.
const AREA_LUMENS_PER_UNIT: f32 = 4_000.0;

// =============================================================================
// RESOURCES & COMPONENTS
// =============================================================================

#[derive(Resource)]
struct Settings(IgnitionConfig);

#[derive(Resource)]
struct Animation(AnimationContext);

#[derive(Resource)]
struct SceneSpec(SceneGraph<Handle<GltfMesh>>);

#[derive(Resource)]
struct Orbit(OrbitControls);

#[derive(Resource)]
struct Panel(ParamPanel);

#[derive(Resource)]
struct Surface(Viewport);

#[derive(Resource, Default)]
struct Stats(FrameStatsAccumulator);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ModelState {
    Pending,
    Attached,
    Failed,
}

#[derive(Resource)]
struct SceneAssets {
    model: Handle<Gltf>,
    flame_mesh: Handle<Mesh>,
    starfield_mesh: Handle<Mesh>,
    state: ModelState,
}

/// Parent of the rocket meshes; carries spin, scale and position.
#[derive(Component)]
struct RocketRoot;

/// The flame quad, turned to face the camera every frame.
#[derive(Component)]
struct FlameBillboard;

#[derive(Component)]
struct MainCamera;

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_bevy(v: ignition::shared::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn from_bevy(v: Vec3) -> ignition::shared::Vec3 {
    ignition::shared::Vec3::new(v.x, v.y, v.z)
}

fn node_transform(transform: &Transform) -> NodeTransform {
    NodeTransform {
        translation: from_bevy(transform.translation),
        rotation: transform.rotation.to_array(),
        scale: from_bevy(transform.scale),
    }
}

fn bevy_transform(transform: NodeTransform) -> Transform {
    Transform {
        translation: to_bevy(transform.translation),
        rotation: Quat::from_array(transform.rotation),
        scale: to_bevy(transform.scale),
    }
}

fn to_color(c: Rgb) -> Color {
    Color::rgb(c.r, c.g, c.b)
}

fn standard_material(spec: MaterialSpec) -> StandardMaterial {
    StandardMaterial {
        base_color: to_color(spec.color),
        perceptual_roughness: spec.roughness,
        ..default()
    }
}

/// A 1×1 quad facing +Z, corners in the order [`UvWindow::corners`] uses.
fn textured_quad(window: UvWindow) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
                [-0.5, 0.5, 0.0],
            ],
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; 4])
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, window.corners().to_vec())
        .with_inserted_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]))
}

/// Rewrites a quad's UVs. Window offsets arrive folded into `[0, 1)`.
fn write_window(meshes: &mut Assets<Mesh>, handle: &Handle<Mesh>, window: UvWindow) {
    if let Some(mesh) = meshes.get_mut(handle) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, window.corners().to_vec());
    }
}

fn load_repeating(asset_server: &AssetServer, path: String) -> Handle<Image> {
    asset_server.load_with_settings(path, |settings: &mut ImageLoaderSettings| {
        settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::Repeat,
            address_mode_v: ImageAddressMode::Repeat,
            ..default()
        });
    })
}

// =============================================================================
// SETUP
// =============================================================================

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    spec: Res<SceneSpec>,
) {
    let scene = &spec.0;
    info!("IGNITION - assembling scene");

    commands.spawn((RocketRoot, Name::new("Rocket"), SpatialBundle::default()));

    // FLAME - one tile of the strip, billboarded
    let flame_mesh = meshes.add(textured_quad(scene.flame.window));
    commands.spawn((
        FlameBillboard,
        Name::new("Flame"),
        PbrBundle {
            mesh: flame_mesh.clone(),
            material: materials.add(StandardMaterial {
                base_color_texture: Some(load_repeating(&asset_server, scene.flame.texture.clone())),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
            transform: Transform::from_translation(to_bevy(scene.flame.position)),
            ..default()
        },
    ));

    // STARFIELD - backdrop plane, texture scrolls on y
    let starfield_mesh = meshes.add(textured_quad(scene.starfield.window));
    commands.spawn((
        Name::new("Starfield"),
        PbrBundle {
            mesh: starfield_mesh.clone(),
            material: materials.add(StandardMaterial {
                base_color_texture: Some(load_repeating(&asset_server, scene.starfield.texture.clone())),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            }),
            transform: Transform::from_translation(to_bevy(scene.starfield.position))
                .with_scale(Vec3::splat(scene.starfield.scale)),
            ..default()
        },
    ));

    for light in &scene.lights {
        spawn_light(&mut commands, *light);
    }

    commands.spawn((
        MainCamera,
        Camera3dBundle {
            projection: Projection::Perspective(PerspectiveProjection {
                fov: scene.camera.fov_degrees.to_radians(),
                aspect_ratio: scene.camera.aspect,
                near: scene.camera.near,
                far: scene.camera.far,
            }),
            transform: Transform::from_translation(to_bevy(scene.camera.position))
                .looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
    ));

    commands.insert_resource(ClearColor(to_color(scene.clear_color)));
    commands.insert_resource(SceneAssets {
        model: asset_server.load(settings.0.assets.model.clone()),
        flame_mesh,
        starfield_mesh,
        state: ModelState::Pending,
    });

    info!("Loading rocket model {}", settings.0.assets.model);
}

fn spawn_light(commands: &mut Commands, light: LightSpec) {
    match light {
        LightSpec::Ambient { color, intensity } => {
            commands.insert_resource(AmbientLight {
                color: to_color(color),
                brightness: intensity * AMBIENT_BRIGHTNESS,
            });
        }
        LightSpec::Directional {
            color,
            intensity,
            position,
            casts_shadows,
        } => {
            commands.spawn(DirectionalLightBundle {
                directional_light: DirectionalLight {
                    color: to_color(color),
                    illuminance: intensity * DIRECTIONAL_LUX,
                    shadows_enabled: casts_shadows,
                    ..default()
                },
                transform: Transform::from_translation(to_bevy(position))
                    .looking_at(Vec3::ZERO, Vec3::Y),
                ..default()
            });
        }
        LightSpec::Point {
            color,
            intensity,
            range,
            position,
            casts_shadows,
        } => {
            commands.spawn(PointLightBundle {
                point_light: PointLight {
                    color: to_color(color),
                    intensity: intensity * POINT_LUMENS,
                    range,
                    shadows_enabled: casts_shadows,
                    ..default()
                },
                transform: Transform::from_translation(to_bevy(position)),
                ..default()
            });
        }
        // No area lights in Bevy: a wide spot light from the same place.
        LightSpec::RectArea {
            color,
            intensity,
            width,
            height,
            position,
            look_at,
        } => {
            commands.spawn(SpotLightBundle {
                spot_light: SpotLight {
                    color: to_color(color),
                    intensity: intensity * width * height * AREA_LUMENS_PER_UNIT,
                    range: width.max(height) * 2.0,
                    outer_angle: 1.2,
                    inner_angle: 0.6,
                    shadows_enabled: false,
                    ..default()
                },
                transform: Transform::from_translation(to_bevy(position))
                    .looking_at(to_bevy(look_at), Vec3::Y),
                ..default()
            });
        }
    }
}

// =============================================================================
// MODEL
// =============================================================================

/// Waits for the rocket model, then attaches its named parts.
fn attach_rocket_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut assets: ResMut<SceneAssets>,
    gltfs: Res<Assets<Gltf>>,
    nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut spec: ResMut<SceneSpec>,
    settings: Res<Settings>,
    mut rocket: Query<(Entity, &mut Transform), With<RocketRoot>>,
) {
    if assets.state != ModelState::Pending {
        return;
    }
    match asset_server.load_state(&assets.model) {
        bevy::asset::LoadState::Loaded => {}
        bevy::asset::LoadState::Failed => {
            error!("Rocket model {} failed to load", settings.0.assets.model);
            assets.state = ModelState::Failed;
            return;
        }
        _ => return,
    }
    let Some(gltf) = gltfs.get(&assets.model) else {
        return;
    };
    let Ok((root, mut transform)) = rocket.get_single_mut() else {
        return;
    };

    let model = LoadedModel::new(
        gltf.named_nodes
            .iter()
            .map(|(name, handle)| match nodes.get(handle) {
                Some(node) => ModelNode::new(name.clone(), node.mesh.clone())
                    .with_transform(node_transform(&node.transform)),
                None => ModelNode::new(name.clone(), None),
            })
            .collect(),
    );

    let result = spec.0.rocket.attach_model(&model, &settings.0.rocket);

    let rocket_group = &spec.0.rocket;
    commands.entity(root).with_children(|parent| {
        for part in rocket_group.parts() {
            let Some(mesh) = gltf_meshes.get(&part.mesh) else {
                continue;
            };
            let painted = part.material.map(|paint| materials.add(standard_material(paint)));
            parent
                .spawn((
                    Name::new(part.part.node_name()),
                    SpatialBundle::from_transform(bevy_transform(part.transform)),
                ))
                .with_children(|node| {
                    for primitive in &mesh.primitives {
                        let material = painted
                            .clone()
                            .or_else(|| primitive.material.clone())
                            .unwrap_or_default();
                        node.spawn(PbrBundle {
                            mesh: primitive.mesh.clone(),
                            material,
                            ..default()
                        });
                    }
                });
        }
    });

    match result {
        Ok(()) => {
            transform.scale = Vec3::splat(rocket_group.scale);
            transform.translation = to_bevy(rocket_group.position);
        }
        Err(err) => error!("{}", err),
    }
    assets.state = ModelState::Attached;
}

// =============================================================================
// FRAME
// =============================================================================

/// Advances the animation and copies it onto the scene.
#[allow(clippy::cast_possible_truncation)]
fn animate(
    time: Res<Time>,
    mut animation: ResMut<Animation>,
    mut spec: ResMut<SceneSpec>,
    assets: Option<Res<SceneAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut rocket: Query<&mut Transform, With<RocketRoot>>,
    mut stats: ResMut<Stats>,
) {
    let delta = time.delta_seconds();
    let advance = animation.0.advance(delta);
    spec.0.apply_animation(&animation.0);

    if let Ok(mut transform) = rocket.get_single_mut() {
        transform.rotation = Quat::from_rotation_y(advance.rotation_y);
    }
    if let Some(assets) = assets {
        write_window(&mut meshes, &assets.flame_mesh, spec.0.flame.window);
        write_window(&mut meshes, &assets.starfield_mesh, spec.0.starfield.window);
    }

    let frame = stats.0.frames_recorded + 1;
    stats.0.record(FrameStats {
        frame,
        total_us: time.delta().as_micros() as u64,
        delta,
        ..FrameStats::default()
    });
}

/// Drag to orbit, wheel to zoom. Input over the panel is left to the panel.
fn orbit_camera(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut orbit: ResMut<Orbit>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let panel_has_pointer = contexts.ctx_mut().wants_pointer_input();
    let height = windows.get_single().map_or(720.0, Window::height);

    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    let notches: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / 100.0,
        })
        .sum();

    if !panel_has_pointer {
        if buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO {
            orbit.0.rotate(drag.x, drag.y, height);
        }
        if notches != 0.0 {
            orbit.0.zoom(notches);
        }
    }

    let pose = orbit.0.update();
    if let Ok(mut transform) = camera.get_single_mut() {
        *transform = Transform::from_translation(to_bevy(pose.position))
            .looking_at(to_bevy(pose.target), Vec3::Y);
    }
}

/// Turns the flame to face the camera.
fn billboard_flame(
    camera: Query<&Transform, (With<MainCamera>, Without<FlameBillboard>)>,
    mut flame: Query<&mut Transform, With<FlameBillboard>>,
) {
    let Ok(camera) = camera.get_single() else {
        return;
    };
    for mut transform in &mut flame {
        transform.rotation = camera.rotation;
    }
}

fn parameter_panel(
    mut contexts: EguiContexts,
    mut panel: ResMut<Panel>,
    mut animation: ResMut<Animation>,
    stats: Res<Stats>,
) {
    panel.0.sync(&animation.0);

    let mut offset = panel.0.offset_x().value();
    let mut fps = panel.0.frames_per_second().value();

    egui::Window::new("Parameters")
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            let control = panel.0.offset_x();
            let slider = egui::Slider::new(&mut offset, control.min..=control.max)
                .step_by(f64::from(control.step))
                .text(control.label());
            if ui.add(slider).changed() {
                panel.0.edit_offset_x(offset, &mut animation.0);
            }

            let control = panel.0.frames_per_second();
            let slider = egui::Slider::new(&mut fps, control.min..=control.max)
                .step_by(f64::from(control.step))
                .text(control.label());
            if ui.add(slider).changed() {
                panel.0.edit_frames_per_second(fps, &mut animation.0);
            }

            ui.separator();
            ui.label(format!("{:.0} FPS", stats.0.avg_fps()));
        });
}

/// Applies each window resize exactly once.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn handle_resize(
    mut resized: EventReader<WindowResized>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut surface: ResMut<Surface>,
    mut spec: ResMut<SceneSpec>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    for event in resized.read() {
        let Ok(mut window) = windows.get_mut(event.window) else {
            continue;
        };
        let scale_factor = window.scale_factor();
        let update = surface
            .0
            .resize(event.width as u32, event.height as u32, scale_factor);

        if scale_factor > update.pixel_ratio {
            window
                .resolution
                .set_scale_factor_override(Some(update.pixel_ratio));
        }
        spec.0.camera.aspect = update.aspect;
        if let Ok(mut projection) = projections.get_single_mut() {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = update.aspect;
            }
        }
        info!(
            "Resized to {}x{} (aspect {:.3}, pixel ratio {})",
            update.width, update.height, update.aspect, update.pixel_ratio
        );
    }
}

// =============================================================================
// MOUNT POINT
// =============================================================================

/// Looks the canvas up in the page before the app starts.
#[cfg(target_arch = "wasm32")]
struct DomCanvas;

#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
impl CanvasLookup for DomCanvas {
    fn find_canvas(&self, selector: &str) -> Option<ignition::CanvasSize> {
        let window = web_sys::window()?;
        let element = window.document()?.query_selector(selector).ok()??;
        Some(ignition::CanvasSize {
            width: element.client_width().max(0) as u32,
            height: element.client_height().max(0) as u32,
            device_pixel_ratio: window.device_pixel_ratio() as f32,
        })
    }
}

/// Natively Bevy creates the window, so the surface always exists.
#[cfg(not(target_arch = "wasm32"))]
struct NativeWindow {
    selector: String,
    width: u32,
    height: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl CanvasLookup for NativeWindow {
    fn find_canvas(&self, selector: &str) -> Option<ignition::CanvasSize> {
        (self.selector == selector).then_some(ignition::CanvasSize {
            width: self.width,
            height: self.height,
            device_pixel_ratio: 1.0,
        })
    }
}

fn mount_point(config: &IgnitionConfig) -> Result<ignition::CanvasSize, StartupError> {
    let selector = &config.viewport.canvas_selector;

    #[cfg(target_arch = "wasm32")]
    let lookup = DomCanvas;
    #[cfg(not(target_arch = "wasm32"))]
    let lookup = NativeWindow {
        selector: selector.clone(),
        width: config.viewport.width,
        height: config.viewport.height,
    };

    lookup
        .find_canvas(selector)
        .ok_or_else(|| StartupError::MissingMountPoint {
            selector: selector.clone(),
        })
}

fn report_startup_error(err: &StartupError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&err.to_string().into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("IGNITION failed to start: {err}");
}

// =============================================================================
// MAIN - The Entry Point
// =============================================================================

fn main() {
    // WASM: Install panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let config = match IgnitionConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            report_startup_error(&StartupError::from(err));
            return;
        }
    };
    let canvas = match mount_point(&config) {
        Ok(canvas) => canvas,
        Err(err) => {
            report_startup_error(&err);
            return;
        }
    };

    let mut viewport = Viewport::new(&config.viewport);
    let initial = viewport.resize(canvas.width, canvas.height, canvas.device_pixel_ratio);

    let mut scene: SceneGraph<Handle<GltfMesh>> = SceneGraph::assemble(&config);
    scene.camera.aspect = initial.aspect;

    let orbit = OrbitControls::new(
        ignition::shared::Vec3::from_array(config.camera.position),
        ignition::shared::Vec3::ZERO,
        config.controls.clone(),
    );

    let mut app = App::new();

    #[cfg(target_arch = "wasm32")]
    {
        // WASM: Single-threaded + Canvas binding
        use bevy::core::TaskPoolPlugin;
        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "IGNITION".into(),
                        // CRITICAL: Bind to canvas element in index.html
                        canvas: Some(config.viewport.canvas_selector.clone()),
                        prevent_default_event_handling: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(TaskPoolPlugin {
                    task_pool_options: bevy::core::TaskPoolOptions::with_num_threads(1),
                }),
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "IGNITION".into(),
                resolution: (initial.width as f32, initial.height as f32).into(),
                ..default()
            }),
            ..default()
        }));
    }

    app.add_plugins(EguiPlugin)
        .insert_resource(Animation(AnimationContext::from_config(&config)))
        .insert_resource(Panel(ParamPanel::new(&config.flame)))
        .insert_resource(Orbit(orbit))
        .insert_resource(Surface(viewport))
        .insert_resource(SceneSpec(scene))
        .insert_resource(Settings(config))
        .init_resource::<Stats>()
        .add_systems(Startup, setup)
        .add_systems(Update, attach_rocket_model)
        .add_systems(Update, handle_resize)
        .add_systems(Update, animate.after(handle_resize))
        .add_systems(Update, orbit_camera.after(animate))
        .add_systems(Update, billboard_flame.after(orbit_camera))
        .add_systems(Update, parameter_panel.after(animate));

    app.run();
}
