//! Setup systems for initializing the demo scene.
//!
//! Runs at `Startup` and spawns the chase camera, sun light, ground plane
//! and the character scene, and kicks off loading of the character glTF.
use bevy::gltf::GltfAssetLabel;
use bevy::pbr::light_consts;
use bevy::prelude::*;
use bevy_atmosphere::prelude::AtmosphereCamera;

use strider::actor::{render_transform, Actor, CharacterAssets, CHARACTER_GLTF};
use strider::settings::Settings;

use crate::app::camera::ChaseCamera;

/// Spawn the scene: camera, light, ground and character.
///
/// The character's `Actor` starts in the state named by
/// `character.start_state` (unknown names are logged and fall back to idle),
/// and its glTF is queued for loading; the clip library is built by a
/// separate system once the asset resolves.
///
/// # Arguments
/// - `commands`: Commands for spawning entities and inserting resources.
/// - `meshes` / `materials`: asset storages for the ground plane.
/// - `asset_server`: used to load the character scene and clips.
/// - `settings`: graphics and character settings applied at spawn.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    settings: Res<Settings>,
) {
    let camera = commands
        .spawn((
            Camera3dBundle {
                transform: Transform::from_xyz(0.0, 7.0, -9.0).looking_at(Vec3::ZERO, Vec3::Y),
                ..default()
            },
            ChaseCamera::default(),
        ))
        .id();
    if settings.atmosphere.enabled {
        commands.entity(camera).insert(AtmosphereCamera::default());
    }

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
    });
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: settings.graphics.shadows,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 18.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(40.0, 40.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.45, 0.35),
            perceptual_roughness: 0.9,
            ..default()
        }),
        ..default()
    });

    let mut actor = Actor::default();
    actor.set_state_by_name(&settings.character.start_state);

    commands.insert_resource(CharacterAssets {
        gltf: asset_server.load(CHARACTER_GLTF),
        resolved: false,
    });
    commands.spawn((
        SceneBundle {
            scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(CHARACTER_GLTF)),
            transform: render_transform(&actor),
            ..default()
        },
        actor,
    ));
}
