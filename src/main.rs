use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::{Window, WindowPlugin};
use bevy_atmosphere::prelude::*;

use strider::actor::{
    actor_locomotion, bind_animation_player, build_clip_library, sample_pose,
    sync_actor_transform, update_destination,
};
use strider::debug::dump_debug_state;
use strider::settings::loader as settings_loader;
use strider::ui::{setup_debug_overlay, toggle_debug_overlay, update_debug_overlay};

mod app;
use app::{follow_camera, present_mode_for, setup, sync_window_settings};

fn main() {
    let settings = settings_loader::load_settings_from_dir("data/settings");
    let settings_watcher = settings_loader::setup_settings_watcher("data/settings")
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "strider".to_string(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: present_mode_for(&settings),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin);

    if settings.atmosphere.enabled {
        app.add_plugins(AtmospherePlugin)
            .insert_resource(AtmosphereModel::default())
            .insert_resource(AtmosphereSettings {
                resolution: settings.atmosphere.resolution,
                dithering: settings.atmosphere.dithering,
                ..Default::default()
            });
    }

    app.insert_resource(settings)
        .insert_resource(settings_watcher)
        .add_systems(Startup, (setup, setup_debug_overlay))
        // The controller pipeline runs in a fixed order: pick destination,
        // step locomotion/state machine, sample the pose, write the
        // transform back.
        .add_systems(
            Update,
            (
                update_destination,
                actor_locomotion,
                sample_pose,
                sync_actor_transform,
            )
                .chain(),
        )
        .add_systems(Update, (build_clip_library, bind_animation_player))
        .add_systems(Update, (follow_camera, sync_window_settings))
        .add_systems(
            Update,
            (
                settings_loader::check_settings_changes,
                toggle_debug_overlay,
                update_debug_overlay,
                dump_debug_state,
            ),
        );

    app.run();
}
