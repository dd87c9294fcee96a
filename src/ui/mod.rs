//! User interface helpers: debug overlay.
//!
//! A simple text overlay showing FPS, frame time and the actor's locomotion
//! state. The overlay refreshes on a fixed interval to avoid querying
//! diagnostics every frame, and is toggled with the `toggle_debug` keybind.

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::actor::Actor;
use crate::settings::Settings;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

/// Marker for the overlay's text element.
#[derive(Component)]
pub struct DebugOverlayText;

/// Insert the overlay resources and spawn its text element.
///
/// # Arguments
/// * `commands` - `Commands` to insert resources and spawn the text node
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(
        0.5,
        TimerMode::Repeating,
    )));
    commands.insert_resource(DebugOverlayState::default());

    commands.spawn((
        TextBundle::from_section(
            String::new(),
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        }),
        DebugOverlayText,
    ));
}

/// Toggle the debug overlay visibility with the `toggle_debug` keybind.
///
/// # Arguments
/// * `state` - mutable `DebugOverlayState` resource
/// * `input` - keyboard input resource
/// * `settings` - keybind lookup
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.keybind("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// Update the debug overlay text once every interval.
///
/// # Arguments
/// * `diagnostics` - diagnostics store (frame time / FPS)
/// * `state` - overlay visibility state
/// * `time` - time resource for the refresh timer
/// * `timer` - mutable overlay timer resource
/// * `query` - the overlay text element
/// * `actor_query` - actor whose state is displayed
#[allow(clippy::needless_pass_by_value)]
pub fn update_debug_overlay(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<DebugOverlayState>,
    time: Res<Time>,
    mut timer: ResMut<DebugOverlayTimer>,
    mut query: Query<&mut Text, With<DebugOverlayText>>,
    actor_query: Query<&Actor>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = query.get_single_mut() else { return };

    if !state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let mut value = format!("FPS: {fps:.0} ({frame_time:.2} ms)\n");

    if let Ok(actor) = actor_query.get_single() {
        let p = actor.position;
        let d = actor.destination;
        value.push_str(&format!(
            "pos: ({:.2}, {:.2}, {:.2})\ndest: ({:.2}, {:.2}, {:.2})\nstate: {} (frame {})\nspecial: {:.2}s",
            p.x, p.y, p.z, d.x, d.y, d.z, actor.state.name(), actor.anim_frame, actor.special_timer,
        ));
    }

    text.sections[0].value = value;
}
