//! Window/display sync with settings.
use bevy::prelude::*;
use bevy::window::PresentMode;

use strider::settings::Settings;

/// Resolve the present mode from settings.
///
/// The `present_mode` string wins when it names a known mode; otherwise the
/// `vsync` flag picks between the automatic modes.
#[must_use]
pub fn present_mode_for(settings: &Settings) -> PresentMode {
    match settings.graphics.present_mode.as_str() {
        "AutoVsync" => PresentMode::AutoVsync,
        "AutoNoVsync" => PresentMode::AutoNoVsync,
        "Immediate" => PresentMode::Immediate,
        "Mailbox" => PresentMode::Mailbox,
        "Fifo" => PresentMode::Fifo,
        _ => {
            if settings.graphics.vsync {
                PresentMode::AutoVsync
            } else {
                PresentMode::AutoNoVsync
            }
        }
    }
}

/// Apply display-related settings to the primary window when they change
/// (hot reload of `data/settings`).
#[allow(clippy::needless_pass_by_value)]
pub fn sync_window_settings(settings: Res<Settings>, mut windows: Query<&mut Window>) {
    if !settings.is_changed() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else { return };
    let mode = present_mode_for(&settings);
    if window.present_mode != mode {
        window.present_mode = mode;
    }
}
