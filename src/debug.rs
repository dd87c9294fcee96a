//! Debug utilities: a system (F3 default) to dump diagnostics, actor state,
//! entity counts and process memory to a timestamped text file in
//! './debug-dumps/'.
//!
//! Useful for capturing a snapshot of the demo's internal state without
//! attaching a profiler or debugger.
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use chrono::Utc;
use std::fmt::Write as _;
use std::fs;
use sysinfo::{ProcessExt, System, SystemExt};

use crate::actor::Actor;
use crate::settings::Settings;

/// Write a debug dump when the `dump_debug` keybind is pressed.
///
/// # Arguments
/// * `input` - keyboard input resource
/// * `settings` - keybind lookup
/// * `diagnostics` - diagnostics store (frame time / FPS)
/// * `actor_query` - actor state included in the dump
/// * `entities` - query counting all live entities
#[allow(clippy::needless_pass_by_value)]
pub fn dump_debug_state(
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    diagnostics: Res<DiagnosticsStore>,
    actor_query: Query<&Actor>,
    entities: Query<Entity>,
) {
    if !input.just_pressed(settings.keybind("dump_debug", KeyCode::F3)) {
        return;
    }

    let mut out = String::new();
    let now = Utc::now();
    let _ = writeln!(out, "strider debug dump — {}", now.to_rfc3339());

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let _ = writeln!(out, "fps: {fps:.1}  frame_time: {frame_time:.3} ms");
    let _ = writeln!(out, "entities: {}", entities.iter().count());

    for actor in &actor_query {
        let _ = writeln!(out, "actor: {actor:#?}");
    }

    let mut sys = System::new();
    sys.refresh_processes();
    if let Ok(pid) = sysinfo::get_current_pid()
        && let Some(process) = sys.process(pid)
    {
        let _ = writeln!(out, "process memory: {} MiB", process.memory() / (1024 * 1024));
    }

    let filename = format!("debug-dumps/strider-{}.txt", now.format("%Y%m%d-%H%M%S"));
    if let Err(e) = fs::create_dir_all("debug-dumps").and_then(|()| fs::write(&filename, &out)) {
        eprintln!("Failed to write debug dump {filename}: {e}");
    } else {
        println!("Wrote debug dump to {filename}");
    }
}
