//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable using the RON watcher utilities (see
//! `ron::setup_ron_watcher`).
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_present_mode")]
    pub present_mode: String, // Window present mode (e.g., AutoNoVsync). Controls buffering/latency.
    #[serde(default = "GraphicsSettings::default_shadows")]
    pub shadows: bool, // Enable/disable directional light shadows
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_present_mode() -> String { "AutoNoVsync".to_string() }
    fn default_shadows() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            present_mode: Self::default_present_mode(),
            shadows: Self::default_shadows(),
        }
    }
}

/// Whether a press edge or a held button updates the walk destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickToMove {
    Press,
    Hold,
}

impl Default for ClickToMove {
    fn default() -> Self { ClickToMove::Press }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub click_to_move: ClickToMove, // Pointer semantics for destination picking
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("fast_move".to_string(), "LShift".to_string());
        m.insert("backflip".to_string(), "Space".to_string());
        m.insert("toggle_debug".to_string(), "F1".to_string());
        m.insert("dump_debug".to_string(), "F3".to_string());
        m
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            click_to_move: ClickToMove::default(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Character tuning that is safe to edit without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSettings {
    #[serde(default = "CharacterSettings::default_start_state")]
    pub start_state: String, // Animation state the character spawns in (by name)
}

impl CharacterSettings {
    fn default_start_state() -> String { "idle".to_string() }
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self { start_state: Self::default_start_state() }
    }
}

/// Atmosphere settings to configure the bevy_atmosphere crate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    #[serde(default = "AtmosphereSettings::default_enabled")]
    pub enabled: bool, // Enable the atmosphere (sky) renderer (requires a restart of runtime)
    #[serde(default = "AtmosphereSettings::default_resolution")]
    pub resolution: u32, // Resolution of each skybox face
    #[serde(default = "AtmosphereSettings::default_dithering")]
    pub dithering: bool, // Enable dithering to reduce color banding in the sky
}

impl AtmosphereSettings {
    fn default_enabled() -> bool { true }
    fn default_resolution() -> u32 { 512 }
    fn default_dithering() -> bool { true }
}

impl Default for AtmosphereSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            resolution: Self::default_resolution(),
            dithering: Self::default_dithering(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub character: CharacterSettings,
    #[serde(default)]
    pub atmosphere: AtmosphereSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Resolve a keybind by action name, falling back to `default` when the
    /// bind is missing or doesn't name a known key.
    ///
    /// # Arguments
    /// * `action` - action name in `controls.keybinds` (e.g., "fast_move")
    /// * `default` - key used when the bind is absent or unparseable
    #[must_use]
    pub fn keybind(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Self::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into
    /// a `KeyCode` usable with Bevy's input system.
    ///
    /// # Arguments
    /// * `name` - the string key identifier to convert (e.g., "W", "Space", "F1")
    ///
    /// # Returns
    /// The matching `KeyCode`, or `None` if the string is not a known key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        if s.len() == 1 {
            let c = s.chars().next().unwrap();
            if c.is_ascii_uppercase() {
                return Some(match c {
                    'A' => KeyCode::KeyA,
                    'B' => KeyCode::KeyB,
                    'C' => KeyCode::KeyC,
                    'D' => KeyCode::KeyD,
                    'E' => KeyCode::KeyE,
                    'F' => KeyCode::KeyF,
                    'G' => KeyCode::KeyG,
                    'H' => KeyCode::KeyH,
                    'I' => KeyCode::KeyI,
                    'J' => KeyCode::KeyJ,
                    'K' => KeyCode::KeyK,
                    'L' => KeyCode::KeyL,
                    'M' => KeyCode::KeyM,
                    'N' => KeyCode::KeyN,
                    'O' => KeyCode::KeyO,
                    'P' => KeyCode::KeyP,
                    'Q' => KeyCode::KeyQ,
                    'R' => KeyCode::KeyR,
                    'S' => KeyCode::KeyS,
                    'T' => KeyCode::KeyT,
                    'U' => KeyCode::KeyU,
                    'V' => KeyCode::KeyV,
                    'W' => KeyCode::KeyW,
                    'X' => KeyCode::KeyX,
                    'Y' => KeyCode::KeyY,
                    'Z' => KeyCode::KeyZ,
                    _ => return None,
                });
            }
            if c.is_ascii_digit() {
                return Some(match c {
                    '0' => KeyCode::Digit0,
                    '1' => KeyCode::Digit1,
                    '2' => KeyCode::Digit2,
                    '3' => KeyCode::Digit3,
                    '4' => KeyCode::Digit4,
                    '5' => KeyCode::Digit5,
                    '6' => KeyCode::Digit6,
                    '7' => KeyCode::Digit7,
                    '8' => KeyCode::Digit8,
                    '9' => KeyCode::Digit9,
                    _ => return None,
                });
            }
        }

        Some(match s.as_str() {
            // Function keys
            "F1" => KeyCode::F1,
            "F2" => KeyCode::F2,
            "F3" => KeyCode::F3,
            "F4" => KeyCode::F4,
            "F5" => KeyCode::F5,
            "F6" => KeyCode::F6,
            "F7" => KeyCode::F7,
            "F8" => KeyCode::F8,
            "F9" => KeyCode::F9,
            "F10" => KeyCode::F10,
            "F11" => KeyCode::F11,
            "F12" => KeyCode::F12,

            // Arrows / navigation
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" | "BACK" => KeyCode::Backspace,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

pub mod loader;
