//! Actor components and systems (locomotion, animation, ground picking).
//!
//! The module provides the `Actor` component and the per-frame systems that
//! drive it: click-to-move destination picking, point-seeking locomotion with
//! a small animation state machine, and clip sampling on the scene's
//! animation player.
//!
//! # Example:
//!
//! ```
//! use strider::actor::{select_state, speed_for, AnimState};
//!
//! // moving with the fast modifier held selects Run regardless of any
//! // leftover backflip time
//! let state = select_state(true, true, 1.0);
//! assert_eq!(state, AnimState::Run);
//! assert_eq!(speed_for(state), 7.0);
//! ```
pub mod animation;
pub mod locomotion;
pub mod picking;

use bevy::prelude::*;

pub use animation::*;
pub use locomotion::*;
pub use picking::*;

// Locomotion tuning constants — shared by the live systems, tests and
// benchmarks.
pub const WALK_SPEED: f32 = 2.5;
pub const RUN_SPEED: f32 = 7.0;
/// Seconds the backflip holds the actor in place once triggered.
pub const BACKFLIP_DURATION: f32 = 1.7;
/// Distance band around the destination inside which the actor stops seeking.
pub const DISTANCE_EPSILON: f32 = 0.1;
/// Threshold under which the special timer no longer blocks locomotion.
pub const SPECIAL_HOLD_EPSILON: f32 = 0.1;
/// Vertical offset from the ground to the skeleton root.
pub const ROOT_HEIGHT_OFFSET: f32 = 1.0;
/// Uniform scale applied to the character scene.
pub const CHARACTER_SCALE: f32 = 0.4;

/// Mutually exclusive animation states of the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Run,
    Backflip,
}

impl AnimState {
    /// Lowercase display name, also accepted by `from_name`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Run => "run",
            AnimState::Backflip => "backflip",
        }
    }

    /// Parse a state name (case-insensitive). Returns `None` for names that
    /// don't match any state.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "idle" => Some(AnimState::Idle),
            "walk" => Some(AnimState::Walk),
            "run" => Some(AnimState::Run),
            "backflip" => Some(AnimState::Backflip),
            _ => None,
        }
    }
}

/// Select the animation state for this frame.
///
/// Priority: Run and Walk pre-empt everything while the actor is moving; the
/// backflip only shows while stationary with time left on its timer.
///
/// # Arguments
/// * `on_move` - whether the actor is actively seeking its destination
/// * `fast_held` - whether the fast-move modifier is held
/// * `special_timer` - remaining backflip time (may be negative)
#[must_use]
pub fn select_state(on_move: bool, fast_held: bool, special_timer: f32) -> AnimState {
    if on_move && fast_held {
        AnimState::Run
    } else if on_move {
        AnimState::Walk
    } else if special_timer > 0.0 {
        AnimState::Backflip
    } else {
        AnimState::Idle
    }
}

/// Movement speed for a state in world units per second.
///
/// Idle and Backflip return 0.0: the steering direction is zero in those
/// states, so no stale walk/run speed is carried across frames.
#[must_use]
pub fn speed_for(state: AnimState) -> f32 {
    match state {
        AnimState::Walk => WALK_SPEED,
        AnimState::Run => RUN_SPEED,
        AnimState::Idle | AnimState::Backflip => 0.0,
    }
}

/// Clip slot (index into the glTF animation list) for a state.
#[must_use]
pub fn clip_slot_for(state: AnimState) -> usize {
    match state {
        AnimState::Backflip => 0,
        AnimState::Idle => 1,
        AnimState::Run => 2,
        AnimState::Walk => 3,
    }
}

/// Component holding the simulated character state.
///
/// The actor's `Transform` is derived from this each frame; systems mutate
/// the actor, never the transform directly.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    /// Current world position (ground level, y = 0 on flat ground).
    pub position: Vec3,
    /// Last picked ground point; only pointer input overwrites this.
    pub destination: Vec3,
    /// Facing; frozen while not moving so the last heading is kept through
    /// idle and backflip holds.
    pub orientation: Quat,
    /// Current movement speed, assigned from `speed_for` each frame.
    pub speed: f32,
    /// Active animation state.
    pub state: AnimState,
    /// Frame counter into the active clip, modulo its frame count.
    pub anim_frame: u32,
    /// Backflip countdown. Not clamped at zero; only the threshold
    /// comparisons matter.
    pub special_timer: f32,
    /// True on the frame the state changed; consumed by clip sampling to
    /// restart the new clip at frame 0 instead of advancing.
    pub state_entered: bool,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            destination: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            speed: 0.0,
            state: AnimState::Idle,
            anim_frame: 0,
            special_timer: 0.0,
            state_entered: false,
        }
    }
}

impl Actor {
    /// Set the state by name, as used for the `character.start_state`
    /// setting. Unknown names are logged and ignored; the current state is
    /// retained.
    pub fn set_state_by_name(&mut self, name: &str) {
        match AnimState::from_name(name) {
            Some(state) => {
                if state != self.state {
                    self.state = state;
                    self.anim_frame = 0;
                    self.state_entered = true;
                }
            }
            None => {
                eprintln!("Unknown animation state '{name}', keeping '{}'", self.state.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_preempts_backflip_while_moving() {
        // leftover special time must not win while on the move
        assert_eq!(select_state(true, true, 1.0), AnimState::Run);
        assert_eq!(select_state(true, false, 1.0), AnimState::Walk);
    }

    #[test]
    fn backflip_only_shows_when_stationary() {
        assert_eq!(select_state(false, false, 0.5), AnimState::Backflip);
        assert_eq!(select_state(false, true, 0.5), AnimState::Backflip);
        assert_eq!(select_state(false, false, 0.0), AnimState::Idle);
        assert_eq!(select_state(false, false, -0.2), AnimState::Idle);
    }

    #[test]
    fn state_tables_are_fixed() {
        assert_eq!(speed_for(AnimState::Walk), 2.5);
        assert_eq!(speed_for(AnimState::Run), 7.0);
        assert_eq!(speed_for(AnimState::Idle), 0.0);
        assert_eq!(clip_slot_for(AnimState::Backflip), 0);
        assert_eq!(clip_slot_for(AnimState::Idle), 1);
        assert_eq!(clip_slot_for(AnimState::Run), 2);
        assert_eq!(clip_slot_for(AnimState::Walk), 3);
    }

    #[test]
    fn state_names_round_trip() {
        for state in [AnimState::Idle, AnimState::Walk, AnimState::Run, AnimState::Backflip] {
            assert_eq!(AnimState::from_name(state.name()), Some(state));
        }
        assert_eq!(AnimState::from_name("Backflip"), Some(AnimState::Backflip));
        assert_eq!(AnimState::from_name("cartwheel"), None);
    }

    #[test]
    fn unknown_start_state_is_ignored() {
        let mut actor = Actor::default();
        actor.set_state_by_name("cartwheel");
        assert_eq!(actor.state, AnimState::Idle);
        assert!(!actor.state_entered);

        actor.set_state_by_name("walk");
        assert_eq!(actor.state, AnimState::Walk);
        assert!(actor.state_entered);
        assert_eq!(actor.anim_frame, 0);
    }
}
