//! Point-seeking locomotion and the per-frame animation state step.
//!
//! The core logic lives in `locomotion_step` so systems, tests and
//! benchmarks exercise identical code. Each frame the actor steps toward its
//! destination, picks an animation state by priority, and keeps its facing
//! aligned with the travel direction.

use bevy::prelude::*;

use crate::actor::{
    select_state, speed_for, Actor, AnimState, BACKFLIP_DURATION, CHARACTER_SCALE,
    DISTANCE_EPSILON, ROOT_HEIGHT_OFFSET, SPECIAL_HOLD_EPSILON,
};
use crate::settings::Settings;

/// Compute the normalized travel direction for this frame.
///
/// Returns zero while the actor is inside the stop band around the
/// destination, or while the backflip timer still holds it in place.
///
/// # Arguments
/// * `position` - current actor position
/// * `destination` - picked ground point to seek
/// * `special_timer` - remaining backflip time
#[must_use]
pub fn steer_direction(position: Vec3, destination: Vec3, special_timer: f32) -> Vec3 {
    if special_timer >= SPECIAL_HOLD_EPSILON {
        return Vec3::ZERO;
    }
    let delta = destination - position;
    if delta.length() > DISTANCE_EPSILON {
        delta.normalize()
    } else {
        Vec3::ZERO
    }
}

/// Step the *core* actor locomotion and state machine for one frame.
///
/// Order matters and is fixed:
/// 1. steer toward the destination (zero inside the stop band / during holds)
/// 2. select the animation state by priority, resetting the frame counter on
///    a transition
/// 3. advance the position with the newly selected state's speed
/// 4. count the backflip timer down while it is the active state
/// 5. arm the backflip if the action was pressed while stationary — checked
///    after the state machine ran, so the visual transition lands next frame
/// 6. re-aim the facing only while moving
///
/// # Arguments
/// * `actor` - actor state to mutate
/// * `fast_held` - fast-move modifier held this frame
/// * `action_pressed` - action key pressed this frame (edge)
/// * `dt` - frame delta time in seconds
pub fn locomotion_step(actor: &mut Actor, fast_held: bool, action_pressed: bool, dt: f32) {
    let direction = steer_direction(actor.position, actor.destination, actor.special_timer);
    let on_move = direction != Vec3::ZERO && actor.special_timer < SPECIAL_HOLD_EPSILON;

    let state = select_state(on_move, fast_held, actor.special_timer);
    if state != actor.state {
        actor.anim_frame = 0;
        actor.state_entered = true;
    }
    actor.state = state;
    actor.speed = speed_for(state);

    actor.position += direction * actor.speed * dt;

    if actor.state == AnimState::Backflip {
        actor.special_timer -= dt;
    }

    if action_pressed && !on_move {
        actor.special_timer = BACKFLIP_DURATION;
    }

    if on_move {
        actor.orientation = Quat::from_rotation_arc(Vec3::Z, direction);
    }
}

/// Compose the render transform for an actor: position lifted to the
/// skeleton root, normalized facing, fixed uniform scale.
#[must_use]
pub fn render_transform(actor: &Actor) -> Transform {
    Transform {
        translation: actor.position + Vec3::Y * ROOT_HEIGHT_OFFSET,
        rotation: actor.orientation.normalize(),
        scale: Vec3::splat(CHARACTER_SCALE),
    }
}

/// Run the locomotion step for every actor each frame.
///
/// # Arguments
/// * `time` - time resource for delta timing
/// * `kb` - keyboard input for the fast-move modifier and action key
/// * `settings` - keybind lookup
/// * `query` - actors to step
#[allow(clippy::needless_pass_by_value)]
pub fn actor_locomotion(
    time: Res<Time>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut query: Query<&mut Actor>,
) {
    let fast_key = settings.keybind("fast_move", KeyCode::ShiftLeft);
    let action_key = settings.keybind("backflip", KeyCode::Space);
    let dt = time.delta_seconds();

    for mut actor in &mut query {
        locomotion_step(
            &mut actor,
            kb.pressed(fast_key),
            kb.just_pressed(action_key),
            dt,
        );
    }
}

/// Write the derived render transform back to each actor's root entity.
pub fn sync_actor_transform(mut query: Query<(&Actor, &mut Transform)>) {
    for (actor, mut transform) in &mut query {
        *transform = render_transform(actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn inside_stop_band_direction_is_zero() {
        let pos = Vec3::new(1.0, 0.0, 1.0);
        let dest = pos + Vec3::new(0.05, 0.0, 0.05); // |delta| < 0.1
        assert_eq!(steer_direction(pos, dest, 0.0), Vec3::ZERO);

        let mut actor = Actor {
            position: pos,
            destination: dest,
            ..Default::default()
        };
        locomotion_step(&mut actor, false, false, 0.1);
        assert!(approx(actor.position, pos));
        assert_eq!(actor.state, AnimState::Idle);
    }

    #[test]
    fn outside_stop_band_direction_is_unit_toward_destination() {
        let pos = Vec3::ZERO;
        let dest = Vec3::new(3.0, 0.0, 4.0);
        let dir = steer_direction(pos, dest, 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(approx(dir, Vec3::new(0.6, 0.0, 0.8)));
    }

    #[test]
    fn walk_step_matches_worked_example() {
        // position (0,0,0), destination (1,0,0), dt 0.1 → walks 0.25 on x
        let mut actor = Actor {
            destination: Vec3::X,
            ..Default::default()
        };
        locomotion_step(&mut actor, false, false, 0.1);
        assert_eq!(actor.state, AnimState::Walk);
        assert_eq!(actor.anim_frame, 0);
        assert!(actor.state_entered);
        assert!(approx(actor.position, Vec3::new(0.25, 0.0, 0.0)));
    }

    #[test]
    fn frame_counter_resets_only_on_transition() {
        let mut actor = Actor {
            destination: Vec3::new(10.0, 0.0, 0.0),
            ..Default::default()
        };
        locomotion_step(&mut actor, false, false, 0.016);
        assert!(actor.state_entered);

        // simulate the sampler consuming the flag and advancing frames
        actor.state_entered = false;
        actor.anim_frame = 7;
        locomotion_step(&mut actor, false, false, 0.016);
        assert_eq!(actor.state, AnimState::Walk);
        assert_eq!(actor.anim_frame, 7); // no transition, no reset
        assert!(!actor.state_entered);
    }

    #[test]
    fn action_while_moving_does_not_arm_backflip() {
        let mut actor = Actor {
            destination: Vec3::new(5.0, 0.0, 0.0),
            ..Default::default()
        };
        locomotion_step(&mut actor, false, true, 0.016);
        assert_eq!(actor.special_timer, 0.0);
        assert_eq!(actor.state, AnimState::Walk);
    }

    #[test]
    fn action_while_stationary_arms_backflip_for_next_frame() {
        let mut actor = Actor::default();
        locomotion_step(&mut actor, false, true, 0.016);
        // armed this frame, state still idle until next frame
        assert_eq!(actor.special_timer, BACKFLIP_DURATION);
        assert_eq!(actor.state, AnimState::Idle);

        locomotion_step(&mut actor, false, false, 0.1);
        assert_eq!(actor.state, AnimState::Backflip);
        assert!((actor.special_timer - (BACKFLIP_DURATION - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn backflip_holds_position_until_timer_runs_out() {
        let mut actor = Actor {
            destination: Vec3::new(5.0, 0.0, 0.0),
            special_timer: BACKFLIP_DURATION,
            state: AnimState::Backflip,
            ..Default::default()
        };
        let dt = 0.1;
        let mut frames = 0;
        while actor.special_timer >= SPECIAL_HOLD_EPSILON {
            locomotion_step(&mut actor, false, false, dt);
            frames += 1;
            assert!(frames < 100, "timer never released the actor");
        }
        assert_eq!(actor.position, Vec3::ZERO);

        // next frame the actor is free to move again
        locomotion_step(&mut actor, false, false, dt);
        assert_eq!(actor.state, AnimState::Walk);
        assert!(actor.position.x > 0.0);
    }

    #[test]
    fn run_preempts_backflip_when_destination_arrives_mid_hold() {
        // small leftover below the hold threshold: moving with the modifier
        // held must select Run even though the timer is still positive
        let mut actor = Actor {
            destination: Vec3::new(5.0, 0.0, 0.0),
            special_timer: 0.05,
            ..Default::default()
        };
        locomotion_step(&mut actor, true, false, 0.016);
        assert_eq!(actor.state, AnimState::Run);
    }

    #[test]
    fn orientation_frozen_while_not_moving() {
        let facing = Quat::from_rotation_y(1.2);
        let mut actor = Actor {
            orientation: facing,
            ..Default::default()
        };
        locomotion_step(&mut actor, false, false, 0.016);
        assert_eq!(actor.orientation, facing);

        // and while held by a backflip, even with a far destination
        actor.destination = Vec3::new(5.0, 0.0, 0.0);
        actor.special_timer = 1.0;
        locomotion_step(&mut actor, false, false, 0.016);
        assert_eq!(actor.orientation, facing);
    }

    #[test]
    fn orientation_tracks_direction_while_moving() {
        let mut actor = Actor {
            destination: Vec3::new(0.0, 0.0, -5.0),
            ..Default::default()
        };
        locomotion_step(&mut actor, false, false, 0.016);
        let forward = actor.orientation * Vec3::Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn seek_converges_into_epsilon_band_and_holds() {
        let mut actor = Actor {
            destination: Vec3::new(2.0, 0.0, 0.0),
            ..Default::default()
        };
        for _ in 0..120 {
            locomotion_step(&mut actor, false, false, 1.0 / 60.0);
        }
        assert!((actor.destination - actor.position).length() <= DISTANCE_EPSILON + WALK_STEP);
        assert_eq!(actor.state, AnimState::Idle);

        let settled = actor.position;
        locomotion_step(&mut actor, false, false, 1.0 / 60.0);
        assert_eq!(actor.position, settled);
    }

    // largest distance one 60 Hz walk step can overshoot by
    const WALK_STEP: f32 = super::super::WALK_SPEED / 60.0;

    #[test]
    fn render_transform_lifts_and_scales() {
        let actor = Actor {
            position: Vec3::new(1.0, 0.0, 2.0),
            ..Default::default()
        };
        let tf = render_transform(&actor);
        assert_eq!(tf.translation, Vec3::new(1.0, ROOT_HEIGHT_OFFSET, 2.0));
        assert_eq!(tf.scale, Vec3::splat(CHARACTER_SCALE));
    }
}
