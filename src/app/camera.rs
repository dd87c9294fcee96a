//! Chase camera that trails the actor.
//!
//! The camera keeps a fixed world-space offset from the actor with a little
//! exponential smoothing, and always looks at the character's root. Mouse
//! picking uses this camera to build its rays.
use bevy::prelude::*;

use strider::actor::{Actor, ROOT_HEIGHT_OFFSET};

/// How quickly the camera closes the gap to its target position (1/s).
const FOLLOW_RATE: f32 = 5.0;

/// Fixed-offset follow camera component.
#[derive(Component)]
pub struct ChaseCamera {
    /// Offset from the actor position to the camera, in world space.
    pub offset: Vec3,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 7.0, -9.0),
        }
    }
}

/// Move chase cameras toward their target position each frame.
///
/// # Arguments
/// * `time` - delta time for framerate-independent smoothing
/// * `actors` - the followed actor
/// * `cameras` - chase cameras to move
#[allow(clippy::needless_pass_by_value)]
pub fn follow_camera(
    time: Res<Time>,
    actors: Query<&Actor>,
    mut cameras: Query<(&ChaseCamera, &mut Transform), Without<Actor>>,
) {
    let Ok(actor) = actors.get_single() else { return };
    let focus = actor.position + Vec3::Y * ROOT_HEIGHT_OFFSET;

    let blend = 1.0 - (-FOLLOW_RATE * time.delta_seconds()).exp();
    for (chase, mut transform) in &mut cameras {
        let target = actor.position + chase.offset;
        transform.translation = transform.translation.lerp(target, blend);
        transform.look_at(focus, Vec3::Y);
    }
}
