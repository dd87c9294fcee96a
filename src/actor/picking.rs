//! Ground picking: project the cursor into the world to set the actor's
//! destination.
//!
//! A ray is cast from the cursor through the active camera and intersected
//! with the ground plane (through the origin, normal +Y). Whether a press
//! edge or a held button drives the pick is chosen by the `click_to_move`
//! setting.

use bevy::prelude::*;

use crate::actor::Actor;
use crate::settings::{ClickToMove, Settings};

/// Intersect a ray with the ground plane at y = 0.
///
/// # Arguments
/// * `origin` - ray origin in world space
/// * `direction` - ray direction (not required to be normalized)
///
/// # Returns
/// The intersection point, or `None` when the ray is parallel to the plane
/// or points away from it.
#[must_use]
pub fn ground_plane_intersection(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    let denom = direction.dot(Vec3::Y);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = -origin.dot(Vec3::Y) / denom;
    if t <= 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Update each actor's destination from pointer input.
///
/// # Arguments
/// * `windows` - primary window, for the cursor position
/// * `mouse` - mouse button state
/// * `settings` - press-vs-hold pick mode
/// * `camera_query` - the active camera used to build the pick ray
/// * `actors` - actors whose destination is overwritten on a pick
#[allow(clippy::needless_pass_by_value)]
pub fn update_destination(
    windows: Query<&Window>,
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<Settings>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut actors: Query<&mut Actor>,
) {
    let active = match settings.controls.click_to_move {
        ClickToMove::Press => mouse.just_pressed(MouseButton::Left),
        ClickToMove::Hold => mouse.pressed(MouseButton::Left),
    };
    if !active {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    let Ok((camera, camera_transform)) = camera_query.get_single() else { return };

    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else { return };

    if let Some(point) = ground_plane_intersection(ray.origin, *ray.direction) {
        for mut actor in &mut actors {
            actor.destination = point;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_down_hits_plane_below() {
        let hit = ground_plane_intersection(Vec3::new(2.0, 10.0, -3.0), Vec3::NEG_Y)
            .expect("should hit the ground");
        assert_eq!(hit, Vec3::new(2.0, 0.0, -3.0));
    }

    #[test]
    fn oblique_ray_lands_where_expected() {
        // from (0,5,0) at 45 degrees toward +x
        let dir = Vec3::new(1.0, -1.0, 0.0);
        let hit = ground_plane_intersection(Vec3::new(0.0, 5.0, 0.0), dir).expect("hit");
        assert!((hit - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn parallel_ray_misses() {
        assert!(ground_plane_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn ray_pointing_away_misses() {
        // looking up from above the plane never reaches it
        assert!(ground_plane_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::Y).is_none());
    }

    #[test]
    fn unnormalized_direction_gives_same_point() {
        let a = ground_plane_intersection(Vec3::new(1.0, 4.0, 1.0), Vec3::new(0.5, -1.0, 0.0));
        let b = ground_plane_intersection(Vec3::new(1.0, 4.0, 1.0), Vec3::new(1.0, -2.0, 0.0));
        let (a, b) = (a.expect("hit"), b.expect("hit"));
        assert!((a - b).length() < 1e-4);
    }
}
