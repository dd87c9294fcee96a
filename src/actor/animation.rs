//! Clip library and skeletal pose sampling for the character.
//!
//! Clips come from the character glTF in file order, so the state machine's
//! clip slots index straight into them. Playback is frame-driven: the actor
//! advances a frame counter each update and the animation player is sought to
//! that frame, with the player's own clock disabled.

use std::time::Duration;

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::actor::{clip_slot_for, Actor, AnimState};

/// Asset path of the character model and its animation clips.
pub const CHARACTER_GLTF: &str = "models/character.glb";

/// Fixed sample rate the frame counter runs at.
pub const CLIP_SAMPLE_FPS: f32 = 60.0;

/// Advance a clip frame counter by one, wrapping at the clip length.
#[must_use]
pub fn advance_frame(frame: u32, frame_count: u32) -> u32 {
    if frame_count == 0 {
        return 0;
    }
    (frame + 1) % frame_count
}

/// Number of frames in a clip of the given duration at the fixed sample rate.
/// Never returns 0 so the wrap-around modulo stays well defined.
#[must_use]
pub fn clip_frame_count(duration_secs: f32) -> u32 {
    let frames = (duration_secs * CLIP_SAMPLE_FPS).round();
    if frames < 1.0 { 1 } else { frames as u32 }
}

/// Handle to the character glTF while it loads.
#[derive(Resource)]
pub struct CharacterAssets {
    pub gltf: Handle<Gltf>,
    /// Set once loading finished or failed, so the build system stops polling.
    pub resolved: bool,
}

/// Animation graph nodes and frame counts for the loaded clips, indexed by
/// clip slot. Absent as a resource when the glTF carried no clips; sampling
/// systems skip silently in that case.
#[derive(Resource)]
pub struct ClipLibrary {
    pub graph: Handle<AnimationGraph>,
    nodes: Vec<AnimationNodeIndex>,
    frame_counts: Vec<u32>,
}

impl ClipLibrary {
    /// Graph node and frame count for a clip slot, or `None` when the glTF
    /// held fewer clips than the state machine expects.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<(AnimationNodeIndex, u32)> {
        let node = self.nodes.get(slot)?;
        let frames = self.frame_counts.get(slot)?;
        Some((*node, *frames))
    }
}

/// Marker for animation player entities already bound to the clip library.
#[derive(Component)]
pub struct ActorAnimTarget;

/// Build the `ClipLibrary` once the character glTF has loaded.
///
/// Logs and gives up (leaving no library installed) when loading fails or
/// the file has no animations; the character then renders unposed.
///
/// # Arguments
/// * `commands` - used to insert the `ClipLibrary` resource
/// * `asset_server` - for load-failure detection
/// * `gltfs` - loaded glTF assets
/// * `clips` - loaded clips, for per-clip durations
/// * `graphs` - graph asset storage the new graph is added to
/// * `assets` - pending character asset handle
#[allow(clippy::needless_pass_by_value)]
pub fn build_clip_library(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut assets: ResMut<CharacterAssets>,
) {
    if assets.resolved {
        return;
    }

    let Some(gltf) = gltfs.get(&assets.gltf) else {
        if matches!(asset_server.load_state(assets.gltf.id()), LoadState::Failed(_)) {
            eprintln!("Failed to load character animations from {CHARACTER_GLTF}");
            assets.resolved = true;
        }
        return;
    };
    assets.resolved = true;

    if gltf.animations.is_empty() {
        eprintln!("{CHARACTER_GLTF} has no animation clips; pose sampling disabled");
        return;
    }

    let mut graph = AnimationGraph::new();
    let nodes: Vec<AnimationNodeIndex> = graph
        .add_clips(gltf.animations.iter().cloned(), 1.0, graph.root)
        .collect();

    let frame_counts: Vec<u32> = gltf
        .animations
        .iter()
        .map(|handle| clips.get(handle).map_or(1, |clip| clip_frame_count(clip.duration())))
        .collect();

    println!("Loaded {} character clips from {CHARACTER_GLTF}", nodes.len());

    commands.insert_resource(ClipLibrary {
        graph: graphs.add(graph),
        nodes,
        frame_counts,
    });
}

/// Attach the graph and transitions to the scene's animation player once
/// both exist, starting on the idle clip.
pub fn bind_animation_player(
    mut commands: Commands,
    library: Option<Res<ClipLibrary>>,
    mut players: Query<(Entity, &mut AnimationPlayer), Without<ActorAnimTarget>>,
) {
    let Some(library) = library else { return };
    let Some((idle_node, _)) = library.slot(clip_slot_for(AnimState::Idle)) else { return };

    for (entity, mut player) in &mut players {
        let mut transitions = AnimationTransitions::new();
        transitions
            .play(&mut player, idle_node, Duration::ZERO)
            .repeat()
            .set_speed(0.0); // the frame counter drives playback, not the clock
        commands
            .entity(entity)
            .insert((library.graph.clone(), transitions, ActorAnimTarget));
    }
}

/// Advance the actor's frame counter and seek the animation player to it.
///
/// On the frame a state was entered the new clip restarts at frame 0 (hard
/// switch, no crossfade); every other frame the counter advances by one,
/// wrapping at the clip length. Without a `ClipLibrary` this skips entirely.
#[allow(clippy::needless_pass_by_value)]
pub fn sample_pose(
    library: Option<Res<ClipLibrary>>,
    mut actors: Query<&mut Actor>,
    mut players: Query<(&mut AnimationPlayer, &mut AnimationTransitions), With<ActorAnimTarget>>,
) {
    let Some(library) = library else { return };
    let Ok(mut actor) = actors.get_single_mut() else { return };
    let Some((node, frame_count)) = library.slot(clip_slot_for(actor.state)) else { return };

    let entered = actor.state_entered;
    actor.state_entered = false;
    if !entered {
        actor.anim_frame = advance_frame(actor.anim_frame, frame_count);
    }
    let seek = actor.anim_frame as f32 / CLIP_SAMPLE_FPS;

    for (mut player, mut transitions) in &mut players {
        if entered {
            transitions
                .play(&mut player, node, Duration::ZERO)
                .repeat()
                .set_speed(0.0);
        }
        if let Some(active) = player.animation_mut(node) {
            active.seek_to(seek);
        }
    }
}
