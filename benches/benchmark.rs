use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bevy::math::Vec3;
use strider::actor::{
    ground_plane_intersection, locomotion_step, select_state, steer_direction, Actor,
};

/// Walk an actor all the way to a destination, one 60 Hz frame at a time.
fn bench_seek_convergence(c: &mut Criterion) {
    c.bench_function("seek_convergence", |b| {
        b.iter(|| {
            let mut actor = Actor {
                destination: Vec3::new(10.0, 0.0, 7.0),
                ..Default::default()
            };
            for _ in 0..600 {
                locomotion_step(&mut actor, false, false, 1.0 / 60.0);
            }
            black_box(actor.position);
        })
    });
}

/// Steering math alone, over randomized destinations (deterministic LCG).
fn bench_steer_random(c: &mut Criterion) {
    c.bench_function("steer_random", |b| {
        b.iter(|| {
            let mut state: u32 = 0x1234_5678;
            let mut acc = Vec3::ZERO;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let x = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 20.0 - 10.0;
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let z = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 20.0 - 10.0;
                acc += steer_direction(Vec3::ZERO, Vec3::new(x, 0.0, z), 0.0);
            }
            black_box(acc);
        })
    });
}

/// State selection across all flag combinations.
fn bench_state_selection(c: &mut Criterion) {
    c.bench_function("state_selection", |b| {
        b.iter(|| {
            for i in 0..1_000usize {
                let on_move = i & 1 == 0;
                let fast = i & 2 == 0;
                let timer = (i % 5) as f32 * 0.5 - 0.5;
                black_box(select_state(
                    black_box(on_move),
                    black_box(fast),
                    black_box(timer),
                ));
            }
        })
    });
}

/// Ground-plane picking rays from a moving eye point.
fn bench_ground_pick(c: &mut Criterion) {
    c.bench_function("ground_pick", |b| {
        b.iter(|| {
            for i in 0..1_000usize {
                let t = i as f32 * 0.01;
                let origin = Vec3::new(t.sin() * 5.0, 7.0, t.cos() * 5.0 - 9.0);
                let dir = (Vec3::new(t.cos() * 3.0, 0.0, t.sin() * 3.0) - origin).normalize();
                black_box(ground_plane_intersection(black_box(origin), black_box(dir)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_seek_convergence,
    bench_steer_random,
    bench_state_selection,
    bench_ground_pick
);
criterion_main!(benches);
