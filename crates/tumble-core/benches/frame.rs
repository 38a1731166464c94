//! Cost of one headless loop iteration (step, read poses, map to screen)

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tumble_core::scene::Scene;
use tumble_core::transform::{self, Viewport};
use tumble_core::{BodyId, Pose};

fn bench_frame(c: &mut Criterion) {
    c.bench_function("scene_frame", |b| {
        let mut scene = Scene::default();
        b.iter(|| black_box(scene.frame()));
    });
}

fn bench_to_screen(c: &mut Criterion) {
    let viewport = Viewport {
        width: 1280,
        height: 720,
        scale: 10.0,
    };
    let scene = Scene::default();
    let half = scene.half_extents(BodyId::Box);
    let size = scene.sprite_size(BodyId::Box);
    let pose = Pose {
        position: glam::Vec2::new(1.5, -3.25),
        angle: 0.4,
    };

    c.bench_function("to_screen", |b| {
        b.iter(|| transform::to_screen(black_box(pose), half, size, &viewport));
    });
}

criterion_group!(benches, bench_frame, bench_to_screen);
criterion_main!(benches);
