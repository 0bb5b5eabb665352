use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use holo_scenes::animation::{AnimationDriver, FrameTime};
use holo_scenes::math::SceneRng;
use holo_scenes::render::{FrameBatch, MeshCache};
use holo_scenes::scenes::Showcase;
use holo_scenes::uniforms::UniformFeed;

const SHOWCASES: [Showcase; 3] = [Showcase::Holodeck, Showcase::Constellation, Showcase::Aurora];

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("showcase_build");
    group.sample_size(20);

    for showcase in SHOWCASES {
        group.bench_with_input(BenchmarkId::from_parameter(showcase), &showcase, |b, &showcase| {
            b.iter(|| {
                let mut rng = SceneRng::seeded(black_box(42));
                black_box(showcase.build(&mut rng))
            });
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for showcase in SHOWCASES {
        let mut graph = showcase.build(&mut SceneRng::seeded(42));
        let mut driver = AnimationDriver::new();
        let mut frame = 0;

        group.bench_function(BenchmarkId::new("driver_step", showcase), |b| {
            b.iter(|| {
                frame += 1;
                let time = FrameTime::fixed(frame, 60.0);
                let applied = driver.step(&mut graph, time);
                UniformFeed::push(&mut graph, time.elapsed);
                black_box(applied)
            });
        });

        let mut cache = MeshCache::new();
        let lighting = showcase.lighting();
        group.bench_function(BenchmarkId::new("batch", showcase), |b| {
            b.iter(|| black_box(FrameBatch::build(&graph, &mut cache, &lighting)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_frame);
criterion_main!(benches);
