use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use gravicube_math::*;

fn bench_snap_to_nearest_axis(c: &mut Criterion) {
    let v = black_box(Vec3::new(0.0003, -0.99999, -0.0021));
    c.bench_function("snap_to_nearest_axis", |bencher| {
        bencher.iter(|| black_box(snap_to_nearest_axis(v)))
    });
}

fn bench_look_rotation(c: &mut Criterion) {
    let forward = black_box(Vec3::X);
    let up = black_box(Vec3::Z);
    c.bench_function("look_rotation", |bencher| {
        bencher.iter(|| black_box(look_rotation(forward, up)))
    });
}

fn bench_snap_orientation(c: &mut Criterion) {
    let q = black_box(Quat::from_rotation_x(1.5707));
    c.bench_function("snap_orientation", |bencher| {
        bencher.iter(|| {
            let down = snap_to_nearest_axis(q * LOCAL_DOWN);
            let forward = snap_to_nearest_axis(q * LOCAL_FORWARD);
            black_box(look_rotation(forward, -down))
        })
    });
}

criterion_group!(
    benches,
    bench_snap_to_nearest_axis,
    bench_look_rotation,
    bench_snap_orientation
);
criterion_main!(benches);
