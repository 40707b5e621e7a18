use criterion::{black_box, criterion_group, criterion_main, Criterion};

use posekit_poser_core::{Pose, PoseMap, Poser, PoserProps, RawValue, SetOptions};

fn bench_pose_set(c: &mut Criterion) {
    c.bench_function("set_and_advance_16_values", |b| {
        let mut poses = PoseMap::default();
        let mut open = Pose::default();
        let mut closed = Pose::default();
        for i in 0..16 {
            open = open.with_target(&format!("v{i}"), RawValue::n(100.0));
            closed = closed.with_target(&format!("v{i}"), RawValue::n(0.0));
        }
        poses.insert("open".to_string(), open);
        poses.insert("closed".to_string(), closed);

        let mut poser = Poser::new(PoserProps::new(poses));
        let options = SetOptions::default();
        let mut toggle = false;
        b.iter(|| {
            let name = if toggle { "open" } else { "closed" };
            toggle = !toggle;
            let tid = poser.set(black_box(name), &options);
            for _ in 0..4 {
                poser.advance(0.004);
            }
            black_box(tid);
        });
    });
}

criterion_group!(benches, bench_pose_set);
criterion_main!(benches);
