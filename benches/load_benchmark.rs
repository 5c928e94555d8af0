use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hand_replay::parse::load_frames_from_string;
use hand_replay::playback::PlaybackController;
use hand_replay::pose::PoseRenderer;
use hand_replay::topology::Topology;
use serde_json::{json, Map, Value};

/// `frames` frames of two 21-joint hands, nested layout on the left, structured on the right.
fn synthetic_capture(frames: usize) -> String {
    let mut root = Map::new();
    for frame in 0..frames {
        let t = frame as f64 * 0.01;
        let nested: Vec<Value> = (0..21).map(|j| json!([t, j as f64 * 0.01, 0.0])).collect();
        let structured: Vec<Value> = (0..21)
            .map(|j| json!({"x": t, "y": j as f64 * 0.01, "z": 0.0}))
            .collect();
        root.insert(
            frame.to_string(),
            json!({
                "left_hands": [[nested]],
                "right_hands": [{"joints": structured, "wrist_orientation": {"x": 0.2, "y": 0.0, "z": 0.0}}]
            }),
        );
    }
    Value::Object(root).to_string()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let capture = synthetic_capture(2000);

    let mut group = c.benchmark_group("sample-size-example");
    group.sample_size(10);
    group.bench_function("load 2000 frames", |b| {
        b.iter(|| black_box(load_frames_from_string(&capture, Topology::Full).unwrap()))
    });
    group.bench_function("replay 2000 frames", |b| {
        let store = load_frames_from_string(&capture, Topology::Full).unwrap();
        b.iter(|| {
            let renderer = PoseRenderer::new(Topology::Full);
            let mut controller = PlaybackController::new(store.clone(), 30.0, renderer).unwrap();
            controller.on_toggle_play();
            black_box(controller.on_time_advanced(2000.0 / 30.0))
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
