use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chuzzle_board::core::{GenerationHeuristic, MatchDetector, SimpleRng};
use chuzzle_board::engine::PuzzleEngine;
use chuzzle_board::types::{BoardConfig, Cell, DragDelta, GenerationPolicy};

fn bench_full_scan(c: &mut Criterion) {
    let heuristic = GenerationHeuristic::new(3, 3, GenerationPolicy::Local);
    let grid = heuristic.generate(32, 32, &mut SimpleRng::new(12345)).unwrap();
    let detector = MatchDetector::default();

    c.bench_function("find_all_match_groups_32x32", |b| {
        b.iter(|| detector.find_all_match_groups(black_box(&grid)))
    });
}

fn bench_shift(c: &mut Criterion) {
    let heuristic = GenerationHeuristic::new(7, 3, GenerationPolicy::Local);
    let mut grid = heuristic.generate(6, 6, &mut SimpleRng::new(12345)).unwrap();

    c.bench_function("shift_row_6", |b| {
        b.iter(|| grid.shift_row(black_box(2), black_box(-1)))
    });
    c.bench_function("shift_column_6", |b| {
        b.iter(|| grid.shift_column(black_box(3), black_box(2)))
    });
}

fn bench_generation(c: &mut Criterion) {
    for policy in [GenerationPolicy::Local, GenerationPolicy::Strict] {
        let heuristic = GenerationHeuristic::new(7, 3, policy);
        let mut rng = SimpleRng::new(12345);
        c.bench_function(&format!("generate_6x6_{}", policy.as_str()), |b| {
            b.iter(|| heuristic.generate(6, 6, &mut rng))
        });
    }
}

fn bench_gesture(c: &mut Criterion) {
    let mut engine = PuzzleEngine::new(BoardConfig::default(), 12345).unwrap();

    c.bench_function("gesture_press_drag_release", |b| {
        b.iter(|| {
            let _ = engine.on_press_start(black_box(Cell::new(2, 2)));
            let _ = engine.on_drag_delta(black_box(DragDelta::new(0.5, 0.1)));
            let _ = engine.on_drag_delta(black_box(DragDelta::new(0.8, 0.0)));
            engine.on_release()
        })
    });
}

criterion_group!(
    benches,
    bench_full_scan,
    bench_shift,
    bench_generation,
    bench_gesture
);
criterion_main!(benches);
