//! Layout and controller benchmarks.
//!
//! Run with: `cargo bench -p carousel --bench layout_benchmarks`

use std::time::Duration;

use carousel::testing::ManualScheduler;
use carousel::{CarouselState, Edge, InteractionController, PointerEvent, layout};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let minutes: Vec<String> = (0..60).map(|m| format!("{m:02}")).collect();

    for spacing in [2.0, 8.5, 20.0] {
        group.bench_with_input(BenchmarkId::new("spacing", spacing), &spacing, |b, &spacing| {
            b.iter(|| layout(black_box(&minutes), black_box(37.35), spacing))
        });
    }

    group.bench_function("state_sweep", |b| {
        let mut state = CarouselState::new(minutes.clone(), 8.5);
        b.iter(|| {
            for step in 0..100 {
                state.set_offset(step as f64 * 0.1);
                black_box(state.layout());
            }
        })
    });

    group.finish();
}

fn bench_click(c: &mut Criterion) {
    c.bench_function("click_timeline", |b| {
        b.iter(|| {
            let scheduler = ManualScheduler::new();
            let mut controller = InteractionController::new(scheduler.clone(), 0.0);
            controller.handle_pointer(PointerEvent::mouse_down(Edge::Bottom));
            controller.handle_pointer(PointerEvent::Release);
            scheduler.advance(&mut controller, Duration::from_millis(800))
        })
    });
}

criterion_group!(benches, bench_layout, bench_click);
criterion_main!(benches);
