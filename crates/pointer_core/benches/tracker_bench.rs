use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use pointer_core::test_harness::{FakeHost, RecordingSink};
use pointer_core::{DrawSink, PointerId, PointerTracker, RawEvent, RawEventKind, SurfaceId};

const DRAG_SAMPLES: usize = 10_000;
const TOUCH_CONTACTS: u64 = 10;

/// Sink that only counts, so the benchmark measures the tracker itself.
#[derive(Default)]
struct CountingSink {
    calls: usize,
}

impl DrawSink for CountingSink {
    fn on_begin(&mut self, _: SurfaceId, _: PointerId, _: f32, _: f32) {
        self.calls += 1;
    }

    fn on_extend(&mut self, _: SurfaceId, _: PointerId, _: f32, _: f32) {
        self.calls += 1;
    }

    fn on_end(&mut self, _: SurfaceId, _: PointerId) {
        self.calls += 1;
    }
}

fn track_host() -> FakeHost {
    FakeHost::touch_and_mouse().with_geometry((10.0, 20.0), (200.0, 50.0))
}

fn make_mouse_drag(samples: usize) -> Vec<RawEvent> {
    let mut events = Vec::with_capacity(samples + 2);
    events.push(RawEvent::mouse(RawEventKind::MouseDown, 15.0, 30.0));
    for i in 0..samples {
        // Sweeps past both ends of the track so clamping is exercised.
        let x = (i % 400) as f32 - 100.0;
        events.push(RawEvent::mouse(RawEventKind::MouseMove, x, 30.0));
    }
    events.push(RawEvent::mouse(RawEventKind::MouseUp, 15.0, 30.0));
    events
}

fn make_multi_touch(samples: usize) -> Vec<RawEvent> {
    let contacts = |dx: f32| -> Vec<(u64, f32, f32)> {
        (0..TOUCH_CONTACTS)
            .map(|id| (id, 10.0 + id as f32 * 18.0 + dx, 30.0))
            .collect()
    };
    let mut events = Vec::with_capacity(samples + 2);
    events.push(RawEvent::touches(RawEventKind::TouchStart, &contacts(0.0)));
    for i in 0..samples {
        events.push(RawEvent::touches(RawEventKind::TouchMove, &contacts((i % 7) as f32)));
    }
    events.push(RawEvent::touches(RawEventKind::TouchEnd, &contacts(0.0)));
    events
}

fn bench_mouse_drag(c: &mut Criterion) {
    let events = make_mouse_drag(DRAG_SAMPLES);
    c.bench_function("bench_mouse_drag", |b| {
        b.iter_batched(
            || PointerTracker::attach(track_host(), CountingSink::default()),
            |mut tracker| {
                for event in &events {
                    black_box(tracker.handle_event(black_box(event)));
                }
                black_box(tracker.sink().calls);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_multi_touch(c: &mut Criterion) {
    let events = make_multi_touch(DRAG_SAMPLES / 10);
    c.bench_function("bench_multi_touch", |b| {
        b.iter_batched(
            || PointerTracker::attach(track_host(), CountingSink::default()),
            |mut tracker| {
                for event in &events {
                    black_box(tracker.handle_event(black_box(event)));
                }
                black_box(tracker.sink().calls);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_idle_hover(c: &mut Criterion) {
    let hover = RawEvent::mouse(RawEventKind::MouseMove, 50.0, 30.0);
    let mut tracker = PointerTracker::attach(track_host(), RecordingSink::default());
    c.bench_function("bench_idle_hover", |b| {
        b.iter(|| black_box(tracker.handle_event(black_box(&hover))));
    });
}

criterion_group!(benches, bench_mouse_drag, bench_multi_touch, bench_idle_hover);
criterion_main!(benches);
