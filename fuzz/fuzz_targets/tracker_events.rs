#![no_main]

use libfuzzer_sys::fuzz_target;
use pointer_core::test_harness::{FakeHost, RecordingSink, check_lifecycle};
use pointer_core::{PointerTracker, RawEvent, RawEventKind};

const TRACK: (f32, f32) = (200.0, 50.0);

fn host_for(selector: u8) -> FakeHost {
    let host = match selector % 4 {
        0 => FakeHost::unified_pointer(),
        1 => FakeHost::touch_and_mouse(),
        2 => FakeHost::touch_and_mouse_without_capture(),
        _ => FakeHost::legacy_mouse(),
    };
    host.with_geometry((10.0, 20.0), TRACK)
}

/// Four bytes per event: kind, identity, x, y.
fn decode(chunk: &[u8]) -> RawEvent {
    let kind = RawEventKind::ALL[chunk[0] as usize % RawEventKind::ALL.len()];
    let id = u64::from(chunk[1] % 6);
    let x = f32::from(chunk[2]) * 1.5 - 60.0;
    let y = f32::from(chunk[3]) * 0.5 - 20.0;
    match kind.family() {
        pointer_core::DeviceFamily::Touch => {
            // High bit adds a second contact to the same event.
            if chunk[1] & 0x80 != 0 {
                RawEvent::touches(kind, &[(id, x, y), ((id + 1) % 6, y, x)])
            } else {
                RawEvent::touches(kind, &[(id, x, y)])
            }
        }
        pointer_core::DeviceFamily::Pointer => RawEvent::pointer(kind, id, x, y),
        pointer_core::DeviceFamily::Mouse => RawEvent::mouse(kind, x, y),
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let mut tracker = PointerTracker::attach(host_for(selector), RecordingSink::default());
    for chunk in rest.chunks_exact(4) {
        // `tracker-invariants` asserts capture bookkeeping after each event.
        tracker.handle_event(&decode(chunk));
    }

    if let Err(err) = check_lifecycle(tracker.sink().lines()) {
        panic!("lifecycle violated: {err}");
    }
    for line in tracker.sink().lines() {
        let mut parts = line.split(' ').skip(2);
        if let (Some(x), Some(y)) = (parts.next(), parts.next()) {
            let x: f32 = x.parse().expect("x");
            let y: f32 = y.parse().expect("y");
            assert!((0.0..=TRACK.0).contains(&x), "x out of bounds: {line}");
            assert!((0.0..=TRACK.1).contains(&y), "y out of bounds: {line}");
        }
    }

    let (host, _) = tracker.detach();
    assert!(host.listeners().is_empty(), "listeners leaked past detach");
});
