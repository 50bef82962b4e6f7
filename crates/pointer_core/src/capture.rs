//! Capture acquisition and release.
//!
//! Capture keeps move/up events flowing to the tracker while a pointer is
//! outside the target. Touch contacts are implicitly captured by the platform
//! and need nothing here.

use std::collections::BTreeSet;

use crate::event::DeviceFamily;
use crate::id::PointerId;
use crate::model::{DOCUMENT_FALLBACK_LISTENERS, EventModel, MouseCapture};
use crate::traits::PointerHost;

/// Capture state for one attached target.
///
/// Mouse capture is engaged iff at least one mouse-family pointer is down;
/// every engage is paired with exactly one disengage.
#[derive(Debug, Default)]
pub struct CaptureSession {
    mouse_holders: usize,
    mouse_engaged: Option<MouseCapture>,
    pointer_captures: BTreeSet<PointerId>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether mouse capture (primitive or document fallback) is active.
    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.mouse_engaged.is_some()
    }

    /// Number of mouse-family pointers holding the session open.
    #[inline]
    pub fn mouse_holders(&self) -> usize {
        self.mouse_holders
    }

    /// Unified-model pointers currently holding per-pointer capture.
    pub fn captured_pointers(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.pointer_captures.iter().copied()
    }

    pub(crate) fn acquire<H: PointerHost + ?Sized>(
        &mut self,
        host: &mut H,
        model: EventModel,
        family: DeviceFamily,
        id: PointerId,
    ) {
        match family {
            DeviceFamily::Pointer if model == EventModel::UnifiedPointer => {
                if self.pointer_captures.insert(id) {
                    log::trace!(target: "pointer.capture", "set pointer capture {id}");
                    host.set_pointer_capture(id);
                }
            }
            DeviceFamily::Mouse => {
                let Some(mode) = model.mouse_capture() else {
                    return;
                };
                self.mouse_holders += 1;
                if self.mouse_holders == 1 && self.mouse_engaged.is_none() {
                    engage(host, mode);
                    self.mouse_engaged = Some(mode);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn release<H: PointerHost + ?Sized>(
        &mut self,
        host: &mut H,
        model: EventModel,
        family: DeviceFamily,
        id: PointerId,
    ) {
        match family {
            DeviceFamily::Pointer if model == EventModel::UnifiedPointer => {
                if self.pointer_captures.remove(&id) {
                    log::trace!(target: "pointer.capture", "release pointer capture {id}");
                    host.release_pointer_capture(id);
                }
            }
            DeviceFamily::Mouse => {
                if model.mouse_capture().is_none() || self.mouse_holders == 0 {
                    return;
                }
                self.mouse_holders -= 1;
                if self.mouse_holders == 0
                    && let Some(mode) = self.mouse_engaged.take()
                {
                    disengage(host, mode);
                }
            }
            _ => {}
        }
    }

    /// Release everything still held. Used when detaching.
    pub(crate) fn teardown<H: PointerHost + ?Sized>(&mut self, host: &mut H) {
        for id in std::mem::take(&mut self.pointer_captures) {
            host.release_pointer_capture(id);
        }
        if let Some(mode) = self.mouse_engaged.take() {
            disengage(host, mode);
        }
        self.mouse_holders = 0;
    }
}

fn engage<H: PointerHost + ?Sized>(host: &mut H, mode: MouseCapture) {
    log::trace!(target: "pointer.capture", "engage mouse capture via {mode:?}");
    match mode {
        MouseCapture::Primitive => host.set_capture(),
        MouseCapture::DocumentListeners => {
            for listener in DOCUMENT_FALLBACK_LISTENERS {
                host.add_listener(listener);
            }
        }
    }
}

fn disengage<H: PointerHost + ?Sized>(host: &mut H, mode: MouseCapture) {
    log::trace!(target: "pointer.capture", "disengage mouse capture via {mode:?}");
    match mode {
        MouseCapture::Primitive => host.release_capture(),
        MouseCapture::DocumentListeners => {
            for listener in DOCUMENT_FALLBACK_LISTENERS {
                host.remove_listener(listener);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{FakeHost, HostCall};

    const PRIMITIVE: EventModel = EventModel::TouchAndMouse {
        mouse_capture: MouseCapture::Primitive,
    };

    #[test]
    fn mouse_capture_engages_once_and_releases_once() {
        let mut host = FakeHost::touch_and_mouse();
        let mut session = CaptureSession::new();
        let id = PointerId::MOUSE;

        session.acquire(&mut host, PRIMITIVE, DeviceFamily::Mouse, id);
        assert!(session.is_engaged());
        assert!(host.has_mouse_capture());

        session.release(&mut host, PRIMITIVE, DeviceFamily::Mouse, id);
        assert!(!session.is_engaged());
        // A stray second release must not reach the host.
        session.release(&mut host, PRIMITIVE, DeviceFamily::Mouse, id);

        assert_eq!(host.calls(), &[HostCall::SetCapture, HostCall::ReleaseCapture]);
    }

    #[test]
    fn touch_needs_no_capture() {
        let mut host = FakeHost::touch_and_mouse();
        let mut session = CaptureSession::new();
        session.acquire(&mut host, PRIMITIVE, DeviceFamily::Touch, PointerId::from_raw(0));
        session.release(&mut host, PRIMITIVE, DeviceFamily::Touch, PointerId::from_raw(0));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn legacy_model_uses_the_primitive() {
        let mut host = FakeHost::legacy_mouse();
        let mut session = CaptureSession::new();
        let model = EventModel::LegacyMouseCapture;
        session.acquire(&mut host, model, DeviceFamily::Mouse, PointerId::MOUSE);
        session.release(&mut host, model, DeviceFamily::Mouse, PointerId::MOUSE);
        assert_eq!(host.calls(), &[HostCall::SetCapture, HostCall::ReleaseCapture]);
    }

    #[test]
    fn teardown_releases_outstanding_captures() {
        let mut host = FakeHost::touch_and_mouse_without_capture();
        let mut session = CaptureSession::new();
        let model = EventModel::TouchAndMouse {
            mouse_capture: MouseCapture::DocumentListeners,
        };
        session.acquire(&mut host, model, DeviceFamily::Mouse, PointerId::MOUSE);
        assert_eq!(host.document_listener_count(), 2);

        session.teardown(&mut host);
        assert_eq!(host.document_listener_count(), 0);
        assert!(!session.is_engaged());
        assert_eq!(session.mouse_holders(), 0);
    }

    #[test]
    fn unified_capture_is_per_pointer() {
        let mut host = FakeHost::unified_pointer();
        let mut session = CaptureSession::new();
        let model = EventModel::UnifiedPointer;
        let a = PointerId::from_raw(2);
        let b = PointerId::from_raw(3);
        session.acquire(&mut host, model, DeviceFamily::Pointer, a);
        session.acquire(&mut host, model, DeviceFamily::Pointer, b);
        session.release(&mut host, model, DeviceFamily::Pointer, a);
        assert_eq!(host.pointer_captures().collect::<Vec<_>>(), vec![b]);
        assert!(!session.is_engaged());
    }
}
