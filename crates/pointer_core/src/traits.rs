//! Seams between the tracker, the host platform and the consumer.
//!
//! # Design Principles
//!
//! - The tracker never talks to a windowing system directly. Everything it
//!   needs from the platform goes through [`PointerHost`].
//! - Consumers see only the unified protocol through [`DrawSink`]; they never
//!   receive raw platform events.

use crate::geometry::{Offset, Size};
use crate::id::{PointerId, SurfaceId};
use crate::model::{Capabilities, Listener, StyleHint};

/// The target surface and the platform it lives on.
pub trait PointerHost {
    /// Probed once when a tracker attaches.
    fn capabilities(&self) -> Capabilities;

    fn surface_id(&self) -> SurfaceId;

    /// Offsets of the target and each offset parent, target first.
    fn offset_chain(&self) -> Vec<Offset>;

    fn surface_size(&self) -> Size;

    fn add_listener(&mut self, listener: Listener);

    fn remove_listener(&mut self, listener: Listener);

    /// Per-pointer capture of the unified pointer model.
    fn set_pointer_capture(&mut self, id: PointerId);

    fn release_pointer_capture(&mut self, id: PointerId);

    /// Element-level mouse capture.
    fn set_capture(&mut self);

    fn release_capture(&mut self);

    fn apply_style_hint(&mut self, hint: StyleHint);
}

/// Consumer of the unified begin/extend/end protocol.
///
/// For one pointer identity the calls always arrive as one `on_begin`, zero
/// or more `on_extend`, then exactly one `on_end`.
pub trait DrawSink {
    /// `x`/`y` are target-local and within the surface bounds.
    fn on_begin(&mut self, surface: SurfaceId, id: PointerId, x: f32, y: f32);

    /// Only called when the position actually changed.
    fn on_extend(&mut self, surface: SurfaceId, id: PointerId, x: f32, y: f32);

    fn on_end(&mut self, surface: SurfaceId, id: PointerId);

    /// Human-readable diagnostics, possibly multi-line.
    fn on_log(&mut self, _message: &str) {}
}

impl<T: DrawSink + ?Sized> DrawSink for &mut T {
    fn on_begin(&mut self, surface: SurfaceId, id: PointerId, x: f32, y: f32) {
        (**self).on_begin(surface, id, x, y)
    }

    fn on_extend(&mut self, surface: SurfaceId, id: PointerId, x: f32, y: f32) {
        (**self).on_extend(surface, id, x, y)
    }

    fn on_end(&mut self, surface: SurfaceId, id: PointerId) {
        (**self).on_end(surface, id)
    }

    fn on_log(&mut self, message: &str) {
        (**self).on_log(message)
    }
}
