//! # pointer_core
//!
//! Host-agnostic pointer normalization for drag interactions.
//!
//! Mouse events, legacy Microsoft pointer events and touch events are
//! reduced to one protocol: `on_begin` / `on_extend` / `on_end`, each with a
//! stable per-pointer identity and coordinates clamped to the target surface.
//!
//! - [`PointerTracker`]: the per-target state machine
//! - [`PointerHost`]: what the tracker needs from the platform
//! - [`DrawSink`]: what consumers implement
//! - [`select_event_model`]: one-shot capability probe
//!
//! ## Design Principles
//!
//! This crate does not depend on any windowing system. Platform layers
//! classify their native events into [`RawEvent`]s at the boundary and feed
//! them to the tracker on their event-dispatch thread. All work is
//! synchronous and single-threaded.
//!
//! ## Integration
//!
//! ```ignore
//! let mut tracker = PointerTracker::attach(my_host, my_slider);
//!
//! // In the host's event callback:
//! if tracker.handle_event(&raw).is_consumed() {
//!     native_event.prevent_default();
//! }
//! ```

mod capture;
mod config;
mod event;
mod geometry;
mod id;
mod model;
mod state;
mod tracker;
mod traits;

#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use capture::CaptureSession;
pub use config::TrackerConfig;
pub use event::{DeviceFamily, Handled, Phase, PointerReport, Position, RawEvent, RawEventKind};
pub use geometry::{
    Offset, Point, Size, SurfaceGeometry, compute_delta, to_local_x, to_local_y,
};
pub use id::{PointerId, SurfaceId};
pub use model::{
    Capabilities, DOCUMENT_FALLBACK_LISTENERS, EventModel, Listener, ListenerScope, MouseCapture,
    Registration, StyleHint, select_event_model,
};
pub use tracker::PointerTracker;
pub use traits::{DrawSink, PointerHost};
