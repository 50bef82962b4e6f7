//! The pointer lifecycle state machine.
//!
//! A [`PointerTracker`] is bound to one target surface. It owns the map of
//! pointers that are currently down, the cached surface geometry and the
//! capture session, and turns raw events into begin/extend/end calls on its
//! [`DrawSink`].
//!
//! Per pointer identity the machine has two states: up (absent from the map)
//! and down (present). Cancel behaves exactly like End.

use std::collections::HashMap;

use crate::capture::CaptureSession;
use crate::config::TrackerConfig;
use crate::event::{DeviceFamily, Handled, Phase, Position, RawEvent, RawEventKind};
use crate::geometry::SurfaceGeometry;
use crate::id::{PointerId, SurfaceId};
use crate::model::{EventModel, select_event_model};
use crate::state::PointerState;
use crate::traits::{DrawSink, PointerHost};

/// Normalizes raw input on one target into the unified protocol.
///
/// # Example
///
/// ```ignore
/// use pointer_core::test_harness::{FakeHost, RecordingSink};
/// use pointer_core::{PointerTracker, RawEvent, RawEventKind};
///
/// let host = FakeHost::touch_and_mouse().with_geometry((10.0, 20.0), (200.0, 50.0));
/// let mut tracker = PointerTracker::attach(host, RecordingSink::default());
///
/// tracker.handle_event(&RawEvent::mouse(RawEventKind::MouseDown, 60.0, 30.0));
/// tracker.handle_event(&RawEvent::mouse(RawEventKind::MouseMove, 500.0, 30.0));
/// tracker.handle_event(&RawEvent::mouse(RawEventKind::MouseUp, 500.0, 30.0));
///
/// assert_eq!(
///     tracker.sink().lines(),
///     ["begin 1 50 10", "extend 1 200 10", "end 1"]
/// );
/// ```
#[derive(Debug)]
pub struct PointerTracker<H: PointerHost, S: DrawSink> {
    host: H,
    sink: S,
    config: TrackerConfig,
    model: EventModel,
    surface: SurfaceId,
    geometry: SurfaceGeometry,
    pointers: HashMap<PointerId, PointerState>,
    capture: CaptureSession,
}

impl<H: PointerHost, S: DrawSink> PointerTracker<H, S> {
    pub fn attach(host: H, sink: S) -> Self {
        Self::attach_with_config(host, sink, TrackerConfig::default())
    }

    /// Probe the host once, select the event model and install its listeners.
    ///
    /// An unsupported host is not an error: no listeners are attached, a
    /// diagnostic is logged and the surface stays inert.
    pub fn attach_with_config(mut host: H, mut sink: S, config: TrackerConfig) -> Self {
        let model = select_event_model(&host.capabilities());

        if model.is_supported() {
            for listener in model.target_listeners() {
                host.add_listener(listener);
            }
            for &hint in model.style_hints() {
                host.apply_style_hint(hint);
            }
            log::info!(target: "pointer.model", "using {}", model.describe());
            if config.log_model_selection {
                sink.on_log(&format!("Using {}", model.describe()));
            }
        } else {
            let msg = "No supported pointer event model; the surface will not respond to input";
            log::warn!(target: "pointer.model", "{msg}");
            sink.on_log(msg);
        }

        let geometry = SurfaceGeometry::capture(&host);
        let surface = host.surface_id();

        Self {
            host,
            sink,
            config,
            model,
            surface,
            geometry,
            pointers: HashMap::new(),
            capture: CaptureSession::new(),
        }
    }

    /// Feed one raw event through the state machine.
    ///
    /// Events run to completion before returning. The result tells the host
    /// whether to suppress the platform's default handling.
    pub fn handle_event(&mut self, event: &RawEvent) -> Handled {
        if !self.model.accepts(event.kind) {
            log::trace!(
                target: "pointer.tracker",
                "{} not part of the {}",
                event.kind.name(),
                self.model.describe()
            );
            return Handled::Ignored;
        }

        let phase = event.phase();
        // Nothing is down: skip the per-report work for hover moves.
        // Legacy registration still suppresses the return value on every
        // event it sees.
        if phase == Phase::Move && self.pointers.is_empty() {
            return match self.model {
                EventModel::LegacyMouseCapture => Handled::Consumed,
                _ => Handled::Ignored,
            };
        }

        let family = event.kind.family();
        for report in &event.reports {
            let id = report.resolve_id(self.config.mouse_pointer_id);
            match phase {
                Phase::Begin => self.begin(event.kind, family, id, report.position),
                Phase::Move => self.extend(id, report.position),
                Phase::End | Phase::Cancel => self.end(id),
            }
        }

        #[cfg(feature = "tracker-invariants")]
        self.check_invariants();

        Handled::Consumed
    }

    fn begin(&mut self, kind: RawEventKind, family: DeviceFamily, id: PointerId, position: Position) {
        // The target may have moved since the last interaction.
        self.geometry = SurfaceGeometry::capture(&self.host);
        let page = position.to_page(&self.geometry);

        if self.pointers.contains_key(&id) {
            self.finish(id);
            let msg = format!("Ended draw on pointer {id} in {}", kind.name());
            log::debug!(target: "pointer.tracker", "missed end: {msg}");
            self.sink.on_log(&msg);
        }

        let local = self.geometry.to_local(page);
        log::trace!(target: "pointer.tracker", "begin {id} at {local:?}");
        self.sink.on_begin(self.surface, id, local.x, local.y);
        self.pointers.insert(id, PointerState::new(page, family));
        self.capture.acquire(&mut self.host, self.model, family, id);
    }

    fn extend(&mut self, id: PointerId, position: Position) {
        let Some(state) = self.pointers.get_mut(&id) else {
            return;
        };
        let page = position.to_page(&self.geometry);
        if !state.advance(page) {
            return;
        }
        let local = self.geometry.to_local(page);
        self.sink.on_extend(self.surface, id, local.x, local.y);
    }

    fn end(&mut self, id: PointerId) {
        if self.pointers.contains_key(&id) {
            log::trace!(target: "pointer.tracker", "end {id}");
            self.finish(id);
        }
    }

    fn finish(&mut self, id: PointerId) {
        if let Some(state) = self.pointers.remove(&id) {
            self.sink.on_end(self.surface, id);
            self.capture
                .release(&mut self.host, self.model, state.family, id);
        }
    }

    /// End every pointer that is down, in ascending id order, and release
    /// capture.
    pub fn reset(&mut self) {
        let ids = self.active_ids();
        if ids.is_empty() {
            return;
        }
        log::debug!(target: "pointer.tracker", "reset ends {} pointer(s)", ids.len());
        for id in ids {
            self.finish(id);
        }
    }

    /// End all interactions, remove every listener and hand the collaborators
    /// back.
    pub fn detach(mut self) -> (H, S) {
        self.reset();
        self.capture.teardown(&mut self.host);
        for listener in self.model.target_listeners() {
            self.host.remove_listener(listener);
        }
        log::debug!(target: "pointer.tracker", "detached from {:?}", self.surface);
        (self.host, self.sink)
    }

    /// Read-only snapshot of the pointers that are down, for periodic
    /// diagnostics. `None` while idle.
    pub fn audit(&self) -> Option<String> {
        if self.pointers.is_empty() {
            return None;
        }
        let mut msg = String::from("Current pointer ids:");
        for id in self.active_ids() {
            msg.push(' ');
            msg.push_str(&id.to_string());
        }
        Some(msg)
    }

    #[inline]
    pub fn model(&self) -> EventModel {
        self.model
    }

    #[inline]
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    #[inline]
    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    #[inline]
    pub fn is_down(&self, id: PointerId) -> bool {
        self.pointers.contains_key(&id)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn active_ids(&self) -> Vec<PointerId> {
        let mut ids: Vec<PointerId> = self.pointers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[inline]
    pub fn capture(&self) -> &CaptureSession {
        &self.capture
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access for hosts that update their own geometry. Must not
    /// be used to relocate the target while a pointer is down.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[cfg(feature = "tracker-invariants")]
    fn check_invariants(&self) {
        let mouse_down = self
            .pointers
            .values()
            .filter(|st| st.family == DeviceFamily::Mouse)
            .count();
        let expected_holders = if self.model.mouse_capture().is_some() {
            mouse_down
        } else {
            0
        };
        assert_eq!(
            self.capture.mouse_holders(),
            expected_holders,
            "mouse capture holders out of sync with down pointers"
        );
        assert_eq!(
            self.capture.is_engaged(),
            expected_holders > 0,
            "mouse capture engagement out of sync with down pointers"
        );
        for id in self.capture.captured_pointers() {
            assert!(
                self.pointers.contains_key(&id),
                "pointer capture held for {id} which is not down"
            );
        }
    }
}
