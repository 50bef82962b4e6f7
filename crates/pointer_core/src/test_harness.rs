//! In-memory host and recording sink for exercising the tracker without a
//! platform.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::geometry::{Offset, Size};
use crate::id::{PointerId, SurfaceId};
use crate::model::{Capabilities, Listener, ListenerScope, StyleHint};
use crate::traits::{DrawSink, PointerHost};

/// Every mutating call the tracker made on a [`FakeHost`], in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    AddListener(Listener),
    RemoveListener(Listener),
    SetPointerCapture(PointerId),
    ReleasePointerCapture(PointerId),
    SetCapture,
    ReleaseCapture,
    ApplyStyleHint(StyleHint),
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCall::AddListener(l) => write!(f, "add {:?} {}", l.scope, l.kind.name()),
            HostCall::RemoveListener(l) => write!(f, "remove {:?} {}", l.scope, l.kind.name()),
            HostCall::SetPointerCapture(id) => write!(f, "set-pointer-capture {id}"),
            HostCall::ReleasePointerCapture(id) => write!(f, "release-pointer-capture {id}"),
            HostCall::SetCapture => f.write_str("set-capture"),
            HostCall::ReleaseCapture => f.write_str("release-capture"),
            HostCall::ApplyStyleHint(h) => write!(f, "style {h:?}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FakeHost {
    caps: Capabilities,
    surface: SurfaceId,
    chain: Vec<Offset>,
    size: Size,
    listeners: Vec<Listener>,
    calls: Vec<HostCall>,
    mouse_captured: bool,
    pointer_captures: BTreeSet<PointerId>,
}

impl FakeHost {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            surface: SurfaceId::from_raw(1),
            chain: Vec::new(),
            size: Size::new(100.0, 100.0),
            listeners: Vec::new(),
            calls: Vec::new(),
            mouse_captured: false,
            pointer_captures: BTreeSet::new(),
        }
    }

    pub fn unified_pointer() -> Self {
        Self::new(Capabilities {
            unified_pointer: true,
            event_listener: true,
            ..Capabilities::default()
        })
    }

    /// Touch events plus mouse events with a working capture primitive.
    pub fn touch_and_mouse() -> Self {
        Self::new(Capabilities {
            event_listener: true,
            set_capture: true,
            capture_retargets: true,
            ..Capabilities::default()
        })
    }

    /// Touch events plus mouse events tracked through document listeners.
    pub fn touch_and_mouse_without_capture() -> Self {
        Self::new(Capabilities {
            event_listener: true,
            ..Capabilities::default()
        })
    }

    pub fn legacy_mouse() -> Self {
        Self::new(Capabilities {
            legacy_attach: true,
            set_capture: true,
            ..Capabilities::default()
        })
    }

    pub fn unsupported() -> Self {
        Self::new(Capabilities::default())
    }

    pub fn with_surface_id(mut self, surface: SurfaceId) -> Self {
        self.surface = surface;
        self
    }

    /// Single-link offset chain placing the target at `delta`.
    pub fn with_geometry(mut self, delta: (f32, f32), size: (f32, f32)) -> Self {
        self.set_geometry(delta, size);
        self
    }

    pub fn with_offset_chain(mut self, chain: Vec<Offset>) -> Self {
        self.chain = chain;
        self
    }

    pub fn set_geometry(&mut self, delta: (f32, f32), size: (f32, f32)) {
        self.chain = vec![Offset::new(delta.0, delta.1)];
        self.size = Size::new(size.0, size.1);
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn count_calls(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Listeners currently installed.
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn document_listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.scope == ListenerScope::Document)
            .count()
    }

    pub fn has_mouse_capture(&self) -> bool {
        self.mouse_captured
    }

    pub fn pointer_captures(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.pointer_captures.iter().copied()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl PointerHost for FakeHost {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    fn offset_chain(&self) -> Vec<Offset> {
        self.chain.clone()
    }

    fn surface_size(&self) -> Size {
        self.size
    }

    fn add_listener(&mut self, listener: Listener) {
        // Registering the same listener twice is a no-op, like the DOM.
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
        self.calls.push(HostCall::AddListener(listener));
    }

    fn remove_listener(&mut self, listener: Listener) {
        self.listeners.retain(|l| *l != listener);
        self.calls.push(HostCall::RemoveListener(listener));
    }

    fn set_pointer_capture(&mut self, id: PointerId) {
        self.pointer_captures.insert(id);
        self.calls.push(HostCall::SetPointerCapture(id));
    }

    fn release_pointer_capture(&mut self, id: PointerId) {
        self.pointer_captures.remove(&id);
        self.calls.push(HostCall::ReleasePointerCapture(id));
    }

    fn set_capture(&mut self) {
        self.mouse_captured = true;
        self.calls.push(HostCall::SetCapture);
    }

    fn release_capture(&mut self) {
        self.mouse_captured = false;
        self.calls.push(HostCall::ReleaseCapture);
    }

    fn apply_style_hint(&mut self, hint: StyleHint) {
        self.calls.push(HostCall::ApplyStyleHint(hint));
    }
}

/// Records callbacks as text lines: `begin <id> <x> <y>`,
/// `extend <id> <x> <y>`, `end <id>`. Diagnostics go to a separate list.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    lines: Vec<String>,
    logs: Vec<String>,
}

impl RecordingSink {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Number of lines starting with `verb`.
    pub fn count(&self, verb: &str) -> usize {
        self.lines
            .iter()
            .filter(|l| l.split(' ').next() == Some(verb))
            .count()
    }

    pub fn lines_for(&self, id: PointerId) -> Vec<String> {
        let id = id.to_string();
        self.lines
            .iter()
            .filter(|l| l.split(' ').nth(1) == Some(id.as_str()))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.logs.clear();
    }
}

impl DrawSink for RecordingSink {
    fn on_begin(&mut self, _surface: SurfaceId, id: PointerId, x: f32, y: f32) {
        self.lines.push(format!("begin {id} {x} {y}"));
    }

    fn on_extend(&mut self, _surface: SurfaceId, id: PointerId, x: f32, y: f32) {
        self.lines.push(format!("extend {id} {x} {y}"));
    }

    fn on_end(&mut self, _surface: SurfaceId, id: PointerId) {
        self.lines.push(format!("end {id}"));
    }

    fn on_log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }
}

/// Verify the begin/extend*/end discipline per identity over recorded lines.
///
/// Returns the identities still down at the end of the log, or a description
/// of the first violation.
pub fn check_lifecycle<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, String> {
    let mut down: HashMap<String, bool> = HashMap::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let mut parts = line.split(' ');
        let verb = parts.next().unwrap_or_default();
        let Some(id) = parts.next() else {
            return Err(format!("line {}: missing pointer id in {line:?}", idx + 1));
        };
        let is_down = down.get(id).copied().unwrap_or(false);
        match verb {
            "begin" if is_down => {
                return Err(format!("line {}: begin for {id} which is already down", idx + 1));
            }
            "begin" => {
                down.insert(id.to_string(), true);
            }
            "extend" if !is_down => {
                return Err(format!("line {}: extend for {id} which is up", idx + 1));
            }
            "end" if !is_down => {
                return Err(format!("line {}: end for {id} which is up", idx + 1));
            }
            "end" => {
                down.insert(id.to_string(), false);
            }
            "extend" => {}
            other => return Err(format!("line {}: unknown verb {other:?}", idx + 1)),
        }
    }
    let mut still_down: Vec<String> = down
        .into_iter()
        .filter_map(|(id, d)| d.then_some(id))
        .collect();
    still_down.sort();
    Ok(still_down)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_check_accepts_well_formed_logs() {
        let lines = ["begin 0 1 1", "begin 1 2 2", "extend 0 3 3", "end 0"];
        assert_eq!(check_lifecycle(&lines), Ok(vec!["1".to_string()]));
    }

    #[test]
    fn lifecycle_check_rejects_double_begin() {
        let lines = ["begin 0 1 1", "begin 0 1 1"];
        assert!(check_lifecycle(&lines).is_err());
    }

    #[test]
    fn lifecycle_check_rejects_orphan_end() {
        assert!(check_lifecycle(&["end 4"]).is_err());
        assert!(check_lifecycle(&["extend 4 0 0"]).is_err());
    }

    #[test]
    fn fake_host_deduplicates_listeners() {
        let mut host = FakeHost::touch_and_mouse();
        let l = Listener::document(crate::RawEventKind::MouseMove);
        host.add_listener(l);
        host.add_listener(l);
        assert_eq!(host.document_listener_count(), 1);
        host.remove_listener(l);
        assert_eq!(host.document_listener_count(), 0);
        assert_eq!(host.calls().len(), 3);
    }

    #[test]
    fn offset_chain_sums_into_the_delta() {
        let mut host = FakeHost::touch_and_mouse()
            .with_surface_id(SurfaceId::from_raw(9))
            .with_offset_chain(vec![Offset::new(5.0, 1.0), Offset::new(10.0, 2.0)]);
        assert_eq!(host.surface_id(), SurfaceId::from_raw(9));
        let geometry = crate::SurfaceGeometry::capture(&host);
        assert_eq!(geometry.delta, crate::Point::new(15.0, 3.0));

        host.set_capture();
        host.clear_calls();
        assert!(host.calls().is_empty());
        assert!(host.has_mouse_capture());
    }

    #[test]
    fn recording_sink_clear_forgets_everything() {
        let mut sink = RecordingSink::default();
        sink.on_begin(SurfaceId::from_raw(1), PointerId::MOUSE, 1.0, 2.0);
        sink.on_log("hello");
        sink.clear();
        assert!(sink.lines().is_empty());
        assert!(sink.logs().is_empty());
    }
}
