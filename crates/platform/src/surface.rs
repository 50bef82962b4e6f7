//! A rectangular track inside a window, acting as the tracker's target.
//!
//! The window plays the document and the track plays the target element.
//! Winit delivers every event to the window, so [`WinitSurface::route`]
//! decides which of them the target's listeners would actually have seen.

use std::collections::{BTreeSet, HashSet};

use pointer_core::{
    Capabilities, DeviceFamily, Listener, ListenerScope, Offset, Phase, Point, PointerHost,
    PointerId, PointerReport, RawEvent, RawEventKind, Size, StyleHint, SurfaceId,
};

/// Track bounds in logical window coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TrackRect {
    /// A track of `height` centred vertically, `margin` in from both sides.
    pub fn centered(window: (f32, f32), margin: f32, height: f32) -> Self {
        let (w, h) = window;
        Self {
            left: margin,
            top: ((h - height) / 2.0).max(0.0),
            width: (w - 2.0 * margin).max(0.0),
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

#[derive(Debug)]
pub struct WinitSurface {
    caps: Capabilities,
    id: SurfaceId,
    track: TrackRect,
    listeners: Vec<Listener>,
    style_hints: Vec<StyleHint>,
    mouse_captured: bool,
    pointer_captures: BTreeSet<PointerId>,
    /// Touch contacts that started on the track. Touches stay bound to the
    /// element they began on.
    touch_owners: HashSet<u64>,
}

impl WinitSurface {
    /// Winit reports touch and mouse input, and a held mouse keeps
    /// reporting outside the window, which is a working capture.
    pub fn capabilities() -> Capabilities {
        Capabilities {
            event_listener: true,
            set_capture: true,
            capture_retargets: true,
            ..Capabilities::default()
        }
    }

    pub fn new(id: SurfaceId, track: TrackRect) -> Self {
        Self::with_capabilities(id, track, Self::capabilities())
    }

    pub fn with_capabilities(id: SurfaceId, track: TrackRect, caps: Capabilities) -> Self {
        Self {
            caps,
            id,
            track,
            listeners: Vec::new(),
            style_hints: Vec::new(),
            mouse_captured: false,
            pointer_captures: BTreeSet::new(),
            touch_owners: HashSet::new(),
        }
    }

    #[inline]
    pub fn track(&self) -> TrackRect {
        self.track
    }

    /// Only call while no pointer is down.
    pub fn set_track(&mut self, track: TrackRect) {
        self.track = track;
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn style_hints(&self) -> &[StyleHint] {
        &self.style_hints
    }

    fn listens(&self, scope: ListenerScope, kind: RawEventKind) -> bool {
        self.listeners
            .iter()
            .any(|l| l.scope == scope && l.kind == kind)
    }

    /// Filter a window-level event down to what the installed listeners
    /// would receive. `None` means no listener fires.
    pub fn route(&mut self, event: &RawEvent) -> Option<RawEvent> {
        let kind = event.kind;
        let document = self.listens(ListenerScope::Document, kind);
        let target = self.listens(ListenerScope::Target, kind);
        if !document && !target {
            return None;
        }

        let reports: Vec<PointerReport> = match kind.family() {
            DeviceFamily::Touch => self.route_touches(event, target),
            DeviceFamily::Mouse => {
                let inside = self.report_inside(event);
                if document || (target && (inside || self.mouse_captured)) {
                    event.reports.clone()
                } else {
                    Vec::new()
                }
            }
            DeviceFamily::Pointer => event
                .reports
                .iter()
                .filter(|r| {
                    let captured = r
                        .pointer_id
                        .is_some_and(|id| self.pointer_captures.contains(&PointerId::from_raw(id)));
                    document || captured || self.contains_report(r)
                })
                .copied()
                .collect(),
        };

        if reports.is_empty() {
            return None;
        }
        Some(RawEvent::new(kind, reports))
    }

    fn route_touches(&mut self, event: &RawEvent, target: bool) -> Vec<PointerReport> {
        let mut out = Vec::with_capacity(event.reports.len());
        for report in &event.reports {
            let Some(contact) = report.identifier else {
                continue;
            };
            match event.kind.phase() {
                Phase::Begin => {
                    if target && self.contains_report(report) {
                        self.touch_owners.insert(contact);
                        out.push(*report);
                    }
                }
                Phase::Move => {
                    if self.touch_owners.contains(&contact) {
                        out.push(*report);
                    }
                }
                Phase::End | Phase::Cancel => {
                    if self.touch_owners.remove(&contact) {
                        out.push(*report);
                    }
                }
            }
        }
        out
    }

    fn report_inside(&self, event: &RawEvent) -> bool {
        event.reports.iter().any(|r| self.contains_report(r))
    }

    fn contains_report(&self, report: &PointerReport) -> bool {
        match report.position {
            pointer_core::Position::Page(p) => self.track.contains(p),
            pointer_core::Position::TargetOffset(p) => {
                p.x >= 0.0 && p.x <= self.track.width && p.y >= 0.0 && p.y <= self.track.height
            }
        }
    }
}

impl PointerHost for WinitSurface {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn offset_chain(&self) -> Vec<Offset> {
        vec![Offset::new(self.track.left, self.track.top)]
    }

    fn surface_size(&self) -> Size {
        Size::new(self.track.width, self.track.height)
    }

    fn add_listener(&mut self, listener: Listener) {
        if !self.listeners.contains(&listener) {
            log::trace!(target: "platform", "listen {:?} {}", listener.scope, listener.kind.name());
            self.listeners.push(listener);
        }
    }

    fn remove_listener(&mut self, listener: Listener) {
        self.listeners.retain(|l| *l != listener);
    }

    fn set_pointer_capture(&mut self, id: PointerId) {
        self.pointer_captures.insert(id);
    }

    fn release_pointer_capture(&mut self, id: PointerId) {
        self.pointer_captures.remove(&id);
    }

    fn set_capture(&mut self) {
        self.mouse_captured = true;
    }

    fn release_capture(&mut self) {
        self.mouse_captured = false;
    }

    fn apply_style_hint(&mut self, hint: StyleHint) {
        if !self.style_hints.contains(&hint) {
            self.style_hints.push(hint);
        }
    }
}
