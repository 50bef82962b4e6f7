//! Event-model selection.
//!
//! Device capability is fixed for the lifetime of an attachment, so it is
//! probed exactly once and reduced to an immutable [`EventModel`] tag.

use crate::event::{DeviceFamily, RawEventKind};

/// What the host platform can do, reported once at attach time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Legacy Microsoft unified pointer events (`MSPointer*`) are available.
    pub unified_pointer: bool,
    /// Standard event registration (`addEventListener`) is available.
    pub event_listener: bool,
    /// Legacy event registration (`attachEvent`) is available.
    pub legacy_attach: bool,
    /// The target exposes an explicit mouse capture primitive.
    pub set_capture: bool,
    /// The capture primitive actually keeps delivering events once the mouse
    /// leaves the target. Some engines expose the primitive without honoring
    /// it; those must use document listeners instead.
    pub capture_retargets: bool,
}

impl Capabilities {
    #[inline]
    fn has_working_capture(&self) -> bool {
        self.set_capture && self.capture_retargets
    }
}

/// How mouse movement outside the target is observed under
/// [`EventModel::TouchAndMouse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseCapture {
    /// Explicit capture primitive on the target; move/up listen on the target.
    Primitive,
    /// Document-level move/up listeners added while the mouse is down.
    DocumentListeners,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventModel {
    UnifiedPointer,
    TouchAndMouse { mouse_capture: MouseCapture },
    LegacyMouseCapture,
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    Target,
    Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Registration {
    Standard,
    /// Legacy registration; the host must also suppress the event's default
    /// return value whenever the tracker reports it as consumed.
    Legacy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Listener {
    pub scope: ListenerScope,
    pub kind: RawEventKind,
    pub registration: Registration,
}

impl Listener {
    pub const fn target(kind: RawEventKind) -> Self {
        Self {
            scope: ListenerScope::Target,
            kind,
            registration: Registration::Standard,
        }
    }

    pub const fn document(kind: RawEventKind) -> Self {
        Self {
            scope: ListenerScope::Document,
            kind,
            registration: Registration::Standard,
        }
    }

    pub const fn legacy(kind: RawEventKind) -> Self {
        Self {
            scope: ListenerScope::Target,
            kind,
            registration: Registration::Legacy,
        }
    }
}

/// Style hints applied to the target so the platform does not claim touch
/// gestures for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleHint {
    TouchActionNone,
    ContentZoomingNone,
}

/// Listeners installed on the document while the mouse is down and no
/// capture primitive is usable.
pub const DOCUMENT_FALLBACK_LISTENERS: [Listener; 2] = [
    Listener::document(RawEventKind::MouseMove),
    Listener::document(RawEventKind::MouseUp),
];

/// Pick exactly one event model, in order of preference.
pub fn select_event_model(caps: &Capabilities) -> EventModel {
    if caps.unified_pointer {
        EventModel::UnifiedPointer
    } else if caps.event_listener {
        let mouse_capture = if caps.has_working_capture() {
            MouseCapture::Primitive
        } else {
            MouseCapture::DocumentListeners
        };
        EventModel::TouchAndMouse { mouse_capture }
    } else if caps.legacy_attach && caps.set_capture {
        EventModel::LegacyMouseCapture
    } else {
        EventModel::Unsupported
    }
}

impl EventModel {
    /// Listeners attached to the target for the whole attachment.
    pub fn target_listeners(self) -> Vec<Listener> {
        use RawEventKind::*;
        match self {
            EventModel::UnifiedPointer => [MsPointerDown, MsPointerMove, MsPointerUp, MsPointerCancel]
                .into_iter()
                .map(Listener::target)
                .collect(),
            EventModel::TouchAndMouse { mouse_capture } => {
                let mut listeners: Vec<Listener> =
                    [TouchStart, TouchMove, TouchEnd, TouchCancel, MouseDown]
                        .into_iter()
                        .map(Listener::target)
                        .collect();
                if mouse_capture == MouseCapture::Primitive {
                    listeners.push(Listener::target(MouseMove));
                    listeners.push(Listener::target(MouseUp));
                }
                listeners
            }
            EventModel::LegacyMouseCapture => [MouseDown, MouseMove, MouseUp]
                .into_iter()
                .map(Listener::legacy)
                .collect(),
            EventModel::Unsupported => Vec::new(),
        }
    }

    pub fn style_hints(self) -> &'static [StyleHint] {
        match self {
            EventModel::UnifiedPointer => {
                &[StyleHint::TouchActionNone, StyleHint::ContentZoomingNone]
            }
            _ => &[],
        }
    }

    /// Whether events of this kind belong to this model at all.
    pub fn accepts(self, kind: RawEventKind) -> bool {
        match (self, kind.family()) {
            (EventModel::UnifiedPointer, DeviceFamily::Pointer) => true,
            (EventModel::TouchAndMouse { .. }, DeviceFamily::Touch | DeviceFamily::Mouse) => true,
            (EventModel::LegacyMouseCapture, DeviceFamily::Mouse) => true,
            _ => false,
        }
    }

    /// Whether the mouse needs explicit capture (primitive or document
    /// fallback) while it is down.
    pub fn mouse_capture(self) -> Option<MouseCapture> {
        match self {
            EventModel::TouchAndMouse { mouse_capture } => Some(mouse_capture),
            EventModel::LegacyMouseCapture => Some(MouseCapture::Primitive),
            EventModel::UnifiedPointer | EventModel::Unsupported => None,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, EventModel::Unsupported)
    }

    pub fn describe(self) -> &'static str {
        match self {
            EventModel::UnifiedPointer => "unified pointer model",
            EventModel::TouchAndMouse {
                mouse_capture: MouseCapture::Primitive,
            } => "touch and mouse model with capture",
            EventModel::TouchAndMouse {
                mouse_capture: MouseCapture::DocumentListeners,
            } => "touch and mouse model with document listeners",
            EventModel::LegacyMouseCapture => "legacy mouse capture model",
            EventModel::Unsupported => "no supported event model",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RawEventKind::*;

    fn caps() -> Capabilities {
        Capabilities::default()
    }

    #[test]
    fn unified_pointer_wins_over_everything() {
        let c = Capabilities {
            unified_pointer: true,
            event_listener: true,
            legacy_attach: true,
            set_capture: true,
            capture_retargets: true,
        };
        assert_eq!(select_event_model(&c), EventModel::UnifiedPointer);
    }

    #[test]
    fn event_listener_with_working_capture_uses_primitive() {
        let c = Capabilities {
            event_listener: true,
            set_capture: true,
            capture_retargets: true,
            ..caps()
        };
        assert_eq!(
            select_event_model(&c),
            EventModel::TouchAndMouse {
                mouse_capture: MouseCapture::Primitive
            }
        );
    }

    #[test]
    fn non_retargeting_capture_falls_back_to_document_listeners() {
        let c = Capabilities {
            event_listener: true,
            set_capture: true,
            capture_retargets: false,
            ..caps()
        };
        assert_eq!(
            select_event_model(&c),
            EventModel::TouchAndMouse {
                mouse_capture: MouseCapture::DocumentListeners
            }
        );
    }

    #[test]
    fn legacy_requires_capture_primitive() {
        let with = Capabilities {
            legacy_attach: true,
            set_capture: true,
            ..caps()
        };
        assert_eq!(select_event_model(&with), EventModel::LegacyMouseCapture);

        let without = Capabilities {
            legacy_attach: true,
            ..caps()
        };
        assert_eq!(select_event_model(&without), EventModel::Unsupported);
    }

    #[test]
    fn nothing_available_is_unsupported() {
        let model = select_event_model(&caps());
        assert_eq!(model, EventModel::Unsupported);
        assert!(model.target_listeners().is_empty());
        assert!(!model.is_supported());
    }

    #[test]
    fn unified_model_listens_for_four_pointer_events_and_hints_style() {
        let model = EventModel::UnifiedPointer;
        let kinds: Vec<_> = model.target_listeners().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![MsPointerDown, MsPointerMove, MsPointerUp, MsPointerCancel]);
        assert_eq!(model.style_hints().len(), 2);
        assert_eq!(model.mouse_capture(), None);
    }

    #[test]
    fn document_fallback_only_listens_for_mousedown_on_target() {
        let model = EventModel::TouchAndMouse {
            mouse_capture: MouseCapture::DocumentListeners,
        };
        let kinds: Vec<_> = model.target_listeners().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![TouchStart, TouchMove, TouchEnd, TouchCancel, MouseDown]);
        assert!(model.style_hints().is_empty());
    }

    #[test]
    fn legacy_listeners_use_legacy_registration() {
        let listeners = EventModel::LegacyMouseCapture.target_listeners();
        assert_eq!(listeners.len(), 3);
        assert!(
            listeners
                .iter()
                .all(|l| l.registration == Registration::Legacy)
        );
    }

    #[test]
    fn models_reject_foreign_families() {
        assert!(!EventModel::UnifiedPointer.accepts(MouseDown));
        assert!(!EventModel::LegacyMouseCapture.accepts(TouchStart));
        assert!(EventModel::LegacyMouseCapture.accepts(MouseMove));
        assert!(!EventModel::Unsupported.accepts(MouseDown));
    }
}
